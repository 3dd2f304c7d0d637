use thiserror::Error;

/// Error for ProductId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Product invariant violations, reported one rule at a time.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ProductValidationError {
    #[error("id is required")]
    IdRequired,

    #[error("id is invalid")]
    IdInvalid,

    #[error("name is required")]
    NameRequired,

    #[error("price is required")]
    PriceRequired,

    #[error("price is invalid")]
    PriceInvalid,
}

/// Top-level error type for all product-related operations
#[derive(Debug, Clone, Error)]
pub enum ProductError {
    #[error("Invalid product ID: {0}")]
    InvalidProductId(#[from] ProductIdError),

    #[error("Invalid product: {0}")]
    Validation(#[from] ProductValidationError),

    #[error("Product not found: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
