use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;
use uuid::Variant;

use crate::domain::product::errors::ProductIdError;
use crate::domain::product::errors::ProductValidationError;

/// Product unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(pub Uuid);

impl ProductId {
    /// Generate a new random product ID.
    ///
    /// # Returns
    /// ProductId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a product ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ProductIdError> {
        Uuid::parse_str(s)
            .map(ProductId)
            .map_err(|e| ProductIdError::InvalidFormat(e.to_string()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Product entity.
///
/// A product that passes [`Product::validate`] has a non-nil RFC 4122 id, a
/// non-empty name and a finite, strictly positive price.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Create a validated product with a fresh id and the current time.
    ///
    /// # Errors
    /// The first rule violated, see [`Product::validate`]
    pub fn new(name: impl Into<String>, price: f64) -> Result<Self, ProductValidationError> {
        let product = Self {
            id: ProductId::new(),
            name: name.into(),
            price,
            created_at: Utc::now(),
        };
        product.validate()?;

        Ok(product)
    }

    /// Check the product invariants.
    ///
    /// Rules run in a fixed order and the first failure wins: id present,
    /// id well-formed, name present, price non-zero, price positive.
    ///
    /// # Errors
    /// * `IdRequired` - Id is the nil UUID
    /// * `IdInvalid` - Id is not an RFC 4122 UUID
    /// * `NameRequired` - Name is empty
    /// * `PriceRequired` - Price is exactly zero
    /// * `PriceInvalid` - Price is negative or not finite
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        if self.id.0.is_nil() {
            return Err(ProductValidationError::IdRequired);
        }

        if self.id.0.get_variant() != Variant::RFC4122 {
            return Err(ProductValidationError::IdInvalid);
        }

        if self.name.is_empty() {
            return Err(ProductValidationError::NameRequired);
        }

        if self.price == 0.0 {
            return Err(ProductValidationError::PriceRequired);
        }

        if self.price < 0.0 || !self.price.is_finite() {
            return Err(ProductValidationError::PriceInvalid);
        }

        Ok(())
    }
}

/// Command to create a product
#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub name: String,
    pub price: f64,
}

/// Command to replace a product's mutable fields
#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub name: String,
    pub price: f64,
}

/// Ordering of product listings by creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse a sort parameter, falling back to ascending for anything unknown.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.to_ascii_lowercase()) {
            Some(v) if v == "desc" => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Listing parameters.
///
/// Pagination applies only when both `page` and `limit` are positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListProductsQuery {
    pub page: u32,
    pub limit: u32,
    pub sort: SortOrder,
}

impl ListProductsQuery {
    /// Offset and row count, when paginated.
    pub fn window(&self) -> Option<(u64, u64)> {
        if self.page == 0 || self.limit == 0 {
            return None;
        }
        let limit = u64::from(self.limit);
        Some((u64::from(self.page - 1) * limit, limit))
    }
}
