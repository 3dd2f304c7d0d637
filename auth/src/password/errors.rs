use thiserror::Error;

/// Error type for password operations.
///
/// Messages describe the failing step only; they never carry the plaintext
/// or the stored hash.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid work factor: {0}")]
    InvalidWorkFactor(String),
}
