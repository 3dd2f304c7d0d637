use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Session token claims.
///
/// `sub` carries the authenticated principal, `exp` bounds the token's
/// lifetime. Both are Unix timestamps in seconds where applicable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,
}

impl Claims {
    /// Create claims for a subject expiring `ttl_seconds` from now.
    ///
    /// # Arguments
    /// * `subject` - Unique principal identifier
    /// * `ttl_seconds` - Seconds until token expires
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiration falls outside the representable range
    pub fn new(subject: impl ToString, ttl_seconds: i64) -> Result<Self, JwtError> {
        let now = Utc::now();
        let expiration = Duration::try_seconds(ttl_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                JwtError::EncodingFailed(format!("token lifetime out of range: {}s", ttl_seconds))
            })?;

        Ok(Self {
            sub: subject.to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
        })
    }
}
