use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Holds the process-wide signing secret, token lifetime and hashing work
/// factor. All three are fixed at construction.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl_seconds: i64,
    // Hash of no real account, verified against when the account is unknown
    placeholder_hash: String,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `token_ttl_seconds` - Lifetime of issued tokens
    /// * `password_hasher` - Hasher carrying the configured work factor
    ///
    /// # Errors
    /// * `HashingFailed` - The placeholder credential could not be hashed
    pub fn new(
        jwt_secret: &[u8],
        token_ttl_seconds: i64,
        password_hasher: PasswordHasher,
    ) -> Result<Self, PasswordError> {
        let placeholder_hash = password_hasher.hash("")?;

        Ok(Self {
            password_hasher,
            jwt_handler: JwtHandler::new(jwt_secret),
            token_ttl_seconds,
            placeholder_hash,
        })
    }

    /// Hasher used for new credentials.
    pub fn password_hasher(&self) -> &PasswordHasher {
        &self.password_hasher
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: impl ToString,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.issue(subject, self.token_ttl_seconds)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Runs the same verification work as [`Authenticator::authenticate`] so
    /// the response time matches a wrong password.
    pub fn reject(&self, password: &str) -> AuthenticationError {
        let _ = self.password_hasher.verify(password, &self.placeholder_hash);
        AuthenticationError::InvalidCredentials
    }

    /// Validate and decode JWT token.
    ///
    /// # Errors
    /// * `SignatureInvalid`, `Expired`, `Malformed` - see [`JwtHandler::verify`]
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::WorkFactor;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn hasher() -> PasswordHasher {
        PasswordHasher::with_work_factor(WorkFactor {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    fn authenticator() -> Authenticator {
        Authenticator::new(SECRET, 300, hasher()).unwrap()
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        // Hash a password
        let password = "my_password";
        let hash = authenticator
            .password_hasher()
            .hash(password)
            .expect("Failed to hash password");

        // Authenticate with correct password
        let result = authenticator
            .authenticate(password, &hash, "user123")
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());

        // Validate the token
        let claims = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.exp - claims.iat, 300);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = hasher().hash("my_password").expect("Failed to hash password");

        let result = authenticator.authenticate("wrong_password", &hash, "user123");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_malformed_hash() {
        let authenticator = authenticator();

        let result = authenticator.authenticate("my_password", "not-a-hash", "user123");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_with_out_of_range_ttl() {
        let authenticator = Authenticator::new(SECRET, i64::MAX, hasher()).unwrap();
        let hash = hasher().hash("my_password").unwrap();

        let result = authenticator.authenticate("my_password", &hash, "user123");
        assert!(matches!(
            result,
            Err(AuthenticationError::JwtError(JwtError::EncodingFailed(_)))
        ));
    }

    #[test]
    fn test_reject_verifies_against_configured_work_factor() {
        let authenticator = authenticator();

        // Placeholder is a real hash at the configured cost, not a cheap stand-in
        assert!(authenticator
            .placeholder_hash
            .starts_with("$argon2id$v=19$m=8,t=1,p=1$"));
        assert!(authenticator
            .password_hasher()
            .verify("", &authenticator.placeholder_hash));

        assert!(matches!(
            authenticator.reject("my_password"),
            AuthenticationError::InvalidCredentials
        ));
    }

    #[test]
    fn test_placeholder_hash_is_salted_per_instance() {
        assert_ne!(authenticator().placeholder_hash, authenticator().placeholder_hash);
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = authenticator();

        let result = authenticator.validate_token("invalid.token.here");
        assert!(result.is_err());
    }
}
