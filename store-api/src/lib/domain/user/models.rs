use std::fmt;

use auth::PasswordHasher;
use uuid::Uuid;

use crate::domain::user::errors::UserError;
use crate::domain::user::errors::UserIdError;

/// User aggregate entity.
///
/// Holds an Argon2 hash of the password, never the plaintext. The only public
/// constructor hashes a caller-supplied plaintext, so a `User` cannot be built
/// around a hash chosen by the caller.
#[derive(Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    password_hash: String,
}

impl User {
    /// Register a new user.
    ///
    /// Assigns a fresh id and hashes `password`. No format checks are applied
    /// to `name` or `email`.
    ///
    /// # Errors
    /// * `Password` - Hashing failed
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: &str,
        hasher: &PasswordHasher,
    ) -> Result<Self, UserError> {
        let password_hash = hasher.hash(password)?;

        Ok(Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
            password_hash,
        })
    }

    /// Rebuild a user read back from storage.
    pub(crate) fn from_storage(
        id: UserId,
        name: String,
        email: String,
        password_hash: String,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
        }
    }

    /// Stored credential (PHC string).
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Check a plaintext password against the stored hash.
    ///
    /// Returns false on mismatch; never fails.
    pub fn validate_password(&self, password: &str) -> bool {
        PasswordHasher::default().verify(password, &self.password_hash)
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new user
#[derive(Debug)]
pub struct CreateUserCommand {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl CreateUserCommand {
    /// Construct a new create user command.
    ///
    /// # Arguments
    /// * `name` - Display name
    /// * `email` - Login email
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(name: String, email: String, password: String) -> Self {
        Self {
            name,
            email,
            password,
        }
    }
}

/// Login credentials exchanged for an access token
#[derive(Debug)]
pub struct GenerateTokenCommand {
    pub email: String,
    pub password: String,
}
