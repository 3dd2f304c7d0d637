use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::GenerateTokenCommand;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Argon2 work runs on the blocking pool so a burst of logins cannot stall
/// the async workers that accept requests.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Hasher and token issuer built from configuration
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let CreateUserCommand {
            name,
            email,
            password,
        } = command;

        let user = tokio::task::spawn_blocking(move || {
            User::new(name, email, &password, authenticator.password_hasher())
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))??;

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn generate_token(&self, command: GenerateTokenCommand) -> Result<String, UserError> {
        let GenerateTokenCommand { email, password } = command;

        let user = self.repository.find_by_email(&email).await?;
        let known_email = user.is_some();
        let authenticator = Arc::clone(&self.authenticator);

        // Unknown emails still pay for one verification
        let outcome = tokio::task::spawn_blocking(move || match user {
            Some(user) => authenticator
                .authenticate(&password, user.password_hash(), user.id)
                .map(|result| (user.id, result.access_token)),
            None => Err(authenticator.reject(&password)),
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?;

        match outcome {
            Ok((user_id, access_token)) => {
                tracing::info!(user_id = %user_id, "Access token issued");
                Ok(access_token)
            }
            Err(e) => {
                tracing::debug!(known_email, reason = %e, "Token request rejected");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use auth::AuthenticationError;
    use auth::JwtError;
    use auth::PasswordHasher;
    use auth::WorkFactor;
    use mockall::mock;

    use super::*;

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    // Define mocks in the test module using mockall
    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
        }
    }

    fn hasher() -> PasswordHasher {
        PasswordHasher::with_work_factor(WorkFactor {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(SECRET, 300, hasher()).unwrap())
    }

    fn existing_user() -> User {
        User::new("John Doe", "j@j.com", "password", &hasher()).unwrap()
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repository = MockTestUserRepository::new();

        // Set up mock expectations
        repository
            .expect_create()
            .withf(|user| {
                user.name == "John Doe"
                    && user.email == "j@j.com"
                    && user.password_hash().starts_with("$argon2id")
                    && user.validate_password("password")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository), authenticator());

        let command = CreateUserCommand::new(
            "John Doe".to_string(),
            "j@j.com".to_string(),
            "password".to_string(),
        );

        let user = service.create_user(command).await.unwrap();
        assert_eq!(user.name, "John Doe");
        assert_eq!(user.email, "j@j.com");
        assert_ne!(user.password_hash(), "password");
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .times(1)
            .returning(|_| Err(UserError::EmailAlreadyExists));

        let service = UserService::new(Arc::new(repository), authenticator());

        let command = CreateUserCommand::new(
            "John Doe".to_string(),
            "j@j.com".to_string(),
            "password".to_string(),
        );

        let result = service.create_user(command).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists)));
    }

    #[tokio::test]
    async fn test_generate_token_success() {
        let mut repository = MockTestUserRepository::new();

        let user = existing_user();
        let user_id = user.id;
        repository
            .expect_find_by_email()
            .withf(|email| email == "j@j.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let authenticator = authenticator();
        let service = UserService::new(Arc::new(repository), Arc::clone(&authenticator));

        let token = service
            .generate_token(GenerateTokenCommand {
                email: "j@j.com".to_string(),
                password: "password".to_string(),
            })
            .await
            .unwrap();

        let claims = authenticator.validate_token(&token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.exp - claims.iat, 300);
    }

    #[tokio::test]
    async fn test_generate_token_wrong_password() {
        let mut repository = MockTestUserRepository::new();

        let user = existing_user();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service
            .generate_token(GenerateTokenCommand {
                email: "j@j.com".to_string(),
                password: "passwd".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_generate_token_unknown_email_matches_wrong_password() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service
            .generate_token(GenerateTokenCommand {
                email: "nobody@j.com".to_string(),
                password: "password".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_generate_token_storage_failure() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(UserError::DatabaseError("connection reset".to_string())));

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service
            .generate_token(GenerateTokenCommand {
                email: "j@j.com".to_string(),
                password: "password".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_unknown_email_costs_as_much_as_wrong_password() {
        const ATTEMPTS: u32 = 3;

        // Heavy enough that skipping the verification would be obvious
        let hasher = || {
            PasswordHasher::with_work_factor(WorkFactor {
                memory_kib: 4096,
                iterations: 2,
                parallelism: 1,
            })
            .unwrap()
        };
        let authenticator = Arc::new(Authenticator::new(SECRET, 300, hasher()).unwrap());
        let user = User::new("John Doe", "j@j.com", "password", &hasher()).unwrap();

        let mut known = MockTestUserRepository::new();
        known
            .expect_find_by_email()
            .times(ATTEMPTS as usize)
            .returning(move |_| Ok(Some(user.clone())));
        let mut unknown = MockTestUserRepository::new();
        unknown
            .expect_find_by_email()
            .times(ATTEMPTS as usize)
            .returning(|_| Ok(None));

        let known = UserService::new(Arc::new(known), Arc::clone(&authenticator));
        let unknown = UserService::new(Arc::new(unknown), authenticator);

        let command = || GenerateTokenCommand {
            email: "j@j.com".to_string(),
            password: "passwd".to_string(),
        };

        let started = Instant::now();
        for _ in 0..ATTEMPTS {
            let result = known.generate_token(command()).await;
            assert!(matches!(result, Err(UserError::InvalidCredentials)));
        }
        let wrong_password = started.elapsed();

        let started = Instant::now();
        for _ in 0..ATTEMPTS {
            let result = unknown.generate_token(command()).await;
            assert!(matches!(result, Err(UserError::InvalidCredentials)));
        }
        let unknown_email = started.elapsed();

        assert!(
            unknown_email * 4 >= wrong_password,
            "unknown email took {:?}, wrong password took {:?}",
            unknown_email,
            wrong_password
        );
    }

    #[test]
    fn test_authentication_error_converts() {
        let err: UserError = AuthenticationError::InvalidCredentials.into();
        assert!(matches!(err, UserError::InvalidCredentials));

        let err: UserError =
            AuthenticationError::JwtError(JwtError::EncodingFailed("boom".to_string())).into();
        assert!(matches!(err, UserError::Token(_)));
    }

    #[test]
    fn test_token_error_converts() {
        let err: UserError = JwtError::EncodingFailed("boom".to_string()).into();
        assert!(matches!(err, UserError::Token(_)));
    }
}
