use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use tracing::info;

use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{CreateUserRequest, LoginRequest, User};
use crate::infrastructure::jwt::JwtService;

#[derive(Debug, Clone)]
pub(crate) struct AuthResult {
    pub(crate) token: String,
    pub(crate) user_id: String,
}

pub(crate) struct AuthService<R: UserRepository> {
    repo: R,
    jwt: JwtService,
}

impl<R: UserRepository> AuthService<R> {
    pub(crate) fn new(repo: R, jwt: JwtService) -> Self {
        Self { repo, jwt }
    }

    pub(crate) fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    pub(crate) async fn create_user(&self, req: CreateUserRequest) -> Result<User, DomainError> {
        let req = req.validate()?;

        if self.repo.find_by_email(&req.email).await?.is_some() {
            return Err(DomainError::AlreadyExists);
        }

        let password_hash = self.hash_password(&req.password)?;
        let user = self
            .repo
            .create_user(NewUser {
                email: req.email,
                name: req.name,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<AuthResult, DomainError> {
        let creds = self
            .repo
            .find_by_email(&req.email)
            .await?
            .ok_or(DomainError::NoSuchUser)?;

        self.verify_password(&req.password, &creds.password_hash)?;

        let token = self
            .jwt
            .issue(&creds.user.id, &creds.user.email)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        Ok(AuthResult {
            token,
            user_id: creds.user.id,
        })
    }

    pub(crate) fn hash_password(&self, raw_password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Self::argon2()?
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    pub(crate) fn verify_password(
        &self,
        raw_password: &str,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Self::argon2()?
            .verify_password(raw_password.as_bytes(), &parsed_hash)
            .map_err(|err| match err {
                PasswordHashError::Password => DomainError::BadPassword,
                _ => DomainError::Unexpected(err.to_string()),
            })?;

        Ok(())
    }

    fn argon2() -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(19 * 1024, 2, 1, None)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

#[cfg(test)]
mod tests {
    use super::AuthService;
    use crate::data::repositories::memory::InMemoryUserRepository;
    use crate::data::user_repository::UserRepository;
    use crate::domain::error::DomainError;
    use crate::domain::user::{CreateUserRequest, LoginRequest};
    use crate::infrastructure::jwt::JwtService;

    fn service() -> (AuthService<InMemoryUserRepository>, InMemoryUserRepository) {
        let repo = InMemoryUserRepository::new();
        let service = AuthService::new(repo.clone(), test_jwt());
        (service, repo)
    }

    fn signup(email: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_string(),
            name: "Reader".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn create_user_hashes_password_and_sets_default_status() {
        let (service, repo) = service();

        let user = service
            .create_user(signup("reader@example.com", "secret"))
            .await
            .expect("create_user must succeed");

        assert_eq!(user.email, "reader@example.com");
        assert_eq!(user.status, "I am new!");
        assert!(user.post_ids.is_empty());

        let creds = repo
            .find_by_email("reader@example.com")
            .await
            .expect("lookup must succeed")
            .expect("user must be stored");
        assert_ne!(creds.password_hash, "secret");
        assert!(creds.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn create_user_rejects_invalid_input_before_touching_repo() {
        let (service, repo) = service();

        let err = service
            .create_user(signup("broken", "abc"))
            .await
            .expect_err("input must be rejected");

        let messages: Vec<_> = err
            .field_errors()
            .expect("expected InvalidInput")
            .iter()
            .map(|e| e.message.as_str())
            .collect();
        assert_eq!(messages, vec!["E-Mail is invalid.", "Password too short!"]);
        assert!(
            repo.find_by_email("broken")
                .await
                .expect("lookup must succeed")
                .is_none()
        );
    }

    #[tokio::test]
    async fn create_user_rejects_duplicate_email() {
        let (service, _repo) = service();
        service
            .create_user(signup("reader@example.com", "secret"))
            .await
            .expect("first signup must succeed");

        let err = service
            .create_user(signup("reader@example.com", "another"))
            .await
            .expect_err("duplicate must fail");
        assert!(matches!(err, DomainError::AlreadyExists));
    }

    #[tokio::test]
    async fn login_returns_no_such_user_for_unknown_email() {
        let (service, _repo) = service();

        let err = service
            .login(LoginRequest {
                email: "ghost@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .expect_err("login must fail");
        assert!(matches!(err, DomainError::NoSuchUser));
    }

    #[tokio::test]
    async fn login_returns_bad_password_for_wrong_password() {
        let (service, _repo) = service();
        service
            .create_user(signup("reader@example.com", "secret"))
            .await
            .expect("signup must succeed");

        let err = service
            .login(LoginRequest {
                email: "reader@example.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .expect_err("login must fail");
        assert!(matches!(err, DomainError::BadPassword));
        assert_eq!(err.to_string(), "Password is incorrect");
    }

    #[tokio::test]
    async fn login_issues_token_bound_to_user() {
        let (service, _repo) = service();
        let user = service
            .create_user(signup("reader@example.com", "secret"))
            .await
            .expect("signup must succeed");

        let result = service
            .login(LoginRequest {
                email: "reader@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .expect("login must succeed");

        assert_eq!(result.user_id, user.id);
        let claims = service
            .jwt()
            .verify(&result.token)
            .expect("token must verify");
        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.email, "reader@example.com");
    }

    fn test_jwt() -> JwtService {
        JwtService::new("0123456789abcdef0123456789abcdef", 3600)
    }
}
