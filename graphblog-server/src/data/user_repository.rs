use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub(crate) user: User,
    pub(crate) password_hash: String,
}

#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub(crate) email: String,
    pub(crate) name: String,
    pub(crate) password_hash: String,
}

#[async_trait]
pub(crate) trait UserRepository: Send + Sync {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError>;
    /// Returns `false` when the user does not exist.
    async fn push_post(&self, user_id: &str, post_id: &str) -> Result<bool, DomainError>;
    /// Returns `false` when the user does not exist.
    async fn pull_post(&self, user_id: &str, post_id: &str) -> Result<bool, DomainError>;
}

#[async_trait]
impl<T: UserRepository + ?Sized> UserRepository for Arc<T> {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        (**self).create_user(input).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        (**self).find_by_email(email).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        (**self).find_by_id(id).await
    }

    async fn push_post(&self, user_id: &str, post_id: &str) -> Result<bool, DomainError> {
        (**self).push_post(user_id, post_id).await
    }

    async fn pull_post(&self, user_id: &str, post_id: &str) -> Result<bool, DomainError> {
        (**self).pull_post(user_id, post_id).await
    }
}
