use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::validation::{InputErrors, MIN_PASSWORD_LEN, has_min_chars, is_email};

pub(crate) const DEFAULT_USER_STATUS: &str = "I am new!";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreateUserRequest {
    pub(crate) email: String,
    pub(crate) name: String,
    pub(crate) password: String,
}

impl CreateUserRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let mut errors = InputErrors::new();
        errors
            .check(is_email(&self.email), "E-Mail is invalid.")
            .check(
                has_min_chars(&self.password, MIN_PASSWORD_LEN),
                "Password too short!",
            );
        errors.finish()?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct User {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) status: String,
    pub(crate) post_ids: Vec<String>,
}
