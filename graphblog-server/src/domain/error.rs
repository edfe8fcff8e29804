use thiserror::Error;

use super::validation::FieldError;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("Invalid input.")]
    InvalidInput(Vec<FieldError>),

    #[error("Not Authenticated")]
    NotAuthenticated,

    #[error("Invalid User")]
    InvalidUser,

    #[error("Not Authorized")]
    NotAuthorized,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("User already exists")]
    AlreadyExists,

    #[error("No such user")]
    NoSuchUser,

    #[error("Password is incorrect")]
    BadPassword,

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}

impl DomainError {
    pub(crate) fn post_not_found() -> Self {
        Self::NotFound("Post")
    }

    pub(crate) fn user_not_found() -> Self {
        Self::NotFound("User")
    }

    pub(crate) fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            Self::InvalidInput(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DomainError;
    use crate::domain::validation::FieldError;

    #[test]
    fn messages_match_wire_contract() {
        assert_eq!(DomainError::NotAuthenticated.to_string(), "Not Authenticated");
        assert_eq!(DomainError::post_not_found().to_string(), "Post not found");
        assert_eq!(DomainError::BadPassword.to_string(), "Password is incorrect");
        assert_eq!(
            DomainError::InvalidInput(vec![FieldError::new("x")]).to_string(),
            "Invalid input."
        );
    }

    #[test]
    fn only_invalid_input_carries_field_errors() {
        let err = DomainError::InvalidInput(vec![FieldError::new("E-Mail is invalid.")]);
        assert_eq!(err.field_errors().map(<[_]>::len), Some(1));
        assert!(DomainError::NotAuthorized.field_errors().is_none());
    }
}
