use serde::Serialize;
use validator::ValidateEmail;

use super::error::DomainError;

pub(crate) const MIN_PASSWORD_LEN: usize = 5;
pub(crate) const MIN_TITLE_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct FieldError {
    pub(crate) message: String,
}

impl FieldError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Collects every failed check of one operation; nothing short-circuits.
#[derive(Debug, Default)]
pub(crate) struct InputErrors {
    errors: Vec<FieldError>,
}

impl InputErrors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn check(&mut self, passed: bool, message: &str) -> &mut Self {
        if !passed {
            self.errors.push(FieldError::new(message));
        }
        self
    }

    pub(crate) fn finish(self) -> Result<(), DomainError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::InvalidInput(self.errors))
        }
    }
}

pub(crate) fn is_email(value: &str) -> bool {
    value.validate_email()
}

pub(crate) fn has_min_chars(value: &str, min: usize) -> bool {
    !value.is_empty() && value.chars().count() >= min
}
