use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::validation::{InputErrors, MIN_TITLE_LEN, has_min_chars};

/// Sent by clients that keep the current image while editing a post.
pub(crate) const UNCHANGED_IMAGE_PLACEHOLDER: &str = "undefined";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Post {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) image_url: String,
    pub(crate) creator_id: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Post {
    pub(crate) fn is_created_by(&self, user_id: &str) -> bool {
        self.creator_id == user_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PostInput {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) image_url: String,
}

impl PostInput {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let mut errors = InputErrors::new();
        errors.check(
            has_min_chars(&self.title, MIN_TITLE_LEN),
            "Title must have a minimum of 5 characters",
        );
        errors.finish()?;
        Ok(self)
    }

    pub(crate) fn image_change(&self) -> Option<&str> {
        if self.image_url == UNCHANGED_IMAGE_PLACEHOLDER {
            None
        } else {
            Some(&self.image_url)
        }
    }
}

pub(crate) fn to_iso_string(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
