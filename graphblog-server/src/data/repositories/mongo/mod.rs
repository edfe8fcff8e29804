use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use mongodb::error::{ErrorKind, WriteFailure};

use crate::domain::error::DomainError;

pub(crate) mod post_repository;
pub(crate) mod user_repository;

pub(crate) const USERS_COLLECTION: &str = "users";
pub(crate) const POSTS_COLLECTION: &str = "posts";

const DUPLICATE_KEY_CODE: i32 = 11000;

/// Ids that are not valid ObjectIds can never match a stored document.
fn parse_object_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

fn to_bson_datetime(value: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

fn from_bson_datetime(value: bson::DateTime) -> Result<DateTime<Utc>, DomainError> {
    DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis()).ok_or_else(|| {
        DomainError::Unexpected(format!("timestamp out of range: {value}"))
    })
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

fn map_db_error(err: mongodb::error::Error) -> DomainError {
    DomainError::Unexpected(err.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{from_bson_datetime, parse_object_id, to_bson_datetime};

    #[test]
    fn datetime_conversion_keeps_millis() {
        let ts = Utc
            .timestamp_millis_opt(1_700_000_000_123)
            .single()
            .expect("valid ts");
        let back = from_bson_datetime(to_bson_datetime(ts)).expect("in range");
        assert_eq!(back, ts);
    }

    #[test]
    fn malformed_ids_do_not_parse() {
        assert!(parse_object_id("65f1c0ffee0000000000abcd").is_some());
        assert!(parse_object_id("not-an-object-id").is_none());
        assert!(parse_object_id("").is_none());
    }
}
