use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, error, warn};

use crate::data::image_store::ImageStoreError;
use crate::domain::error::DomainError;
use crate::domain::validation::FieldError;

const INTERNAL_MESSAGE: &str = "An error occurred";

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Images(#[from] ImageStoreError),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub(crate) message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) data: Option<Vec<FieldError>>,
}

/// Level a domain error is logged at, if at all. Client mistakes stay quiet.
pub(crate) fn log_level(err: &DomainError) -> Option<Level> {
    match err {
        DomainError::Unexpected(_) => Some(Level::ERROR),
        DomainError::AlreadyExists => Some(Level::WARN),
        _ => None,
    }
}

/// Status code and client-facing message for a domain error.
/// Server-side failures are logged here and their details never leave the process.
pub(crate) fn describe_domain_error(err: &DomainError) -> (StatusCode, String) {
    let status = match err {
        DomainError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::NotAuthenticated
        | DomainError::InvalidUser
        | DomainError::NoSuchUser
        | DomainError::BadPassword => StatusCode::UNAUTHORIZED,
        DomainError::NotAuthorized => StatusCode::FORBIDDEN,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::AlreadyExists | DomainError::Unexpected(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    match log_level(err) {
        Some(Level::ERROR) => error!(error = %err, "request failed"),
        Some(_) => warn!(error = %err, "request rejected"),
        None => {}
    }

    match err {
        DomainError::Unexpected(_) => (status, INTERNAL_MESSAGE.to_string()),
        _ => (status, err.to_string()),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Domain(err) => {
                let (status, message) = describe_domain_error(&err);
                let data = err.field_errors().map(<[FieldError]>::to_vec);
                (status, ErrorBody { message, data })
            }
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message,
                    data: None,
                },
            ),
            AppError::Images(err) => {
                error!(error = %err, "image storage failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        message: INTERNAL_MESSAGE.to_string(),
                        data: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
