use async_graphql::{PathSegment, Pos, Response, ServerError, Value};
use serde::Serialize;

use crate::domain::error::DomainError;
use crate::domain::validation::FieldError;
use crate::presentation::app_error::describe_domain_error;

/// Wire shape of a GraphQL response: `{data, errors?}`.
#[derive(Debug, Serialize)]
pub(crate) struct GraphQlBody {
    pub(crate) data: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) errors: Vec<FormattedError>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FormattedError {
    pub(crate) message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) data: Option<Vec<FieldError>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) locations: Vec<Pos>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) path: Vec<PathSegment>,
}

pub(crate) fn render_response(response: Response) -> GraphQlBody {
    GraphQlBody {
        data: response.data,
        errors: response.errors.into_iter().map(format_error).collect(),
    }
}

pub(crate) fn format_error(err: ServerError) -> FormattedError {
    let described = err.source::<DomainError>().map(|domain| {
        let (status, message) = describe_domain_error(domain);
        let data = domain.field_errors().map(<[FieldError]>::to_vec);
        (message, Some(status.as_u16()), data)
    });
    // query parse and validation errors never reach a resolver
    let (message, status, data) = described.unwrap_or((err.message, None, None));

    FormattedError {
        message,
        status,
        data,
        locations: err.locations,
        path: err.path,
    }
}
