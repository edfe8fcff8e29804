use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::domain::error::DomainError;
use crate::infrastructure::jwt::JwtService;
use crate::presentation::AppState;
use crate::presentation::app_error::AppError;

/// Who is behind the current request. A bad token downgrades to `Anonymous`
/// and the operations that need a user fail later with `Not Authenticated`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum AuthState {
    #[default]
    Anonymous,
    Authenticated {
        user_id: String,
    },
}

impl AuthState {
    pub(crate) fn require_user(&self) -> Result<&str, DomainError> {
        match self {
            AuthState::Authenticated { user_id } => Ok(user_id),
            AuthState::Anonymous => Err(DomainError::NotAuthenticated),
        }
    }
}

pub(crate) fn resolve_auth_state(jwt: &JwtService, auth_header: Option<&str>) -> AuthState {
    let Some(auth_header) = auth_header else {
        return AuthState::Anonymous;
    };

    let mut parts = auth_header.split_whitespace();
    let (Some(scheme), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
        debug!("malformed authorization header, continuing anonymously");
        return AuthState::Anonymous;
    };
    if !scheme.eq_ignore_ascii_case("bearer") {
        debug!(scheme, "unsupported authorization scheme, continuing anonymously");
        return AuthState::Anonymous;
    }

    match jwt.verify(token) {
        Ok(claims) => AuthState::Authenticated {
            user_id: claims.user_id,
        },
        Err(err) => {
            debug!(error = %err, "token rejected, continuing anonymously");
            AuthState::Anonymous
        }
    }
}

/// Attaches an [`AuthState`] to every request. Never rejects.
pub(crate) async fn auth_context_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let auth_state = resolve_auth_state(state.auth_service.jwt(), auth_header);
    request.extensions_mut().insert(auth_state);

    next.run(request).await
}

#[derive(Debug, Clone)]
pub(crate) struct AuthenticatedUser {
    pub(crate) user_id: String,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = parts
            .extensions
            .get::<AuthState>()
            .cloned()
            .unwrap_or_default();

        let user_id = auth_state.require_user()?.to_string();
        Ok(AuthenticatedUser { user_id })
    }
}
