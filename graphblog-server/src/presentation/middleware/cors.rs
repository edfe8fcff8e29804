use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::infrastructure::settings::Settings;

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(600);

fn allowed_origins(origins: &[String]) -> Result<AllowOrigin> {
    if origins.iter().any(|origin| origin == "*") {
        return Ok(AllowOrigin::from(Any));
    }

    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin '{origin}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AllowOrigin::list(origins))
}

pub(crate) fn build_cors_layer(settings: &Settings) -> Result<CorsLayer> {
    Ok(CorsLayer::new()
        .allow_origin(allowed_origins(&settings.cors_origins)?)
        .allow_methods([
            Method::OPTIONS,
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(PREFLIGHT_MAX_AGE))
}

pub(crate) fn apply_cors(router: Router, settings: &Settings) -> Result<Router> {
    Ok(router.layer(build_cors_layer(settings)?))
}
