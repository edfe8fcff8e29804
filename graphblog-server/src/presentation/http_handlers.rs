use axum::{
    Json, Router, middleware,
    routing::{get, post, put},
};
use serde::Serialize;
use utoipa::ToSchema;

use super::AppState;
use super::graphql::handler::{GRAPHQL_PATH, graphiql_handler, graphql_handler};
use super::handlers::upload::upload_image;
use super::middleware::auth::auth_context_middleware;

pub(crate) fn routes(state: AppState) -> Router {
    let graphql = if state.graphiql_enabled {
        get(graphiql_handler).post(graphql_handler)
    } else {
        post(graphql_handler)
    };

    Router::new()
        .route(GRAPHQL_PATH, graphql)
        .route("/post-image", put(upload_image))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_context_middleware,
        ))
        .route("/healthz", get(health_handler))
        .with_state(state)
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct HealthzResponse {
    status: String,
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthzResponse))
)]
pub(crate) async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse {
        status: "ok".to_string(),
    })
}
