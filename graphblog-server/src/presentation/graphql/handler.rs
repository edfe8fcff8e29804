use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQLRequest;
use axum::{
    Extension, Json,
    extract::State,
    response::{Html, IntoResponse},
};

use super::error::{GraphQlBody, render_response};
use crate::presentation::AppState;
use crate::presentation::middleware::auth::AuthState;

pub(crate) const GRAPHQL_PATH: &str = "/graphql";

pub(crate) async fn graphql_handler(
    State(state): State<AppState>,
    Extension(auth_state): Extension<AuthState>,
    request: GraphQLRequest,
) -> Json<GraphQlBody> {
    let request = request.into_inner().data(auth_state);
    let response = state.schema.execute(request).await;
    Json(render_response(response))
}

pub(crate) async fn graphiql_handler() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}
