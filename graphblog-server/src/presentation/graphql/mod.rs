use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, Schema};

use super::middleware::auth::AuthState;
use super::{SharedAuthService, SharedBlogService};
use crate::domain::error::DomainError;

pub(crate) mod error;
pub(crate) mod handler;
pub(crate) mod mutation;
pub(crate) mod query;
pub(crate) mod types;

use mutation::RootMutation;
use query::RootQuery;

pub(crate) type BlogSchema = Schema<RootQuery, RootMutation, EmptySubscription>;

pub(crate) fn build_schema(
    auth_service: Arc<SharedAuthService>,
    blog_service: Arc<SharedBlogService>,
) -> BlogSchema {
    Schema::build(RootQuery, RootMutation, EmptySubscription)
        .data(auth_service)
        .data(blog_service)
        .finish()
}

fn auth_service<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<SharedAuthService>> {
    ctx.data::<Arc<SharedAuthService>>()
}

fn blog_service<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<SharedBlogService>> {
    ctx.data::<Arc<SharedBlogService>>()
}

/// Id of the caller, or `Not Authenticated` when the request carried no valid token.
fn current_user_id(ctx: &Context<'_>) -> Result<String, DomainError> {
    match ctx.data_opt::<AuthState>() {
        Some(state) => state.require_user().map(str::to_string),
        None => Err(DomainError::NotAuthenticated),
    }
}
