use async_graphql::{Context, ID, Object, Result};

use super::types::{AuthData, PostData, PostObject, PostsData};
use super::{auth_service, blog_service, current_user_id};
use crate::domain::user::LoginRequest;

pub(crate) struct RootQuery;

#[Object(name = "RootQuery")]
impl RootQuery {
    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<AuthData> {
        let result = auth_service(ctx)?
            .login(LoginRequest { email, password })
            .await?;

        Ok(AuthData {
            token: result.token,
            user_id: result.user_id,
        })
    }

    async fn get_posts(&self, ctx: &Context<'_>, page: i32) -> Result<PostsData> {
        current_user_id(ctx)?;

        let result = blog_service(ctx)?.list_posts(page).await?;
        Ok(PostsData {
            post: result.posts.into_iter().map(PostObject).collect(),
            total_posts: i32::try_from(result.total).unwrap_or(i32::MAX),
        })
    }

    async fn get_post(&self, ctx: &Context<'_>, post_id: ID) -> Result<PostData> {
        current_user_id(ctx)?;

        let post = blog_service(ctx)?.get_post(&post_id).await?;
        Ok(PostData {
            post: PostObject(post),
        })
    }
}
