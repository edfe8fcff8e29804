use async_graphql::{Context, ID, Object, Result};

use super::types::{DeleteResponse, PostInputData, PostObject, UserInputData, UserObject};
use super::{auth_service, blog_service, current_user_id};

pub(crate) struct RootMutation;

#[Object(name = "RootMutation")]
impl RootMutation {
    async fn create_user(&self, ctx: &Context<'_>, user_input: UserInputData) -> Result<UserObject> {
        let user = auth_service(ctx)?.create_user(user_input.into()).await?;
        Ok(UserObject(user))
    }

    async fn create_post(
        &self,
        ctx: &Context<'_>,
        post_input: PostInputData,
    ) -> Result<PostObject> {
        let user_id = current_user_id(ctx)?;
        let post = blog_service(ctx)?
            .create_post(&user_id, post_input.into())
            .await?;
        Ok(PostObject(post))
    }

    async fn update_post(
        &self,
        ctx: &Context<'_>,
        id: ID,
        post_input: PostInputData,
    ) -> Result<PostObject> {
        let user_id = current_user_id(ctx)?;
        let post = blog_service(ctx)?
            .update_post(&user_id, &id, post_input.into())
            .await?;
        Ok(PostObject(post))
    }

    async fn delete_post(&self, ctx: &Context<'_>, id: ID) -> Result<DeleteResponse> {
        let user_id = current_user_id(ctx)?;
        blog_service(ctx)?.delete_post(&user_id, &id).await?;
        Ok(DeleteResponse {
            message: "Post Deleted successfully".to_string(),
        })
    }
}
