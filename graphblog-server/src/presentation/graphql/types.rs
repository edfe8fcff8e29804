use async_graphql::{Context, ID, InputObject, Object, Result, SimpleObject};

use super::blog_service;
use crate::domain::post::{Post, PostInput, to_iso_string};
use crate::domain::user::{CreateUserRequest, User};

pub(crate) struct PostObject(pub(crate) Post);

#[Object(name = "Post")]
impl PostObject {
    #[graphql(name = "_id")]
    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn content(&self) -> &str {
        &self.0.content
    }

    async fn image_url(&self) -> &str {
        &self.0.image_url
    }

    async fn creator(&self, ctx: &Context<'_>) -> Result<UserObject> {
        let user = blog_service(ctx)?.get_user(&self.0.creator_id).await?;
        Ok(UserObject(user))
    }

    async fn created_at(&self) -> String {
        to_iso_string(self.0.created_at)
    }

    async fn updated_at(&self) -> String {
        to_iso_string(self.0.updated_at)
    }
}

pub(crate) struct UserObject(pub(crate) User);

#[Object(name = "User")]
impl UserObject {
    #[graphql(name = "_id")]
    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    /// Always null. Password hashes are never exposed.
    async fn password(&self) -> Option<String> {
        None
    }

    async fn status(&self) -> &str {
        &self.0.status
    }

    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<PostObject>> {
        let posts = blog_service(ctx)?.posts_of(&self.0).await?;
        Ok(posts.into_iter().map(PostObject).collect())
    }
}

#[derive(SimpleObject)]
pub(crate) struct AuthData {
    pub(crate) token: String,
    pub(crate) user_id: String,
}

#[derive(SimpleObject)]
pub(crate) struct PostsData {
    pub(crate) post: Vec<PostObject>,
    pub(crate) total_posts: i32,
}

#[derive(SimpleObject)]
pub(crate) struct PostData {
    pub(crate) post: PostObject,
}

#[derive(SimpleObject)]
pub(crate) struct DeleteResponse {
    pub(crate) message: String,
}

#[derive(InputObject)]
pub(crate) struct UserInputData {
    pub(crate) email: String,
    pub(crate) name: String,
    pub(crate) password: String,
}

impl From<UserInputData> for CreateUserRequest {
    fn from(input: UserInputData) -> Self {
        Self {
            email: input.email,
            name: input.name,
            password: input.password,
        }
    }
}

#[derive(InputObject)]
pub(crate) struct PostInputData {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) image_url: String,
}

impl From<PostInputData> for PostInput {
    fn from(input: PostInputData) -> Self {
        Self {
            title: input.title,
            content: input.content,
            image_url: input.image_url,
        }
    }
}
