use tracing::{debug, error, info, warn};

use crate::data::image_store::ImageStore;
use crate::data::post_repository::{NewPost, Pagination, PostPatch, PostRepository};
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostInput};
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct ListPostsResult {
    pub(crate) posts: Vec<Post>,
    pub(crate) total: u64,
}

pub(crate) struct BlogService<P: PostRepository, U: UserRepository, I: ImageStore> {
    posts: P,
    users: U,
    images: I,
    page_size: u32,
}

impl<P: PostRepository, U: UserRepository, I: ImageStore> BlogService<P, U, I> {
    pub(crate) fn new(posts: P, users: U, images: I, page_size: u32) -> Self {
        Self {
            posts,
            users,
            images,
            page_size: page_size.max(1),
        }
    }

    pub(crate) async fn create_post(
        &self,
        actor_user_id: &str,
        req: PostInput,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let creator = self
            .users
            .find_by_id(actor_user_id)
            .await?
            .ok_or(DomainError::InvalidUser)?;

        let post = self
            .posts
            .create_post(NewPost {
                title: req.title,
                content: req.content,
                image_url: req.image_url,
                creator_id: creator.id.clone(),
            })
            .await?;

        let linked = match self.users.push_post(&creator.id, &post.id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(DomainError::InvalidUser),
            Err(err) => Err(err),
        };
        if let Err(err) = linked {
            // the post must not outlive a failed link to its owner
            if let Err(rollback_err) = self.posts.delete_post(&post.id).await {
                error!(post_id = %post.id, error = %rollback_err, "failed to roll back orphaned post");
            }
            return Err(err);
        }

        info!(post_id = %post.id, creator_id = %creator.id, "post created");
        Ok(post)
    }

    pub(crate) async fn list_posts(&self, page: i32) -> Result<ListPostsResult, DomainError> {
        let page = u32::try_from(page).ok().filter(|p| *p > 0).unwrap_or(1);
        let pagination = Pagination {
            page,
            page_size: self.page_size,
        };

        let total = self.posts.total_posts().await?;
        let posts = self.posts.list_posts(pagination).await?;

        debug!(page, returned = posts.len(), total, "posts listed");
        Ok(ListPostsResult { posts, total })
    }

    pub(crate) async fn get_post(&self, id: &str) -> Result<Post, DomainError> {
        self.posts
            .get_post(id)
            .await?
            .ok_or_else(DomainError::post_not_found)
    }

    pub(crate) async fn update_post(
        &self,
        actor_user_id: &str,
        post_id: &str,
        req: PostInput,
    ) -> Result<Post, DomainError> {
        let original = self.get_post(post_id).await?;
        if !original.is_created_by(actor_user_id) {
            return Err(DomainError::NotAuthorized);
        }

        let req = req.validate()?;
        let patch = PostPatch {
            image_url: req.image_change().map(str::to_string),
            title: req.title,
            content: req.content,
        };

        let updated = self
            .posts
            .update_post(post_id, patch)
            .await?
            .ok_or_else(DomainError::post_not_found)?;

        info!(post_id, "post updated");
        Ok(updated)
    }

    pub(crate) async fn delete_post(
        &self,
        actor_user_id: &str,
        post_id: &str,
    ) -> Result<(), DomainError> {
        let post = self.get_post(post_id).await?;
        if !post.is_created_by(actor_user_id) {
            return Err(DomainError::NotAuthorized);
        }

        if !self.posts.delete_post(post_id).await? {
            return Err(DomainError::post_not_found());
        }

        if !self.users.pull_post(&post.creator_id, post_id).await? {
            warn!(post_id, creator_id = %post.creator_id, "post owner vanished before unlink");
        }

        if let Err(err) = self.images.delete(&post.image_url).await {
            warn!(post_id, image = %post.image_url, error = %err, "failed to delete post image");
        }

        info!(post_id, "post deleted");
        Ok(())
    }

    pub(crate) async fn get_user(&self, id: &str) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(DomainError::user_not_found)
    }

    pub(crate) async fn posts_of(&self, user: &User) -> Result<Vec<Post>, DomainError> {
        self.posts.get_posts_by_ids(&user.post_ids).await
    }
}
