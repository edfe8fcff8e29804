use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) image_url: String,
    pub(crate) creator_id: String,
}

#[derive(Debug, Clone)]
pub(crate) struct PostPatch {
    pub(crate) title: String,
    pub(crate) content: String,
    /// `None` keeps the stored image.
    pub(crate) image_url: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Pagination {
    pub(crate) page: u32,
    pub(crate) page_size: u32,
}

impl Pagination {
    pub(crate) fn skip(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn get_post(&self, id: &str) -> Result<Option<Post>, DomainError>;
    /// Newest first, ties broken by id.
    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, DomainError>;
    async fn total_posts(&self) -> Result<u64, DomainError>;
    async fn get_posts_by_ids(&self, ids: &[String]) -> Result<Vec<Post>, DomainError>;
    async fn update_post(&self, id: &str, patch: PostPatch) -> Result<Option<Post>, DomainError>;
    async fn delete_post(&self, id: &str) -> Result<bool, DomainError>;
}

#[async_trait]
impl<T: PostRepository + ?Sized> PostRepository for Arc<T> {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        (**self).create_post(input).await
    }

    async fn get_post(&self, id: &str) -> Result<Option<Post>, DomainError> {
        (**self).get_post(id).await
    }

    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, DomainError> {
        (**self).list_posts(pagination).await
    }

    async fn total_posts(&self) -> Result<u64, DomainError> {
        (**self).total_posts().await
    }

    async fn get_posts_by_ids(&self, ids: &[String]) -> Result<Vec<Post>, DomainError> {
        (**self).get_posts_by_ids(ids).await
    }

    async fn update_post(&self, id: &str, patch: PostPatch) -> Result<Option<Post>, DomainError> {
        (**self).update_post(id, patch).await
    }

    async fn delete_post(&self, id: &str) -> Result<bool, DomainError> {
        (**self).delete_post(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn skip_is_zero_based_on_one_based_page() {
        assert_eq!(Pagination { page: 1, page_size: 2 }.skip(), 0);
        assert_eq!(Pagination { page: 3, page_size: 2 }.skip(), 4);
        assert_eq!(Pagination { page: 0, page_size: 2 }.skip(), 0);
    }
}
