//! In-memory stand-ins for the MongoDB repositories and the disk image store.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::data::image_store::{ImageStore, ImageStoreError};
use crate::data::post_repository::{NewPost, Pagination, PostPatch, PostRepository};
use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::domain::user::{DEFAULT_USER_STATUS, User};

#[derive(Clone, Default)]
pub(crate) struct InMemoryUserRepository {
    users: Arc<Mutex<Vec<UserCredentials>>>,
    next_id: Arc<Mutex<u64>>,
    fail_push: Arc<Mutex<bool>>,
    fail_pull: Arc<Mutex<bool>>,
}

impl InMemoryUserRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn user(&self, id: &str) -> Option<User> {
        self.users
            .lock()
            .expect("users mutex poisoned")
            .iter()
            .find(|c| c.user.id == id)
            .map(|c| c.user.clone())
    }

    pub(crate) fn remove(&self, id: &str) {
        self.users
            .lock()
            .expect("users mutex poisoned")
            .retain(|c| c.user.id != id);
    }

    pub(crate) fn fail_push(&self, fail: bool) {
        *self.fail_push.lock().expect("fail_push mutex poisoned") = fail;
    }

    pub(crate) fn fail_pull(&self, fail: bool) {
        *self.fail_pull.lock().expect("fail_pull mutex poisoned") = fail;
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.lock().expect("users mutex poisoned");
        if users.iter().any(|c| c.user.email == input.email) {
            return Err(DomainError::AlreadyExists);
        }

        let mut next_id = self.next_id.lock().expect("next_id mutex poisoned");
        *next_id += 1;
        let user = User {
            id: format!("user-{}", *next_id),
            name: input.name,
            email: input.email,
            status: DEFAULT_USER_STATUS.to_string(),
            post_ids: Vec::new(),
        };
        users.push(UserCredentials {
            user: user.clone(),
            password_hash: input.password_hash,
        });
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        Ok(self
            .users
            .lock()
            .expect("users mutex poisoned")
            .iter()
            .find(|c| c.user.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        Ok(self.user(id))
    }

    async fn push_post(&self, user_id: &str, post_id: &str) -> Result<bool, DomainError> {
        if *self.fail_push.lock().expect("fail_push mutex poisoned") {
            return Err(DomainError::Unexpected("push failed".to_string()));
        }
        let mut users = self.users.lock().expect("users mutex poisoned");
        match users.iter_mut().find(|c| c.user.id == user_id) {
            Some(c) => {
                c.user.post_ids.push(post_id.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn pull_post(&self, user_id: &str, post_id: &str) -> Result<bool, DomainError> {
        if *self.fail_pull.lock().expect("fail_pull mutex poisoned") {
            return Err(DomainError::Unexpected("pull failed".to_string()));
        }
        let mut users = self.users.lock().expect("users mutex poisoned");
        match users.iter_mut().find(|c| c.user.id == user_id) {
            Some(c) => {
                c.user.post_ids.retain(|id| id != post_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Clone)]
pub(crate) struct InMemoryPostRepository {
    posts: Arc<Mutex<Vec<Post>>>,
    next_id: Arc<Mutex<u64>>,
    clock: Arc<Mutex<DateTime<Utc>>>,
}

impl InMemoryPostRepository {
    pub(crate) fn new() -> Self {
        Self {
            posts: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(0)),
            clock: Arc::new(Mutex::new(Utc::now())),
        }
    }

    pub(crate) fn post(&self, id: &str) -> Option<Post> {
        self.posts
            .lock()
            .expect("posts mutex poisoned")
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub(crate) fn len(&self) -> usize {
        self.posts.lock().expect("posts mutex poisoned").len()
    }

    // every write moves the clock forward so creation order is strict
    fn tick(&self) -> DateTime<Utc> {
        let mut clock = self.clock.lock().expect("clock mutex poisoned");
        *clock += Duration::seconds(1);
        *clock
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let now = self.tick();
        let mut next_id = self.next_id.lock().expect("next_id mutex poisoned");
        *next_id += 1;
        let post = Post {
            id: format!("post-{:04}", *next_id),
            title: input.title,
            content: input.content,
            image_url: input.image_url,
            creator_id: input.creator_id,
            created_at: now,
            updated_at: now,
        };
        self.posts
            .lock()
            .expect("posts mutex poisoned")
            .push(post.clone());
        Ok(post)
    }

    async fn get_post(&self, id: &str) -> Result<Option<Post>, DomainError> {
        Ok(self.post(id))
    }

    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.posts.lock().expect("posts mutex poisoned").clone();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(posts
            .into_iter()
            .skip(pagination.skip() as usize)
            .take(pagination.page_size as usize)
            .collect())
    }

    async fn total_posts(&self) -> Result<u64, DomainError> {
        Ok(self.len() as u64)
    }

    async fn get_posts_by_ids(&self, ids: &[String]) -> Result<Vec<Post>, DomainError> {
        Ok(ids.iter().filter_map(|id| self.post(id)).collect())
    }

    async fn update_post(&self, id: &str, patch: PostPatch) -> Result<Option<Post>, DomainError> {
        let now = self.tick();
        let mut posts = self.posts.lock().expect("posts mutex poisoned");
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        post.title = patch.title;
        post.content = patch.content;
        if let Some(image_url) = patch.image_url {
            post.image_url = image_url;
        }
        post.updated_at = now;
        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: &str) -> Result<bool, DomainError> {
        let mut posts = self.posts.lock().expect("posts mutex poisoned");
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() < before)
    }
}

/// Records every call instead of touching the filesystem.
#[derive(Clone, Default)]
pub(crate) struct RecordingImageStore {
    stored: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
    deleted: Arc<Mutex<Vec<String>>>,
}

impl RecordingImageStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn stored(&self) -> Vec<(String, Vec<u8>)> {
        self.stored.lock().expect("stored mutex poisoned").clone()
    }

    pub(crate) fn deleted(&self) -> Vec<String> {
        self.deleted.lock().expect("deleted mutex poisoned").clone()
    }
}

#[async_trait]
impl ImageStore for RecordingImageStore {
    async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<String, ImageStoreError> {
        self.stored
            .lock()
            .expect("stored mutex poisoned")
            .push((file_name.to_string(), bytes.to_vec()));
        Ok(format!("images/{file_name}"))
    }

    async fn delete(&self, path: &str) -> Result<(), ImageStoreError> {
        self.deleted
            .lock()
            .expect("deleted mutex poisoned")
            .push(path.to_string());
        Ok(())
    }
}
