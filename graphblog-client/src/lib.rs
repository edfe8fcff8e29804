//! Клиентская библиотека для работы с graphblog-server через GraphQL.
//!
//! `BlogClient` оборачивает операции схемы (`createUser`, `login`, `getPosts`,
//! `createPost`, ...) и загрузку картинок через `PUT /post-image`.
//!
//! Клиент хранит JWT-токен после `login` и автоматически использует его в
//! защищённых операциях.
#![warn(missing_docs)]

mod error;
mod graphql_client;
mod models;
mod queries;

pub use error::{BlogClientError, BlogClientResult};
pub use models::{AuthData, Post, PostCreator, PostsPage, User};

use graphql_client::GraphQlClient;
use serde::Deserialize;
use serde_json::json;

/// Значение `imageUrl`, при котором сервер оставляет текущую картинку поста.
pub const KEEP_IMAGE: &str = "undefined";

#[derive(Debug, Clone)]
/// Клиент для работы с блог-сервисом.
pub struct BlogClient {
    transport: GraphQlClient,
    token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateUserData {
    create_user: User,
}

#[derive(Deserialize)]
struct LoginData {
    login: AuthData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePostData {
    create_post: Post,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePostData {
    update_post: Post,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeletePostData {
    delete_post: MessageDto,
}

#[derive(Deserialize)]
struct MessageDto {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetPostsData {
    get_posts: PostsDto,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostsDto {
    post: Vec<Post>,
    total_posts: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetPostData {
    get_post: PostDto,
}

#[derive(Deserialize)]
struct PostDto {
    post: Post,
}

impl BlogClient {
    /// Создаёт клиент для сервера с базовым URL, например `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            transport: GraphQlClient::new(base_url),
            token: None,
        }
    }

    /// Устанавливает JWT-токен вручную.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Возвращает текущий JWT-токен, если он установлен.
    pub fn get_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Очищает сохранённый JWT-токен.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Регистрирует пользователя. Токен не выдаётся, для него нужен `login`.
    pub async fn create_user(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> BlogClientResult<User> {
        let variables = json!({
            "input": { "email": email, "name": name, "password": password }
        });
        let data: CreateUserData = self
            .transport
            .execute(queries::CREATE_USER, variables, None)
            .await?;
        Ok(data.create_user)
    }

    /// Выполняет вход и сохраняет полученный JWT-токен в клиенте.
    pub async fn login(&mut self, email: &str, password: &str) -> BlogClientResult<AuthData> {
        let variables = json!({ "email": email, "password": password });
        let data: LoginData = self
            .transport
            .execute(queries::LOGIN, variables, None)
            .await?;

        self.token = Some(data.login.token.clone());
        Ok(data.login)
    }

    /// Создаёт новый пост.
    ///
    /// Требует установленный JWT-токен.
    pub async fn create_post(
        &self,
        title: &str,
        content: &str,
        image_url: &str,
    ) -> BlogClientResult<Post> {
        let token = self.require_token()?;
        let variables = json!({ "input": post_input(title, content, Some(image_url)) });
        let data: CreatePostData = self
            .transport
            .execute(queries::CREATE_POST, variables, Some(token))
            .await?;
        Ok(data.create_post)
    }

    /// Возвращает страницу ленты. Нумерация страниц с 1.
    ///
    /// Требует установленный JWT-токен.
    pub async fn get_posts(&self, page: u32) -> BlogClientResult<PostsPage> {
        let token = self.require_token()?;
        let page = i32::try_from(page.max(1)).unwrap_or(i32::MAX);
        let data: GetPostsData = self
            .transport
            .execute(queries::GET_POSTS, json!({ "page": page }), Some(token))
            .await?;

        Ok(PostsPage {
            posts: data.get_posts.post,
            total_posts: data.get_posts.total_posts,
        })
    }

    /// Возвращает пост по идентификатору.
    ///
    /// Требует установленный JWT-токен.
    pub async fn get_post(&self, id: &str) -> BlogClientResult<Post> {
        let token = self.require_token()?;
        let data: GetPostData = self
            .transport
            .execute(queries::GET_POST, json!({ "id": id }), Some(token))
            .await?;
        Ok(data.get_post.post)
    }

    /// Обновляет пост по идентификатору.
    ///
    /// `image_url = None` сохраняет текущую картинку. Требует установленный JWT-токен.
    pub async fn update_post(
        &self,
        id: &str,
        title: &str,
        content: &str,
        image_url: Option<&str>,
    ) -> BlogClientResult<Post> {
        let token = self.require_token()?;
        let variables = json!({ "id": id, "input": post_input(title, content, image_url) });
        let data: UpdatePostData = self
            .transport
            .execute(queries::UPDATE_POST, variables, Some(token))
            .await?;
        Ok(data.update_post)
    }

    /// Удаляет пост вместе с его картинкой и возвращает сообщение сервера.
    ///
    /// Требует установленный JWT-токен.
    pub async fn delete_post(&self, id: &str) -> BlogClientResult<String> {
        let token = self.require_token()?;
        let data: DeletePostData = self
            .transport
            .execute(queries::DELETE_POST, json!({ "id": id }), Some(token))
            .await?;
        Ok(data.delete_post.message)
    }

    /// Загружает картинку и возвращает её путь на сервере.
    ///
    /// `None` означает, что сервер не принял файл (допустимы только png/jpeg).
    /// `old_path` удаляется на сервере после сохранения новой картинки.
    pub async fn upload_image(
        &self,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
        old_path: Option<&str>,
    ) -> BlogClientResult<Option<String>> {
        let token = self.require_token()?;
        let response = self
            .transport
            .upload_image(token, file_name, mime, bytes, old_path)
            .await?;
        Ok(response.file_path)
    }

    fn require_token(&self) -> BlogClientResult<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| BlogClientError::Unauthorized("no token, log in first".to_string()))
    }
}

fn post_input(title: &str, content: &str, image_url: Option<&str>) -> serde_json::Value {
    json!({
        "title": title,
        "content": content,
        "imageUrl": image_url.unwrap_or(KEEP_IMAGE),
    })
}
