use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Публичная модель пользователя.
pub struct User {
    /// Идентификатор пользователя (hex ObjectId).
    #[serde(rename = "_id")]
    pub id: String,
    /// Имя.
    pub name: String,
    /// Email.
    pub email: String,
    /// Статус пользователя, для новых аккаунтов `I am new!`.
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Автор поста в кратком виде.
pub struct PostCreator {
    /// Идентификатор автора.
    #[serde(rename = "_id")]
    pub id: String,
    /// Имя автора.
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Публичная модель поста.
pub struct Post {
    /// Идентификатор поста.
    #[serde(rename = "_id")]
    pub id: String,
    /// Заголовок поста.
    pub title: String,
    /// Содержимое поста.
    pub content: String,
    /// Путь к картинке на сервере, например `images/1700000000000-cat.png`.
    pub image_url: String,
    /// Автор поста.
    pub creator: PostCreator,
    /// Дата и время создания поста (UTC).
    pub created_at: DateTime<Utc>,
    /// Дата и время последнего обновления поста (UTC).
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Ответ после успешного входа.
pub struct AuthData {
    /// JWT access token.
    pub token: String,
    /// Идентификатор вошедшего пользователя.
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Одна страница ленты постов.
pub struct PostsPage {
    /// Посты на текущей странице, от новых к старым.
    pub posts: Vec<Post>,
    /// Общее количество постов.
    pub total_posts: u64,
}
