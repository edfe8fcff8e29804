use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `graphblog-client`.
pub enum BlogClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Требуется авторизация: нет токена, токен недействителен или неверные учётные данные.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Операция запрещена: пост принадлежит другому пользователю.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Запрошенный ресурс не найден.
    #[error("not found: {0}")]
    NotFound(String),

    /// Сервер отклонил входные данные; список сообщений валидации.
    #[error("invalid input: {}", .0.join("; "))]
    InvalidInput(Vec<String>),

    /// Прочая ошибка сервера. `status` отсутствует у ошибок разбора запроса.
    #[error("server error ({status:?}): {message}")]
    Server {
        /// HTTP-эквивалент статуса, если сервер его указал.
        status: Option<u16>,
        /// Сообщение сервера.
        message: String,
    },

    /// Ответ сервера не удалось разобрать.
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Результат операций `graphblog-client`.
pub type BlogClientResult<T> = Result<T, BlogClientError>;

impl BlogClientError {
    pub(crate) fn from_status(status: Option<u16>, message: String, details: Vec<String>) -> Self {
        match status {
            Some(401) => Self::Unauthorized(message),
            Some(403) => Self::Forbidden(message),
            Some(404) => Self::NotFound(message),
            Some(422) if !details.is_empty() => Self::InvalidInput(details),
            Some(422) => Self::InvalidInput(vec![message]),
            _ => Self::Server { status, message },
        }
    }
}
