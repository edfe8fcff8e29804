use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::{BlogClientError, BlogClientResult};

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<WireError>,
}

#[derive(Debug, Deserialize)]
struct WireError {
    message: String,
    status: Option<u16>,
    #[serde(default)]
    data: Vec<WireFieldError>,
}

#[derive(Debug, Deserialize)]
struct WireFieldError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadResponse {
    pub(crate) file_path: Option<String>,
}

impl From<WireError> for BlogClientError {
    fn from(err: WireError) -> Self {
        let details = err.data.into_iter().map(|d| d.message).collect();
        BlogClientError::from_status(err.status, err.message, details)
    }
}

#[derive(Debug, Clone)]
/// Низкоуровневый транспорт: POST `/graphql` и PUT `/post-image`.
pub(crate) struct GraphQlClient {
    base_url: String,
    client: Client,
}

impl GraphQlClient {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Выполняет операцию и возвращает содержимое `data`.
    /// Первая ошибка из `errors` превращается в `BlogClientError`.
    pub(crate) async fn execute<T>(
        &self,
        query: &str,
        variables: Value,
        token: Option<&str>,
    ) -> BlogClientResult<T>
    where
        T: DeserializeOwned,
    {
        let mut request = self
            .client
            .post(self.endpoint("/graphql"))
            .json(&GraphQlRequest { query, variables });
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        decode_response(status, &body)
    }

    pub(crate) async fn upload_image(
        &self,
        token: &str,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
        old_path: Option<&str>,
    ) -> BlogClientResult<UploadResponse> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)?;
        let mut form = Form::new().part("image", part);
        if let Some(old_path) = old_path {
            form = form.text("oldPath", old_path.to_string());
        }

        let response = self
            .client
            .put(self.endpoint("/post-image"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| format!("http status {status}"));
            return Err(BlogClientError::from_status(
                Some(status.as_u16()),
                message,
                Vec::new(),
            ));
        }

        serde_json::from_str(&body).map_err(|err| BlogClientError::Decode(err.to_string()))
    }
}

fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> BlogClientResult<T> {
    let response: GraphQlResponse<T> = serde_json::from_str(body).map_err(|err| {
        if status.is_success() {
            BlogClientError::Decode(err.to_string())
        } else {
            BlogClientError::Server {
                status: Some(status.as_u16()),
                message: body.to_string(),
            }
        }
    })?;

    if let Some(err) = response.errors.into_iter().next() {
        return Err(err.into());
    }

    response
        .data
        .ok_or_else(|| BlogClientError::Decode("response carries neither data nor errors".into()))
}
