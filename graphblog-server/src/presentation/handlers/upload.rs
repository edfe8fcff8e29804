use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::middleware::auth::AuthenticatedUser;

const ACCEPTED_IMAGE_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/jpg"];

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadResponse {
    pub(crate) message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) file_path: Option<String>,
}

/// Multipart body accepted by `PUT /post-image`.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub(crate) struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
    old_path: Option<String>,
}

struct ImageFile {
    file_name: String,
    bytes: Vec<u8>,
}

#[utoipa::path(
    put,
    path = "/post-image",
    tag = "images",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored", body = UploadResponse),
        (status = 200, description = "No acceptable image in the form", body = UploadResponse),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub(crate) async fn upload_image(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    let mut image = None;
    let mut old_path = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                let accepted = field
                    .content_type()
                    .is_some_and(|mime| ACCEPTED_IMAGE_TYPES.contains(&mime));
                if !accepted {
                    continue;
                }
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(bad_form)?;
                image = Some(ImageFile {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            Some("oldPath") => {
                let text = field.text().await.map_err(bad_form)?;
                if !text.trim().is_empty() {
                    old_path = Some(text);
                }
            }
            _ => {}
        }
    }

    let Some(image) = image else {
        return Ok((
            StatusCode::OK,
            Json(UploadResponse {
                message: "No file Provided".to_string(),
                file_path: None,
            }),
        ));
    };

    let stored_name = format!(
        "{}-{}",
        Utc::now().timestamp_millis(),
        sanitize_file_name(&image.file_name)
    );
    let file_path = state.images.store(&stored_name, &image.bytes).await?;
    info!(user_id = %user.user_id, path = %file_path, "image stored");

    if let Some(old_path) = old_path {
        if let Err(err) = state.images.delete(&old_path).await {
            warn!(path = %old_path, error = %err, "failed to delete replaced image");
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "File Stored".to_string(),
            file_path: Some(file_path.replace('\\', "/")),
        }),
    ))
}

fn bad_form(err: MultipartError) -> AppError {
    AppError::BadRequest(err.body_text())
}

fn sanitize_file_name(raw: &str) -> String {
    // browsers may send a full client-side path
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::sanitize_file_name;
    use crate::presentation::http_handlers;
    use crate::presentation::testing::test_app;

    const BOUNDARY: &str = "graphblog-test-boundary";

    struct Part<'a> {
        name: &'a str,
        file: Option<(&'a str, &'a str)>,
        body: &'a [u8],
    }

    fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part.file {
                Some((file_name, mime)) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{file_name}\"\r\nContent-Type: {mime}\r\n\r\n",
                        part.name
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name)
                        .as_bytes(),
                ),
            }
            body.extend_from_slice(part.body);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn send(router: Router, token: Option<&str>, parts: &[Part<'_>]) -> (StatusCode, Value) {
        let mut request = Request::put("/post-image").header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = router
            .oneshot(
                request
                    .body(Body::from(multipart_body(parts)))
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn anonymous_upload_is_rejected() {
        let app = test_app();
        let router = http_handlers::routes(app.state.clone());

        let (status, body) = send(
            router,
            None,
            &[Part {
                name: "image",
                file: Some(("cat.png", "image/png")),
                body: b"png-bytes",
            }],
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Not Authenticated");
        assert!(app.images.stored().is_empty());
    }

    #[tokio::test]
    async fn non_image_file_counts_as_missing() {
        let app = test_app();
        let token = app.token_for("user-1");
        let router = http_handlers::routes(app.state.clone());

        let (status, body) = send(
            router,
            Some(&token),
            &[Part {
                name: "image",
                file: Some(("notes.txt", "text/plain")),
                body: b"hello",
            }],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "No file Provided");
        assert!(body.get("filePath").is_none());
        assert!(app.images.stored().is_empty());
    }

    #[tokio::test]
    async fn image_is_stored_and_old_path_deleted() {
        let app = test_app();
        let token = app.token_for("user-1");
        let router = http_handlers::routes(app.state.clone());

        let (status, body) = send(
            router,
            Some(&token),
            &[
                Part {
                    name: "image",
                    file: Some(("my cat.jpg", "image/jpeg")),
                    body: b"jpeg-bytes",
                },
                Part {
                    name: "oldPath",
                    file: None,
                    body: b"images/old.png",
                },
            ],
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "File Stored");
        let stored = app.images.stored();
        assert_eq!(stored.len(), 1);
        let (name, bytes) = &stored[0];
        assert!(name.ends_with("-my_cat.jpg"), "{name}");
        assert_eq!(bytes.as_slice(), b"jpeg-bytes");
        assert_eq!(body["filePath"], format!("images/{name}"));
        assert_eq!(app.images.deleted(), vec!["images/old.png".to_string()]);
    }

    #[test]
    fn file_names_are_reduced_to_safe_base_names() {
        assert_eq!(sanitize_file_name("photo.png"), "photo.png");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\photo 1.png"), "photo_1.png");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name(".."), "image");
        assert_eq!(sanitize_file_name(""), "image");
    }
}
