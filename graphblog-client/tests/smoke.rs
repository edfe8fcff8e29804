use std::time::{SystemTime, UNIX_EPOCH};

use graphblog_client::{BlogClient, BlogClientError};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

// 1x1 transparent PNG
const PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f,
    0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0a, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d, 0xb4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

#[tokio::test]
#[ignore = "requires running graphblog-server and MongoDB"]
async fn graphql_smoke_flow() {
    let base_url =
        std::env::var("GRAPHBLOG_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let mut client = BlogClient::new(base_url);

    let suffix = unique_suffix();
    let email = format!("smoke_{suffix}@example.com");
    let password = "password123";

    let user = client
        .create_user(&email, "Smoke Tester", password)
        .await
        .expect("create_user must succeed");
    assert_eq!(user.email, email);
    assert_eq!(user.status, "I am new!");

    let wrong = client.login(&email, "wrong-password").await;
    assert!(matches!(wrong, Err(BlogClientError::Unauthorized(_))));

    let auth = client
        .login(&email, password)
        .await
        .expect("login must succeed");
    assert_eq!(auth.user_id, user.id);
    assert!(client.get_token().is_some());

    let image = client
        .upload_image("pixel.png", "image/png", PIXEL_PNG.to_vec(), None)
        .await
        .expect("upload must succeed")
        .expect("png must be accepted");

    let created = client
        .create_post("smoke title", "smoke content", &image)
        .await
        .expect("create_post must succeed");
    assert_eq!(created.title, "smoke title");
    assert_eq!(created.creator.id, user.id);

    let fetched = client
        .get_post(&created.id)
        .await
        .expect("get_post must succeed");
    assert_eq!(fetched.image_url, image);

    let page = client.get_posts(1).await.expect("get_posts must succeed");
    assert!(page.total_posts >= 1);

    let updated = client
        .update_post(&created.id, "smoke title updated", "smoke content updated", None)
        .await
        .expect("update_post must succeed");
    assert_eq!(updated.title, "smoke title updated");
    assert_eq!(updated.image_url, image);

    let message = client
        .delete_post(&created.id)
        .await
        .expect("delete_post must succeed");
    assert_eq!(message, "Post Deleted successfully");

    let after_delete = client.get_post(&created.id).await;
    assert!(matches!(after_delete, Err(BlogClientError::NotFound(_))));
}
