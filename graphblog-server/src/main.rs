use std::sync::Arc;

use anyhow::{Context, Result};

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::auth_service::AuthService;
use data::image_store::ImageStore;
use data::post_repository::PostRepository;
use data::repositories::mongo::post_repository::MongoPostRepository;
use data::repositories::mongo::user_repository::MongoUserRepository;
use data::storage::disk::DiskImageStore;
use data::user_repository::UserRepository;
use infrastructure::database::{connect, ensure_indexes};
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let db = connect(&settings.mongodb_uri, &settings.mongodb_database).await?;
    ensure_indexes(&db).await?;

    let image_store = DiskImageStore::new(&settings.images_dir);
    image_store
        .ensure_root()
        .await
        .with_context(|| format!("failed to prepare images dir '{}'", settings.images_dir))?;

    let users: Arc<dyn UserRepository> = Arc::new(MongoUserRepository::new(&db));
    let posts: Arc<dyn PostRepository> = Arc::new(MongoPostRepository::new(&db));
    let images: Arc<dyn ImageStore> = Arc::new(image_store);

    let jwt = JwtService::new(&settings.jwt_secret, settings.jwt_ttl_seconds);
    let auth_service = Arc::new(AuthService::new(Arc::clone(&users), jwt));

    let state = AppState::new(
        users,
        posts,
        images,
        auth_service,
        settings.posts_per_page,
        settings.graphiql_enabled,
    );

    server::run_http(&settings, state).await
}
