use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::blog_service::BlogService;
use crate::data::image_store::ImageStore;
use crate::data::post_repository::PostRepository;
use crate::data::user_repository::UserRepository;

pub(crate) mod app_error;
pub(crate) mod graphql;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;

use graphql::{BlogSchema, build_schema};

pub(crate) type SharedAuthService = AuthService<Arc<dyn UserRepository>>;
pub(crate) type SharedBlogService =
    BlogService<Arc<dyn PostRepository>, Arc<dyn UserRepository>, Arc<dyn ImageStore>>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<SharedAuthService>,
    pub(crate) images: Arc<dyn ImageStore>,
    pub(crate) schema: BlogSchema,
    pub(crate) graphiql_enabled: bool,
}

impl AppState {
    pub(crate) fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        images: Arc<dyn ImageStore>,
        auth_service: Arc<SharedAuthService>,
        posts_per_page: u32,
        graphiql_enabled: bool,
    ) -> Self {
        let blog_service = Arc::new(BlogService::new(
            posts,
            users,
            Arc::clone(&images),
            posts_per_page,
        ));
        let schema = build_schema(Arc::clone(&auth_service), blog_service);

        Self {
            auth_service,
            images,
            schema,
            graphiql_enabled,
        }
    }
}
