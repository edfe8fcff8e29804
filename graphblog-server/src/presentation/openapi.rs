use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::handlers::upload::{UploadForm, UploadResponse};
use crate::presentation::http_handlers::HealthzResponse;

/// REST surface only. The GraphQL schema documents itself through introspection.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http_handlers::health_handler,
        crate::presentation::handlers::upload::upload_image
    ),
    components(schemas(HealthzResponse, UploadForm, UploadResponse)),
    tags(
        (name = "health", description = "Liveness check"),
        (name = "images", description = "Post image uploads")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::ApiDoc;

    #[test]
    fn documents_rest_endpoints_with_bearer_scheme() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/healthz"));
        assert!(doc.paths.paths.contains_key("/post-image"));
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
