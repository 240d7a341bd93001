use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::run_code::run_code,
        crate::handlers::run_code::credit_limit,
        crate::handlers::files::save_code,
        crate::handlers::files::upload,
        crate::handlers::files::download,
        crate::handlers::webhooks::user_create,
        crate::handlers::webhooks::user_update,
        crate::handlers::webhooks::user_quota,
        crate::handlers::site::help,
    ),
    components(
        schemas(
            crate::models::RunCodeRequest,
            crate::models::SaveCodeRequest,
            crate::models::UploadRequest,
        )
    ),
    tags(
        (name = "execution", description = "Code execution endpoints"),
        (name = "files", description = "Artifact save and download endpoints"),
        (name = "webhooks", description = "Identity provider callbacks"),
        (name = "site", description = "Static and informational endpoints")
    ),
    info(
        title = "Code Runner API",
        version = "1.0.0",
        description = "Run and save code in 70+ languages, render plots, and download artifacts"
    )
)]
pub struct ApiDoc;

pub fn create_docs_router() -> Router<AppState> {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
