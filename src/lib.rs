pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use handlers::{docs, files, run_code, site, webhooks, AppState};

/// Origin of the chat client that calls the plugin.
const CHAT_ORIGIN: &str = "https://chat.openai.com";

pub fn create_app(state: AppState) -> Router {
    let mut origins: Vec<HeaderValue> = Vec::new();
    for origin in [state.config.plugin_url.as_str(), CHAT_ORIGIN] {
        if let Ok(value) = origin.parse() {
            origins.push(value);
        }
    }
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/run_code", post(run_code::run_code))
        .route("/save_code", post(files::save_code))
        .route("/upload", post(files::upload))
        .route("/download/:filename", get(files::download))
        .route("/user_create", post(webhooks::user_create))
        .route("/user_update", post(webhooks::user_update))
        .route("/user_quota", post(webhooks::user_quota))
        .route("/credit_limit", get(run_code::credit_limit))
        .route("/logo.png", get(site::logo))
        .route("/.well-known/ai-plugin.json", get(site::plugin_manifest))
        .route("/openapi.json", get(site::openapi_spec))
        .route("/help", get(site::help))
        .route("/privacy", get(site::privacy))
        .route("/robots.txt", get(site::robots))
        .route("/favicon.ico", get(site::favicon))
        .route("/", get(site::root))
        .merge(docs::create_docs_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
