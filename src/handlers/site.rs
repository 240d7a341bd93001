//! Static and informational endpoints: plugin manifest, logo, OpenAPI file,
//! help, privacy page, robots and favicon. Files come from the configured
//! static directory and are served with a 1-year cache.

use std::path::PathBuf;

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use serde_json::{json, Value};

use crate::{
    error::{AppError, Result},
    handlers::AppState,
    utils::support,
};

const ONE_YEAR_CACHE: &str = "public, max-age=31536000";

async fn cached_static(state: &AppState, rel_path: &str, content_type: &str) -> Result<Response> {
    let path = PathBuf::from(&state.config.static_dir).join(rel_path);
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        tracing::warn!("static file {} unreadable: {}", path.display(), e);
        AppError::NotFound
    })?;

    let response = Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, ONE_YEAR_CACHE)
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(response)
}

pub async fn logo(State(state): State<AppState>) -> Result<Response> {
    cached_static(&state, "logo.png", "image/png").await
}

pub async fn plugin_manifest(State(state): State<AppState>) -> Result<Response> {
    cached_static(&state, "ai-plugin.json", "application/json").await
}

pub async fn openapi_spec(State(state): State<AppState>) -> Result<Response> {
    cached_static(&state, "openapi.json", "application/json").await
}

pub async fn robots(State(state): State<AppState>) -> Result<Response> {
    cached_static(&state, "robots.txt", "text/plain").await
}

pub async fn favicon(State(state): State<AppState>) -> Result<Response> {
    cached_static(&state, "favicon.ico", "image/vnd.microsoft.icon").await
}

/// Support footer split into lines for the plugin guide.
#[utoipa::path(
    get,
    path = "/help",
    tag = "site",
    responses((status = 200, description = "Support channels, one per line"))
)]
pub async fn help() -> Json<Value> {
    let lines: Vec<String> = support::support_message()
        .lines()
        .map(str::to_string)
        .collect();
    Json(json!({ "message": lines }))
}

pub async fn privacy(State(state): State<AppState>) -> Result<Html<String>> {
    let path = PathBuf::from(&state.config.static_dir).join("privacy.html");
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|_| AppError::NotFound)?;
    Ok(Html(content))
}

/// 302 redirect to the project website.
pub async fn root() -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, support::WEBSITE_URL)],
    )
        .into_response()
}
