use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::{Json, Response},
};
use serde_json::{json, Value};

use crate::{
    error::{AppError, Result},
    handlers::AppState,
    models::{CodeArtifact, SaveCodeRequest, UploadRequest},
    utils::{
        files::Collection,
        support::{self, EXTRA_RESPONSE_INSTRUCTIONS},
    },
};

/// Persists source text as an immutable code artifact addressed by filename.
#[utoipa::path(
    post,
    path = "/save_code",
    tag = "files",
    request_body = SaveCodeRequest,
    responses(
        (status = 200, description = "Download link envelope"),
        (status = 400, description = "Missing filename or code"),
    )
)]
pub async fn save_code(
    State(state): State<AppState>,
    Json(request): Json<SaveCodeRequest>,
) -> Result<Json<Value>> {
    let filename = request
        .filename
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::Validation("filename or code not provided".to_string()))?;
    let code = request
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::Validation("filename or code not provided".to_string()))?;

    let artifact = CodeArtifact::new(filename.clone(), code);
    tracing::info!(%filename, language = %artifact.language, "save_code request");

    state.database.save_code(&artifact).await?;

    Ok(Json(json!({
        "download_link": format!("{}/download/{}", state.config.plugin_url, filename),
        "support": support::support_message(),
        "extra_response_instructions": EXTRA_RESPONSE_INSTRUCTIONS,
    })))
}

/// Stores a text-decodable file in the collection selected by its extension.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "files",
    request_body = UploadRequest,
    responses(
        (status = 200, description = "Download link"),
        (status = 400, description = "Missing filename or data"),
    )
)]
pub async fn upload(
    State(state): State<AppState>,
    Json(request): Json<UploadRequest>,
) -> Result<Json<Value>> {
    let filename = request
        .filename
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::Validation("filename or data not provided".to_string()))?;
    let data = request
        .data
        .ok_or_else(|| AppError::Validation("filename or data not provided".to_string()))?;

    let collection = Collection::from_filename(&filename);
    tracing::info!(%filename, collection = collection.name(), "upload request");

    match collection {
        Collection::Images | Collection::Documents => {
            state
                .database
                .put_blob(collection, &filename, data.as_bytes())
                .await?;
        }
        Collection::Code => {
            let artifact = CodeArtifact::new(filename.clone(), data);
            state.database.save_code(&artifact).await?;
        }
    }

    Ok(Json(json!({
        "download_link": format!("{}/download/{}", state.config.plugin_url, filename),
    })))
}

/// Streams stored bytes back; content type and attachment disposition are
/// chosen by the filename's extension.
#[utoipa::path(
    get,
    path = "/download/{filename}",
    tag = "files",
    params(("filename" = String, Path, description = "Stored filename")),
    responses(
        (status = 200, description = "File contents"),
        (status = 404, description = "File not found"),
    )
)]
pub async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let collection = Collection::from_filename(&filename);
    tracing::info!(%filename, collection = collection.name(), "download request");

    let bytes = match collection {
        Collection::Images | Collection::Documents => state
            .database
            .find_blob(collection, &filename)
            .await?
            .ok_or(AppError::NotFound)?,
        Collection::Code => state
            .database
            .find_code(&filename)
            .await?
            .ok_or(AppError::NotFound)?
            .into_bytes(),
    };

    let response = Response::builder()
        .header(header::CONTENT_TYPE, collection.content_type())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={filename}"),
        )
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(response)
}
