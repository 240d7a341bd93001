use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Code is empty.Please enter the code and try again.")]
    EmptyCode,

    #[error("File not found")]
    NotFound,

    #[error("Compiler service error: {0}")]
    Upstream(String),

    #[error("Interpreter error: {0}")]
    Interpreter(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Database(ref e) => {
                tracing::error!("database error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Io(ref e) => {
                tracing::error!("io error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Validation(_) | AppError::EmptyCode => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Upstream(ref msg) => {
                tracing::error!("upstream compiler failure: {}", msg);
                StatusCode::BAD_GATEWAY
            }
            AppError::Interpreter(ref msg) => {
                tracing::error!("interpreter failure: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(ref e) => {
                tracing::error!("internal error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
