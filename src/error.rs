use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize trip records: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Trip store at {} is corrupt: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },
    #[error("Trip store lock poisoned")]
    Poisoned,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read routes file {}: {source}", .path.display())]
    RoutesFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid routes file {}: {reason}", .path.display())]
    InvalidRoutes { path: PathBuf, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Trip not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Store(err) => {
                tracing::error!("Error fetching technician location: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unable to fetch technician location".to_string(),
                )
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
