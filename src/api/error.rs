//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::db::DatabaseError;

/// Flat error body: `error` is the machine-readable category, `message`
/// the human-readable detail. This is the shape the frontend binds to.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Database operation failed: {0}")]
    Storage(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            ApiError::Validation(detail) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                detail.clone(),
            ),
            ApiError::NotFound(entity) => (
                StatusCode::NOT_FOUND,
                format!("{entity} not found"),
                format!("No {} matches the given id", entity.to_lowercase()),
            ),
            ApiError::Storage(detail) => {
                // Raw database text stays out of responses; the detail
                // goes to the log only.
                tracing::error!(detail, "database operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database operation failed".to_string(),
                    "A database error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error, message })).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { entity, .. } => ApiError::NotFound(entity),
            other => ApiError::Storage(other.to_string()),
        }
    }
}
