//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use tracing::error;

/// API-level error with an HTTP status.
#[derive(Debug)]
pub enum ApiError {
    /// Storage layer failure; no partial mutation was committed.
    Unavailable(nocturne_core::Error),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    BadRequest(String),
    /// Malformed input with the offending field named.
    Validation { field: String, message: String },
    Internal(String),
}

impl From<nocturne_core::Error> for ApiError {
    fn from(err: nocturne_core::Error) -> Self {
        use nocturne_core::Error;
        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::NoteNotFound(_) => ApiError::NotFound("Note not found".to_string()),
            Error::UserNotFound(_) => ApiError::NotFound("User not found".to_string()),
            Error::Validation { field, message } => ApiError::Validation { field, message },
            Error::Forbidden(msg) => ApiError::Forbidden(msg),
            Error::Unauthorized(msg) => ApiError::Unauthorized(msg),
            Error::Database(_) => ApiError::Unavailable(err),
            Error::Serialization(msg) | Error::Config(msg) | Error::Internal(msg) => {
                ApiError::Internal(msg)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::Unavailable(err) => {
                // the underlying cause goes to the log, never to the client
                error!(subsystem = "api", error = %err, "storage unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(serde_json::json!({ "error": "Storage unavailable" })),
                )
            }
            ApiError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "error": msg })),
            ),
            ApiError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                Json(serde_json::json!({ "error": msg })),
            ),
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": msg })),
            ),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": msg })),
            ),
            ApiError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": message, "field": field })),
            ),
            ApiError::Internal(msg) => {
                error!(subsystem = "api", error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": "Internal server error" })),
                )
            }
        };

        (status, body).into_response()
    }
}
