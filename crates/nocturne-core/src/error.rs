//! Error types for the nocturne note service.

use thiserror::Error;

/// Result type alias using nocturne's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for nocturne operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Note not found (absent or soft-deleted)
    #[error("Note not found: {0}")]
    NoteNotFound(uuid::Uuid),

    /// User not found (absent or deactivated)
    #[error("User not found: {0}")]
    UserNotFound(uuid::Uuid),

    /// Malformed input; carries the offending field name
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    /// Authentication missing or unusable
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Forbidden (authenticated but not authorized)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Build a Validation error from a field name and message.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
