//! Error types for the cache
//!
//! Provides unified error handling using thiserror. The cache itself never
//! returns these to callers; they flow to the observer instead. The HTTP
//! layer maps the API variants onto status codes; store errors only ever
//! reach it as 500s.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for stores, the cache and the API.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Underlying store refused the call (disabled, private mode, absent)
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Write rejected because the store is full
    #[error("Quota exceeded writing '{key}' (limit {limit} bytes)")]
    QuotaExceeded { key: String, limit: u64 },

    /// Stored text is not valid JSON or not a cache entry
    #[error("Corrupt entry '{key}': {reason}")]
    CorruptEntry { key: String, reason: String },

    /// Stored entry was written under another version
    #[error("Version mismatch for '{key}': found {found}, expected {expected}")]
    VersionMismatch {
        key: String,
        found: String,
        expected: String,
    },

    /// Value could not be serialized
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// File store I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Blocking cache call panicked or was cancelled
    #[error("Cache task failed: {0}")]
    TaskFailed(String),
}

impl From<tokio::task::JoinError> for CacheError {
    fn from(err: tokio::task::JoinError) -> Self {
        CacheError::TaskFailed(err.to_string())
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match self {
            CacheError::NotFound(key) => key,
            CacheError::InvalidRequest(msg) => msg,
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
