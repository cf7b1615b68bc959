//! Request channel error types.

use thiserror::Error;

/// Errors raised while talking to the media server.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP transport failed (DNS, refused connection, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server answered with a status the caller does not accept
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response parsed but is missing expected fields
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Status code when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias using ApiError.
pub type ApiResult<T> = Result<T, ApiError>;
