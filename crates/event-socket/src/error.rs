//! Event channel error types.

use std::time::Duration;
use thiserror::Error;

/// Event channel error type.
#[derive(Error, Debug)]
pub enum SocketError {
    /// WebSocket protocol or transport error
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Socket URL could not be used
    #[error("Invalid socket URL: {0}")]
    InvalidUrl(String),

    /// Upgrade did not finish in time
    #[error("WebSocket handshake timed out after {0:?}")]
    HandshakeTimeout(Duration),

    /// Peer closed the connection, or the channel was already closed
    #[error("Event channel closed")]
    Closed,

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using SocketError.
pub type SocketResult<T> = Result<T, SocketError>;
