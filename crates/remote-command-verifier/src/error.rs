//! Verifier error types.

use thiserror::Error;

/// Failures that stop the command test before or instead of a normal run.
#[derive(Error, Debug)]
pub enum VerifierError {
    /// No session row exists for this device
    #[error("could not find session ID for this device")]
    MissingSession,

    /// Event channel could not be opened
    #[error("event channel failed: {0}")]
    Transport(#[from] event_socket::SocketError),

    /// Request channel failed while preparing the run
    #[error("request failed: {0}")]
    Api(#[from] media_server_api::ApiError),
}

/// Result type alias using VerifierError.
pub type VerifierResult<T> = Result<T, VerifierError>;
