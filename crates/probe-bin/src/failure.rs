//! Failures that end the probe with a non-zero exit code.

use thiserror::Error;

/// The three fatal classes. Everything else is reported and the probe moves on.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProbeFailure {
    /// Public info unreachable or refused
    #[error("Connection failed: {0}")]
    Connectivity(String),

    /// Server older than the TV app accepts
    #[error("Version check failed: server {current} is older than {required}")]
    Compatibility { current: String, required: String },

    /// Credentials were given and rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),
}

impl ProbeFailure {
    /// What the TV would do at this point.
    pub fn tv_outcome(&self) -> &'static str {
        match self {
            ProbeFailure::Connectivity(_) => {
                "The TV app would show an error and return to the server entry page."
            }
            ProbeFailure::Compatibility { .. } => {
                "The TV app would show: 'Please update it and restart the app'"
            }
            ProbeFailure::Authentication(_) => {
                "The TV app would return to the user selection page."
            }
        }
    }
}
