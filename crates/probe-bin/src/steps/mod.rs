//! The probe's steps, in the order the TV performs them.

mod auth;
mod capabilities;
mod connection;
mod quick_connect;
mod remote_commands;
mod syncplay;
mod trickplay;
mod version;
mod websocket;

pub use auth::authenticate;
pub use capabilities::post_capabilities;
pub use connection::check_connection;
pub use quick_connect::quick_connect;
pub use remote_commands::remote_commands;
pub use syncplay::syncplay;
pub use trickplay::trickplay;
pub use version::check_version;
pub use websocket::websocket_smoke;

use media_server_api::ApiError;

/// Short form of an API error for a report line.
fn describe(error: &ApiError) -> String {
    match error {
        ApiError::Status { status, .. } => format!("HTTP {status}"),
        other => other.to_string(),
    }
}

/// Like [`describe`], with up to 120 characters of the response body.
fn describe_with_body(error: &ApiError) -> String {
    match error {
        ApiError::Status { status, body } => {
            let excerpt: String = body.chars().take(120).collect();
            format!("HTTP {status}: {excerpt}")
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let error = ApiError::Status {
            status: 503,
            body: "x".repeat(300),
        };
        assert_eq!(describe(&error), "HTTP 503");
        assert_eq!(describe_with_body(&error).len(), "HTTP 503: ".len() + 120);

        let invalid = ApiError::InvalidResponse("no token".into());
        assert_eq!(describe(&invalid), "Invalid response: no token");
    }
}
