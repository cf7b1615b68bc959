//! Normalized media server address.
//!
//! The TV stores the server as a bare base URL and appends `/emby/...` paths
//! to it. The WebSocket endpoint lives on the same host with the scheme
//! swapped for its real-time equivalent.

use crate::{mask_secret, CoreError, CoreResult};
use std::fmt;
use url::{form_urlencoded, Url};

/// Base URL of the media server, without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddress {
    base: String,
}

impl ServerAddress {
    /// Parse and normalize a user-supplied server URL.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        let trimmed = raw.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed)?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(CoreError::UnsupportedScheme(other.to_string())),
        }

        Ok(Self {
            base: trimmed.to_string(),
        })
    }

    /// The normalized base URL.
    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Join a path (starting with `/`, optionally with a query) onto the base.
    pub fn api_url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base, path_and_query)
    }

    /// WebSocket URL the TV subscribes to for remote control events.
    pub fn socket_url(&self, access_token: &str, device_id: &str) -> String {
        self.build_socket_url(access_token, device_id)
    }

    /// Same as [`socket_url`](Self::socket_url) with the token masked, for logs.
    pub fn redacted_socket_url(&self, access_token: &str, device_id: &str) -> String {
        self.build_socket_url(&mask_secret(access_token), device_id)
    }

    fn build_socket_url(&self, access_token: &str, device_id: &str) -> String {
        let ws_base = if let Some(rest) = self.base.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = self.base.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            self.base.clone()
        };

        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("api_key", access_token)
            .append_pair("deviceId", device_id)
            .finish();

        format!("{ws_base}/emby/socket?{query}")
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}
