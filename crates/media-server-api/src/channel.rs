//! The request/response seam between the probe and the media server.

use crate::{ApiError, ApiResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// HTTP methods the TV app uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
        }
    }
}

/// One outbound call, addressed relative to the server base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path starting with `/`, query string included.
    pub path: String,
    pub body: Option<serde_json::Value>,
    /// Per-call timeout; the channel default applies when absent.
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: None,
            timeout: None,
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: None,
            timeout: None,
        }
    }

    /// Attach a JSON body.
    pub fn with_json<T: Serialize>(mut self, body: &T) -> ApiResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach an already-built JSON body.
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Raw status and body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 200 and 204 are the only statuses the TV treats as success.
    pub fn is_success(&self) -> bool {
        matches!(self.status, 200 | 204)
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// At most `max_chars` characters of the body, for one-line reports.
    pub fn body_excerpt(&self, max_chars: usize) -> String {
        self.body.chars().take(max_chars).collect()
    }

    /// Turn a response whose status is not in `accepted` into an error.
    pub fn require(self, accepted: &[u16]) -> ApiResult<Self> {
        if accepted.contains(&self.status) {
            Ok(self)
        } else {
            Err(ApiError::Status {
                status: self.status,
                body: self.body_excerpt(200),
            })
        }
    }
}

/// Request/response transport carrying identity and credentials.
///
/// Non-2xx statuses are returned as ordinary responses; only transport
/// failures are errors.
#[async_trait]
pub trait RequestChannel: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse>;
}
