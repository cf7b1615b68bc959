//! reqwest-backed request channel.

use crate::{ApiRequest, ApiResponse, ApiResult, HttpMethod, RequestChannel, Session};
use async_trait::async_trait;
use device_identity::DeviceIdentity;
use probe_config_and_utils::ServerAddress;
use std::time::Duration;

const AUTHORIZATION_HEADER: &str = "Authorization";
const TOKEN_HEADER: &str = "X-MediaBrowser-Token";
const CONTENT_TYPE_JSON: &str = "application/json; charset=UTF-8";

#[derive(Clone, Debug)]
struct Credentials {
    user_id: String,
    access_token: String,
}

/// Media server client that tags every call with the device identity.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct MediaServerClient {
    http_client: reqwest::Client,
    address: ServerAddress,
    identity: DeviceIdentity,
    credentials: Option<Credentials>,
    default_timeout: Duration,
}

impl MediaServerClient {
    /// Create an unauthenticated client.
    pub fn new(address: ServerAddress, identity: DeviceIdentity, default_timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            address,
            identity,
            credentials: None,
            default_timeout,
        }
    }

    /// A copy of this client that sends the session's user id and token.
    pub fn with_session(&self, session: &Session) -> Self {
        Self {
            credentials: Some(Credentials {
                user_id: session.user_id.clone(),
                access_token: session.access_token.clone(),
            }),
            ..self.clone()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// Headers attached to every call, in send order.
    fn headers(&self) -> Vec<(&'static str, String)> {
        let user_id = self.credentials.as_ref().map(|c| c.user_id.as_str());
        let mut headers = vec![
            (AUTHORIZATION_HEADER, self.identity.authorization_header(user_id)),
            ("Content-Type", CONTENT_TYPE_JSON.to_string()),
        ];
        if let Some(credentials) = &self.credentials {
            headers.push((TOKEN_HEADER, credentials.access_token.clone()));
        }
        headers
    }
}

#[async_trait]
impl RequestChannel for MediaServerClient {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let url = self.address.api_url(&request.path);
        let timeout = request.timeout.unwrap_or(self.default_timeout);

        let mut builder = match request.method {
            HttpMethod::Get => self.http_client.get(&url),
            HttpMethod::Post => self.http_client.post(&url),
        };
        builder = builder.timeout(timeout);
        for (name, value) in self.headers() {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        tracing::debug!(method = %request.method, path = %request.path, "Sending request");

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(method = %request.method, path = %request.path, status, "Received response");

        Ok(ApiResponse { status, body })
    }
}
