//! Identity generation and header rendering.

use std::fmt;
use uuid::Uuid;

/// Prefix that marks ids generated by the probe in the server's device list.
const DEVICE_ID_PREFIX: &str = "test-";

/// Number of hex characters taken from the random UUID.
const DEVICE_ID_HEX_LEN: usize = 16;

/// Immutable identity declared to the media server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    device_name: String,
    device_id: String,
    client_name: String,
    app_version: String,
}

impl DeviceIdentity {
    /// Generate a new identity with a random device id.
    pub fn generate(
        device_name: impl Into<String>,
        client_name: impl Into<String>,
        app_version: impl Into<String>,
    ) -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        let device_id = format!("{DEVICE_ID_PREFIX}{}", &hex[..DEVICE_ID_HEX_LEN]);
        Self::with_device_id(device_name, device_id, client_name, app_version)
    }

    /// Build an identity with a known device id.
    pub fn with_device_id(
        device_name: impl Into<String>,
        device_id: impl Into<String>,
        client_name: impl Into<String>,
        app_version: impl Into<String>,
    ) -> Self {
        Self {
            device_name: device_name.into(),
            device_id: device_id.into(),
            client_name: client_name.into(),
            app_version: app_version.into(),
        }
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// Render the `Authorization` header value.
    ///
    /// The user id is empty until authentication has succeeded.
    pub fn authorization_header(&self, user_id: Option<&str>) -> String {
        format!(
            "MediaBrowser Client=\"{}\", Device=\"{}\", DeviceId=\"{}\", Version=\"{}\", UserId=\"{}\"",
            self.client_name,
            self.device_name,
            self.device_id,
            self.app_version,
            user_id.unwrap_or_default()
        )
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.client_name, self.app_version, self.device_id
        )
    }
}
