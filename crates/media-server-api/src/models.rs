//! Wire types exchanged with the media server.
//!
//! The server speaks PascalCase JSON. Fields the probe only prints are
//! optional so a partial response still parses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Commands the Orsay app registers as supported.
pub const ORSAY_SUPPORTED_COMMANDS: &[&str] = &[
    "SetAudioStreamIndex",
    "SetSubtitleStreamIndex",
    "Mute",
    "Unmute",
    "ToggleMute",
    "SetVolume",
    "DisplayContent",
    "DisplayMessage",
    "GoHome",
];

/// `GET /System/Info/Public`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublicSystemInfo {
    #[serde(default)]
    pub server_name: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub local_address: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AuthenticateByName<'a> {
    pub username: &'a str,
    pub pw: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserDto {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionInfoDto {
    #[serde(default)]
    pub id: Option<String>,
}

/// `POST /Users/AuthenticateByName`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthenticationResult {
    #[serde(default)]
    pub access_token: Option<String>,
    pub user: UserDto,
    #[serde(default)]
    pub session_info: Option<SessionInfoDto>,
}

/// Credentials and session produced by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub access_token: String,
    /// Absent when the login response did not name the session row.
    pub session_id: Option<String>,
}

/// One row of `GET /Sessions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionEntry {
    pub id: String,
    #[serde(default)]
    pub device_id: Option<String>,
}

/// Body of `POST /Sessions/Capabilities/Full`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClientCapabilities {
    pub playable_media_types: Vec<String>,
    pub supports_media_control: bool,
    pub supports_persistent_identifier: bool,
    pub supported_commands: Vec<String>,
}

impl ClientCapabilities {
    /// What the Orsay app declares after login.
    pub fn orsay() -> Self {
        Self {
            playable_media_types: vec!["Audio".to_string(), "Video".to_string()],
            supports_media_control: true,
            supports_persistent_identifier: false,
            supported_commands: ORSAY_SUPPORTED_COMMANDS
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

/// Trickplay tile sheet metadata for one width.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrickplayInfo {
    #[serde(default)]
    pub tile_width: Option<u32>,
    #[serde(default)]
    pub tile_height: Option<u32>,
    #[serde(default)]
    pub thumbnail_count: Option<u32>,
    /// Milliseconds between thumbnails.
    #[serde(default)]
    pub interval: Option<u64>,
}

/// Library item as returned by `GET /Users/{id}/Items`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BaseItem {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Media source id -> width -> tile metadata.
    #[serde(default)]
    pub trickplay: Option<BTreeMap<String, BTreeMap<String, TrickplayInfo>>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ItemsResult {
    #[serde(default)]
    pub items: Vec<BaseItem>,
}

/// Item the Play command can target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayableItem {
    pub id: String,
    pub name: String,
}

impl From<BaseItem> for PlayableItem {
    fn from(item: BaseItem) -> Self {
        Self {
            id: item.id,
            name: item.name.unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// `POST /QuickConnect/Initiate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuickConnectResult {
    /// Servers have sent both strings and numbers here.
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub secret: Option<String>,
}

impl QuickConnectResult {
    /// The pairing code as the user would type it.
    pub fn code_text(&self) -> Option<String> {
        match &self.code {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_serialization() {
        let json = serde_json::to_value(ClientCapabilities::orsay()).unwrap();

        assert_eq!(json["PlayableMediaTypes"], serde_json::json!(["Audio", "Video"]));
        assert_eq!(json["SupportsMediaControl"], true);
        assert_eq!(json["SupportsPersistentIdentifier"], false);
        assert_eq!(json["SupportedCommands"].as_array().unwrap().len(), 9);
        assert_eq!(json["SupportedCommands"][0], "SetAudioStreamIndex");
    }

    #[test]
    fn test_authentication_result_deserialize() {
        let json = r#"{
            "AccessToken": "abc",
            "User": {"Id": "user-1", "Name": "alice"},
            "SessionInfo": {"Id": "session-9", "DeviceId": "test-1"},
            "ServerId": "srv"
        }"#;
        let result: AuthenticationResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.access_token.as_deref(), Some("abc"));
        assert_eq!(result.user.id, "user-1");
        assert_eq!(result.session_info.unwrap().id.as_deref(), Some("session-9"));
    }

    #[test]
    fn test_public_info_tolerates_missing_fields() {
        let info: PublicSystemInfo = serde_json::from_str(r#"{"ServerName":"Den"}"#).unwrap();
        assert_eq!(info.server_name.as_deref(), Some("Den"));
        assert!(info.version.is_none());
    }

    #[test]
    fn test_trickplay_deserialize() {
        let json = r#"{
            "Id": "item-1",
            "Name": "Movie",
            "Trickplay": {
                "source-a": {
                    "320": {"Width": 320, "TileWidth": 10, "TileHeight": 10, "ThumbnailCount": 420, "Interval": 10000}
                }
            }
        }"#;
        let item: BaseItem = serde_json::from_str(json).unwrap();
        let info = &item.trickplay.unwrap()["source-a"]["320"];

        assert_eq!(info.tile_width, Some(10));
        assert_eq!(info.thumbnail_count, Some(420));
        assert_eq!(info.interval, Some(10_000));
    }

    #[test]
    fn test_quick_connect_code_variants() {
        let as_string: QuickConnectResult =
            serde_json::from_str(r#"{"Code":"123456","Secret":"s"}"#).unwrap();
        let as_number: QuickConnectResult = serde_json::from_str(r#"{"Code":987654}"#).unwrap();
        let missing: QuickConnectResult = serde_json::from_str(r#"{}"#).unwrap();

        assert_eq!(as_string.code_text().as_deref(), Some("123456"));
        assert_eq!(as_number.code_text().as_deref(), Some("987654"));
        assert!(missing.code_text().is_none());
    }

    #[test]
    fn test_playable_item_name_fallback() {
        let item = BaseItem {
            id: "i".to_string(),
            name: None,
            trickplay: None,
        };
        assert_eq!(PlayableItem::from(item).name, "Unknown");
    }
}
