//! Messages carried on the event channel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Notification kinds the remote command checks expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Play,
    Playstate,
    GeneralCommand,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Play => "Play",
            NotificationKind::Playstate => "Playstate",
            NotificationKind::GeneralCommand => "GeneralCommand",
        }
    }

    /// The `Data` field that names what was requested.
    pub fn detail_field(&self) -> &'static str {
        match self {
            NotificationKind::Play => "PlayCommand",
            NotificationKind::Playstate => "Command",
            NotificationKind::GeneralCommand => "Name",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A server-pushed message.
///
/// `Data` is usually an object, but keep-alive notices carry a bare
/// number, so it is kept as a raw value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "MessageType", default)]
    pub message_type: String,
    #[serde(rename = "Data", default)]
    pub data: serde_json::Value,
}

impl Notification {
    pub fn new(message_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            message_type: message_type.into(),
            data,
        }
    }

    /// Parse a text frame.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// `Data.<key>` rendered for a report line.
    ///
    /// Strings come out bare; any other value is printed as JSON.
    pub fn data_display(&self, key: &str) -> Option<String> {
        self.data.get(key).map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    pub fn is_kind(&self, kind: NotificationKind) -> bool {
        self.message_type == kind.as_str()
    }
}

/// Messages this client sends on the socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundMessage {
    KeepAlive,
}

impl OutboundMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        match self {
            OutboundMessage::KeepAlive => {
                serde_json::to_string(&serde_json::json!({ "MessageType": "KeepAlive" }))
            }
        }
    }
}
