//! The fixed list of remote control commands.

use event_socket::NotificationKind;
use media_server_api::{ApiRequest, HttpMethod, PlayableItem};
use std::time::Duration;

/// One command to dispatch and the notification kind it should produce.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSpec {
    pub description: String,
    pub method: HttpMethod,
    /// Concrete path with the session id and query filled in.
    pub path: String,
    pub body: Option<serde_json::Value>,
    pub expected: NotificationKind,
}

impl CommandSpec {
    fn post(description: &str, path: String, expected: NotificationKind) -> Self {
        Self {
            description: description.to_string(),
            method: HttpMethod::Post,
            path,
            body: None,
            expected,
        }
    }

    /// The request to send, bounded by `timeout`.
    pub fn to_request(&self, timeout: Duration) -> ApiRequest {
        let request = match self.method {
            HttpMethod::Get => ApiRequest::get(self.path.clone()),
            HttpMethod::Post => ApiRequest::post(self.path.clone()),
        };
        let request = match &self.body {
            Some(body) => request.with_body(body.clone()),
            None => request,
        };
        request.with_timeout(timeout)
    }
}

/// (description, path suffix after `/emby/Sessions/{id}`, expected kind)
const FIXED_COMMANDS: &[(&str, &str, NotificationKind)] = &[
    ("Playstate: Pause", "/Playing/Pause", NotificationKind::Playstate),
    ("Playstate: Unpause", "/Playing/Unpause", NotificationKind::Playstate),
    ("Playstate: Stop", "/Playing/Stop", NotificationKind::Playstate),
    (
        "Playstate: Seek",
        "/Playing/Seek?seekPositionTicks=300000000",
        NotificationKind::Playstate,
    ),
    ("Playstate: NextTrack", "/Playing/NextTrack", NotificationKind::Playstate),
    ("Playstate: PreviousTrack", "/Playing/PreviousTrack", NotificationKind::Playstate),
    (
        "GeneralCommand: SetVolume",
        "/Command/SetVolume?Volume=50",
        NotificationKind::GeneralCommand,
    ),
    ("GeneralCommand: Mute", "/Command/Mute", NotificationKind::GeneralCommand),
    ("GeneralCommand: Unmute", "/Command/Unmute", NotificationKind::GeneralCommand),
    ("GeneralCommand: ToggleMute", "/Command/ToggleMute", NotificationKind::GeneralCommand),
    (
        "GeneralCommand: SetAudioStreamIndex",
        "/Command/SetAudioStreamIndex?Index=0",
        NotificationKind::GeneralCommand,
    ),
    (
        "GeneralCommand: SetSubtitleStreamIndex",
        "/Command/SetSubtitleStreamIndex?Index=0",
        NotificationKind::GeneralCommand,
    ),
];

/// Build the ordered catalog for `session_id`.
///
/// The PlayNow command leads the list only when a playable item is known.
pub fn build_catalog(session_id: &str, item: Option<&PlayableItem>) -> Vec<CommandSpec> {
    let base = format!("/emby/Sessions/{session_id}");
    let mut catalog = Vec::with_capacity(FIXED_COMMANDS.len() + 4);

    if let Some(item) = item {
        catalog.push(CommandSpec::post(
            &format!("PlayCommand: PlayNow ({})", item.name),
            format!(
                "{base}/Playing?ItemIds={}&StartPositionTicks=0&PlayCommand=PlayNow",
                item.id
            ),
            NotificationKind::Play,
        ));
    }

    for (description, suffix, expected) in FIXED_COMMANDS {
        catalog.push(CommandSpec::post(description, format!("{base}{suffix}"), *expected));
    }

    catalog.push(CommandSpec {
        body: Some(serde_json::json!({
            "Name": "DisplayMessage",
            "Arguments": {
                "Header": "Test",
                "Text": "Hello from test script",
                "TimeoutMs": "3000"
            }
        })),
        ..CommandSpec::post(
            "GeneralCommand: DisplayMessage",
            format!("{base}/Command"),
            NotificationKind::GeneralCommand,
        )
    });
    catalog.push(CommandSpec::post(
        "GeneralCommand: GoHome",
        format!("{base}/Command/GoHome"),
        NotificationKind::GeneralCommand,
    ));
    catalog.push(CommandSpec::post(
        "GeneralCommand: DisplayContent",
        format!("{base}/Command/DisplayContent?ItemId=test123&ItemName=TestItem&ItemType=Movie"),
        NotificationKind::GeneralCommand,
    ));

    catalog
}
