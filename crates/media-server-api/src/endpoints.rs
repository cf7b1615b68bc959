//! Typed calls for every server endpoint the TV app touches.
//!
//! Each helper takes any [`RequestChannel`], so the same code runs against
//! the live server and against a scripted double. Statuses outside the
//! accepted set come back as [`ApiError::Status`].

use crate::models::{AuthenticateByName, ItemsResult};
use crate::{
    ApiError, ApiRequest, ApiResult, BaseItem, ClientCapabilities, PlayableItem,
    PublicSystemInfo, QuickConnectResult, RequestChannel, Session, SessionEntry,
    AuthenticationResult,
};

pub const PUBLIC_INFO_PATH: &str = "/emby/System/Info/Public?format=json";
pub const AUTHENTICATE_PATH: &str = "/emby/Users/AuthenticateByName?format=json";
pub const CAPABILITIES_PATH: &str = "/emby/Sessions/Capabilities/Full";
pub const SESSIONS_PATH: &str = "/emby/Sessions?format=json";
pub const QUICK_CONNECT_ENABLED_PATH: &str = "/emby/QuickConnect/Enabled";
pub const QUICK_CONNECT_INITIATE_PATH: &str = "/emby/QuickConnect/Initiate";
pub const SYNCPLAY_LIST_PATH: &str = "/emby/SyncPlay/List";
pub const SYNCPLAY_NEW_PATH: &str = "/emby/SyncPlay/New";
pub const SYNCPLAY_LEAVE_PATH: &str = "/emby/SyncPlay/Leave";

/// Group name used when probing SyncPlay.
pub const SYNCPLAY_GROUP_NAME: &str = "Test Group (Orsay)";

const OK: &[u16] = &[200];
const OK_OR_NO_CONTENT: &[u16] = &[200, 204];

/// `GET /emby/System/Info/Public`.
pub async fn fetch_public_info<C>(channel: &C) -> ApiResult<PublicSystemInfo>
where
    C: RequestChannel + ?Sized,
{
    let response = channel.send(ApiRequest::get(PUBLIC_INFO_PATH)).await?.require(OK)?;
    response.json()
}

/// Log in with username and password.
///
/// A 200 without an access token is treated as a failed login.
pub async fn authenticate_by_name<C>(channel: &C, username: &str, password: &str) -> ApiResult<Session>
where
    C: RequestChannel + ?Sized,
{
    let request = ApiRequest::post(AUTHENTICATE_PATH).with_json(&AuthenticateByName {
        username,
        pw: password,
    })?;
    let response = channel.send(request).await?.require(OK)?;
    let result: AuthenticationResult = response.json()?;

    let access_token = result
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::InvalidResponse("authentication returned no access token".into()))?;

    let session = Session {
        user_id: result.user.id,
        access_token,
        session_id: result.session_info.and_then(|s| s.id),
    };
    tracing::debug!(user_id = %session.user_id, session_id = ?session.session_id, "Authenticated");
    Ok(session)
}

/// Register what this client can play and which commands it accepts.
pub async fn post_capabilities<C>(channel: &C, capabilities: &ClientCapabilities) -> ApiResult<()>
where
    C: RequestChannel + ?Sized,
{
    let request = ApiRequest::post(CAPABILITIES_PATH).with_json(capabilities)?;
    channel.send(request).await?.require(OK_OR_NO_CONTENT)?;
    Ok(())
}

/// `GET /emby/Sessions`.
pub async fn list_sessions<C>(channel: &C) -> ApiResult<Vec<SessionEntry>>
where
    C: RequestChannel + ?Sized,
{
    channel.send(ApiRequest::get(SESSIONS_PATH)).await?.require(OK)?.json()
}

/// Id of the session row registered by `device_id`.
///
/// When several rows match, the first one wins.
pub fn find_session_for_device(sessions: &[SessionEntry], device_id: &str) -> Option<String> {
    let mut matches = sessions
        .iter()
        .filter(|s| s.device_id.as_deref() == Some(device_id));
    let first = matches.next()?;

    let extra = matches.count();
    if extra > 0 {
        tracing::warn!(
            device_id,
            session_id = %first.id,
            duplicates = extra,
            "Several sessions share this device id, using the first"
        );
    }
    Some(first.id.clone())
}

/// Return `known` when present, otherwise look the device up in the
/// active session list.
///
/// `Ok(None)` means the id could not be determined, including when the
/// session list itself was refused.
pub async fn resolve_session_id<C>(
    channel: &C,
    known: Option<&str>,
    device_id: &str,
) -> ApiResult<Option<String>>
where
    C: RequestChannel + ?Sized,
{
    if let Some(id) = known.filter(|id| !id.is_empty()) {
        return Ok(Some(id.to_string()));
    }

    match list_sessions(channel).await {
        Ok(sessions) => Ok(find_session_for_device(&sessions, device_id)),
        Err(ApiError::Status { status, .. }) => {
            tracing::warn!(status, "Session list refused");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn items_path(user_id: &str, limit: u32, fields: Option<&str>) -> String {
    let mut path = format!(
        "/emby/Users/{user_id}/Items?format=json&IncludeItemTypes=Movie,Episode&Recursive=true&Limit={limit}"
    );
    if let Some(fields) = fields {
        path.push_str("&Fields=");
        path.push_str(fields);
    }
    path
}

/// First movie or episode in the user's library, if any.
pub async fn find_playable_item<C>(channel: &C, user_id: &str) -> ApiResult<Option<PlayableItem>>
where
    C: RequestChannel + ?Sized,
{
    let response = channel
        .send(ApiRequest::get(items_path(user_id, 1, None)))
        .await?
        .require(OK)?;
    let result: ItemsResult = response.json()?;
    Ok(result.items.into_iter().next().map(PlayableItem::from))
}

/// Up to five video items with their trickplay metadata.
pub async fn items_with_trickplay<C>(channel: &C, user_id: &str) -> ApiResult<Vec<BaseItem>>
where
    C: RequestChannel + ?Sized,
{
    let response = channel
        .send(ApiRequest::get(items_path(user_id, 5, Some("Trickplay"))))
        .await?
        .require(OK)?;
    let result: ItemsResult = response.json()?;
    Ok(result.items)
}

/// Whether Quick Connect is switched on.
pub async fn quick_connect_enabled<C>(channel: &C) -> ApiResult<bool>
where
    C: RequestChannel + ?Sized,
{
    channel
        .send(ApiRequest::get(QUICK_CONNECT_ENABLED_PATH))
        .await?
        .require(OK)?
        .json()
}

/// Start a Quick Connect pairing.
pub async fn quick_connect_initiate<C>(channel: &C) -> ApiResult<QuickConnectResult>
where
    C: RequestChannel + ?Sized,
{
    channel
        .send(ApiRequest::post(QUICK_CONNECT_INITIATE_PATH))
        .await?
        .require(OK)?
        .json()
}

/// Existing SyncPlay groups. Only the count is interesting here.
pub async fn syncplay_list<C>(channel: &C) -> ApiResult<Vec<serde_json::Value>>
where
    C: RequestChannel + ?Sized,
{
    channel
        .send(ApiRequest::get(SYNCPLAY_LIST_PATH))
        .await?
        .require(OK)?
        .json()
}

pub async fn syncplay_new<C>(channel: &C, group_name: &str) -> ApiResult<()>
where
    C: RequestChannel + ?Sized,
{
    let request = ApiRequest::post(SYNCPLAY_NEW_PATH)
        .with_body(serde_json::json!({ "GroupName": group_name }));
    channel.send(request).await?.require(OK_OR_NO_CONTENT)?;
    Ok(())
}

pub async fn syncplay_leave<C>(channel: &C) -> ApiResult<()>
where
    C: RequestChannel + ?Sized,
{
    channel
        .send(ApiRequest::post(SYNCPLAY_LEAVE_PATH))
        .await?
        .require(OK_OR_NO_CONTENT)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedChannel;
    use crate::{ApiResponse, HttpMethod};

    fn entry(id: &str, device_id: Option<&str>) -> SessionEntry {
        SessionEntry {
            id: id.to_string(),
            device_id: device_id.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_fetch_public_info() {
        let channel = ScriptedChannel::new();
        channel.push(ApiResponse::new(200, r#"{"ServerName":"Den","Version":"10.9.1"}"#));

        let info = fetch_public_info(&channel).await.unwrap();

        assert_eq!(info.version.as_deref(), Some("10.9.1"));
        let requests = channel.requests();
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].path, PUBLIC_INFO_PATH);
    }

    #[tokio::test]
    async fn test_fetch_public_info_non_200() {
        let channel = ScriptedChannel::new();
        channel.push(ApiResponse::new(502, "bad gateway"));

        let err = fetch_public_info(&channel).await.unwrap_err();
        assert_eq!(err.status(), Some(502));
    }

    #[tokio::test]
    async fn test_authenticate_by_name() {
        let channel = ScriptedChannel::new();
        channel.push(ApiResponse::new(
            200,
            r#"{"AccessToken":"tok","User":{"Id":"u1"},"SessionInfo":{"Id":"s1"}}"#,
        ));

        let session = authenticate_by_name(&channel, "alice", "secret").await.unwrap();

        assert_eq!(session.user_id, "u1");
        assert_eq!(session.access_token, "tok");
        assert_eq!(session.session_id.as_deref(), Some("s1"));

        let body = channel.requests()[0].body.clone().unwrap();
        assert_eq!(body, serde_json::json!({"Username": "alice", "Pw": "secret"}));
    }

    #[tokio::test]
    async fn test_authenticate_without_token_fails() {
        let channel = ScriptedChannel::new();
        channel.push(ApiResponse::new(200, r#"{"User":{"Id":"u1"}}"#));

        let err = authenticate_by_name(&channel, "alice", "").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_authenticate_rejected() {
        let channel = ScriptedChannel::new();
        channel.push(ApiResponse::new(401, ""));

        let err = authenticate_by_name(&channel, "alice", "wrong").await.unwrap_err();
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn test_post_capabilities_accepts_204() {
        let channel = ScriptedChannel::new();
        channel.push(ApiResponse::new(204, ""));

        post_capabilities(&channel, &ClientCapabilities::orsay()).await.unwrap();

        let request = &channel.requests()[0];
        assert_eq!(request.path, CAPABILITIES_PATH);
        assert_eq!(request.body.as_ref().unwrap()["SupportsMediaControl"], true);
    }

    #[test]
    fn test_find_session_for_device() {
        let sessions = vec![
            entry("other", Some("phone")),
            entry("no-device", None),
            entry("mine", Some("test-0123456789abcdef")),
        ];

        assert_eq!(
            find_session_for_device(&sessions, "test-0123456789abcdef").as_deref(),
            Some("mine")
        );
        assert_eq!(find_session_for_device(&sessions, "test-missing"), None);
    }

    #[test]
    fn test_find_session_for_device_with_duplicates_takes_first() {
        let sessions = vec![
            entry("stale", Some("dev")),
            entry("other", Some("phone")),
            entry("fresh", Some("dev")),
        ];

        assert_eq!(find_session_for_device(&sessions, "dev").as_deref(), Some("stale"));
    }

    #[tokio::test]
    async fn test_resolve_session_id_prefers_known() {
        let channel = ScriptedChannel::new();

        let id = resolve_session_id(&channel, Some("known"), "dev").await.unwrap();

        assert_eq!(id.as_deref(), Some("known"));
        assert!(channel.requests().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_session_id_queries_sessions() {
        let channel = ScriptedChannel::new();
        channel.push(ApiResponse::new(
            200,
            r#"[{"Id":"s-other","DeviceId":"x"},{"Id":"s-mine","DeviceId":"dev"}]"#,
        ));

        let id = resolve_session_id(&channel, None, "dev").await.unwrap();

        assert_eq!(id.as_deref(), Some("s-mine"));
        assert_eq!(channel.requests()[0].path, SESSIONS_PATH);
    }

    #[tokio::test]
    async fn test_resolve_session_id_absent() {
        let channel = ScriptedChannel::new();
        channel.push(ApiResponse::new(200, r#"[{"Id":"s-other","DeviceId":"x"}]"#));
        assert_eq!(resolve_session_id(&channel, None, "dev").await.unwrap(), None);

        channel.push(ApiResponse::new(403, ""));
        assert_eq!(resolve_session_id(&channel, None, "dev").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_playable_item() {
        let channel = ScriptedChannel::new();
        channel.push(ApiResponse::new(200, r#"{"Items":[{"Id":"m1","Name":"Movie"}]}"#));
        channel.push(ApiResponse::new(200, r#"{"Items":[]}"#));

        let item = find_playable_item(&channel, "u1").await.unwrap();
        assert_eq!(
            item,
            Some(PlayableItem {
                id: "m1".to_string(),
                name: "Movie".to_string()
            })
        );
        assert_eq!(find_playable_item(&channel, "u1").await.unwrap(), None);

        assert_eq!(
            channel.requests()[0].path,
            "/emby/Users/u1/Items?format=json&IncludeItemTypes=Movie,Episode&Recursive=true&Limit=1"
        );
    }

    #[tokio::test]
    async fn test_items_with_trickplay_path() {
        let channel = ScriptedChannel::new();
        channel.push(ApiResponse::new(200, r#"{"Items":[{"Id":"a"},{"Id":"b"}]}"#));

        let items = items_with_trickplay(&channel, "u1").await.unwrap();

        assert_eq!(items.len(), 2);
        assert!(channel.requests()[0].path.ends_with("&Limit=5&Fields=Trickplay"));
    }

    #[tokio::test]
    async fn test_quick_connect_calls() {
        let channel = ScriptedChannel::new();
        channel.push(ApiResponse::new(200, "true"));
        channel.push(ApiResponse::new(200, r#"{"Code":"123456","Secret":"abcdefghijk"}"#));

        assert!(quick_connect_enabled(&channel).await.unwrap());
        let result = quick_connect_initiate(&channel).await.unwrap();
        assert_eq!(result.code_text().as_deref(), Some("123456"));

        let requests = channel.requests();
        assert_eq!(requests[1].method, HttpMethod::Post);
        assert_eq!(requests[1].path, QUICK_CONNECT_INITIATE_PATH);
    }

    #[tokio::test]
    async fn test_syncplay_calls() {
        let channel = ScriptedChannel::new();
        channel.push(ApiResponse::new(200, r#"[{"GroupId":"g"}]"#));
        channel.push(ApiResponse::new(204, ""));
        channel.push(ApiResponse::new(500, "boom"));

        assert_eq!(syncplay_list(&channel).await.unwrap().len(), 1);
        syncplay_new(&channel, SYNCPLAY_GROUP_NAME).await.unwrap();
        assert_eq!(syncplay_leave(&channel).await.unwrap_err().status(), Some(500));

        let requests = channel.requests();
        assert_eq!(
            requests[1].body,
            Some(serde_json::json!({"GroupName": "Test Group (Orsay)"}))
        );
    }
}
