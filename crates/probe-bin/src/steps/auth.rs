use crate::output;
use crate::ProbeFailure;
use media_server_api::{endpoints, RequestChannel, Session};
use probe_config_and_utils::{mask_token, ServerAddress};

/// Step 3: username/password login.
pub async fn authenticate<C>(
    channel: &C,
    address: &ServerAddress,
    username: &str,
    password: &str,
) -> Result<Session, ProbeFailure>
where
    C: RequestChannel + ?Sized,
{
    output::step(
        3,
        &format!(
            "Authenticating as '{username}': POST {}",
            address.api_url(endpoints::AUTHENTICATE_PATH)
        ),
    );

    match endpoints::authenticate_by_name(channel, username, password).await {
        Ok(session) => {
            output::ok("Authenticated!");
            output::row("User ID", &session.user_id);
            output::row("Session ID", session.session_id.as_deref().unwrap_or("(not provided)"));
            output::row("Token", &mask_token(&session.access_token));
            Ok(session)
        }
        Err(e) => {
            output::fail(&super::describe(&e));
            Err(ProbeFailure::Authentication(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_server_api::testing::ScriptedChannel;
    use media_server_api::ApiResponse;

    #[tokio::test]
    async fn test_rejected_login_is_fatal() {
        let channel = ScriptedChannel::new();
        channel.push(ApiResponse::new(401, ""));
        let address = ServerAddress::parse("http://tv.local").unwrap();

        let failure = authenticate(&channel, &address, "alice", "bad").await.unwrap_err();
        assert!(matches!(failure, ProbeFailure::Authentication(_)));
    }

    #[tokio::test]
    async fn test_login_returns_session() {
        let channel = ScriptedChannel::new();
        channel.push(ApiResponse::new(
            200,
            r#"{"AccessToken":"0123456789abcdef","User":{"Id":"u1"}}"#,
        ));
        let address = ServerAddress::parse("http://tv.local").unwrap();

        let session = authenticate(&channel, &address, "alice", "").await.unwrap();
        assert_eq!(session.user_id, "u1");
        assert!(session.session_id.is_none());
    }
}
