use crate::output::{self, Marker};
use device_identity::DeviceIdentity;
use event_socket::{Awaited, EventChannel, EventChannelConfig, OutboundMessage};
use media_server_api::Session;
use probe_config_and_utils::{Config, ServerAddress};
use std::time::Duration;

/// Step 5: connect the event socket the way the TV does and send a
/// keep-alive. Never fatal.
pub async fn websocket_smoke(
    address: &ServerAddress,
    session: &Session,
    identity: &DeviceIdentity,
    config: &Config,
) -> Marker {
    let url = address.socket_url(&session.access_token, identity.device_id());
    let display = address.redacted_socket_url(&session.access_token, identity.device_id());
    output::step(5, &format!("WebSocket test: {display}"));

    let socket_config = EventChannelConfig {
        handshake_timeout: config.handshake_timeout(),
        drain_idle: config.drain_idle(),
        close_grace: config.close_grace(),
    };
    smoke_test(&url, socket_config, config.smoke_wait()).await
}

async fn smoke_test(url: &str, socket_config: EventChannelConfig, wait: Duration) -> Marker {
    let mut channel = match EventChannel::connect(url, socket_config).await {
        Ok(channel) => channel,
        Err(e) => {
            output::fail(&e.to_string());
            return Marker::Fail;
        }
    };
    output::ok("WebSocket connected!");

    if let Err(e) = channel.send(OutboundMessage::KeepAlive).await {
        output::fail(&format!("Could not send KeepAlive: {e}"));
        channel.close().await;
        return Marker::Fail;
    }
    output::note("Sent KeepAlive.");

    let marker = match channel.await_next(wait).await {
        Ok(Awaited::Notification(n)) => {
            let kind = if n.message_type.is_empty() { "unknown" } else { n.message_type.as_str() };
            output::note(&format!("Received: MessageType={kind}"));
            Marker::Ok
        }
        Ok(Awaited::Malformed { raw, .. }) => {
            let excerpt: String = raw.chars().take(80).collect();
            output::warn(&format!("Received a message that is not a notification: {excerpt}"));
            Marker::Warn
        }
        Ok(Awaited::Timeout) => {
            output::info(&format!(
                "No message received in {}s (normal, the server sends on events).",
                wait.as_secs_f32()
            ));
            Marker::Ok
        }
        Err(e) => {
            output::fail(&e.to_string());
            return Marker::Fail;
        }
    };

    channel.close().await;
    output::ok("WebSocket is working. Remote control will function.");
    marker
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::{SinkExt, StreamExt};
    use tokio::net::TcpListener;
    use tokio_tungstenite::accept_async;
    use tokio_tungstenite::tungstenite::Message;

    fn config() -> EventChannelConfig {
        EventChannelConfig {
            handshake_timeout: Duration::from_secs(2),
            drain_idle: Duration::from_millis(100),
            close_grace: Duration::from_millis(500),
        }
    }

    #[tokio::test]
    async fn test_smoke_receives_reply_to_keep_alive() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (tcp, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(tcp).await.unwrap();
            while let Some(Ok(message)) = ws.next().await {
                if message.is_text() {
                    let reply = r#"{"MessageType":"KeepAlive"}"#;
                    let _ = ws.send(Message::Text(reply.into())).await;
                }
            }
        });

        let marker = smoke_test(&format!("ws://{addr}/emby/socket"), config(), Duration::from_secs(2)).await;
        assert_eq!(marker, Marker::Ok);
    }

    #[tokio::test]
    async fn test_smoke_fails_without_server() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };

        let marker = smoke_test(&format!("ws://{addr}/emby/socket"), config(), Duration::from_millis(100)).await;
        assert_eq!(marker, Marker::Fail);
    }
}
