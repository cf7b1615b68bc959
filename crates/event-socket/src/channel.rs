//! WebSocket event channel.

use crate::{Notification, OutboundMessage, SocketError, SocketResult};
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::{timeout, timeout_at, Instant};
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Event channel timing.
#[derive(Debug, Clone)]
pub struct EventChannelConfig {
    /// Upper bound on the WebSocket upgrade.
    pub handshake_timeout: Duration,
    /// Drain ends once no message arrives for this long.
    pub drain_idle: Duration,
    /// Time allowed for the close handshake before the socket is dropped.
    pub close_grace: Duration,
}

impl Default for EventChannelConfig {
    fn default() -> Self {
        Self {
            handshake_timeout: Duration::from_secs(10),
            drain_idle: Duration::from_secs(1),
            close_grace: Duration::from_secs(5),
        }
    }
}

/// Lifecycle state.
///
/// Opening has no variant: until [`EventChannel::connect`] resolves there is
/// no channel value to ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Closed,
    Open,
    Draining,
    Ready,
}

/// Result of waiting for the next notification.
#[derive(Debug, Clone, PartialEq)]
pub enum Awaited {
    Notification(Notification),
    /// Nothing arrived before the deadline.
    Timeout,
    /// A text frame that is not a notification.
    Malformed { raw: String, error: String },
}

/// Source of server notifications for a single reader.
#[async_trait]
pub trait EventSource: Send {
    /// Wait up to `timeout` for the next notification.
    ///
    /// Transport failures and peer closes are errors; a timeout is not.
    async fn await_next(&mut self, timeout: Duration) -> SocketResult<Awaited>;

    /// Close the source. Safe to call more than once.
    async fn close(&mut self);
}

/// Connection to the server's `/emby/socket` endpoint.
pub struct EventChannel {
    stream: Option<WsStream>,
    state: ChannelState,
    config: EventChannelConfig,
}

impl EventChannel {
    /// Connect without draining. The channel is left in `Open`.
    pub async fn connect(url: &str, config: EventChannelConfig) -> SocketResult<Self> {
        debug!(timeout = ?config.handshake_timeout, "Opening event channel");

        let stream = match timeout(config.handshake_timeout, connect_async(url)).await {
            Err(_) => return Err(SocketError::HandshakeTimeout(config.handshake_timeout)),
            Ok(Err(tungstenite::Error::Url(e))) => return Err(SocketError::InvalidUrl(e.to_string())),
            Ok(Err(e)) => return Err(e.into()),
            Ok(Ok((stream, _response))) => stream,
        };

        info!("Event channel connected");
        Ok(Self {
            stream: Some(stream),
            state: ChannelState::Open,
            config,
        })
    }

    /// Connect, then drain buffered messages until the channel is idle.
    pub async fn open(url: &str, config: EventChannelConfig) -> SocketResult<Self> {
        let mut channel = Self::connect(url, config).await?;
        channel.drain().await?;
        Ok(channel)
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    /// Discard whatever the server sends until `drain_idle` passes in
    /// silence. Returns the number of frames discarded.
    pub async fn drain(&mut self) -> SocketResult<usize> {
        let idle = self.config.drain_idle;
        let stream = self.stream.as_mut().ok_or(SocketError::Closed)?;
        self.state = ChannelState::Draining;

        let mut drained = 0;
        loop {
            match timeout(idle, stream.next()).await {
                Err(_) => break,
                Ok(Some(Ok(Message::Close(_)))) | Ok(None) => {
                    self.mark_closed();
                    return Err(SocketError::Closed);
                }
                Ok(Some(Err(e))) => {
                    self.mark_closed();
                    return Err(e.into());
                }
                Ok(Some(Ok(message))) => {
                    drained += 1;
                    debug!(kind = frame_kind(&message), "Drained message");
                }
            }
        }

        self.state = ChannelState::Ready;
        debug!(drained, "Event channel ready");
        Ok(drained)
    }

    /// Wait up to `wait` for the next text frame.
    ///
    /// Ping, pong and binary frames are skipped without extending the
    /// deadline.
    pub async fn await_next(&mut self, wait: Duration) -> SocketResult<Awaited> {
        let deadline = Instant::now() + wait;
        let stream = self.stream.as_mut().ok_or(SocketError::Closed)?;

        loop {
            match timeout_at(deadline, stream.next()).await {
                Err(_) => return Ok(Awaited::Timeout),
                Ok(Some(Ok(Message::Text(text)))) => {
                    let raw = text.as_str();
                    return Ok(match Notification::from_json(raw) {
                        Ok(notification) => {
                            debug!(message_type = %notification.message_type, "Notification received");
                            Awaited::Notification(notification)
                        }
                        Err(e) => {
                            warn!(error = %e, "Malformed notification");
                            Awaited::Malformed {
                                raw: raw.to_string(),
                                error: e.to_string(),
                            }
                        }
                    });
                }
                Ok(Some(Ok(Message::Close(frame)))) => {
                    info!(frame = ?frame, "Event channel closed by server");
                    self.mark_closed();
                    return Err(SocketError::Closed);
                }
                Ok(None) => {
                    self.mark_closed();
                    return Err(SocketError::Closed);
                }
                Ok(Some(Err(e))) => {
                    warn!(error = %e, "Event channel failed");
                    self.mark_closed();
                    return Err(e.into());
                }
                Ok(Some(Ok(message))) => {
                    debug!(kind = frame_kind(&message), "Skipping non-text frame");
                }
            }
        }
    }

    /// Send a raw text frame.
    pub async fn send_text(&mut self, text: &str) -> SocketResult<()> {
        let stream = self.stream.as_mut().ok_or(SocketError::Closed)?;
        if let Err(e) = stream.send(Message::Text(text.into())).await {
            self.mark_closed();
            return Err(e.into());
        }
        Ok(())
    }

    pub async fn send(&mut self, message: OutboundMessage) -> SocketResult<()> {
        let json = message.to_json()?;
        self.send_text(&json).await
    }

    /// Close gracefully, dropping the socket if the peer does not finish
    /// the close handshake within `close_grace`.
    pub async fn close(&mut self) {
        let Some(mut stream) = self.stream.take() else {
            self.state = ChannelState::Closed;
            return;
        };
        self.state = ChannelState::Closed;

        let graceful = async {
            stream.close(None).await?;
            while let Some(message) = stream.next().await {
                message?;
            }
            Ok::<_, tungstenite::Error>(())
        };

        match timeout(self.config.close_grace, graceful).await {
            Ok(Ok(())) => debug!("Event channel closed"),
            Ok(Err(tungstenite::Error::ConnectionClosed)) => debug!("Event channel closed"),
            Ok(Err(e)) => debug!(error = %e, "Event channel close finished with error"),
            Err(_) => warn!(grace = ?self.config.close_grace, "Close not acknowledged, dropping socket"),
        }
    }

    fn mark_closed(&mut self) {
        self.stream = None;
        self.state = ChannelState::Closed;
    }
}

#[async_trait]
impl EventSource for EventChannel {
    async fn await_next(&mut self, timeout: Duration) -> SocketResult<Awaited> {
        EventChannel::await_next(self, timeout).await
    }

    async fn close(&mut self) {
        EventChannel::close(self).await
    }
}

fn frame_kind(message: &Message) -> &'static str {
    match message {
        Message::Text(_) => "text",
        Message::Binary(_) => "binary",
        Message::Ping(_) => "ping",
        Message::Pong(_) => "pong",
        Message::Close(_) => "close",
        Message::Frame(_) => "frame",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EventChannelConfig::default();
        assert_eq!(config.handshake_timeout, Duration::from_secs(10));
        assert_eq!(config.drain_idle, Duration::from_secs(1));
        assert_eq!(config.close_grace, Duration::from_secs(5));
    }

    #[test]
    fn test_frame_kind() {
        assert_eq!(frame_kind(&Message::Text("x".into())), "text");
        assert_eq!(frame_kind(&Message::Ping(Vec::new().into())), "ping");
        assert_eq!(frame_kind(&Message::Binary(vec![1u8].into())), "binary");
    }

    #[tokio::test]
    async fn test_invalid_url_is_reported() {
        let result = EventChannel::connect("not a url", EventChannelConfig::default()).await;
        assert!(matches!(
            result,
            Err(SocketError::InvalidUrl(_)) | Err(SocketError::WebSocket(_))
        ));
    }
}
