//! Notification WebSocket for the media server.
//!
//! This crate provides:
//! - [`EventChannel`], the `/emby/socket` connection with its
//!   open / drain / ready / close lifecycle
//! - The [`EventSource`] seam the command verifier reads from
//! - Notification parsing and the outbound keep-alive message

mod channel;
mod error;
mod messages;

pub use channel::{Awaited, ChannelState, EventChannel, EventChannelConfig, EventSource};
pub use error::{SocketError, SocketResult};
pub use messages::{Notification, NotificationKind, OutboundMessage};
