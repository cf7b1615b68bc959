//! Authenticated request channel for the media server.
//!
//! This crate provides:
//! - The [`RequestChannel`] seam every server call goes through
//! - [`MediaServerClient`], the reqwest-backed channel that attaches the
//!   MediaBrowser authorization header and session token
//! - Typed endpoint helpers for the checks the TV app performs
//! - Server version comparison

mod channel;
mod client;
pub mod endpoints;
mod error;
mod models;
mod version;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use channel::{ApiRequest, ApiResponse, HttpMethod, RequestChannel};
pub use client::MediaServerClient;
pub use error::{ApiError, ApiResult};
pub use models::{
    AuthenticationResult, BaseItem, ClientCapabilities, PlayableItem, PublicSystemInfo,
    QuickConnectResult, Session, SessionEntry, TrickplayInfo, ORSAY_SUPPORTED_COMMANDS,
};
pub use version::{check_server_version, parse_version, VersionCheck};
