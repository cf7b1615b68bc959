//! Device identity for the orsay probe.
//!
//! Every request and the WebSocket subscription carry the same identity, so
//! the server files them under one session row. The id is generated fresh
//! for every run and never persisted.

mod identity;

pub use identity::DeviceIdentity;
