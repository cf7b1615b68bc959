//! Remote control round-trip verification.
//!
//! Commands are dispatched through a [`media_server_api::RequestChannel`]
//! and each one must come back as a notification of the expected kind on an
//! [`event_socket::EventSource`] within the deadline. One [`Verdict`] is
//! produced per command, followed by a [`RunSummary`].

mod catalog;
mod error;
mod verdict;
mod verifier;

pub use catalog::{build_catalog, CommandSpec};
pub use error::{VerifierError, VerifierResult};
pub use verdict::{FailureReason, Outcome, RunReport, RunSummary, Verdict};
pub use verifier::{execute, prepare, run_commands, CommandVerifier, PreparedRun, VerifierConfig};
