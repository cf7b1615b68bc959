//! Logging initialization for the probe.
//!
//! Thin wrapper over the observability crate so the binary only has to pick
//! a level and an encoding.

use observability::{LogConfig, LogFormat};
use std::path::PathBuf;

/// Initialize the logging system.
///
/// * `level` - Default log level (trace, debug, info, warn, error). `RUST_LOG` wins.
/// * `json` - Emit one JSON object per line instead of compact text.
/// * `log_path` - Append to this file instead of writing to stderr.
pub fn init_logging(level: &str, json: bool, log_path: Option<PathBuf>) {
    observability::init_with_config(LogConfig {
        service_name: "orsay-probe".into(),
        default_level: normalize_level(level),
        format: if json { LogFormat::Json } else { LogFormat::Compact },
        log_path,
    });
}

/// Map a user-supplied level onto the filter directive EnvFilter expects.
fn normalize_level(level: &str) -> String {
    parse_level(level).to_string().to_lowercase()
}

/// Parse a log level string into a tracing Level.
pub fn parse_level(level: &str) -> tracing::Level {
    match level.trim().to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" | "warning" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::WARN,
    }
}
