//! # Observability
//!
//! Centralized logging layer for the orsay-probe workspace.
//!
//! ## Design
//!
//! Crates are **log producers**. They use standard `tracing` macros and know
//! nothing about where the output goes. The binary calls
//! [`init_with_config`] exactly once at startup.
//!
//! Logs are written to stderr by default because stdout carries the
//! diagnostic report. An optional log file receives the same stream in
//! append mode, which is handy when the report is piped somewhere else.
//!
//! ## Usage
//!
//! ```rust,ignore
//! fn main() {
//!     observability::init_with_config(observability::LogConfig {
//!         service_name: "orsay-probe".into(),
//!         default_level: "debug".into(),
//!         format: observability::LogFormat::Json,
//!         ..Default::default()
//!     });
//!
//!     tracing::info!("probe started");
//! }
//! ```

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Output encoding for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Single-line human readable output.
    #[default]
    Compact,
    /// One JSON object per line.
    Json,
}

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Name of the service, logged once the subscriber is installed.
    pub service_name: String,

    /// Default log level filter (e.g., "debug", "info", "warn").
    /// Can be overridden by `RUST_LOG` environment variable.
    pub default_level: String,

    /// Line encoding.
    pub format: LogFormat,

    /// Optional log file. When set, logs are appended there instead of stderr.
    pub log_path: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "unknown".into(),
            default_level: "warn".into(),
            format: LogFormat::Compact,
            log_path: None,
        }
    }
}

/// Initialize the observability layer with custom configuration.
///
/// Calling this more than once is harmless: later calls leave the first
/// subscriber in place.
pub fn init_with_config(config: LogConfig) {
    let filter = build_filter(&config.default_level);
    let writer = make_writer(config.log_path.as_ref());

    let installed = match config.format {
        LogFormat::Compact => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_target(true)
            .compact()
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_target(true)
            .json()
            .try_init(),
    };

    if installed.is_ok() {
        tracing::debug!(service = %config.service_name, "observability initialized");
    }
}

/// `RUST_LOG` wins over the configured level.
fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn make_writer(log_path: Option<&PathBuf>) -> BoxMakeWriter {
    let Some(path) = log_path else {
        return BoxMakeWriter::new(std::io::stderr);
    };

    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(e) => {
            eprintln!("warning: cannot open log file {}: {e}", path.display());
            BoxMakeWriter::new(std::io::stderr)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.service_name, "unknown");
        assert_eq!(config.default_level, "warn");
        assert_eq!(config.format, LogFormat::Compact);
        assert!(config.log_path.is_none());
    }

    #[test]
    fn test_make_writer_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("probe.log");

        let _writer = make_writer(Some(&path));

        assert!(path.exists());
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_with_config(LogConfig {
            service_name: "first".into(),
            ..Default::default()
        });
        init_with_config(LogConfig {
            service_name: "second".into(),
            format: LogFormat::Json,
            ..Default::default()
        });
    }
}
