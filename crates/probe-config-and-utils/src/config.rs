//! Configuration management for the probe.

use crate::{CoreError, CoreResult, Paths};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Device name the Orsay app reports.
pub const DEFAULT_DEVICE_NAME: &str = "Samsung Smart TV";

/// Client name the Orsay app reports.
pub const DEFAULT_CLIENT_NAME: &str = "Samsung TV";

/// App version the Orsay app reports.
pub const DEFAULT_APP_VERSION: &str = "v2.2.5b";

/// Oldest server version the Orsay app accepts.
pub const REQUIRED_SERVER_VERSION: &str = "10.3.2";

/// Environment variable that overrides the log level.
const LOG_LEVEL_ENV: &str = "ORSAY_PROBE_LOG_LEVEL";

/// Probe configuration.
///
/// Every field has a default so a partial JSON file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Device name sent in the authorization header.
    pub device_name: String,
    /// Client name sent in the authorization header.
    pub client_name: String,
    /// App version sent in the authorization header.
    pub app_version: String,
    /// Minimum server version the TV app accepts.
    pub required_server_version: String,
    /// Timeout for setup requests (info, login, capabilities, queries).
    pub setup_timeout_secs: u64,
    /// Timeout for remote command dispatch requests.
    pub command_timeout_secs: u64,
    /// Timeout for the WebSocket upgrade.
    pub handshake_timeout_secs: u64,
    /// Idle window that ends the post-connect drain.
    pub drain_idle_ms: u64,
    /// How long to wait for a command's notification.
    pub notification_deadline_ms: u64,
    /// Pause between remote commands.
    pub command_pause_ms: u64,
    /// Grace period for a clean WebSocket close.
    pub close_grace_secs: u64,
    /// How long the WebSocket smoke test waits for a message.
    pub smoke_wait_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            app_version: DEFAULT_APP_VERSION.to_string(),
            required_server_version: REQUIRED_SERVER_VERSION.to_string(),
            setup_timeout_secs: 10,
            command_timeout_secs: 5,
            handshake_timeout_secs: 10,
            drain_idle_ms: 1_000,
            notification_deadline_ms: 3_000,
            command_pause_ms: 300,
            close_grace_secs: 5,
            smoke_wait_ms: 3_000,
        }
    }
}

impl Config {
    /// Load configuration from the default location, falling back to defaults.
    pub fn load(paths: &Paths) -> CoreResult<Self> {
        let config_path = paths.config_file();

        let config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            Self::default()
        };

        config.finish()
    }

    /// Load configuration from a file named on the command line.
    ///
    /// Unlike [`load`](Self::load), a missing file is an error.
    pub fn load_explicit(path: &Path) -> CoreResult<Self> {
        Self::load_from_file(path)?.finish()
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    fn finish(mut self) -> CoreResult<Self> {
        self.apply_log_level_override(std::env::var(LOG_LEVEL_ENV).ok());
        self.validate()?;
        Ok(self)
    }

    /// Replace the log level unless `level` is absent or blank.
    pub fn apply_log_level_override(&mut self, level: Option<String>) {
        if let Some(level) = level {
            if !level.trim().is_empty() {
                self.log_level = level.trim().to_string();
            }
        }
    }

    /// Reject values that would make a bounded wait unbounded or meaningless.
    pub fn validate(&self) -> CoreResult<()> {
        let zero_field = [
            ("setup_timeout_secs", self.setup_timeout_secs),
            ("command_timeout_secs", self.command_timeout_secs),
            ("handshake_timeout_secs", self.handshake_timeout_secs),
            ("drain_idle_ms", self.drain_idle_ms),
            ("notification_deadline_ms", self.notification_deadline_ms),
        ]
        .into_iter()
        .find(|(_, value)| *value == 0);

        if let Some((name, _)) = zero_field {
            return Err(CoreError::Config(format!("{name} must be greater than zero")));
        }
        Ok(())
    }

    pub fn setup_timeout(&self) -> Duration {
        Duration::from_secs(self.setup_timeout_secs)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_secs(self.handshake_timeout_secs)
    }

    pub fn drain_idle(&self) -> Duration {
        Duration::from_millis(self.drain_idle_ms)
    }

    pub fn notification_deadline(&self) -> Duration {
        Duration::from_millis(self.notification_deadline_ms)
    }

    pub fn command_pause(&self) -> Duration {
        Duration::from_millis(self.command_pause_ms)
    }

    pub fn close_grace(&self) -> Duration {
        Duration::from_secs(self.close_grace_secs)
    }

    pub fn smoke_wait(&self) -> Duration {
        Duration::from_millis(self.smoke_wait_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.app_version, "v2.2.5b");
        assert_eq!(config.required_server_version, "10.3.2");
        assert_eq!(config.setup_timeout(), Duration::from_secs(10));
        assert_eq!(config.command_timeout(), Duration::from_secs(5));
        assert_eq!(config.handshake_timeout(), Duration::from_secs(10));
        assert_eq!(config.drain_idle(), Duration::from_secs(1));
        assert_eq!(config.notification_deadline(), Duration::from_secs(3));
        assert_eq!(config.command_pause(), Duration::from_millis(300));
        assert_eq!(config.close_grace(), Duration::from_secs(5));
    }

    #[test]
    fn test_config_load_partial_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");

        let config_json = r#"{
            "log_level": "debug",
            "notification_deadline_ms": 1500
        }"#;
        std::fs::write(&config_path, config_json).unwrap();

        let config = Config::load_from_file(&config_path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.notification_deadline(), Duration::from_millis(1500));
        // Untouched fields keep their defaults
        assert_eq!(config.command_pause_ms, 300);
        assert_eq!(config.device_name, DEFAULT_DEVICE_NAME);
    }

    #[test]
    fn test_config_load_from_base_dir() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());
        std::fs::write(
            paths.config_file(),
            r#"{"drain_idle_ms": 250, "client_name": "Custom TV"}"#,
        )
        .unwrap();

        let loaded = Config::load(&paths).unwrap();
        assert_eq!(loaded.drain_idle_ms, 250);
        assert_eq!(loaded.client_name, "Custom TV");
    }

    #[test]
    fn test_config_load_nonexistent_uses_defaults() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().join("missing"));

        let config = Config::load(&paths).unwrap();
        assert_eq!(config.setup_timeout_secs, 10);
    }

    #[test]
    fn test_config_rejects_zero_deadline() {
        let config = Config {
            notification_deadline_ms: 0,
            ..Config::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("notification_deadline_ms"));
    }

    #[test]
    fn test_log_level_override() {
        let mut config = Config::default();

        config.apply_log_level_override(None);
        assert_eq!(config.log_level, "warn");

        config.apply_log_level_override(Some("   ".to_string()));
        assert_eq!(config.log_level, "warn");

        config.apply_log_level_override(Some(" debug ".to_string()));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_load_explicit_requires_file() {
        let dir = tempdir().unwrap();
        let result = Config::load_explicit(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(CoreError::Io(_))));
    }

    #[test]
    fn test_config_invalid_json() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        std::fs::write(&config_path, "{ not json").unwrap();

        let result = Config::load_from_file(&config_path);
        assert!(matches!(result, Err(CoreError::Json(_))));
    }
}
