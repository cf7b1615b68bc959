//! Configuration, paths, server addressing and logging for the orsay probe.

mod config;
mod error;
mod logging;
mod paths;
mod redact;
mod server_address;

pub use config::{
    Config, DEFAULT_APP_VERSION, DEFAULT_CLIENT_NAME, DEFAULT_DEVICE_NAME, DEFAULT_LOG_LEVEL,
    REQUIRED_SERVER_VERSION,
};
pub use error::{CoreError, CoreResult};
pub use logging::{init_logging, parse_level};
pub use paths::Paths;
pub use redact::{mask_secret, mask_token};
pub use server_address::ServerAddress;
