//! orsay-probe - Replay the Samsung Orsay TV app's connection flow against a
//! Jellyfin server.

mod failure;
mod output;
mod steps;

use anyhow::Context;
use clap::Parser;
use device_identity::DeviceIdentity;
use failure::ProbeFailure;
use media_server_api::MediaServerClient;
use probe_config_and_utils::{init_logging, Config, Paths, ServerAddress};
use std::path::PathBuf;
use tracing::{debug, info};

/// Exit code for bad arguments or configuration, matching clap's.
const USAGE_EXIT_CODE: i32 = 2;

/// Test a Jellyfin server the way the Samsung Orsay TV app connects to it.
#[derive(Parser, Debug)]
#[command(name = "orsay-probe")]
#[command(about = "Test Jellyfin server connection (mimics Samsung Orsay TV app)")]
#[command(version)]
struct Cli {
    /// Jellyfin server URL (e.g. https://your-server.com)
    #[arg(long)]
    server: String,

    /// Username for authentication (optional)
    #[arg(long)]
    username: Option<String>,

    /// Password for authentication (optional)
    #[arg(long)]
    password: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Configuration file (default: ~/.orsay-probe/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Resolve configuration and the server address before anything is printed.
fn setup(cli: &Cli) -> anyhow::Result<(Config, ServerAddress)> {
    let mut config = match &cli.config {
        Some(path) => Config::load_explicit(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => {
            let paths = Paths::new()?;
            Config::load(&paths).context("failed to load config")?
        }
    };
    config.apply_log_level_override(cli.log_level.clone());

    let address = ServerAddress::parse(&cli.server)
        .with_context(|| format!("invalid --server value '{}'", cli.server))?;
    Ok((config, address))
}

/// Run every step. Only the fatal classes are returned as errors.
async fn run(cli: &Cli, config: &Config, address: ServerAddress) -> Result<(), ProbeFailure> {
    let identity = DeviceIdentity::generate(&config.device_name, &config.client_name, &config.app_version);
    let client = MediaServerClient::new(address.clone(), identity.clone(), config.setup_timeout());
    info!(server = %address, device_id = %identity.device_id(), "Starting probe");

    output::banner(&address, &identity);

    let server_info = steps::check_connection(&client, &address).await?;
    steps::check_version(&server_info, &config.required_server_version)?;

    let Some(username) = cli.username.as_deref() else {
        println!(
            "\n[Steps 3-9] Skipped: pass --username to test authentication, capabilities, \
             WebSocket, commands, Quick Connect, SyncPlay, and Trickplay."
        );
        println!("\n=== Done ===");
        return Ok(());
    };

    let password = cli.password.as_deref().unwrap_or("");
    let session = steps::authenticate(&client, &address, username, password).await?;
    let authed = client.with_session(&session);

    steps::post_capabilities(&authed, &address).await;
    steps::websocket_smoke(&address, &session, &identity, config).await;
    if let Some(report) = steps::remote_commands(&authed, &address, &session, &identity, config).await {
        debug!(passed = report.summary.passed, failed = report.summary.failed, "Remote command test done");
    }
    steps::quick_connect(&authed, &address).await;
    steps::syncplay(&authed).await;
    steps::trickplay(&authed, &session.user_id).await;

    println!("\n=== Done ===");
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let (config, address) = match setup(&cli) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(USAGE_EXIT_CODE);
        }
    };

    init_logging(&config.log_level, cli.json_logs, cli.log_file.clone());
    debug!(?config, "Configuration loaded");

    if let Err(failure) = run(&cli, &config, address).await {
        tracing::error!(error = %failure, "Probe failed");
        println!("\n{}. {}", failure, failure.tv_outcome());
        std::process::exit(1);
    }
}
