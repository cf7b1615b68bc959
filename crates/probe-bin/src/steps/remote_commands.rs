use crate::output;
use device_identity::DeviceIdentity;
use event_socket::{EventChannel, EventChannelConfig};
use media_server_api::{RequestChannel, Session};
use probe_config_and_utils::{Config, ServerAddress};
use remote_command_verifier::{
    execute, prepare, FailureReason, Outcome, RunReport, Verdict, VerifierConfig, VerifierError,
};

/// Step 6: send every remote command and check it arrives on the socket.
///
/// Returns `None` when the run could not start.
pub async fn remote_commands<C>(
    channel: &C,
    address: &ServerAddress,
    session: &Session,
    identity: &DeviceIdentity,
    config: &Config,
) -> Option<RunReport>
where
    C: RequestChannel + ?Sized,
{
    let prepared = match prepare(channel, session, identity.device_id()).await {
        Ok(prepared) => prepared,
        Err(VerifierError::MissingSession) => {
            output::step(6, "Remote command test");
            output::fail("Could not find session ID for this device.");
            return None;
        }
        Err(e) => {
            output::step(6, "Remote command test");
            output::fail(&e.to_string());
            return None;
        }
    };

    if let Some(reason) = &prepared.play_skipped {
        output::note(&format!("({reason}, skipping PlayCommand test)"));
    }
    output::step(6, &format!("Testing remote commands (Session: {})", prepared.session_id));
    output::note(&format!(
        "Sending {} commands via REST API, verifying delivery on WebSocket...",
        prepared.catalog.len()
    ));
    println!();

    let url = address.socket_url(&session.access_token, identity.device_id());
    let socket_config = EventChannelConfig {
        handshake_timeout: config.handshake_timeout(),
        drain_idle: config.drain_idle(),
        close_grace: config.close_grace(),
    };
    let verifier_config = VerifierConfig {
        notification_deadline: config.notification_deadline(),
        command_pause: config.command_pause(),
        command_timeout: config.command_timeout(),
    };

    let result = execute(
        channel,
        &prepared.catalog,
        || EventChannel::open(&url, socket_config),
        verifier_config,
        print_verdict,
    )
    .await;

    match result {
        Ok(report) => {
            if let Some(reason) = &report.aborted {
                output::fail(&format!("Event channel lost, remaining commands not run: {reason}"));
            }
            println!();
            output::note(&format!("Results: {}", report.summary));
            Some(report)
        }
        Err(e) => {
            output::fail(&e.to_string());
            None
        }
    }
}

fn print_verdict(verdict: &Verdict) {
    match &verdict.outcome {
        Outcome::Pass { detail } => {
            output::ok(&format!("{} {}", verdict.command.description, detail));
        }
        Outcome::Fail(reason) => {
            output::fail(&verdict.command.description);
            output::detail(&failure_detail(reason));
        }
    }
}

fn failure_detail(reason: &FailureReason) -> String {
    match reason {
        FailureReason::NonSuccessStatus { status, body } => {
            format!("{reason}: REST API returned HTTP {status}: {body}")
        }
        other => other.to_string(),
    }
}
