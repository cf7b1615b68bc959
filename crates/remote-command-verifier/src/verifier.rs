//! The command loop.

use crate::{build_catalog, CommandSpec, FailureReason, Outcome, RunReport, Verdict};
use crate::{VerifierError, VerifierResult};
use event_socket::{Awaited, EventSource, Notification, NotificationKind, SocketResult};
use media_server_api::{endpoints, PlayableItem, RequestChannel, Session};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Command loop timing.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// How long to wait for each command's notification.
    pub notification_deadline: Duration,
    /// Pause after each command, except one the server rejected.
    pub command_pause: Duration,
    /// HTTP timeout for each dispatch.
    pub command_timeout: Duration,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            notification_deadline: Duration::from_secs(3),
            command_pause: Duration::from_millis(300),
            command_timeout: Duration::from_secs(5),
        }
    }
}

/// Dispatches commands through one channel and checks them on one event
/// source.
pub struct CommandVerifier<'a, C: RequestChannel + ?Sized> {
    channel: &'a C,
    config: VerifierConfig,
}

impl<'a, C: RequestChannel + ?Sized> CommandVerifier<'a, C> {
    pub fn new(channel: &'a C, config: VerifierConfig) -> Self {
        Self { channel, config }
    }

    /// Run every command in order and close `events` afterwards.
    ///
    /// `on_verdict` sees each verdict as soon as it is decided. A transport
    /// failure on `events` ends the loop; verdicts so far are kept and the
    /// failure is recorded in [`RunReport::aborted`].
    pub async fn run<E, F>(&self, events: &mut E, catalog: &[CommandSpec], mut on_verdict: F) -> RunReport
    where
        E: EventSource + ?Sized,
        F: FnMut(&Verdict),
    {
        let mut verdicts = Vec::with_capacity(catalog.len());
        let mut aborted = None;

        for command in catalog {
            let outcome = match self.check(events, command).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(command = %command.description, error = %e, "Event channel lost, stopping command loop");
                    aborted = Some(e.to_string());
                    break;
                }
            };

            // Rejected dispatches move straight on to the next command.
            let rejected = matches!(outcome, Outcome::Fail(FailureReason::NonSuccessStatus { .. }));
            let verdict = Verdict {
                command: command.clone(),
                outcome,
            };
            on_verdict(&verdict);
            verdicts.push(verdict);

            if !rejected {
                tokio::time::sleep(self.config.command_pause).await;
            }
        }

        events.close().await;

        let report = RunReport::new(verdicts, catalog.len(), aborted);
        info!(
            passed = report.summary.passed,
            failed = report.summary.failed,
            total = report.summary.total,
            "Command loop finished"
        );
        report
    }

    /// Dispatch one command and wait for its echo.
    ///
    /// Only event channel transport failures are errors.
    async fn check<E>(&self, events: &mut E, command: &CommandSpec) -> SocketResult<Outcome>
    where
        E: EventSource + ?Sized,
    {
        let request = command.to_request(self.config.command_timeout);
        let response = match self.channel.send(request).await {
            Ok(response) => response,
            Err(e) => {
                debug!(command = %command.description, error = %e, "Dispatch failed");
                return Ok(Outcome::Fail(FailureReason::DispatchError(e.to_string())));
            }
        };

        if !response.is_success() {
            debug!(command = %command.description, status = response.status, "Dispatch rejected");
            return Ok(Outcome::Fail(FailureReason::NonSuccessStatus {
                status: response.status,
                body: response.body_excerpt(120),
            }));
        }

        let outcome = match events.await_next(self.config.notification_deadline).await? {
            Awaited::Timeout => Outcome::Fail(FailureReason::NoNotification),
            Awaited::Malformed { error, .. } => Outcome::Fail(FailureReason::Malformed(error)),
            Awaited::Notification(notification) => classify(command.expected, &notification),
        };
        Ok(outcome)
    }
}

/// Compare a received notification with the kind the command expects.
fn classify(expected: NotificationKind, notification: &Notification) -> Outcome {
    if !notification.is_kind(expected) {
        return Outcome::Fail(FailureReason::KindMismatch {
            expected,
            got: notification.message_type.clone(),
        });
    }

    let field = expected.detail_field();
    let value = notification
        .data_display(field)
        .unwrap_or_else(|| "?".to_string());
    Outcome::Pass {
        detail: format!("{field}={value}"),
    }
}

/// Session and catalog resolved before the event channel is opened.
#[derive(Debug, Clone)]
pub struct PreparedRun {
    pub session_id: String,
    pub catalog: Vec<CommandSpec>,
    /// The item PlayNow targets. `None` drops PlayNow from the catalog.
    pub play_item: Option<PlayableItem>,
    /// Why PlayNow was dropped, when it was.
    pub play_skipped: Option<String>,
}

/// Resolve the session id and a playable item, then build the catalog.
///
/// A session id that cannot be found is fatal. A failed library query only
/// removes the PlayNow command.
pub async fn prepare<C>(channel: &C, session: &Session, device_id: &str) -> VerifierResult<PreparedRun>
where
    C: RequestChannel + ?Sized,
{
    let session_id = endpoints::resolve_session_id(channel, session.session_id.as_deref(), device_id)
        .await?
        .ok_or(VerifierError::MissingSession)?;

    let (play_item, play_skipped) = match endpoints::find_playable_item(channel, &session.user_id).await {
        Ok(Some(item)) => (Some(item), None),
        Ok(None) => (None, Some("No playable items found".to_string())),
        Err(e) => {
            debug!(error = %e, "Library query failed");
            (None, Some("Could not query items".to_string()))
        }
    };

    let catalog = build_catalog(&session_id, play_item.as_ref());
    debug!(session_id = %session_id, commands = catalog.len(), "Command catalog built");

    Ok(PreparedRun {
        session_id,
        catalog,
        play_item,
        play_skipped,
    })
}

/// Open the event channel with `connect` and run the catalog on it.
///
/// A connect failure is returned as [`VerifierError::Transport`] before any
/// command is sent.
pub async fn execute<C, E, Conn, Fut, F>(
    channel: &C,
    catalog: &[CommandSpec],
    connect: Conn,
    config: VerifierConfig,
    on_verdict: F,
) -> VerifierResult<RunReport>
where
    C: RequestChannel + ?Sized,
    E: EventSource,
    Conn: FnOnce() -> Fut,
    Fut: Future<Output = SocketResult<E>>,
    F: FnMut(&Verdict),
{
    let mut events = connect().await?;
    let verifier = CommandVerifier::new(channel, config);
    Ok(verifier.run(&mut events, catalog, on_verdict).await)
}

/// [`prepare`] followed by [`execute`].
pub async fn run_commands<C, E, Conn, Fut, F>(
    channel: &C,
    session: &Session,
    device_id: &str,
    connect: Conn,
    config: VerifierConfig,
    on_verdict: F,
) -> VerifierResult<RunReport>
where
    C: RequestChannel + ?Sized,
    E: EventSource,
    Conn: FnOnce() -> Fut,
    Fut: Future<Output = SocketResult<E>>,
    F: FnMut(&Verdict),
{
    let prepared = prepare(channel, session, device_id).await?;
    execute(channel, &prepared.catalog, connect, config, on_verdict).await
}
