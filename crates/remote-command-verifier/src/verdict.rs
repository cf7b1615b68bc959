//! Per-command verdicts and the run summary.

use crate::CommandSpec;
use event_socket::NotificationKind;
use std::fmt;

/// Why a command failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Dispatch answered with something other than 200/204.
    NonSuccessStatus { status: u16, body: String },
    /// Dispatch did not reach the server.
    DispatchError(String),
    /// Nothing arrived on the event channel before the deadline.
    NoNotification,
    KindMismatch {
        expected: NotificationKind,
        got: String,
    },
    /// A text frame arrived that is not a notification.
    Malformed(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NonSuccessStatus { .. } => f.write_str("non-success status"),
            FailureReason::DispatchError(e) => write!(f, "dispatch error: {e}"),
            FailureReason::NoNotification => {
                f.write_str("no notification observed within deadline")
            }
            FailureReason::KindMismatch { expected, got } => {
                write!(f, "kind mismatch: expected {expected}, got {got}")
            }
            FailureReason::Malformed(e) => write!(f, "malformed notification: {e}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `detail` names the command echoed back, e.g. `Command=Pause`.
    Pass { detail: String },
    Fail(FailureReason),
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass { .. })
    }
}

/// Result for one catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub command: CommandSpec,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    /// Catalog size. Exceeds `passed + failed` when the run was aborted.
    pub total: usize,
}

impl RunSummary {
    pub fn from_verdicts(verdicts: &[Verdict], total: usize) -> Self {
        let passed = verdicts.iter().filter(|v| v.outcome.is_pass()).count();
        Self {
            passed,
            failed: verdicts.len() - passed,
            total,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passed, {} failed, {} total",
            self.passed, self.failed, self.total
        )
    }
}

/// Everything a command run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub verdicts: Vec<Verdict>,
    pub summary: RunSummary,
    /// Set when the event channel failed mid-run. Verdicts before the
    /// failure are kept.
    pub aborted: Option<String>,
}

impl RunReport {
    pub fn new(verdicts: Vec<Verdict>, total: usize, aborted: Option<String>) -> Self {
        let summary = RunSummary::from_verdicts(&verdicts, total);
        Self {
            verdicts,
            summary,
            aborted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_catalog;

    fn verdict(outcome: Outcome) -> Verdict {
        Verdict {
            command: build_catalog("s", None).remove(0),
            outcome,
        }
    }

    #[test]
    fn test_reason_strings() {
        assert_eq!(
            FailureReason::NonSuccessStatus {
                status: 404,
                body: "missing".into()
            }
            .to_string(),
            "non-success status"
        );
        assert_eq!(
            FailureReason::NoNotification.to_string(),
            "no notification observed within deadline"
        );
        assert_eq!(
            FailureReason::KindMismatch {
                expected: NotificationKind::Playstate,
                got: "UserDataChanged".into()
            }
            .to_string(),
            "kind mismatch: expected Playstate, got UserDataChanged"
        );
    }

    #[test]
    fn test_summary_counts() {
        let verdicts = vec![
            verdict(Outcome::Pass {
                detail: "Command=Pause".into(),
            }),
            verdict(Outcome::Fail(FailureReason::NoNotification)),
            verdict(Outcome::Pass {
                detail: "Command=Stop".into(),
            }),
        ];
        let report = RunReport::new(verdicts, 3, None);

        assert_eq!(
            report.summary,
            RunSummary {
                passed: 2,
                failed: 1,
                total: 3
            }
        );
        assert_eq!(report.summary.to_string(), "2 passed, 1 failed, 3 total");
    }

    #[test]
    fn test_aborted_summary_keeps_catalog_total() {
        let report = RunReport::new(
            vec![verdict(Outcome::Fail(FailureReason::NoNotification))],
            15,
            Some("Event channel closed".into()),
        );

        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.total, 15);
        assert!(report.aborted.is_some());
    }
}
