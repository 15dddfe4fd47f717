//! Termination signal dispatch.
//!
//! Every target gets exactly one attempt, in order. A failure is recorded
//! in that target's outcome and dispatch moves on.

pub mod sender;

pub use sender::TermSignalSender;

use crate::errors::{SignalError, SignalFailureKind};
use serde::Serialize;

/// Delivers a graceful termination request (SIGTERM) to one process.
pub trait SignalSender {
    fn terminate(&self, pid: u32) -> Result<(), SignalError>;
}

/// Result of one signal attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalOutcome {
    pub pid: u32,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<SignalFailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl SignalOutcome {
    pub fn delivered(pid: u32) -> Self {
        Self {
            pid,
            success: true,
            failure: None,
            error_detail: None,
        }
    }

    pub fn failed(pid: u32, err: SignalError) -> Self {
        Self {
            pid,
            success: false,
            failure: Some(err.kind),
            error_detail: Some(err.detail),
        }
    }
}

/// Signal each pid front to back. Always returns one outcome per pid.
pub fn dispatch<S>(pids: &[u32], sender: &S) -> Vec<SignalOutcome>
where
    S: SignalSender + ?Sized,
{
    if !pids.is_empty() {
        tracing::info!(count = pids.len(), "sending TERM signal to processes");
    }

    pids.iter()
        .map(|&pid| match sender.terminate(pid) {
            Ok(()) => {
                tracing::debug!(pid, "TERM delivered");
                SignalOutcome::delivered(pid)
            }
            Err(e) => {
                if e.kind == SignalFailureKind::ProcessNotFound {
                    tracing::info!(pid, "process already gone: {}", e.detail);
                } else {
                    tracing::warn!(pid, kind = ?e.kind, "failed to signal process: {}", e.detail);
                }
                SignalOutcome::failed(pid, e)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Scripted sender: pids listed in `failures` fail with that kind.
    #[derive(Default)]
    struct ScriptedSender {
        failures: HashMap<u32, SignalFailureKind>,
        attempts: RefCell<Vec<u32>>,
    }

    impl SignalSender for ScriptedSender {
        fn terminate(&self, pid: u32) -> Result<(), SignalError> {
            self.attempts.borrow_mut().push(pid);
            match self.failures.get(&pid) {
                Some(kind) => Err(SignalError::new(*kind, "No such process")),
                None => Ok(()),
            }
        }
    }

    #[test]
    fn one_outcome_per_pid_in_order() {
        let sender = ScriptedSender::default();
        let outcomes = dispatch(&[30, 10, 20], &sender);

        let pids: Vec<u32> = outcomes.iter().map(|o| o.pid).collect();
        assert_eq!(pids, vec![30, 10, 20]);
        assert!(outcomes.iter().all(|o| o.success));
        assert_eq!(*sender.attempts.borrow(), vec![30, 10, 20]);
    }

    #[test]
    fn failure_does_not_stop_later_attempts() {
        let sender = ScriptedSender {
            failures: HashMap::from([(100, SignalFailureKind::ProcessNotFound)]),
            ..Default::default()
        };
        let outcomes = dispatch(&[100, 200], &sender);

        assert_eq!(outcomes.len(), 2);
        assert!(!outcomes[0].success);
        assert_eq!(outcomes[0].failure, Some(SignalFailureKind::ProcessNotFound));
        assert_eq!(outcomes[0].error_detail.as_deref(), Some("No such process"));
        assert_eq!(outcomes[1], SignalOutcome::delivered(200));
    }

    #[test]
    fn all_failures_still_attempt_every_pid() {
        let sender = ScriptedSender {
            failures: HashMap::from([
                (1, SignalFailureKind::PermissionDenied),
                (2, SignalFailureKind::ProcessNotFound),
                (3, SignalFailureKind::Other),
            ]),
            ..Default::default()
        };
        let outcomes = dispatch(&[1, 2, 3], &sender);

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(|o| !o.success));
        assert_eq!(sender.attempts.borrow().len(), 3);
    }

    #[test]
    fn empty_batch_makes_no_attempts() {
        let sender = ScriptedSender::default();
        assert!(dispatch(&[], &sender).is_empty());
        assert!(sender.attempts.borrow().is_empty());
    }
}
