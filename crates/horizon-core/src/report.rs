//! Outcome reporting for one termination batch.
//!
//! Individual signal failures never fail the run. The only failing state is
//! an empty batch when the caller asked for that to be an error.

use crate::signal::SignalOutcome;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// At least one process was targeted; individual results may be failures.
    Signaled,
    NothingToTerminate,
    /// Nothing matched and `fail_on_empty` was set.
    EmptyRegistryFailure,
}

impl ReportStatus {
    pub fn is_failure(self) -> bool {
        matches!(self, ReportStatus::EmptyRegistryFailure)
    }
}

/// One human-readable report line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportLine {
    Info { message: String },
    Task { label: String, done: bool },
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminationReport {
    pub status: ReportStatus,
    pub outcomes: Vec<SignalOutcome>,
}

impl TerminationReport {
    pub fn from_outcomes(outcomes: Vec<SignalOutcome>, fail_on_empty: bool) -> Self {
        let status = match (outcomes.is_empty(), fail_on_empty) {
            (false, _) => ReportStatus::Signaled,
            (true, false) => ReportStatus::NothingToTerminate,
            (true, true) => ReportStatus::EmptyRegistryFailure,
        };
        Self { status, outcomes }
    }

    pub fn is_failure(&self) -> bool {
        self.status.is_failure()
    }

    pub fn failures(&self) -> impl Iterator<Item = &SignalOutcome> {
        self.outcomes.iter().filter(|o| !o.success)
    }

    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn lines(&self) -> Vec<ReportLine> {
        if self.outcomes.is_empty() {
            return vec![ReportLine::Info {
                message: "No processes to terminate.".to_string(),
            }];
        }

        let mut lines = Vec::with_capacity(self.outcomes.len() + 1);
        lines.push(ReportLine::Info {
            message: "Sending TERM signal to processes.".to_string(),
        });

        for outcome in &self.outcomes {
            lines.push(ReportLine::Task {
                label: format!("Process: {}", outcome.pid),
                done: outcome.success,
            });
            if !outcome.success {
                lines.push(ReportLine::Error {
                    message: format!(
                        "Failed to kill process: {} ({})",
                        outcome.pid,
                        outcome.error_detail.as_deref().unwrap_or("unknown error")
                    ),
                });
            }
        }

        lines
    }
}
