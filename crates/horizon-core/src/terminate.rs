//! One termination run: filter the registry, signal the local masters,
//! report, then announce the restart.
//!
//! The announcement runs on every path, including an empty batch, a batch
//! where every signal failed, and an unreadable registry.

use crate::errors::TerminateError;
use crate::marker::{PublishedMarker, RestartMarkerPublisher};
use crate::registry::{filter_masters, SupervisorRepository};
use crate::report::TerminationReport;
use crate::signal::{dispatch, SignalSender};
use crate::state::StateStore;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Per-invocation options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerminateRequest {
    /// Treat "nothing to terminate" as a failed run.
    pub fail_on_empty: bool,
    /// Ask workers to drain before stopping (fast-termination mode only).
    pub wait_for_drain: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminateOutcome {
    pub prefix: String,
    #[serde(flatten)]
    pub report: TerminationReport,
    pub published: PublishedMarker,
}

impl TerminateOutcome {
    pub fn is_failure(&self) -> bool {
        self.report.is_failure()
    }
}

pub struct Terminator<'a> {
    registry: &'a dyn SupervisorRepository,
    sender: &'a dyn SignalSender,
    store: &'a dyn StateStore,
    prefix: String,
    publisher: RestartMarkerPublisher,
}

impl<'a> Terminator<'a> {
    pub fn new(
        registry: &'a dyn SupervisorRepository,
        sender: &'a dyn SignalSender,
        store: &'a dyn StateStore,
        prefix: impl Into<String>,
        fast_termination: bool,
    ) -> Self {
        Self {
            registry,
            sender,
            store,
            prefix: prefix.into(),
            publisher: RestartMarkerPublisher::new(fast_termination),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn run(&self, request: TerminateRequest) -> Result<TerminateOutcome, TerminateError> {
        self.run_at(request, Utc::now())
    }

    /// Same as [`Terminator::run`] with an explicit marker time.
    pub fn run_at(
        &self,
        request: TerminateRequest,
        now: DateTime<Utc>,
    ) -> Result<TerminateOutcome, TerminateError> {
        let entries = match self.registry.all() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("supervisor registry unreadable, announcing restart anyway: {e}");
                self.publisher
                    .publish(self.store, request.wait_for_drain, now)
                    .map_err(|source| TerminateError::Store {
                        source,
                        report: None,
                    })?;
                return Err(e.into());
            }
        };

        let masters = filter_masters(&entries, &self.prefix);
        tracing::debug!(
            prefix = %self.prefix,
            known = entries.len(),
            matched = masters.len(),
            "filtered master supervisors"
        );

        let pids: Vec<u32> = masters.iter().map(|m| m.pid).collect();
        let outcomes = dispatch(&pids, self.sender);
        let report = TerminationReport::from_outcomes(outcomes, request.fail_on_empty);

        let published = match self
            .publisher
            .publish(self.store, request.wait_for_drain, now)
        {
            Ok(published) => published,
            Err(source) => {
                return Err(TerminateError::Store {
                    source,
                    report: Some(report),
                })
            }
        };

        Ok(TerminateOutcome {
            prefix: self.prefix.clone(),
            report,
            published,
        })
    }
}
