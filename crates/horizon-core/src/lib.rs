//! Master supervisor termination for a job-processing system.
//!
//! A run reads the supervisor registry, keeps the masters that belong to
//! this host, sends each a TERM signal, reports per process, and always
//! finishes by publishing a restart marker (plus the wait flag in
//! fast-termination mode) to durable shared state.

pub mod config;
pub mod errors;
pub mod marker;
pub mod registry;
pub mod report;
pub mod signal;
pub mod state;
pub mod terminate;

pub use config::HorizonConfig;
pub use errors::{
    ConfigError, RegistryError, SignalError, SignalFailureKind, StoreError, TerminateError,
};
pub use marker::{PublishedMarker, RestartMarker, RestartMarkerPublisher, WaitFlag};
pub use registry::{SupervisorEntry, SupervisorRepository};
pub use report::{ReportLine, ReportStatus, TerminationReport};
pub use signal::{SignalOutcome, SignalSender, TermSignalSender};
pub use state::{SqliteStateStore, StateStore};
pub use terminate::{TerminateOutcome, TerminateRequest, Terminator};
