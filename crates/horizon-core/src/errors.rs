//! Error taxonomy for a termination run.
//!
//! Signal failures are contained per process and end up in the report.
//! Store failures are fatal: without the restart marker nothing downstream
//! learns that a restart was requested.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Why a termination signal could not be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalFailureKind {
    /// The process already exited (or never existed).
    ProcessNotFound,
    PermissionDenied,
    /// The id cannot address a single process (0, or out of range).
    InvalidPid,
    Other,
}

/// Per-process signal failure, carrying the OS description.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{detail}")]
pub struct SignalError {
    pub kind: SignalFailureKind,
    pub detail: String,
}

impl SignalError {
    pub fn new(kind: SignalFailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn invalid_pid(pid: u32) -> Self {
        Self::new(
            SignalFailureKind::InvalidPid,
            format!("Invalid process id {pid}"),
        )
    }
}

/// Durable state errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to open state store at {path}: {detail}")]
    Open { path: PathBuf, detail: String },

    #[error("Failed to write state key {key}: {detail}")]
    Write { key: String, detail: String },

    #[error("Stored value for {key} is not valid JSON: {detail}")]
    Decode { key: String, detail: String },

    #[error("State store connection lock poisoned")]
    LockPoisoned,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

/// Supervisor registry errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read supervisor registry at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse supervisor registry at {path}: {detail}")]
    Parse { path: PathBuf, detail: String },

    #[error("Supervisor registry unavailable: {0}")]
    Unavailable(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {detail}")]
    Parse { path: PathBuf, detail: String },
}

/// Errors that abort a termination run.
///
/// `Registry` is returned only after the restart marker was published.
/// `Store` keeps the report when dispatch had already run, so the signals
/// that were sent can still be shown.
#[derive(Debug, Error)]
pub enum TerminateError {
    #[error("restart marker was not published: {source}")]
    Store {
        #[source]
        source: StoreError,
        report: Option<crate::report::TerminationReport>,
    },

    #[error("supervisor registry could not be read (restart marker was published): {0}")]
    Registry(#[from] RegistryError),
}

impl TerminateError {
    /// Per-process results gathered before the run failed, if any.
    pub fn report(&self) -> Option<&crate::report::TerminationReport> {
        match self {
            TerminateError::Store { report, .. } => report.as_ref(),
            TerminateError::Registry(_) => None,
        }
    }
}
