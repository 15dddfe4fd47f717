use super::SignalSender;
use crate::errors::{SignalError, SignalFailureKind};

#[cfg(unix)]
use nix::errno::Errno;
#[cfg(unix)]
use nix::sys::signal::{kill, Signal};
#[cfg(unix)]
use nix::unistd::Pid;

/// Sends SIGTERM through the OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermSignalSender;

impl TermSignalSender {
    pub fn new() -> Self {
        Self
    }
}

impl SignalSender for TermSignalSender {
    fn terminate(&self, pid: u32) -> Result<(), SignalError> {
        // pid 0 would address our own process group, and anything past
        // i32::MAX turns negative (another process group) once cast.
        let raw = match i32::try_from(pid) {
            Ok(raw) if raw > 0 => raw,
            _ => return Err(SignalError::invalid_pid(pid)),
        };
        send_term(raw)
    }
}

#[cfg(unix)]
fn send_term(raw: i32) -> Result<(), SignalError> {
    kill(Pid::from_raw(raw), Signal::SIGTERM).map_err(from_errno)
}

#[cfg(not(unix))]
fn send_term(_raw: i32) -> Result<(), SignalError> {
    Err(SignalError::new(
        SignalFailureKind::Other,
        "TERM signals are not supported on this platform",
    ))
}

#[cfg(unix)]
fn from_errno(errno: Errno) -> SignalError {
    let kind = match errno {
        Errno::ESRCH => SignalFailureKind::ProcessNotFound,
        Errno::EPERM => SignalFailureKind::PermissionDenied,
        Errno::EINVAL => SignalFailureKind::InvalidPid,
        _ => SignalFailureKind::Other,
    };
    SignalError::new(kind, errno.desc())
}
