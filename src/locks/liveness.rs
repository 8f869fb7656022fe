//! Owner liveness probing.
//!
//! A lock owner is identified by its process ID. The prober answers whether that
//! process still exists without affecting it.

use std::io;
use thiserror::Error;

/// The probe could not decide whether the owner is alive.
///
/// Callers must treat this as a hard failure, never as "dead".
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The process ID cannot be represented on this platform.
    #[error("process id {pid} is out of range")]
    InvalidPid { pid: u32 },

    /// Signalling the process failed for a reason other than "no such process".
    #[error("failed while probing process {pid}: {source}")]
    Signal {
        pid: u32,
        #[source]
        source: io::Error,
    },

    /// No probe primitive exists for this platform.
    #[error("cannot probe process {pid}: liveness checks are not supported on this platform")]
    #[allow(dead_code)]
    Unsupported { pid: u32 },
}

/// Decides whether a lock owner is still running.
pub trait LivenessProber {
    /// `Ok(true)` if the process exists, `Ok(false)` if it does not.
    fn is_alive(&self, pid: u32) -> Result<bool, ProbeError>;
}

/// Probes with a null signal (`kill(pid, 0)`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalProber;

#[cfg(unix)]
impl LivenessProber for SignalProber {
    fn is_alive(&self, pid: u32) -> Result<bool, ProbeError> {
        let raw = libc::pid_t::try_from(pid).map_err(|_| ProbeError::InvalidPid { pid })?;
        if raw <= 0 {
            return Err(ProbeError::InvalidPid { pid });
        }

        // Signal 0 performs the existence and permission checks only.
        if unsafe { libc::kill(raw, 0) } == 0 {
            return Ok(true);
        }

        let err = io::Error::last_os_error();
        match err.raw_os_error() {
            Some(libc::ESRCH) => Ok(false),
            // The process exists but belongs to someone else.
            Some(libc::EPERM) => Ok(true),
            _ => Err(ProbeError::Signal { pid, source: err }),
        }
    }
}

#[cfg(not(unix))]
impl LivenessProber for SignalProber {
    fn is_alive(&self, pid: u32) -> Result<bool, ProbeError> {
        Err(ProbeError::Unsupported { pid })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::process::Command;

    #[test]
    fn current_process_is_alive() {
        assert!(SignalProber.is_alive(std::process::id()).unwrap());
    }

    #[test]
    fn reaped_child_is_dead() {
        let mut child = Command::new("true").spawn().unwrap();
        let pid = child.id();
        child.wait().unwrap();

        assert!(!SignalProber.is_alive(pid).unwrap());
    }

    #[test]
    fn pid_zero_is_rejected_rather_than_probing_the_process_group() {
        let err = SignalProber.is_alive(0).unwrap_err();
        assert!(matches!(err, ProbeError::InvalidPid { pid: 0 }));
    }

    #[test]
    fn pid_beyond_pid_t_is_rejected() {
        let err = SignalProber.is_alive(u32::MAX).unwrap_err();
        assert!(matches!(err, ProbeError::InvalidPid { .. }));
    }
}
