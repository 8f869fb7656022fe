//! Lock error definitions.

use super::liveness::ProbeError;
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Why a single claim attempt did not produce a lock.
#[derive(Error, Debug)]
pub enum LockError {
    /// The lock file exists and its owner is running.
    #[error("lockfile in use by another process (pid {pid})")]
    HeldByLiveOwner { pid: u32 },

    /// The lock file does not contain a process ID.
    #[error("could not read owner pid from existing lockfile (content: {content:?})")]
    Corrupt { content: String },

    /// The owner's liveness could not be determined.
    #[error("could not check lockfile owner: {0}")]
    ProbeFailed(#[from] ProbeError),

    /// The lock file was removed between the create attempt and the read.
    #[error("lockfile disappeared while being inspected")]
    Vanished,

    /// Another process replaced or re-created the lock while a stale one was being reclaimed.
    #[error("lockfile was claimed by another process during reclamation")]
    Contended,

    /// Filesystem error while working with the lock file.
    #[error("could not {action} lockfile: {source}")]
    Io {
        action: &'static str,
        #[source]
        source: io::Error,
    },
}

impl LockError {
    pub(super) fn io(action: &'static str, source: io::Error) -> Self {
        LockError::Io { action, source }
    }

    /// Whether the acquisition loop may try again after this error.
    ///
    /// Indeterminate probes stop acquisition: the owner might be alive.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, LockError::ProbeFailed(_))
    }
}

/// Terminal failure of the acquisition loop.
#[derive(Error, Debug)]
pub enum AcquisitionError {
    /// The wait budget ran out.
    #[error("could not obtain lockfile after waiting {}s", .waited.as_secs())]
    Timeout { waited: Duration },

    /// A claim attempt failed in a way that must not be retried.
    #[error(transparent)]
    Lock(#[from] LockError),
}
