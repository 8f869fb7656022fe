//! Exclusive lock file creation and stale-owner reclamation.

use super::guard::LockGuard;
use super::liveness::{LivenessProber, SignalProber};
use super::metadata::LockOwner;
use super::types::LockError;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Result of a single exclusive-create attempt.
enum Created {
    Claimed(LockGuard),
    AlreadyExists,
}

/// The lock file at a fixed path, plus the prober used to judge its owner.
#[derive(Debug)]
pub struct LockFileStore<P = SignalProber> {
    path: PathBuf,
    prober: P,
}

impl LockFileStore {
    /// A store that probes owners with signals.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_prober(path, SignalProber)
    }
}

impl<P: LivenessProber> LockFileStore<P> {
    pub fn with_prober(path: impl Into<PathBuf>, prober: P) -> Self {
        Self {
            path: path.into(),
            prober,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub(super) fn prober(&self) -> &P {
        &self.prober
    }

    /// Try once to take the lock.
    ///
    /// Creation is atomic (`create_new`): if two callers race, exactly one
    /// succeeds. When the file already exists its owner is checked, and a
    /// stale file is removed and creation retried a single time.
    pub fn try_claim(&self) -> Result<LockGuard, LockError> {
        if let Created::Claimed(guard) = self.create_exclusive()? {
            return Ok(guard);
        }

        self.reclaim_stale()?;

        match self.create_exclusive()? {
            Created::Claimed(guard) => Ok(guard),
            // Someone else reclaimed and re-created it first.
            Created::AlreadyExists => Err(LockError::Contended),
        }
    }

    /// Remove the existing lock file if its owner is dead.
    ///
    /// Returns `Ok(())` only when the file is gone and creation may be retried.
    fn reclaim_stale(&self) -> Result<(), LockError> {
        let owner = LockOwner::from_file(&self.path)?;

        let alive = self.prober.is_alive(owner.pid)?;
        tracing::debug!(pid = owner.pid, alive, "probed lockfile owner");
        if alive {
            return Err(LockError::HeldByLiveOwner { pid: owner.pid });
        }

        // Only delete the file that was judged stale. A different owner means
        // another instance reclaimed it in the meantime.
        match LockOwner::from_file(&self.path) {
            Ok(current) if current == owner => {}
            Ok(_) | Err(LockError::Corrupt { .. }) => return Err(LockError::Contended),
            Err(e) => return Err(e),
        }

        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(
                    "removed stale lockfile {} (owner pid {} is not running)",
                    self.path.display(),
                    owner.pid
                );
                Ok(())
            }
            // A concurrent reclaimer removed it already; the retry decides who wins.
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LockError::io("remove stale", e)),
        }
    }

    fn create_exclusive(&self) -> Result<Created, LockError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| LockError::io("create directory for", e))?;
        }

        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Ok(Created::AlreadyExists);
            }
            Err(e) => return Err(LockError::io("create", e)),
        };

        // From here on the file is ours; the guard removes it if writing fails.
        let guard = LockGuard::new(self.path.clone());

        file.write_all(LockOwner::current().to_content().as_bytes())
            .map_err(|e| LockError::io("write pid to", e))?;
        file.sync_all().map_err(|e| LockError::io("sync", e))?;

        Ok(Created::Claimed(guard))
    }
}
