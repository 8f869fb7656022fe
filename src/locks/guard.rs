//! RAII lock guard implementation.

use super::types::LockError;
use std::fs;
use std::path::{Path, PathBuf};

/// Ownership of a claimed lock file.
///
/// When dropped, the lock file is deleted. If deletion fails, a warning is
/// logged but no panic occurs. Use [`LockGuard::release`] to observe the error.
#[derive(Debug)]
pub struct LockGuard {
    /// Path to the lock file.
    path: PathBuf,

    /// Whether the lock has been released manually.
    released: bool,
}

impl LockGuard {
    pub(super) fn new(path: PathBuf) -> Self {
        Self {
            path,
            released: false,
        }
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the lock file, reporting failure to the caller.
    ///
    /// The guard is consumed, so release happens at most once.
    pub fn release(mut self) -> Result<(), LockError> {
        self.released = true;
        fs::remove_file(&self.path).map_err(|e| LockError::io("remove", e))
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if !self.released
            && let Err(e) = fs::remove_file(&self.path)
        {
            tracing::warn!("could not remove lockfile {}: {}", self.path.display(), e);
        }
    }
}
