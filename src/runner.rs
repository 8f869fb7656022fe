//! One full glock run: acquire the lock, run the command, release the lock.

use crate::config::Settings;
use crate::error::{GlockError, Result};
use crate::locks::{self, AcquireOptions, LockFileStore, LockGuard};
use crate::supervisor;

/// Run the configured command under the lock.
///
/// The lock is released on every path after it has been acquired, whatever
/// the command's outcome. A release failure is logged and does not change
/// the result.
pub fn run(settings: &Settings) -> Result<()> {
    run_with(settings, AcquireOptions::new(settings.wait))
}

pub(crate) fn run_with(settings: &Settings, options: AcquireOptions) -> Result<()> {
    let store = LockFileStore::new(&settings.lockfile);

    tracing::info!("obtaining lockfile: {}", store.path().display());
    let guard = locks::acquire(&store, &options)?;
    tracing::info!("obtained lockfile: {}", guard.path().display());

    tracing::info!(
        "running command (timeout: {}): {}",
        settings.timeout,
        settings.command
    );
    let outcome = supervisor::run(&settings.command, settings.timeout);
    if outcome.is_success() {
        tracing::info!("{}", outcome);
    } else {
        tracing::error!("{}", outcome);
    }

    release(guard);

    if outcome.is_success() {
        Ok(())
    } else {
        Err(GlockError::Execution(outcome))
    }
}

fn release(guard: LockGuard) {
    let path = guard.path().to_path_buf();
    match guard.release() {
        Ok(()) => tracing::info!("released lockfile: {}", path.display()),
        Err(e) => tracing::warn!("could not remove lockfile {}: {}", path.display(), e),
    }
}
