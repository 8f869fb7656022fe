//! Locking subsystem for glock.
//!
//! # Lock Files
//!
//! A lock is a single file, created with **create_new** semantics (exclusive
//! create) so that only one process can hold it at a time. The filesystem's
//! atomic create is the only primitive guarding the lock across processes.
//!
//! # Lock Content
//!
//! The file holds the owner's process ID and a newline. When a claim finds an
//! existing file, the owner is probed; a dead owner's file is removed and the
//! claim retried once. Reclamation is best effort: when two processes reclaim
//! the same stale lock, the loser gets [`LockError::Contended`] and retries on
//! the next poll.
//!
//! # RAII Guards
//!
//! A successful claim returns a [`LockGuard`] that removes the file when
//! dropped. A process killed while holding the lock leaves the file behind; the
//! next claimant reclaims it once the recorded pid is gone.

mod acquire;
mod guard;
mod liveness;
mod metadata;
mod store;
mod types;


// Re-export public API
pub use acquire::{AcquireOptions, POLL_INTERVAL, acquire};
pub use guard::LockGuard;
pub use liveness::{LivenessProber, ProbeError, SignalProber};
pub use metadata::LockOwner;
pub use store::LockFileStore;
pub use types::{AcquisitionError, LockError};
