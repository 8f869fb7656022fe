//! The acquisition loop: fixed-interval polling until the lock is ours or the
//! wait budget runs out.

use super::guard::LockGuard;
use super::liveness::LivenessProber;
use super::store::LockFileStore;
use super::types::AcquisitionError;
use crate::budget::Budget;
use std::thread;
use std::time::{Duration, Instant};

/// Interval between claim attempts.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// How long and how often to retry.
#[derive(Debug, Clone, Copy)]
pub struct AcquireOptions {
    pub wait: Budget,
    pub poll_interval: Duration,
}

impl AcquireOptions {
    pub fn new(wait: Budget) -> Self {
        Self {
            wait,
            poll_interval: POLL_INTERVAL,
        }
    }
}

/// Claim the lock, retrying until it succeeds or the wait budget is spent.
///
/// Every failed attempt is logged before sleeping. The budget is measured
/// from the first attempt, so a zero budget means exactly one attempt.
pub fn acquire<P: LivenessProber>(
    store: &LockFileStore<P>,
    options: &AcquireOptions,
) -> Result<LockGuard, AcquisitionError> {
    let start = Instant::now();
    let mut attempt: u64 = 0;

    loop {
        attempt += 1;
        let err = match store.try_claim() {
            Ok(guard) => return Ok(guard),
            Err(err) => err,
        };

        tracing::warn!(attempt, "lock file error: {}", err);

        if !err.is_retryable() {
            return Err(err.into());
        }

        if let Budget::Bounded(waited) = options.wait
            && options.wait.is_exhausted(start.elapsed())
        {
            return Err(AcquisitionError::Timeout { waited });
        }

        tracing::warn!("waiting {}s to try again", options.poll_interval.as_secs_f64());
        thread::sleep(options.poll_interval);
    }
}
