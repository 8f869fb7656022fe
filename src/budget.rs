//! Time budgets for lock acquisition and command execution.

use std::fmt;
use std::time::Duration;

/// The CLI sentinel meaning "no limit".
pub const UNBOUNDED_SECONDS: i64 = -1;

/// A wall-clock allowance, either a fixed number of seconds or unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// Give up (or kill) once this much time has elapsed.
    Bounded(Duration),
    /// Wait forever.
    Unbounded,
}

impl Budget {
    /// Interpret a CLI seconds value.
    ///
    /// `-1` is unbounded; any other negative value is rejected.
    pub fn from_seconds(seconds: i64) -> Option<Self> {
        match seconds {
            UNBOUNDED_SECONDS => Some(Budget::Unbounded),
            s if s < 0 => None,
            s => Some(Budget::Bounded(Duration::from_secs(s.unsigned_abs()))),
        }
    }

    /// The limit, if any.
    pub fn limit(&self) -> Option<Duration> {
        match self {
            Budget::Bounded(limit) => Some(*limit),
            Budget::Unbounded => None,
        }
    }

    /// Whether `elapsed` has used up the budget. Never true when unbounded.
    pub fn is_exhausted(&self, elapsed: Duration) -> bool {
        self.limit().is_some_and(|limit| elapsed >= limit)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Budget::Bounded(limit) => write!(f, "{}s", limit.as_secs()),
            Budget::Unbounded => f.write_str("unbounded"),
        }
    }
}
