//! Error types for the glock CLI.
//!
//! Uses thiserror for derive macros. Every variant is logged once, with
//! context, before being folded into the process exit status.

use crate::exit_codes;
use crate::locks::AcquisitionError;
use crate::supervisor::ExecutionOutcome;
use thiserror::Error;

/// Top-level failure of a glock invocation.
#[derive(Error, Debug)]
pub enum GlockError {
    /// No command was given after the options.
    #[error("no command given")]
    MissingCommand,

    /// An option value is out of range.
    #[error("{0}")]
    Usage(String),

    /// The lock file could not be obtained.
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    /// The command ran (or tried to) and did not succeed.
    #[error("{0}")]
    Execution(ExecutionOutcome),
}

impl GlockError {
    /// Returns the exit code for this error.
    ///
    /// The CLI contract is boolean, so every failure maps to the same code.
    pub fn exit_code(&self) -> u8 {
        match self {
            GlockError::MissingCommand
            | GlockError::Usage(_)
            | GlockError::Acquisition(_)
            | GlockError::Execution(_) => exit_codes::FAILURE,
        }
    }
}

/// Result type alias for glock operations.
pub type Result<T> = std::result::Result<T, GlockError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locks::LockError;
    use std::time::Duration;

    #[test]
    fn usage_error_has_failure_exit_code() {
        let err = GlockError::Usage("bad value".to_string());
        assert_eq!(err.exit_code(), exit_codes::FAILURE);
        assert_eq!(GlockError::MissingCommand.exit_code(), exit_codes::FAILURE);
    }

    #[test]
    fn acquisition_timeout_message_names_the_budget() {
        let err = GlockError::from(AcquisitionError::Timeout {
            waited: Duration::from_secs(10),
        });
        assert_eq!(err.exit_code(), exit_codes::FAILURE);
        assert_eq!(
            err.to_string(),
            "could not obtain lockfile after waiting 10s"
        );
    }

    #[test]
    fn acquisition_lock_error_is_transparent() {
        let err = GlockError::from(AcquisitionError::from(LockError::Corrupt {
            content: "x".to_string(),
        }));
        assert!(err.to_string().starts_with("could not read owner pid"));
    }

    #[test]
    fn execution_error_uses_outcome_message() {
        let err = GlockError::Execution(ExecutionOutcome::TimedOut {
            after: Duration::from_secs(1),
        });
        assert_eq!(err.exit_code(), exit_codes::FAILURE);
        assert!(err.to_string().contains("took longer than timeout"));
    }
}
