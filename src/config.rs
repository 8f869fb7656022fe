//! Resolved settings for one glock invocation.
//!
//! Built once from the parsed command line and passed explicitly to the
//! runner; nothing here is global.

use crate::budget::Budget;
use crate::cli::Cli;
use crate::command::CommandSpec;
use crate::error::{GlockError, Result};
use std::path::PathBuf;

/// Everything needed to acquire the lock and run the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Path of the lock file.
    pub lockfile: PathBuf,

    /// How long to keep retrying for the lock.
    pub wait: Budget,

    /// How long the command may run before it is killed.
    pub timeout: Budget,

    /// The protected command.
    pub command: CommandSpec,
}

impl Settings {
    /// Validate parsed arguments.
    ///
    /// # Errors
    ///
    /// * `GlockError::MissingCommand` - no command after the options
    /// * `GlockError::Usage` - a budget is negative but not `-1`
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let wait = parse_budget("wait", cli.wait)?;
        let timeout = parse_budget("timeout", cli.timeout)?;
        let command = CommandSpec::from_argv(cli.command).ok_or(GlockError::MissingCommand)?;

        Ok(Self {
            lockfile: cli.lockfile,
            wait,
            timeout,
            command,
        })
    }
}

fn parse_budget(flag: &str, seconds: i64) -> Result<Budget> {
    Budget::from_seconds(seconds).ok_or_else(|| {
        GlockError::Usage(format!(
            "invalid value {} for --{}: expected a number of seconds, or -1 for no limit",
            seconds, flag
        ))
    })
}
