//! Command executor.
//!
//! Spawns the command with inherited stdio and races its exit against the
//! timeout budget.

use crate::budget::Budget;
use crate::command::CommandSpec;
use std::fmt;
use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::{Child, Command};

/// How a command that did start ended unsuccessfully on its own.
#[derive(Error, Debug)]
pub enum CommandFailure {
    /// The process exited non-zero or was killed by a signal.
    #[error("{0}")]
    Status(ExitStatus),

    /// Waiting for the process failed.
    #[error("could not wait for command: {0}")]
    Wait(#[source] io::Error),
}

/// The result of running the protected command once.
#[derive(Debug)]
pub enum ExecutionOutcome {
    /// The command exited with status 0.
    Succeeded,

    /// The command could not be spawned.
    FailedToStart { program: String, source: io::Error },

    /// The command ran and failed.
    Errored(CommandFailure),

    /// The deadline passed; the command was killed and reaped.
    TimedOut { after: Duration },

    /// The deadline passed but the command could not be killed.
    KillFailed { source: io::Error },
}

impl ExecutionOutcome {
    /// Only a clean exit counts as success.
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionOutcome::Succeeded)
    }
}

impl fmt::Display for ExecutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionOutcome::Succeeded => f.write_str("successfully ran command"),
            ExecutionOutcome::FailedToStart { program, source } => {
                write!(f, "could not start command '{}': {}", program, source)
            }
            ExecutionOutcome::Errored(failure) => {
                write!(f, "command exited with an error: {}", failure)
            }
            ExecutionOutcome::TimedOut { after } => write!(
                f,
                "command took longer than timeout ({}s) and was killed",
                after.as_secs()
            ),
            ExecutionOutcome::KillFailed { source } => {
                write!(f, "could not kill command: {}", source)
            }
        }
    }
}

/// Run a command to completion or until the timeout budget expires.
///
/// Blocks the calling thread on a single-threaded runtime for the duration.
pub fn run(command: &CommandSpec, timeout: Budget) -> ExecutionOutcome {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(source) => {
            return ExecutionOutcome::FailedToStart {
                program: command.program().to_string(),
                source,
            };
        }
    };

    runtime.block_on(supervise(command, timeout))
}

/// Async core of [`run`].
pub async fn supervise(command: &CommandSpec, timeout: Budget) -> ExecutionOutcome {
    let mut child = match spawn(command) {
        Ok(child) => child,
        Err(source) => {
            return ExecutionOutcome::FailedToStart {
                program: command.program().to_string(),
                source,
            };
        }
    };
    tracing::debug!(pid = child.id(), "spawned command");

    let Some(limit) = timeout.limit() else {
        return exit_outcome(child.wait().await);
    };

    // Whichever finishes first wins; the other future is dropped.
    match tokio::time::timeout(limit, child.wait()).await {
        Ok(status) => exit_outcome(status),
        Err(_elapsed) => match child.kill().await {
            Ok(()) => ExecutionOutcome::TimedOut { after: limit },
            Err(source) => ExecutionOutcome::KillFailed { source },
        },
    }
}

fn spawn(command: &CommandSpec) -> io::Result<Child> {
    Command::new(command.program())
        .args(command.args())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
}

fn exit_outcome(status: io::Result<ExitStatus>) -> ExecutionOutcome {
    match status {
        Ok(status) if status.success() => ExecutionOutcome::Succeeded,
        Ok(status) => ExecutionOutcome::Errored(CommandFailure::Status(status)),
        Err(e) => ExecutionOutcome::Errored(CommandFailure::Wait(e)),
    }
}
