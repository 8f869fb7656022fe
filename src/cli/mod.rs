//! CLI argument parsing for glock.
//!
//! Uses clap derive macros for declarative argument definitions.
//! Validation of the parsed values happens in the `config` module.

use clap::{CommandFactory, Parser};
use std::path::PathBuf;

/// Run a command while holding a lock file, so that at most one instance runs at a time.
///
/// The lock file records the owner's pid. A lock left behind by a process that
/// is no longer running is removed automatically.
#[derive(Parser, Debug)]
#[command(name = "glock")]
#[command(author, version, about, long_about = None)]
#[command(override_usage = "glock [OPTIONS] COMMAND [ARGS]...")]
pub struct Cli {
    /// Seconds to wait for the command to terminate before killing it (-1 waits forever).
    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = 60,
        allow_negative_numbers = true
    )]
    pub timeout: i64,

    /// Lock file to acquire before the command may run.
    #[arg(long, value_name = "PATH", default_value_os_t = default_lockfile())]
    pub lockfile: PathBuf,

    /// Seconds to keep retrying for the lock file (-1 retries forever).
    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = 10,
        allow_negative_numbers = true
    )]
    pub wait: i64,

    /// The command to run, followed by its arguments.
    #[arg(value_name = "COMMAND", num_args = 1.., trailing_var_arg = true)]
    pub command: Vec<String>,
}

impl Cli {
    /// Parse `argv`, returning clap's error for help, version and bad input.
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// Print the full help text to stdout.
    pub fn print_usage() {
        if let Err(e) = Self::command().print_help() {
            tracing::error!("could not print usage: {}", e);
        }
    }
}

/// The lock file used when `--lockfile` is not given.
pub fn default_lockfile() -> PathBuf {
    std::env::temp_dir().join("glockfile")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("glock").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_contract() {
        let cli = parse(&["true"]);
        assert_eq!(cli.timeout, 60);
        assert_eq!(cli.wait, 10);
        assert_eq!(cli.lockfile, default_lockfile());
        assert_eq!(cli.command, ["true"]);
    }

    #[test]
    fn default_lockfile_lives_in_temp_dir() {
        assert_eq!(default_lockfile(), std::env::temp_dir().join("glockfile"));
    }

    #[test]
    fn equals_and_space_forms_are_accepted() {
        let cli = parse(&["--timeout=-1", "--wait", "-1", "--lockfile=/tmp/x.lock", "true"]);
        assert_eq!(cli.timeout, -1);
        assert_eq!(cli.wait, -1);
        assert_eq!(cli.lockfile, PathBuf::from("/tmp/x.lock"));
    }

    #[test]
    fn command_arguments_may_look_like_flags() {
        let cli = parse(&["--wait=0", "sh", "-c", "exit 1", "--timeout=5"]);
        assert_eq!(cli.wait, 0);
        assert_eq!(cli.timeout, 60);
        assert_eq!(cli.command, ["sh", "-c", "exit 1", "--timeout=5"]);
    }

    #[test]
    fn double_dash_separates_command() {
        let cli = parse(&["--", "false"]);
        assert_eq!(cli.command, ["false"]);
    }

    #[test]
    fn empty_command_parses() {
        assert!(parse(&[]).command.is_empty());
    }

    #[test]
    fn non_integer_budget_is_rejected() {
        let err = Cli::try_parse_from(["glock", "--wait=soon", "true"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn version_flag_is_reported_as_display_version() {
        let err = Cli::try_parse_from(["glock", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
