//! glock: run a command under a lock file so that only one instance runs at a time.
//!
//! This is the main entry point for the `glock` CLI. It parses arguments,
//! hands the resolved settings to the runner, and maps the result to an
//! exit code.

mod budget;
mod cli;
mod command;
mod config;
mod error;
mod exit_codes;
mod locks;
mod logging;
mod runner;
mod supervisor;

use cli::Cli;
use config::Settings;
use error::GlockError;
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init();

    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version go to stdout and are not failures.
            let code = if err.use_stderr() {
                exit_codes::FAILURE
            } else {
                exit_codes::SUCCESS
            };
            if let Err(e) = err.print() {
                tracing::error!("could not print message: {}", e);
            }
            return ExitCode::from(code);
        }
    };

    let result = Settings::from_cli(cli).and_then(|settings| runner::run(&settings));
    match result {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS),
        Err(GlockError::MissingCommand) => {
            Cli::print_usage();
            ExitCode::from(exit_codes::FAILURE)
        }
        // Reported by the runner before the lock was released.
        Err(err @ GlockError::Execution(_)) => ExitCode::from(err.exit_code()),
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
