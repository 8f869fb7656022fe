//! Supervised execution of the protected command.
//!
//! This module provides:
//!
//! - Pass-through stdio (the command talks to the terminal directly)
//! - An optional wall-clock timeout with forced termination
//! - A single [`ExecutionOutcome`] per run

mod executor;

pub use executor::{CommandFailure, ExecutionOutcome, run, supervise};
