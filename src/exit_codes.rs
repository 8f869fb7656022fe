//! Exit code constants for the glock CLI.
//!
//! The overall outcome is boolean:
//! - 0: The lock was obtained and the command ran successfully
//! - 1: Anything else (usage error, lock not obtained, command failed or timed out)
//!
//! The wrapped command's own exit code is not forwarded.

/// Successful execution.
pub const SUCCESS: u8 = 0;

/// Any failure: bad arguments, lock acquisition, command error or timeout.
pub const FAILURE: u8 = 1;
