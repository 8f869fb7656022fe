//! Lock file content.
//!
//! A lock file holds nothing but the owner's decimal process ID followed by a
//! newline. There is no version field and no checksum.

use super::types::LockError;
use std::fs;
use std::io;
use std::path::Path;

/// The process recorded as owning a lock file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOwner {
    pub pid: u32,
}

impl LockOwner {
    /// The owner record for this process.
    pub fn current() -> Self {
        Self {
            pid: std::process::id(),
        }
    }

    /// Parse lock file content.
    ///
    /// Surrounding whitespace is ignored. The pid must be positive and fit
    /// the platform's signed pid type; anything else is not a valid owner.
    pub fn parse(content: &str) -> Result<Self, LockError> {
        match content.trim().parse::<u32>() {
            Ok(pid) if pid > 0 && i32::try_from(pid).is_ok() => Ok(Self { pid }),
            _ => Err(LockError::Corrupt {
                content: content.to_string(),
            }),
        }
    }

    /// Read the owner recorded in an existing lock file.
    ///
    /// A file that no longer exists yields [`LockError::Vanished`].
    pub fn from_file(path: &Path) -> Result<Self, LockError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LockError::Vanished,
            _ => LockError::io("read", e),
        })?;
        Self::parse(&content)
    }

    /// Serialize as lock file content.
    pub fn to_content(self) -> String {
        format!("{}\n", self.pid)
    }
}
