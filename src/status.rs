//! Exit status codes for the CLI
//!
//! reqbook follows standard Unix exit code conventions:
//! - 0: Success
//! - 1: Any error (malformed descriptor, missing file, network failure, ...)
//!
//! HTTP error statuses returned by the server are not application errors; the
//! response is printed and the exit status stays 0.

use std::process::{ExitCode, Termination};

/// Exit status codes following standard Unix conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    /// Successful execution
    Success = 0,
    /// Any error
    Error = 1,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}
