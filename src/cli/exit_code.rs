//! Exit code definitions for rcctl-service
//!
//! Provides standardized exit codes for different error conditions.

use crate::exec::ExecutionFailure;

/// Exit codes for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Successful execution
    Success = 0,
    /// General/unspecified error
    GeneralError = 1,
    /// Configuration error (invalid config, unknown or unsuitable provider)
    ConfigError = 2,
    /// Service is not running (LSB status convention)
    NotRunning = 3,
    /// rcctl could not be run or reported failure
    ExecutionError = 4,
}

impl ExitCode {
    /// Pick the exit code for a failed command
    pub fn for_error(err: &anyhow::Error) -> Self {
        if let Some(err) = err.downcast_ref::<crate::Error>() {
            return if err.is_config() {
                ExitCode::ConfigError
            } else {
                ExitCode::ExecutionError
            };
        }
        if err.downcast_ref::<ExecutionFailure>().is_some() {
            return ExitCode::ExecutionError;
        }
        ExitCode::GeneralError
    }
}

impl From<ExitCode> for u8 {
    fn from(code: ExitCode) -> Self {
        code as u8
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}
