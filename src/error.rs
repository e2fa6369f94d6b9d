//! Error types for rcctl-service

use thiserror::Error;

use crate::exec::ExecutionFailure;
use crate::service::Feature;

/// Main error type for rcctl-service
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Execution(#[from] ExecutionFailure),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown service provider: {0}")]
    UnknownProvider(String),

    #[error("Service provider '{provider}' is not suitable for platform '{os}'")]
    Unsuitable { provider: String, os: String },

    #[error("Service provider '{provider}' does not support the {feature} feature")]
    Unsupported { provider: String, feature: Feature },
}

impl Error {
    /// Whether the error stems from configuration rather than execution
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::Config(_)
                | Error::UnknownProvider(_)
                | Error::Unsuitable { .. }
                | Error::Unsupported { .. }
        )
    }
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
