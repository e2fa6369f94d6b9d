//! Logging module for rcctl-service
//!
//! Diagnostics go to stderr through tracing-subscriber so that stdout only
//! carries command results (`list`, `status`, `flags`). The `--verbose` and
//! `--quiet` flags pick the level for this crate; everything else stays at
//! warnings. `RUST_LOG` replaces the whole filter when set.

use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Level used for crates other than this one
const DEPENDENCY_LEVEL: Level = Level::WARN;

/// Logging configuration
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// -1 for quiet, 0 for normal, +1 for verbose
    pub verbosity: i8,
}

impl LogConfig {
    /// Build from the CLI flags; `quiet` wins over `verbose`
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        let verbosity = match (verbose, quiet) {
            (_, true) => -1,
            (true, false) => 1,
            (false, false) => 0,
        };
        Self { verbosity }
    }

    /// Level for events emitted by rcctl-service itself
    fn crate_level(&self) -> Level {
        match self.verbosity {
            v if v < 0 => Level::WARN,
            0 => Level::INFO,
            _ => Level::DEBUG,
        }
    }

    /// Filter directive used when `RUST_LOG` is unset
    ///
    /// Executed rcctl command lines are logged at debug, so `--verbose`
    /// shows every call made on the service manager.
    pub fn directive(&self) -> String {
        format!(
            "{},{}={}",
            DEPENDENCY_LEVEL.as_str().to_lowercase(),
            env!("CARGO_CRATE_NAME"),
            self.crate_level().as_str().to_lowercase()
        )
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.directive()))
    }
}

/// Initialize the logging subsystem from the global CLI flags
pub fn init(verbose: bool, quiet: bool) {
    init_with_config(LogConfig::from_flags(verbose, quiet))
}

/// Initialize logging with full configuration
pub fn init_with_config(config: LogConfig) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let subscriber = tracing_subscriber::registry()
        .with(config.env_filter())
        .with(stderr_layer);

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
}
