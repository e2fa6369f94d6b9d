//! rcctl-service - service control through OpenBSD's rcctl(8)
//!
//! This library implements a service provider that translates abstract
//! lifecycle operations (start, stop, restart, enable, disable, flags,
//! status, enumeration) into `rcctl` invocations and interprets their
//! output. Providers are picked from a static registry by platform.

pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod service;

pub use error::{Error, Result};

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
pub const NAME: &str = env!("CARGO_PKG_NAME");
