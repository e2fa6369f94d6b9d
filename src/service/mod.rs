//! Service management module
//!
//! This module provides the provider side of the generic service resource:
//! - [`ServiceControl`]: the capability set every provider implements
//! - OpenBSD `rcctl(8)` provider
//! - Static provider registry with platform confinement
//! - Lifecycle driver that executes provider command lines

pub mod lifecycle;
pub mod rcctl;
pub mod registry;

pub use lifecycle::{Change, DesiredState, Ensure, Lifecycle, ServiceStatus};
pub use rcctl::Rcctl;
pub use registry::{ProviderContext, ProviderEntry};

use serde::Serialize;

use crate::exec::{CommandLine, ExecutionFailure};

/// Optional provider capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Daemon flags can be read and written
    Flaggable,
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Feature::Flaggable => write!(f, "flaggable"),
        }
    }
}

/// Immutable description of one managed service
///
/// Built fresh for every managed resource or enumeration; enabled and
/// running state are never stored here, they are queried on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    /// Service name as known to the service manager
    pub name: String,
    /// Desired daemon flags, passed verbatim
    pub flags: Option<String>,
    /// Whether the status command is trustworthy
    pub has_status: bool,
    /// Whether the provider's native restart should be used
    pub has_restart: bool,
}

impl ServiceDescriptor {
    /// Descriptor with no flags, a usable status command and no native restart
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: None,
            has_status: true,
            has_restart: false,
        }
    }

    pub fn with_flags(mut self, flags: impl Into<String>) -> Self {
        self.flags = Some(flags.into());
        self
    }

    pub fn with_has_status(mut self, has_status: bool) -> Self {
        self.has_status = has_status;
        self
    }

    pub fn with_has_restart(mut self, has_restart: bool) -> Self {
        self.has_restart = has_restart;
        self
    }
}

/// Capability set of a service provider
///
/// The `*_command` methods only build command lines; executing them is the
/// caller's job (see [`Lifecycle`]). The remaining methods talk to the
/// service manager directly.
pub trait ServiceControl {
    /// Provider name in the registry
    fn provider_name(&self) -> &'static str;

    /// The service this provider instance manages
    fn descriptor(&self) -> &ServiceDescriptor;

    /// Whether the provider supports an optional feature
    fn has_feature(&self, feature: Feature) -> bool;

    /// Command that starts the service
    ///
    /// May apply pending configuration to the service manager first, which
    /// is why it can fail.
    fn start_command(&self) -> Result<CommandLine, ExecutionFailure>;

    /// Command that stops the service
    fn stop_command(&self) -> CommandLine;

    /// Native restart command, `None` when the caller should stop and start
    fn restart_command(&self) -> Option<CommandLine>;

    /// Command whose exit status tells whether the service is running
    fn status_command(&self) -> CommandLine;

    /// Whether the service starts at boot; never fails
    fn is_enabled(&self) -> bool;

    /// Enable the service at boot
    fn enable(&self) -> Result<(), ExecutionFailure>;

    /// Disable the service at boot
    fn disable(&self) -> Result<(), ExecutionFailure>;

    /// Point-in-time running check; never fails
    fn is_running(&self) -> bool;

    /// Currently configured flags, empty when unknown
    fn flags(&self) -> String;

    /// Configure new flags
    fn set_flags(&self, value: &str) -> Result<(), ExecutionFailure>;
}
