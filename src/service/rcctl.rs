//! OpenBSD rcctl(8) integration
//!
//! Provides service control for rc.d daemon scripts through `rcctl`:
//! - Build start/stop/restart/check command lines
//! - Query and toggle boot-time enablement
//! - Read and write daemon flags
//! - Enumerate every service `rcctl` knows about

use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::{Feature, ServiceControl, ServiceDescriptor};
use crate::exec::{CommandLine, CommandRunner, ExecutionFailure};

/// Default location of the rcctl utility
pub const DEFAULT_RCCTL: &str = "/usr/sbin/rcctl";

/// Marker printed by `rcctl check` for a running daemon
const RUNNING_MARKER: &str = "(ok)";

/// Provider name in the registry
pub const PROVIDER_NAME: &str = "openbsd";

/// rcctl-backed service provider
pub struct Rcctl {
    /// Path to the rcctl executable
    rcctl: PathBuf,
    /// Service being managed
    resource: ServiceDescriptor,
    runner: Rc<dyn CommandRunner>,
}

impl Rcctl {
    /// Create a provider for `resource` using the default rcctl location
    pub fn new(resource: ServiceDescriptor, runner: Rc<dyn CommandRunner>) -> Self {
        Self {
            rcctl: PathBuf::from(DEFAULT_RCCTL),
            resource,
            runner,
        }
    }

    /// Use a different rcctl executable
    pub fn with_rcctl_path(mut self, rcctl: impl Into<PathBuf>) -> Self {
        self.rcctl = rcctl.into();
        self
    }

    /// Path to the rcctl executable
    pub fn rcctl_path(&self) -> &Path {
        &self.rcctl
    }

    /// Enumerate all services known to rcctl together with their flags
    ///
    /// Failure to run rcctl is logged and yields an empty list: an unknown
    /// service inventory is not an error for the caller.
    pub fn instances(rcctl: &Path, runner: &dyn CommandRunner) -> Vec<ServiceDescriptor> {
        match list_services(rcctl, runner) {
            Ok(services) => services,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to execute rcctl");
                Vec::new()
            }
        }
    }

    fn command<I, S>(&self, args: I) -> CommandLine
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandLine::new(&self.rcctl).args(args)
    }

    fn name(&self) -> &str {
        &self.resource.name
    }
}

// `rcctl get <svc> flags` exits non-zero for disabled daemons while still
// printing their flags, so only a failure to run it at all is an error.
fn list_services(
    rcctl: &Path,
    runner: &dyn CommandRunner,
) -> Result<Vec<ServiceDescriptor>, ExecutionFailure> {
    let listing = runner.run_checked(&CommandLine::new(rcctl).args(["ls", "all"]))?;

    let mut services = Vec::new();
    for name in listing.stdout.lines().map(str::trim_end) {
        if name.is_empty() {
            continue;
        }

        let output = runner.run(&CommandLine::new(rcctl).args(["get", name, "flags"]))?;
        services.push(
            ServiceDescriptor::new(name)
                .with_flags(output.stdout.trim_end())
                .with_has_status(true),
        );
    }

    tracing::debug!(count = services.len(), "Enumerated rcctl services");
    Ok(services)
}

impl ServiceControl for Rcctl {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn descriptor(&self) -> &ServiceDescriptor {
        &self.resource
    }

    fn has_feature(&self, feature: Feature) -> bool {
        matches!(feature, Feature::Flaggable)
    }

    fn start_command(&self) -> Result<CommandLine, ExecutionFailure> {
        // rcctl only accepts flags for enabled services. If the service is
        // meant to stay disabled, a later disable undoes this.
        if let Some(desired) = self.resource.flags.as_deref()
            && self.flags() != desired
        {
            self.enable()?;
            self.set_flags(desired)?;
        }

        Ok(self.command(["-f", "start", self.name()]))
    }

    fn stop_command(&self) -> CommandLine {
        self.command(["stop", self.name()])
    }

    fn restart_command(&self) -> Option<CommandLine> {
        self.resource
            .has_restart
            .then(|| self.command(["-f", "restart", self.name()]))
    }

    fn status_command(&self) -> CommandLine {
        self.command(["check", self.name()])
    }

    fn is_enabled(&self) -> bool {
        let enabled = self
            .runner
            .run(&self.command(["get", self.name(), "status"]))
            .map(|output| output.success())
            .unwrap_or(false);

        if enabled {
            tracing::debug!(service = %self.name(), "Is enabled");
        } else {
            tracing::debug!(service = %self.name(), "Is disabled");
        }
        enabled
    }

    fn enable(&self) -> Result<(), ExecutionFailure> {
        tracing::debug!(service = %self.name(), "Enabling");
        self.runner
            .run_checked(&self.command(["enable", self.name()]))?;

        if let Some(flags) = self.resource.flags.as_deref() {
            self.runner
                .run_checked(&self.command(["set", self.name(), "flags", flags]))?;
        }
        Ok(())
    }

    fn disable(&self) -> Result<(), ExecutionFailure> {
        tracing::debug!(service = %self.name(), "Disabling");
        self.runner
            .run_checked(&self.command(["disable", self.name()]))?;
        Ok(())
    }

    fn is_running(&self) -> bool {
        match self.runner.run(&self.status_command()) {
            Ok(output) => output.success() && output.stdout.contains(RUNNING_MARKER),
            Err(_) => false,
        }
    }

    fn flags(&self) -> String {
        let flags = match self.runner.run(&self.command(["get", self.name(), "flags"])) {
            Ok(output) => output.stdout.trim_end().to_string(),
            Err(_) => String::new(),
        };
        tracing::debug!(service = %self.name(), "Flags are: \"{}\"", flags);
        flags
    }

    fn set_flags(&self, value: &str) -> Result<(), ExecutionFailure> {
        tracing::debug!(service = %self.name(), flags = value, "Changing flags");
        self.runner
            .run_checked(&self.command(["set", self.name(), "flags", value]))?;

        // Running daemons only pick up new flags on restart
        if self.is_running() {
            self.runner
                .run_checked(&self.command(["restart", self.name()]))?;
        }
        Ok(())
    }
}
