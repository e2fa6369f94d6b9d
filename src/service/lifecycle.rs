//! Service lifecycle driver
//!
//! Executes the command lines a provider builds and converges a single
//! service towards a desired state. Properties are synced in a fixed
//! order: running state, boot enablement, then flags.

use serde::{Deserialize, Serialize};

use super::{Feature, ServiceControl};
use crate::error::Result;
use crate::exec::CommandRunner;

/// Desired running state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ensure {
    Running,
    Stopped,
}

/// Observed running state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Running,
    Stopped,
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceStatus::Running => write!(f, "running"),
            ServiceStatus::Stopped => write!(f, "stopped"),
        }
    }
}

/// Target state of one service; `None` leaves a property unmanaged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DesiredState {
    pub ensure: Option<Ensure>,
    pub enable: Option<bool>,
}

/// A change applied while converging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Started,
    Stopped,
    Enabled,
    Disabled,
    FlagsChanged { from: String, to: String },
}

impl std::fmt::Display for Change {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Change::Started => write!(f, "started"),
            Change::Stopped => write!(f, "stopped"),
            Change::Enabled => write!(f, "enabled"),
            Change::Disabled => write!(f, "disabled"),
            Change::FlagsChanged { from, to } => {
                write!(f, "flags changed from \"{}\" to \"{}\"", from, to)
            }
        }
    }
}

/// Drives one service through a provider
pub struct Lifecycle<'a> {
    control: &'a dyn ServiceControl,
    runner: &'a dyn CommandRunner,
}

impl<'a> Lifecycle<'a> {
    pub fn new(control: &'a dyn ServiceControl, runner: &'a dyn CommandRunner) -> Self {
        Self { control, runner }
    }

    fn service(&self) -> &str {
        &self.control.descriptor().name
    }

    /// Start the service
    pub fn start(&self) -> Result<()> {
        let command = self.control.start_command()?;
        self.runner.run_checked(&command)?;
        tracing::info!(service = %self.service(), "Service started");
        Ok(())
    }

    /// Stop the service
    pub fn stop(&self) -> Result<()> {
        self.runner.run_checked(&self.control.stop_command())?;
        tracing::info!(service = %self.service(), "Service stopped");
        Ok(())
    }

    /// Restart the service, falling back to stop and start
    pub fn restart(&self) -> Result<()> {
        match self.control.restart_command() {
            Some(command) => {
                self.runner.run_checked(&command)?;
                tracing::info!(service = %self.service(), "Service restarted");
                Ok(())
            }
            None => {
                tracing::debug!(service = %self.service(), "No native restart, stopping and starting");
                self.stop()?;
                self.start()
            }
        }
    }

    /// Current running state
    ///
    /// Uses the exit status of the status command when the descriptor
    /// trusts it, otherwise the provider's own running check.
    pub fn status(&self) -> ServiceStatus {
        let running = if self.control.descriptor().has_status {
            self.runner
                .run(&self.control.status_command())
                .map(|output| output.success())
                .unwrap_or(false)
        } else {
            self.control.is_running()
        };

        if running {
            ServiceStatus::Running
        } else {
            ServiceStatus::Stopped
        }
    }

    /// Bring the service to `desired` and report what changed
    pub fn converge(&self, desired: &DesiredState) -> Result<Vec<Change>> {
        let mut changes = Vec::new();

        if let Some(ensure) = desired.ensure {
            match (ensure, self.status()) {
                (Ensure::Running, ServiceStatus::Stopped) => {
                    self.start()?;
                    changes.push(Change::Started);
                }
                (Ensure::Stopped, ServiceStatus::Running) => {
                    self.stop()?;
                    changes.push(Change::Stopped);
                }
                _ => {}
            }
        }

        if let Some(enable) = desired.enable {
            let enabled = self.control.is_enabled();
            if enable && !enabled {
                self.control.enable()?;
                changes.push(Change::Enabled);
            } else if !enable && enabled {
                self.control.disable()?;
                changes.push(Change::Disabled);
            }
        }

        // rcctl refuses flags for disabled services
        if desired.enable != Some(false)
            && self.control.has_feature(Feature::Flaggable)
            && let Some(flags) = self.control.descriptor().flags.as_deref()
        {
            let current = self.control.flags();
            if current != flags {
                self.control.set_flags(flags)?;
                changes.push(Change::FlagsChanged {
                    from: current,
                    to: flags.to_string(),
                });
            }
        }

        for change in &changes {
            tracing::info!(service = %self.service(), "{}", change);
        }
        Ok(changes)
    }
}
