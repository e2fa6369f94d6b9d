//! Status command - show whether a service is running and enabled

use anyhow::Result;
use serde::Serialize;

use super::Session;
use crate::cli::args::StatusArgs;
use crate::cli::exit_code::ExitCode;
use crate::service::{Feature, Lifecycle, ServiceStatus};

/// Status information
#[derive(Debug, Serialize)]
pub struct StatusInfo {
    /// Service name
    pub name: String,
    /// Provider used for the queries
    pub provider: &'static str,
    /// Running state
    pub status: ServiceStatus,
    /// Whether the service starts at boot
    pub enabled: bool,
    /// Current flags, absent for providers without flag support
    pub flags: Option<String>,
}

/// Execute the status command
///
/// Returns [`ExitCode::NotRunning`] for a stopped service.
pub fn execute(session: &Session, args: StatusArgs) -> Result<ExitCode> {
    let status = get_status(session, &args.name)?;

    match args.format.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&status)?;
            println!("{}", json);
        }
        _ => print_text_status(&status),
    }

    Ok(match status.status {
        ServiceStatus::Running => ExitCode::Success,
        ServiceStatus::Stopped => ExitCode::NotRunning,
    })
}

/// Get status information
fn get_status(session: &Session, name: &str) -> Result<StatusInfo> {
    let service = session.service(name)?;
    let lifecycle = Lifecycle::new(service.as_ref(), session.runner());

    Ok(StatusInfo {
        name: name.to_string(),
        provider: service.provider_name(),
        status: lifecycle.status(),
        enabled: service.is_enabled(),
        flags: service
            .has_feature(Feature::Flaggable)
            .then(|| service.flags()),
    })
}

/// Print status in text format
fn print_text_status(status: &StatusInfo) {
    println!("{}", status.name);
    match status.status {
        ServiceStatus::Running => println!("  Status:  RUNNING"),
        ServiceStatus::Stopped => println!("  Status:  STOPPED"),
    }
    println!("  Enabled: {}", if status.enabled { "yes" } else { "no" });
    if let Some(flags) = &status.flags {
        println!("  Flags:   {}", flags);
    }
}
