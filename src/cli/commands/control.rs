//! Start, stop, restart, enable and disable commands

use anyhow::{Context, Result};

use super::Session;
use crate::cli::args::{RestartArgs, ServiceArgs, ServiceWithFlagsArgs};
use crate::service::{Lifecycle, ServiceDescriptor};

/// Descriptor for `name`, with flags from the command line taking priority
fn descriptor(session: &Session, name: &str, flags: Option<String>) -> ServiceDescriptor {
    let mut descriptor = session.config.descriptor(name);
    if flags.is_some() {
        descriptor.flags = flags;
    }
    descriptor
}

/// Execute the start command
pub fn start(session: &Session, args: ServiceWithFlagsArgs) -> Result<()> {
    let service = session.service_with(descriptor(session, &args.name, args.flags))?;
    Lifecycle::new(service.as_ref(), session.runner())
        .start()
        .with_context(|| format!("Failed to start {}", args.name))?;
    println!("{}: started", args.name);
    Ok(())
}

/// Execute the stop command
pub fn stop(session: &Session, args: ServiceArgs) -> Result<()> {
    let service = session.service(&args.name)?;
    Lifecycle::new(service.as_ref(), session.runner())
        .stop()
        .with_context(|| format!("Failed to stop {}", args.name))?;
    println!("{}: stopped", args.name);
    Ok(())
}

/// Execute the restart command
pub fn restart(session: &Session, args: RestartArgs) -> Result<()> {
    let mut descriptor = session.config.descriptor(&args.name);
    descriptor.has_restart |= args.hasrestart;

    let service = session.service_with(descriptor)?;
    Lifecycle::new(service.as_ref(), session.runner())
        .restart()
        .with_context(|| format!("Failed to restart {}", args.name))?;
    println!("{}: restarted", args.name);
    Ok(())
}

/// Execute the enable command
pub fn enable(session: &Session, args: ServiceWithFlagsArgs) -> Result<()> {
    let service = session.service_with(descriptor(session, &args.name, args.flags))?;
    service
        .enable()
        .with_context(|| format!("Failed to enable {}", args.name))?;
    println!("{}: enabled", args.name);
    Ok(())
}

/// Execute the disable command
pub fn disable(session: &Session, args: ServiceArgs) -> Result<()> {
    let service = session.service(&args.name)?;
    service
        .disable()
        .with_context(|| format!("Failed to disable {}", args.name))?;
    println!("{}: disabled", args.name);
    Ok(())
}
