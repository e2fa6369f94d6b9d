//! Flags command - show or change daemon flags

use anyhow::{Context, Result, bail};

use super::Session;
use crate::cli::args::FlagsArgs;
use crate::service::Feature;

/// Execute the flags command
pub fn execute(session: &Session, args: FlagsArgs) -> Result<()> {
    let service = session.service(&args.name)?;
    if !service.has_feature(Feature::Flaggable) {
        bail!(
            "Provider '{}' cannot manage flags",
            service.provider_name()
        );
    }

    match args.set {
        Some(value) => {
            let current = service.flags();
            if current == value {
                tracing::info!(service = %args.name, "Flags already set");
                return Ok(());
            }
            service
                .set_flags(&value)
                .with_context(|| format!("Failed to set flags for {}", args.name))?;
            println!("{}: flags changed from \"{}\" to \"{}\"", args.name, current, value);
        }
        None => println!("{}", service.flags()),
    }

    Ok(())
}
