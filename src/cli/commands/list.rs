//! List command - enumerate installed services

use anyhow::Result;
use serde::Serialize;

use super::Session;
use crate::cli::args::ListArgs;
use crate::service::ServiceDescriptor;

/// One listed service
#[derive(Debug, Serialize)]
pub struct ListEntry {
    pub name: String,
    pub flags: String,
    pub provider: &'static str,
}

/// Execute the list command
///
/// An enumeration failure has already been logged by the provider and
/// shows up as an empty list.
pub fn execute(session: &Session, args: ListArgs) -> Result<()> {
    let entries = list(session);

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&entries)?),
        _ => {
            let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
            for entry in &entries {
                println!("{:width$}  {}", entry.name, entry.flags, width = width);
            }
        }
    }

    Ok(())
}

fn list(session: &Session) -> Vec<ListEntry> {
    session
        .provider
        .instances(&session.context)
        .into_iter()
        .map(|descriptor: ServiceDescriptor| ListEntry {
            name: descriptor.name,
            flags: descriptor.flags.unwrap_or_default(),
            provider: session.provider.name,
        })
        .collect()
}
