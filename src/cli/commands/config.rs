//! Config command - show or validate configuration

use anyhow::{Context, Result, bail};
use std::path::Path;

use crate::cli::args::ConfigArgs;
use crate::config::{Config, config_search_paths, find_config_file, load_config};
use crate::service::{Feature, registry};

/// Example configuration content
fn example_config() -> &'static str {
    r#"# rcctl-service configuration file

# Path to rcctl(8); environment variables and ~ are expanded
# Default: /usr/sbin/rcctl
# rcctl = "/usr/sbin/rcctl"

# Service provider; defaults to the provider for the running platform
# provider = "openbsd"

# Managed services, converged by `rcctl-service apply`
[services.httpd]
ensure = "running"     # running | stopped
enable = true
flags = "-v"           # compared verbatim with `rcctl get httpd flags`
hasrestart = true      # use `rcctl -f restart` instead of stop + start

[services.sndiod]
ensure = "stopped"
enable = false

# hasstatus = false makes status checks look for "(ok)" in the output of
# `rcctl check` instead of trusting its exit status
[services.ntpd]
ensure = "running"
hasstatus = false
"#
}

/// Execute the config command
pub fn execute(args: ConfigArgs, config_path: Option<&Path>) -> Result<()> {
    if args.paths {
        println!("Config search paths (in priority order):");
        for (i, cp) in config_search_paths().iter().enumerate() {
            let exists = if cp.path.exists() { "[exists]" } else { "" };
            println!("  {}. {} {}", i + 1, cp.description, exists);
            println!("     {}", cp.path.display());
        }
        return Ok(());
    }

    if args.example {
        match args.format.as_str() {
            "json" => {
                let config: Config =
                    toml::from_str(example_config()).context("Failed to parse example config")?;
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            _ => print!("{}", example_config()),
        }
        return Ok(());
    }

    let path = config_path.map(Path::to_path_buf).or_else(find_config_file);
    let config = match &path {
        Some(path) => load_config(path)?.config,
        None => {
            if args.validate {
                println!("No configuration file found; defaults apply");
                return Ok(());
            }
            Config::default()
        }
    };

    if args.validate {
        validate(&config)?;
        if let Some(path) = &path {
            println!("Configuration file is valid: {}", path.display());
        }
        return Ok(());
    }

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&config)?),
        _ => print!("{}", toml::to_string_pretty(&config)?),
    }
    Ok(())
}

/// Semantic checks beyond what deserialization enforces
fn validate(config: &Config) -> Result<()> {
    config.rcctl_path()?;

    let provider = match config.provider.as_deref() {
        Some(name) => Some(
            registry::lookup(name)
                .ok_or_else(|| crate::Error::UnknownProvider(name.to_string()))?,
        ),
        None => registry::default_for(std::env::consts::OS),
    };

    if let Some(provider) = provider
        && !provider.has_feature(Feature::Flaggable)
    {
        for (name, service) in &config.services {
            if service.flags.is_some() {
                bail!(
                    "Service '{}' sets flags, which provider '{}' cannot manage",
                    name,
                    provider.name
                );
            }
        }
    }
    Ok(())
}
