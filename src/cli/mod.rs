//! CLI module for rcctl-service
//!
//! This module provides the command-line interface using clap derive macros.

pub mod args;
pub mod commands;
pub mod exit_code;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use args::{
    ApplyArgs, CompletionArgs, ConfigArgs, FlagsArgs, ListArgs, RestartArgs, ServiceArgs,
    ServiceWithFlagsArgs, StatusArgs,
};

/// Manage OpenBSD rc.d services through rcctl
#[derive(Parser, Debug)]
#[command(name = "rcctl-service")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(long, global = true, env = "RCCTL_SERVICE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Service provider (defaults to the platform default)
    #[arg(long, global = true, env = "RCCTL_SERVICE_PROVIDER")]
    pub provider: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List installed services and their flags
    List(ListArgs),

    /// Show whether a service is running and enabled
    Status(StatusArgs),

    /// Start a service
    Start(ServiceWithFlagsArgs),

    /// Stop a service
    Stop(ServiceArgs),

    /// Restart a service
    Restart(RestartArgs),

    /// Enable a service at boot
    Enable(ServiceWithFlagsArgs),

    /// Disable a service at boot
    Disable(ServiceArgs),

    /// Show or change the flags of a service
    Flags(FlagsArgs),

    /// Converge the services declared in the configuration file
    Apply(ApplyArgs),

    /// Show or validate configuration
    Config(ConfigArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completion(CompletionArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_start_with_flags() {
        let cli = Cli::try_parse_from(["rcctl-service", "start", "httpd", "--flags", "-d -v"])
            .unwrap();
        match cli.command {
            Commands::Start(args) => {
                assert_eq!(args.name, "httpd");
                assert_eq!(args.flags.as_deref(), Some("-d -v"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_flags_set() {
        let cli =
            Cli::try_parse_from(["rcctl-service", "flags", "sshd", "--set", "-4"]).unwrap();
        match cli.command {
            Commands::Flags(args) => assert_eq!(args.set.as_deref(), Some("-4")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_options() {
        let cli = Cli::try_parse_from([
            "rcctl-service",
            "list",
            "--provider",
            "openbsd",
            "--format",
            "json",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.provider.as_deref(), Some("openbsd"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["rcctl-service", "list", "-v", "-q"]).is_err());
    }
}
