//! Argument structures for CLI commands

use clap::Args;

/// Arguments for the `list` command
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,
}

/// Arguments for the `status` command
#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    /// Service name
    pub name: String,

    /// Output format
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,
}

/// Arguments for commands that only need a service name
#[derive(Args, Debug, Clone)]
pub struct ServiceArgs {
    /// Service name
    pub name: String,
}

/// Arguments for `start` and `enable`
#[derive(Args, Debug, Clone)]
pub struct ServiceWithFlagsArgs {
    /// Service name
    pub name: String,

    /// Daemon flags to configure (overrides the configuration file)
    #[arg(long, allow_hyphen_values = true)]
    pub flags: Option<String>,
}

/// Arguments for the `restart` command
#[derive(Args, Debug, Clone)]
pub struct RestartArgs {
    /// Service name
    pub name: String,

    /// Use rcctl's own restart instead of stop and start
    #[arg(long)]
    pub hasrestart: bool,
}

/// Arguments for the `flags` command
#[derive(Args, Debug, Clone)]
pub struct FlagsArgs {
    /// Service name
    pub name: String,

    /// New flags; the service is restarted when running
    #[arg(long, value_name = "FLAGS", allow_hyphen_values = true)]
    pub set: Option<String>,
}

/// Arguments for the `apply` command
#[derive(Args, Debug, Clone)]
pub struct ApplyArgs {
    /// Only converge these services (repeatable)
    #[arg(long, value_name = "NAME")]
    pub only: Vec<String>,
}

/// Arguments for the `config` command
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Validate configuration only
    #[arg(long)]
    pub validate: bool,

    /// Show an example configuration
    #[arg(long, conflicts_with = "validate")]
    pub example: bool,

    /// Show configuration search paths
    #[arg(long, conflicts_with_all = ["validate", "example"])]
    pub paths: bool,

    /// Output format
    #[arg(short, long, default_value = "toml", value_parser = ["toml", "json"])]
    pub format: String,
}

/// Arguments for the `completion` command
#[derive(Args, Debug, Clone)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
