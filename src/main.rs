//! rcctl-service - manage OpenBSD rc.d services through rcctl

use anyhow::Result;
use clap::Parser;

use rcctl_service::cli::commands::{
    Session, apply, completion, config, control, flags, list, status, version,
};
use rcctl_service::cli::exit_code::ExitCode;
use rcctl_service::cli::{Cli, Commands};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    rcctl_service::logging::init(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(code) => code.into(),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::for_error(&e).into()
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = cli.config.as_deref();
    let session = || Session::load(config_path, cli.provider.as_deref());

    match cli.command {
        Commands::List(args) => list::execute(&session()?, args)?,
        Commands::Status(args) => return status::execute(&session()?, args),
        Commands::Start(args) => control::start(&session()?, args)?,
        Commands::Stop(args) => control::stop(&session()?, args)?,
        Commands::Restart(args) => control::restart(&session()?, args)?,
        Commands::Enable(args) => control::enable(&session()?, args)?,
        Commands::Disable(args) => control::disable(&session()?, args)?,
        Commands::Flags(args) => flags::execute(&session()?, args)?,
        Commands::Apply(args) => return apply::execute(&session()?, args),
        Commands::Config(args) => config::execute(args, config_path)?,
        Commands::Version => version::print_version(cli.verbose),
        Commands::Completion(args) => completion::execute(args),
    }

    Ok(ExitCode::Success)
}
