//! Completion command implementation

use clap::CommandFactory;
use clap_complete::generate;
use std::io;

use crate::cli::Cli;
use crate::cli::args::CompletionArgs;

/// Execute the completion command
pub fn execute(args: CompletionArgs) {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, crate::NAME, &mut io::stdout());
}
