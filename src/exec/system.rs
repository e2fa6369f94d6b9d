//! Process execution through `std::process::Command`

use std::process::{Command, Stdio};

use super::{CommandLine, CommandOutput, CommandRunner, ExecutionFailure};

/// Runs commands as real child processes
///
/// stdin is closed; stdout and stderr are captured separately.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandLine) -> Result<CommandOutput, ExecutionFailure> {
        tracing::debug!(command = %command, "Executing");

        let output = Command::new(command.program())
            .args(command.arguments())
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ExecutionFailure::Spawn {
                command: command.clone(),
                source,
            })?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !result.success() {
            tracing::debug!(
                command = %command,
                code = ?result.code,
                stderr = result.stderr.trim(),
                "Command exited unsuccessfully"
            );
        }

        Ok(result)
    }
}
