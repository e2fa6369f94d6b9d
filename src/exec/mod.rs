//! External command execution
//!
//! Every interaction with the host system goes through a [`CommandRunner`].
//! The production implementation is [`SystemRunner`], which spawns a real
//! child process; tests substitute a scripted runner that records calls.
//!
//! Runners only fail when a process could not be run at all. Whether a
//! non-zero exit status matters is decided at each call site, either by
//! inspecting [`CommandOutput::success`] or by calling
//! [`CommandRunner::run_checked`].

mod system;

#[cfg(test)]
pub(crate) mod fake;

pub use system::SystemRunner;

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A program path plus its argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandLine {
    /// Create a command line with no arguments
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a single argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Path of the program to execute
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments passed to the program
    pub fn arguments(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandLine {
    /// Shell-quoted rendering, for logs and error messages only
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let program = self.program.to_string_lossy();
        write!(f, "{}", quote(&program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(s: &str) -> Cow<'_, str> {
    shlex::try_quote(s).unwrap_or(Cow::Borrowed(s))
}

/// Captured result of a finished process
///
/// stdout and stderr are kept apart; parsers only ever look at stdout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl CommandOutput {
    /// Build an output from an exit code and stdout text
    pub fn new(code: i32, stdout: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Whether the process exited with status zero
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Failure to execute an external command
#[derive(Error, Debug)]
pub enum ExecutionFailure {
    /// The process could not be started
    #[error("Failed to execute '{command}': {source}")]
    Spawn {
        command: CommandLine,
        #[source]
        source: std::io::Error,
    },

    /// The process ran but reported failure
    #[error("'{command}' {}{}", describe_exit(.code), describe_stderr(.stderr))]
    NonZeroExit {
        command: CommandLine,
        code: Option<i32>,
        stderr: String,
    },
}

impl ExecutionFailure {
    /// The command line that failed
    pub fn command(&self) -> &CommandLine {
        match self {
            ExecutionFailure::Spawn { command, .. } => command,
            ExecutionFailure::NonZeroExit { command, .. } => command,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("returned {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

fn describe_stderr(stderr: &str) -> String {
    match stderr.trim() {
        "" => String::new(),
        message => format!(": {}", message),
    }
}

/// Executes external commands
pub trait CommandRunner {
    /// Run a command to completion and capture its output
    ///
    /// Only a failure to run the process is an error; the exit status is
    /// reported in the returned [`CommandOutput`].
    fn run(&self, command: &CommandLine) -> Result<CommandOutput, ExecutionFailure>;

    /// Run a command and treat a non-zero exit status as a failure
    fn run_checked(&self, command: &CommandLine) -> Result<CommandOutput, ExecutionFailure> {
        let output = self.run(command)?;
        if output.success() {
            Ok(output)
        } else {
            Err(ExecutionFailure::NonZeroExit {
                command: command.clone(),
                code: output.code,
                stderr: output.stderr,
            })
        }
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command: &CommandLine) -> Result<CommandOutput, ExecutionFailure> {
        (**self).run(command)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for std::rc::Rc<R> {
    fn run(&self, command: &CommandLine) -> Result<CommandOutput, ExecutionFailure> {
        (**self).run(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::fake::ScriptedRunner;

    #[test]
    fn test_command_line_display_quotes_arguments() {
        let cmd = CommandLine::new("/usr/sbin/rcctl").args(["set", "httpd", "flags", "-d -v"]);
        assert_eq!(cmd.to_string(), "/usr/sbin/rcctl set httpd flags '-d -v'");
    }

    #[test]
    fn test_command_line_accessors() {
        let cmd = CommandLine::new("rcctl").arg("check").arg("sshd");
        assert_eq!(cmd.program(), Path::new("rcctl"));
        assert_eq!(cmd.arguments(), ["check", "sshd"]);
    }

    #[test]
    fn test_command_output_success() {
        assert!(CommandOutput::new(0, "").success());
        assert!(!CommandOutput::new(1, "").success());
        assert!(!CommandOutput::default().success());
    }

    #[test]
    fn test_run_checked_maps_non_zero_exit() {
        let runner = ScriptedRunner::new().reply("disable ntpd", 1, "");
        let cmd = CommandLine::new("rcctl").args(["disable", "ntpd"]);

        let err = runner.run_checked(&cmd).unwrap_err();
        match &err {
            ExecutionFailure::NonZeroExit { code, .. } => assert_eq!(*code, Some(1)),
            other => panic!("unexpected failure: {other:?}"),
        }
        assert_eq!(err.command(), &cmd);
        assert!(err.to_string().contains("returned 1"));
    }

    #[test]
    fn test_non_zero_exit_message() {
        let cmd = CommandLine::new("rcctl").args(["disable", "sshd"]);
        let failure = |stderr: &str| ExecutionFailure::NonZeroExit {
            command: cmd.clone(),
            code: Some(1),
            stderr: stderr.to_string(),
        };

        assert_eq!(failure("").to_string(), "'rcctl disable sshd' returned 1");
        assert_eq!(failure("  \n").to_string(), "'rcctl disable sshd' returned 1");
        assert_eq!(
            failure("rcctl: service sshd does not exist\n").to_string(),
            "'rcctl disable sshd' returned 1: rcctl: service sshd does not exist"
        );
    }

    #[test]
    fn test_run_checked_passes_success_through() {
        let runner = ScriptedRunner::new().reply("ls all", 0, "sshd\n");
        let cmd = CommandLine::new("rcctl").args(["ls", "all"]);

        let output = runner.run_checked(&cmd).unwrap();
        assert_eq!(output.stdout, "sshd\n");
    }

    #[test]
    fn test_run_checked_propagates_spawn_failure() {
        let runner = ScriptedRunner::new().spawn_failure("ls all");
        let cmd = CommandLine::new("rcctl").args(["ls", "all"]);

        let err = runner.run_checked(&cmd).unwrap_err();
        assert!(matches!(err, ExecutionFailure::Spawn { .. }));
    }
}
