//! Scripted runner for unit tests

use std::cell::RefCell;
use std::collections::HashMap;

use super::{CommandLine, CommandOutput, CommandRunner, ExecutionFailure};

#[derive(Debug, Clone)]
enum Reply {
    Output(CommandOutput),
    SpawnFailure,
}

/// Replays canned outputs keyed by the space-joined argument list and
/// records every command it is asked to run
///
/// Unscripted commands succeed with empty output.
#[derive(Debug, Default)]
pub(crate) struct ScriptedRunner {
    replies: HashMap<String, Reply>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(mut self, args: &str, code: i32, stdout: &str) -> Self {
        self.replies
            .insert(args.to_string(), Reply::Output(CommandOutput::new(code, stdout)));
        self
    }

    pub(crate) fn spawn_failure(mut self, args: &str) -> Self {
        self.replies.insert(args.to_string(), Reply::SpawnFailure);
        self
    }

    /// Argument lists of every command run so far, in order
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &CommandLine) -> Result<CommandOutput, ExecutionFailure> {
        let key = command.arguments().join(" ");
        self.calls.borrow_mut().push(key.clone());

        match self.replies.get(&key) {
            Some(Reply::Output(output)) => Ok(output.clone()),
            Some(Reply::SpawnFailure) => Err(ExecutionFailure::Spawn {
                command: command.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            }),
            None => Ok(CommandOutput::new(0, "")),
        }
    }
}
