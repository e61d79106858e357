//! External command execution
//!
//! The lister and the upgrader both shell out to the `go` toolchain. They do
//! so through the narrow `CommandExecutor` trait so tests can inject a
//! scripted double instead of spawning processes.

use crate::error::ExecutionError;
use std::process::Command;

/// Runs one external command and captures its stdout
pub trait CommandExecutor {
    /// Run `command` with `args`, returning captured stdout on success
    fn run(&self, command: &str, args: &[&str]) -> Result<String, ExecutionError>;
}

/// Executor backed by real process spawning
#[derive(Debug, Default, Clone)]
pub struct SystemExecutor;

impl SystemExecutor {
    /// Creates a new system executor
    pub fn new() -> Self {
        SystemExecutor
    }
}

fn command_line(command: &str, args: &[&str]) -> String {
    let mut line = String::from(command);
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

impl CommandExecutor for SystemExecutor {
    fn run(&self, command: &str, args: &[&str]) -> Result<String, ExecutionError> {
        let output = Command::new(command)
            .args(args)
            .output()
            .map_err(|e| ExecutionError::new(command_line(command, args), e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = if stderr.trim().is_empty() {
                format!("exited with {}", output.status)
            } else {
                format!("exited with {}: {}", output.status, stderr.trim())
            };
            return Err(ExecutionError::new(command_line(command, args), message));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
