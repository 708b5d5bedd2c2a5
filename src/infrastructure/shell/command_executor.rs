//! Command executor for running external programs
//!
//! Used for the registry lookup through the npm CLI and for the optional
//! pre-generation command of a service.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::core::error::{Error, Result};

/// Trait for executing external programs
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run `program` with `args` in the given working directory
    async fn execute(
        &self,
        program: &str,
        args: &[String],
        working_dir: &Path,
    ) -> Result<CommandResult>;

    /// Run `program` attached to the parent's stdin, stdout and stderr.
    ///
    /// Output is streamed instead of captured, so the returned `stdout` and
    /// `stderr` are empty for real processes.
    async fn execute_inherited(
        &self,
        program: &str,
        args: &[String],
        working_dir: &Path,
    ) -> Result<CommandResult> {
        self.execute(program, args, working_dir).await
    }
}

/// Result of command execution
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    /// Check if the command was successful
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Program and arguments that run `command` through the platform shell
pub fn shell_invocation(command: &str) -> (&'static str, Vec<String>) {
    if cfg!(target_os = "windows") {
        ("cmd", vec!["/C".to_string(), command.to_string()])
    } else {
        ("sh", vec!["-c".to_string(), command.to_string()])
    }
}

/// Default command executor using tokio::process
pub struct ProcessCommandExecutor;

impl ProcessCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProcessCommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandExecutor for ProcessCommandExecutor {
    async fn execute(
        &self,
        program: &str,
        args: &[String],
        working_dir: &Path,
    ) -> Result<CommandResult> {
        // A caller-side timeout drops this future; the child must not outlive it
        let output = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| Error::command(format!("Failed to execute '{program}': {e}")))?;

        Ok(CommandResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    async fn execute_inherited(
        &self,
        program: &str,
        args: &[String],
        working_dir: &Path,
    ) -> Result<CommandResult> {
        let status = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| Error::command(format!("Failed to execute '{program}': {e}")))?;

        Ok(CommandResult {
            exit_code: status.code().unwrap_or(-1),
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}

/// Mock command executor for testing
#[cfg(test)]
pub struct MockCommandExecutor {
    pub results: std::collections::HashMap<String, CommandResult>,
    pub invocations: std::sync::Mutex<Vec<(String, Vec<String>)>>,
}

#[cfg(test)]
impl MockCommandExecutor {
    pub fn new() -> Self {
        Self {
            results: std::collections::HashMap::new(),
            invocations: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn with_result(mut self, program: &str, exit_code: i32, stdout: &str, stderr: &str) -> Self {
        self.results.insert(
            program.to_string(),
            CommandResult {
                exit_code,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
        );
        self
    }

    pub fn invocations(&self) -> Vec<(String, Vec<String>)> {
        self.invocations.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl CommandExecutor for MockCommandExecutor {
    async fn execute(
        &self,
        program: &str,
        args: &[String],
        _working_dir: &Path,
    ) -> Result<CommandResult> {
        self.invocations
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));
        self.results.get(program).cloned().ok_or_else(|| {
            Error::command(format!("Mock executor has no result for program: {program}"))
        })
    }
}
