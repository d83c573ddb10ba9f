//! Process execution behind an injectable [`Executor`] trait.
use anyhow::{Context, Result};
use std::process::{Command, ExitStatus, Output, Stdio};

/// Result of a captured command execution.
#[derive(Debug)]
pub struct ExecResult {
    /// Captured standard error.
    pub stderr: String,
    /// Whether the process exited with status 0.
    pub success: bool,
    /// Exit code, if the process was not killed by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Exit status of a command that ran attached to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    /// Whether the process exited with status 0.
    pub success: bool,
    /// Exit code, or `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl From<ExitStatus> for ExitOutcome {
    fn from(status: ExitStatus) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
        }
    }
}

/// Abstraction over process execution.
///
/// Prerequisite handlers and the command runner take `&dyn Executor` so
/// tests can substitute a scripted mock for real system calls.
pub trait Executor: Send + Sync + std::fmt::Debug {
    /// Run a command with captured output, allowing a non-zero exit.
    ///
    /// # Errors
    ///
    /// Returns an error only if the command cannot be started.
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Run a command with inherited stdio and wait for it to exit.
    ///
    /// The raw [`std::io::Error`] is returned so callers can tell a missing
    /// executable ([`std::io::ErrorKind::NotFound`]) from other launch
    /// failures.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the process cannot be spawned.
    fn status(&self, program: &str, args: &[&str]) -> std::io::Result<ExitOutcome>;

    /// Check if a program is available on PATH.
    fn which(&self, program: &str) -> bool;
}

/// Production [`Executor`] that runs real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("failed to execute: {program}"))?;
        Ok(ExecResult::from(output))
    }

    fn status(&self, program: &str, args: &[&str]) -> std::io::Result<ExitOutcome> {
        Command::new(program)
            .args(args)
            .status()
            .map(ExitOutcome::from)
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}
