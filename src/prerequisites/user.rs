//! User account prerequisite.
use anyhow::Result;

use super::{Prerequisite, stderr_suffix};
use crate::exec::Executor;
use crate::logging::Log;

/// A local user account, checked with `id` and created with `useradd`.
#[derive(Debug)]
pub struct UserPrerequisite<'a> {
    /// Account name.
    name: &'a str,
    /// Executor for running system commands.
    executor: &'a dyn Executor,
    log: &'a dyn Log,
}

impl<'a> UserPrerequisite<'a> {
    /// Create a new user prerequisite.
    #[must_use]
    pub fn new(name: &'a str, executor: &'a dyn Executor, log: &'a dyn Log) -> Self {
        Self {
            name,
            executor,
            log,
        }
    }
}

impl Prerequisite for UserPrerequisite<'_> {
    fn description(&self) -> String {
        format!("user {}", self.name)
    }

    fn check(&self) -> Result<bool> {
        let result = self.executor.run_unchecked("id", &[self.name])?;
        self.log.debug(&format!(
            "user {}: {}",
            self.name,
            if result.success { "exists" } else { "missing" }
        ));
        Ok(result.success)
    }

    fn create(&self) -> Result<()> {
        if !self.executor.which("useradd") {
            self.log
                .warn(&format!("useradd not found, cannot create user {}", self.name));
            return Ok(());
        }
        let result = self.executor.run_unchecked("useradd", &[self.name])?;
        self.log.debug(&format!(
            "useradd {} exited with {}{}",
            self.name,
            result.code.unwrap_or(-1),
            stderr_suffix(&result.stderr)
        ));
        Ok(())
    }
}
