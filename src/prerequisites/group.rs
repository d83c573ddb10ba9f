//! Group prerequisite.
use anyhow::Result;

use super::{Prerequisite, stderr_suffix};
use crate::exec::Executor;
use crate::logging::Log;

/// A local group, checked with `getent group` and created with `groupadd`.
///
/// Unlike the other handlers, group checks and creations are reported on
/// the console.
#[derive(Debug)]
pub struct GroupPrerequisite<'a> {
    name: &'a str,
    executor: &'a dyn Executor,
    log: &'a dyn Log,
}

impl<'a> GroupPrerequisite<'a> {
    /// Create a new group prerequisite.
    #[must_use]
    pub fn new(name: &'a str, executor: &'a dyn Executor, log: &'a dyn Log) -> Self {
        Self {
            name,
            executor,
            log,
        }
    }
}

impl Prerequisite for GroupPrerequisite<'_> {
    fn description(&self) -> String {
        format!("group {}", self.name)
    }

    fn check(&self) -> Result<bool> {
        let exists = self
            .executor
            .run_unchecked("getent", &["group", self.name])?
            .success;
        self.log.info(&format!(
            "[GroupHandler] Checking group: {} → {}",
            self.name,
            if exists { "Exists" } else { "Missing" }
        ));
        Ok(exists)
    }

    fn create(&self) -> Result<()> {
        self.log
            .info(&format!("[GroupHandler] Creating group: {}", self.name));
        if !self.executor.which("groupadd") {
            self.log
                .warn(&format!("groupadd not found, cannot create group {}", self.name));
            return Ok(());
        }
        let result = self.executor.run_unchecked("groupadd", &[self.name])?;
        self.log.debug(&format!(
            "groupadd {} exited with {}{}",
            self.name,
            result.code.unwrap_or(-1),
            stderr_suffix(&result.stderr)
        ));
        Ok(())
    }
}
