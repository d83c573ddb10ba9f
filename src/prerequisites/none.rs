//! No-op prerequisite for rules of type `none`.
use anyhow::Result;

use super::Prerequisite;
use crate::logging::Log;

/// A rule with no prerequisite; always satisfied.
#[derive(Debug)]
pub struct NoPrerequisite<'a> {
    /// Display name of the owning rule.
    rule: &'a str,
    log: &'a dyn Log,
}

impl<'a> NoPrerequisite<'a> {
    /// Create the no-op prerequisite for the rule named `rule`.
    #[must_use]
    pub fn new(rule: &'a str, log: &'a dyn Log) -> Self {
        Self { rule, log }
    }
}

impl Prerequisite for NoPrerequisite<'_> {
    fn description(&self) -> String {
        "no prerequisite".to_string()
    }

    fn check(&self) -> Result<bool> {
        self.log.info(&format!(
            "[NoneHandler] No prerequisites for rule: {}",
            self.rule
        ));
        Ok(true)
    }

    fn create(&self) -> Result<()> {
        Ok(())
    }
}
