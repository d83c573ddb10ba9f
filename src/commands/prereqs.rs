//! Command: ensure prerequisites only.

use std::sync::Arc;

use anyhow::Result;

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::logging::Logger;

/// Ensure every rule's prerequisite without running any command.
///
/// # Errors
///
/// Returns an error if the rule file cannot be loaded or a prerequisite
/// fails fatally.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = CommandSetup::init(global, log.clone())?;
    let stats = super::resolve_stage(&setup.config, &setup.ctx)?;
    log.info(&format!("prerequisites: {}", stats.summary()));
    Ok(())
}
