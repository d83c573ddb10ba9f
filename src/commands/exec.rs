//! Command: run every rule without touching prerequisites.

use std::sync::Arc;

use anyhow::Result;

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::logging::Logger;

/// Run every rule's commands, assuming prerequisites are already in place.
///
/// # Errors
///
/// Returns an error if the rule file cannot be loaded or a command cannot
/// be launched for a reason other than a missing executable.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = CommandSetup::init(global, log.clone())?;
    let result = super::execute_stage(&setup.config, &setup.ctx);
    log.print_summary();
    result.map(|_| ())
}
