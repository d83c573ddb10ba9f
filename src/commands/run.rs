//! Command: ensure prerequisites, then run every rule.

use std::sync::Arc;

use anyhow::Result;

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::logging::Logger;

/// Run the full pipeline: prerequisites first, then every rule's commands.
///
/// # Errors
///
/// Returns an error if the rule file cannot be loaded, a prerequisite fails
/// fatally, or a command cannot be launched for a reason other than a
/// missing executable.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = CommandSetup::init(global, log.clone())?;
    let result = super::run_pipeline(&setup.config, &setup.ctx);
    log.print_summary();
    result.map(|_| ())
}
