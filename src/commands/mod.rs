//! Top-level subcommand orchestration.
pub mod exec;
pub mod prereqs;
pub mod run;
pub mod version;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::context::Context;
use crate::execution::{self, RunStats};
use crate::logging::Log;
use crate::prerequisites::{self, ResolveStats};

/// Shared state produced by the common command setup sequence.
#[derive(Debug)]
pub struct CommandSetup {
    /// Rules loaded from the configured file.
    pub config: Config,
    /// Execution context built from the global flags.
    pub ctx: Context,
}

impl CommandSetup {
    /// Load the rule file, report validation warnings, and build the
    /// execution context.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule file cannot be loaded.
    pub fn init(global: &GlobalOpts, log: Arc<dyn Log>) -> Result<Self> {
        let version = option_env!("RULERUNNER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
        log.debug(&format!("rulerunner {version}"));

        log.stage("Loading rules");
        let config = Config::load(&global.config)
            .with_context(|| format!("loading {}", global.config.display()))?;
        log.info(&format!(
            "loaded {} rule(s) from {}",
            config.len(),
            config.path.display()
        ));
        report_warnings(&config, log.as_ref());

        let ctx = Context::new(log, global.dry_run, global.use_bash);
        ctx.log.debug(&format!(
            "dry-run: {}, use-bash: {}",
            ctx.dry_run, ctx.use_bash
        ));
        Ok(Self { config, ctx })
    }
}

/// Turn a command result into the process exit code, logging a fatal error
/// so it also lands in the log file.
pub fn finish(result: Result<()>, log: &dyn Log) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log.error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

/// Log every validation warning for `config`.
pub fn report_warnings(config: &Config, log: &dyn Log) {
    let warnings = config.validate();
    if warnings.is_empty() {
        return;
    }
    log.warn(&format!(
        "found {} configuration warning(s):",
        warnings.len()
    ));
    for warning in &warnings {
        log.warn(&format!(
            "  rule #{} {}: {}",
            warning.id, warning.rule, warning.message
        ));
    }
}

/// Run the prerequisite stage over every rule.
///
/// # Errors
///
/// Returns the first fatal prerequisite error.
pub fn resolve_stage(config: &Config, ctx: &Context) -> Result<ResolveStats> {
    ctx.log.stage("Resolving prerequisites");
    prerequisites::resolve_all(&config.rules, ctx)
}

/// Run the execution stage over every rule.
///
/// # Errors
///
/// Returns an error only for unhandled process launch failures.
pub fn execute_stage(config: &Config, ctx: &Context) -> Result<RunStats> {
    ctx.log.stage("Executing rule commands");
    Ok(execution::run_rules(&config.rules, ctx)?)
}

/// Resolve prerequisites, then execute commands, sharing one loaded config.
///
/// # Errors
///
/// Returns the first fatal error from either stage. Command failures are
/// not errors.
pub fn run_pipeline(config: &Config, ctx: &Context) -> Result<(ResolveStats, RunStats)> {
    let resolved = resolve_stage(config, ctx)?;
    ctx.log
        .info("[INFO] Prerequisite setup complete. Executing rule commands...");
    let executed = execute_stage(config, ctx)?;
    Ok((resolved, executed))
}
