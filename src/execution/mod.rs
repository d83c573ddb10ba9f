//! Command execution: run each rule's built commands and report per command.
//!
//! Recoverable outcomes (invalid rule, non-zero exit, missing executable)
//! are logged where they happen and never stop the run. Any other launch
//! failure is returned as [`ExecutionError::Launch`] and ends the stage.
mod invocation;

pub use invocation::Invocation;

use std::io::ErrorKind;

use crate::config::Rule;
use crate::context::Context;
use crate::error::ExecutionError;
use crate::logging::RuleStatus;

/// Result of a single command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Exited with status 0.
    Succeeded,
    /// Printed but not launched.
    DryRun,
    /// Exited non-zero; `-1` when terminated by a signal.
    Failed(i32),
    /// The executable could not be found.
    NotFound,
}

/// Result of executing every command of one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Every command succeeded (or the rule had an empty command list).
    Ok,
    /// Commands were printed only.
    DryRun,
    /// The rule had no valid command.
    Skipped,
    /// Some commands failed or were not found.
    Failed {
        /// Number of commands that did not succeed.
        failed: usize,
        /// Number of commands attempted.
        total: usize,
    },
}

impl RuleOutcome {
    const fn status(self) -> RuleStatus {
        match self {
            Self::Ok => RuleStatus::Ok,
            Self::DryRun => RuleStatus::DryRun,
            Self::Skipped => RuleStatus::Skipped,
            Self::Failed { .. } => RuleStatus::Failed,
        }
    }
}

/// Counters for one execution pass.
///
/// # Examples
///
/// ```
/// use rulerunner::execution::RunStats;
///
/// let stats = RunStats { processed: 3, ok: 1, dry_run: 0, skipped: 1, failed: 1 };
/// assert_eq!(stats.summary(), "3 processed: 1 ok, 0 dry-run, 1 skipped, 1 failed");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Number of rules processed.
    pub processed: usize,
    /// Rules whose commands all succeeded.
    pub ok: usize,
    /// Rules printed in dry-run mode.
    pub dry_run: usize,
    /// Rules without a valid command.
    pub skipped: usize,
    /// Rules with at least one failed command.
    pub failed: usize,
}

impl RunStats {
    /// Format the summary string.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} processed: {} ok, {} dry-run, {} skipped, {} failed",
            self.processed, self.ok, self.dry_run, self.skipped, self.failed
        )
    }

    fn record(&mut self, outcome: RuleOutcome) {
        self.processed += 1;
        match outcome {
            RuleOutcome::Ok => self.ok += 1,
            RuleOutcome::DryRun => self.dry_run += 1,
            RuleOutcome::Skipped => self.skipped += 1,
            RuleOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Launch one command, or print it in dry-run mode.
///
/// # Errors
///
/// Returns [`ExecutionError::Launch`] if the OS refuses to start the process
/// for any reason other than a missing executable.
pub fn run_command(argv: &[String], ctx: &Context) -> Result<CommandOutcome, ExecutionError> {
    let invocation = Invocation::new(argv, ctx.use_bash);
    let line = invocation.display();

    if ctx.dry_run {
        ctx.log.dry_run(&format!("-> [DRY RUN]: {line}"));
        return Ok(CommandOutcome::DryRun);
    }

    ctx.log.info(&format!("-> Executing: {line}"));

    if argv.is_empty() {
        ctx.log.info("[ERROR] Command not found: ");
        return Ok(CommandOutcome::NotFound);
    }

    let args: Vec<&str> = invocation.args().iter().map(String::as_str).collect();
    match ctx.executor.status(invocation.program(), &args) {
        Ok(outcome) if outcome.success => {
            ctx.log
                .info(&format!("[SUCCESS] Exit code: {}", outcome.code.unwrap_or(0)));
            Ok(CommandOutcome::Succeeded)
        }
        Ok(outcome) => {
            let code = outcome.code.unwrap_or(-1);
            ctx.log
                .info(&format!("[FAILED] Command '{line}' failed with code {code}"));
            Ok(CommandOutcome::Failed(code))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            ctx.log.info(&format!(
                "[ERROR] Command not found: {}",
                invocation.program()
            ));
            Ok(CommandOutcome::NotFound)
        }
        Err(source) => Err(ExecutionError::Launch {
            command: line.to_string(),
            source,
        }),
    }
}

/// Execute every command of one rule, in order.
///
/// # Errors
///
/// Returns the first unhandled launch failure; commands after it are not run.
pub fn execute(rule: &Rule, ctx: &Context) -> Result<RuleOutcome, ExecutionError> {
    ctx.log
        .info(&format!("[RUNNING] Rule #{}: {}", rule.id, rule.name));

    let label = format!("#{} {}", rule.id, rule.name);

    if !rule.is_valid() {
        ctx.log.info("[SKIPPED] No valid command defined.");
        ctx.log
            .record_rule(&label, RuleStatus::Skipped, Some("no valid command"));
        return Ok(RuleOutcome::Skipped);
    }

    let commands = rule.get_commands();
    let total = commands.len();
    let mut failed = 0;
    for argv in &commands {
        match run_command(argv, ctx)? {
            CommandOutcome::Succeeded | CommandOutcome::DryRun => {}
            CommandOutcome::Failed(_) | CommandOutcome::NotFound => failed += 1,
        }
    }

    let outcome = if ctx.dry_run {
        RuleOutcome::DryRun
    } else if failed > 0 {
        RuleOutcome::Failed { failed, total }
    } else {
        RuleOutcome::Ok
    };

    let message = match outcome {
        RuleOutcome::Failed { failed, total } => {
            Some(format!("{failed} of {total} command(s) failed"))
        }
        _ => None,
    };
    ctx.log.record_rule(&label, outcome.status(), message.as_deref());
    Ok(outcome)
}

/// Execute every rule in order and report how many were processed.
///
/// Command failures are reported per command and do not stop the pass.
///
/// # Errors
///
/// Returns the first unhandled launch failure.
pub fn run_rules(rules: &[Rule], ctx: &Context) -> Result<RunStats, ExecutionError> {
    let mut stats = RunStats::default();
    for rule in rules {
        let outcome = execute(rule, ctx)?;
        stats.record(outcome);
    }
    ctx.log.info(&format!(
        "[INFO] Processed {} rule(s) successfully.",
        rules.len()
    ));
    ctx.log.debug(&stats.summary());
    Ok(stats)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::CommandSpec;
    use crate::context::test_helpers::{MockExecutor, Response, make_context};
    use crate::logging::Channel;
    use crate::operations::MockFileSystemOps;

    fn rule(id: i64, command: CommandSpec, value: Option<&str>) -> Rule {
        Rule {
            id,
            name: format!("rule-{id}"),
            value: value.map(String::from),
            command,
            ..Rule::default()
        }
    }

    fn single(cmd: &str) -> CommandSpec {
        CommandSpec::Single(cmd.to_string())
    }

    #[test]
    fn successful_command_reports_exit_code() {
        let (ctx, log, exec, _fs) =
            make_context(MockExecutor::default(), MockFileSystemOps::new(), false, false);
        let outcome = execute(&rule(1, single("echo ok"), None), &ctx).unwrap();
        assert_eq!(outcome, RuleOutcome::Ok);
        assert_eq!(exec.command_lines(), vec!["echo ok"]);
        assert_eq!(
            log.lines(),
            vec![
                "[RUNNING] Rule #1: rule-1",
                "-> Executing: echo ok",
                "[SUCCESS] Exit code: 0",
            ]
        );
    }

    #[test]
    fn invalid_rule_is_skipped_without_spawning() {
        let (ctx, log, exec, _fs) =
            make_context(MockExecutor::default(), MockFileSystemOps::new(), false, false);
        let outcome = execute(&rule(4, CommandSpec::Malformed, Some("x")), &ctx).unwrap();
        assert_eq!(outcome, RuleOutcome::Skipped);
        assert!(exec.calls().is_empty());
        assert_eq!(log.lines()[1], "[SKIPPED] No valid command defined.");
        assert_eq!(log.rule_entries()[0].status, RuleStatus::Skipped);
    }

    #[test]
    fn dry_run_spawns_nothing_and_prints_each_command() {
        let (ctx, log, exec, _fs) =
            make_context(MockExecutor::default(), MockFileSystemOps::new(), true, false);
        let cmds = CommandSpec::Multiple(vec!["echo hi".to_string(), "echo bye".to_string()]);
        let outcome = execute(&rule(1, cmds, Some("X")), &ctx).unwrap();
        assert_eq!(outcome, RuleOutcome::DryRun);
        assert!(exec.calls().is_empty());
        assert_eq!(
            log.lines_on(Channel::DryRun),
            vec!["-> [DRY RUN]: echo hi X", "-> [DRY RUN]: echo bye X"]
        );
    }

    #[test]
    fn bash_mode_wraps_command_string() {
        let (ctx, log, exec, _fs) =
            make_context(MockExecutor::default(), MockFileSystemOps::new(), false, true);
        execute(&rule(1, single("echo hi"), None), &ctx).unwrap();
        assert_eq!(
            exec.calls(),
            vec![(
                "bash".to_string(),
                vec!["-c".to_string(), "echo hi".to_string()]
            )]
        );
        assert!(log.lines().contains(&"-> Executing: echo hi".to_string()));
    }

    #[test]
    fn non_zero_exit_is_reported_and_run_continues() {
        let exec = MockExecutor::with_responses(vec![Response::Exit(3), Response::Exit(0)]);
        let (ctx, log, exec, _fs) = make_context(exec, MockFileSystemOps::new(), false, false);
        let cmds = CommandSpec::Multiple(vec!["false".to_string(), "true".to_string()]);
        let outcome = execute(&rule(1, cmds, None), &ctx).unwrap();
        assert_eq!(outcome, RuleOutcome::Failed { failed: 1, total: 2 });
        assert_eq!(exec.calls().len(), 2);
        assert!(
            log.lines()
                .contains(&"[FAILED] Command 'false' failed with code 3".to_string())
        );
        assert_eq!(
            log.rule_entries()[0].message.as_deref(),
            Some("1 of 2 command(s) failed")
        );
    }

    #[test]
    fn signal_termination_reports_minus_one() {
        let exec = MockExecutor::with_responses(vec![Response::Signal]);
        let (ctx, _log, _exec, _fs) = make_context(exec, MockFileSystemOps::new(), false, false);
        let outcome = run_command(&["sleep".to_string(), "9".to_string()], &ctx).unwrap();
        assert_eq!(outcome, CommandOutcome::Failed(-1));
    }

    #[test]
    fn missing_executable_is_reported() {
        let exec = MockExecutor::with_responses(vec![Response::NotFound]);
        let (ctx, log, _exec, _fs) = make_context(exec, MockFileSystemOps::new(), false, false);
        let outcome = execute(&rule(1, single("nosuchtool --flag"), None), &ctx).unwrap();
        assert_eq!(outcome, RuleOutcome::Failed { failed: 1, total: 1 });
        assert!(
            log.lines()
                .contains(&"[ERROR] Command not found: nosuchtool".to_string())
        );
    }

    #[test]
    fn blank_template_is_not_found_without_spawning() {
        let (ctx, log, exec, _fs) =
            make_context(MockExecutor::default(), MockFileSystemOps::new(), false, false);
        let outcome = run_command(&[], &ctx).unwrap();
        assert_eq!(outcome, CommandOutcome::NotFound);
        assert!(exec.calls().is_empty());
        assert!(log.lines().contains(&"[ERROR] Command not found: ".to_string()));
    }

    #[test]
    fn blank_template_in_bash_mode_is_not_found_without_spawning() {
        let (ctx, log, exec, _fs) =
            make_context(MockExecutor::default(), MockFileSystemOps::new(), false, true);
        let outcome = run_command(&[], &ctx).unwrap();
        assert_eq!(outcome, CommandOutcome::NotFound);
        assert!(exec.calls().is_empty(), "bash must not be launched");
        assert_eq!(
            log.lines(),
            vec!["-> Executing: ", "[ERROR] Command not found: "]
        );
    }

    #[test]
    fn blank_template_rule_fails_in_bash_mode() {
        let (ctx, _log, exec, _fs) =
            make_context(MockExecutor::default(), MockFileSystemOps::new(), false, true);
        let outcome = execute(&rule(1, single("   "), None), &ctx).unwrap();
        assert_eq!(outcome, RuleOutcome::Failed { failed: 1, total: 1 });
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn other_launch_errors_are_fatal() {
        let exec = MockExecutor::with_responses(vec![Response::PermissionDenied]);
        let (ctx, _log, exec, _fs) = make_context(exec, MockFileSystemOps::new(), false, false);
        let cmds = CommandSpec::Multiple(vec!["./locked".to_string(), "echo after".to_string()]);
        let err = execute(&rule(1, cmds, None), &ctx).unwrap_err();
        assert!(matches!(err, ExecutionError::Launch { ref command, .. } if command == "./locked"));
        assert_eq!(exec.calls().len(), 1, "later commands must not run");
    }

    #[test]
    fn empty_command_list_is_ok() {
        let (ctx, _log, exec, _fs) =
            make_context(MockExecutor::default(), MockFileSystemOps::new(), false, false);
        let outcome = execute(&rule(1, CommandSpec::Multiple(vec![]), None), &ctx).unwrap();
        assert_eq!(outcome, RuleOutcome::Ok);
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn run_rules_reports_processed_count() {
        let exec = MockExecutor::with_responses(vec![Response::Exit(1)]);
        let (ctx, log, _exec, _fs) = make_context(exec, MockFileSystemOps::new(), false, false);
        let rules = vec![
            rule(1, single("false"), None),
            rule(2, CommandSpec::Missing, None),
            rule(3, single("true"), None),
        ];
        let stats = run_rules(&rules, &ctx).unwrap();
        assert_eq!(
            stats,
            RunStats {
                processed: 3,
                ok: 1,
                dry_run: 0,
                skipped: 1,
                failed: 1
            }
        );
        assert_eq!(
            log.lines_on(Channel::Info).last().map(String::as_str),
            Some("[INFO] Processed 3 rule(s) successfully.")
        );
    }

    #[test]
    fn run_rules_with_no_rules_still_reports() {
        let (ctx, log, _exec, _fs) =
            make_context(MockExecutor::default(), MockFileSystemOps::new(), false, false);
        let stats = run_rules(&[], &ctx).unwrap();
        assert_eq!(stats.processed, 0);
        assert_eq!(
            log.lines_on(Channel::Info),
            vec!["[INFO] Processed 0 rule(s) successfully."]
        );
    }
}
