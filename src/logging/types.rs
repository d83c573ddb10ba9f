//! Core logging types: rule entries, status, and the [`Log`] trait.

/// Per-rule execution result for summary reporting.
#[derive(Debug, Clone)]
pub struct RuleEntry {
    /// Display label of the rule (`#<id> <name>`).
    pub name: String,
    /// Final status of the rule.
    pub status: RuleStatus,
    /// Optional detail message (e.g., skip reason or failure count).
    pub message: Option<String>,
}

/// Status of a processed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleStatus {
    /// Every command exited with status 0.
    Ok,
    /// The rule had no valid command.
    Skipped,
    /// Commands were printed but not executed.
    DryRun,
    /// At least one command failed or could not be found.
    Failed,
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) writes through `tracing` to the
/// console and the log file; [`MemoryLog`](super::memory::MemoryLog)
/// captures messages in memory for inspection.
pub trait Log: Send + Sync + std::fmt::Debug {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record a rule result for the summary.
    fn record_rule(&self, name: &str, status: RuleStatus, message: Option<&str>);
}
