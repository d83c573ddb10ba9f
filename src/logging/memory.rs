//! In-memory log backend.
use std::sync::Mutex;

use super::types::{Log, RuleEntry, RuleStatus};

/// Severity/channel of a captured message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Stage header.
    Stage,
    /// Informational message.
    Info,
    /// Debug message.
    Debug,
    /// Warning.
    Warn,
    /// Error.
    Error,
    /// Dry-run notice.
    DryRun,
}

/// Captures every message instead of printing it.
///
/// Used by tests and by library callers that want to inspect what a run
/// reported without installing a tracing subscriber.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<(Channel, String)>>,
    rules: Mutex<Vec<RuleEntry>>,
}

impl MemoryLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured messages in emission order.
    #[must_use]
    pub fn entries(&self) -> Vec<(Channel, String)> {
        self.entries.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Captured message texts, ignoring the channel.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries().into_iter().map(|(_, msg)| msg).collect()
    }

    /// Captured message texts on one channel.
    #[must_use]
    pub fn lines_on(&self, channel: Channel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, msg)| msg)
            .collect()
    }

    /// Recorded rule results.
    #[must_use]
    pub fn rule_entries(&self) -> Vec<RuleEntry> {
        self.rules.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    fn push(&self, channel: Channel, msg: &str) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.push((channel, msg.to_string()));
        }
    }
}

/// Implement the display methods of [`Log`] by capturing each message under
/// the corresponding [`Channel`].
macro_rules! capture_log_methods {
    ($($method:ident => $channel:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.push(Channel::$channel, msg);
            }
        )+
    };
}

impl Log for MemoryLog {
    capture_log_methods!(
        stage => Stage,
        info => Info,
        debug => Debug,
        warn => Warn,
        error => Error,
        dry_run => DryRun,
    );

    fn record_rule(&self, name: &str, status: RuleStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.rules.lock() {
            guard.push(RuleEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }
}
