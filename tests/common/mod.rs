// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed rule file and a fluent builder so
// each integration test can set up an isolated environment without
// repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rulerunner::cli::GlobalOpts;
use rulerunner::config::Config;
use rulerunner::context::Context;
use rulerunner::logging::MemoryLog;
use serde_json::Value;

/// An isolated rule file backed by a [`tempfile::TempDir`].
///
/// The directory is deleted when this value is dropped.
pub struct IntegrationTestContext {
    dir: tempfile::TempDir,
    rule_file: PathBuf,
}

impl IntegrationTestContext {
    /// Root of the temporary directory.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the rule file.
    pub fn rule_file(&self) -> &Path {
        &self.rule_file
    }

    /// Load the rule file.
    pub fn load_config(&self) -> Config {
        Config::load(&self.rule_file).expect("rule file should load")
    }

    /// Build a context backed by the real executor and filesystem, logging
    /// into memory.
    pub fn context(&self, dry_run: bool, use_bash: bool) -> (Context, Arc<MemoryLog>) {
        let log = Arc::new(MemoryLog::new());
        let ctx = Context::new(log.clone(), dry_run, use_bash);
        (ctx, log)
    }
}

/// Fluent builder for [`IntegrationTestContext`].
#[derive(Default)]
pub struct TestContextBuilder {
    rules: Vec<Value>,
    raw: Option<String>,
}

impl TestContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one rule object.
    pub fn with_rule(mut self, rule: Value) -> Self {
        self.rules.push(rule);
        self
    }

    /// Use `content` verbatim as the rule file instead of the collected rules.
    pub fn with_raw_content(mut self, content: &str) -> Self {
        self.raw = Some(content.to_string());
        self
    }

    /// Write the rule file into a fresh temporary directory.
    pub fn build(self) -> IntegrationTestContext {
        let dir = tempfile::tempdir().expect("create temp dir");
        let rule_file = dir.path().join("rule_data.json");
        let content = self.raw.unwrap_or_else(|| {
            serde_json::to_string_pretty(&Value::Array(self.rules)).expect("serialize rules")
        });
        std::fs::write(&rule_file, content).expect("write rule file");
        IntegrationTestContext { dir, rule_file }
    }
}

/// Write a rule file containing `rules`, in order.
pub fn with_rules(rules: impl IntoIterator<Item = Value>) -> IntegrationTestContext {
    rules
        .into_iter()
        .fold(TestContextBuilder::new(), TestContextBuilder::with_rule)
        .build()
}

/// Global options as the CLI would build them for `rule_file`.
pub fn global_opts(rule_file: &Path, dry_run: bool, use_bash: bool) -> GlobalOpts {
    GlobalOpts {
        config: rule_file.to_path_buf(),
        dry_run,
        use_bash,
    }
}
