//! Rule file loading and validation.
pub mod rule;
pub mod validation;

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::ConfigError;
pub use rule::{CommandSpec, Rule};
pub use validation::ValidationWarning;

/// Default rule file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "rule_data.json";

/// All rules loaded from one rule file, in file order.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path the rules were read from.
    pub path: PathBuf,
    /// Rules in declaration order.
    pub rules: Vec<Rule>,
}

impl Config {
    /// Read and parse the rule file at `path`.
    ///
    /// Entries that are not JSON objects are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or its
    /// top-level value is not an array.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    /// Parse rules from JSON text, using `path` only for error messages.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not valid JSON or is not an array.
    pub fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let data: Value = serde_json::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let entries = match data {
            Value::Array(entries) => entries,
            other => {
                return Err(ConfigError::NotAnArray {
                    path: path.to_path_buf(),
                    found: json_type_name(&other),
                });
            }
        };
        Ok(Self {
            path: path.to_path_buf(),
            rules: entries.into_iter().filter_map(Rule::from_json).collect(),
        })
    }

    /// Number of loaded rules.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules were loaded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check the loaded rules for likely mistakes.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationWarning> {
        validation::validate_rules(&self.rules)
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
