//! Domain-specific error types for the rule runner.
//!
//! Internal modules return typed errors (e.g., [`ConfigError`],
//! [`PrerequisiteError`]) while command handlers at the CLI boundary convert
//! them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! RulerunnerError
//! ├── Config(ConfigError)             : reading and parsing the rule file
//! ├── Prerequisite(PrerequisiteError) : unknown type, missing value
//! └── Execution(ExecutionError)       : unhandled process launch failures
//! ```
//!
//! Recoverable outcomes (invalid rule, non-zero exit, command not found) are
//! not errors: they are logged where they happen and the run continues.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the rule runner.
#[derive(Error, Debug)]
pub enum RulerunnerError {
    /// Rule file could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The prerequisite pass was aborted.
    #[error("Prerequisite error: {0}")]
    Prerequisite(#[from] PrerequisiteError),

    /// A command could not be launched for a reason other than "not found".
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),
}

/// Errors that arise while loading the rule file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("IO error reading rule file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        /// Path to the offending file.
        path: PathBuf,
        /// Underlying parser error.
        source: serde_json::Error,
    },

    /// The top-level JSON value is not an array of rules.
    #[error("Rule file {path} must contain a JSON array, found {found}")]
    NotAnArray {
        /// Path to the offending file.
        path: PathBuf,
        /// JSON type that was found instead.
        found: &'static str,
    },
}

/// Errors that abort the prerequisite pass.
#[derive(Error, Debug)]
pub enum PrerequisiteError {
    /// The rule's `type` tag does not name a known handler.
    #[error("Unknown type: {kind} (rule '{rule}')")]
    UnknownType {
        /// Display name of the offending rule.
        rule: String,
        /// The unrecognized tag.
        kind: String,
    },

    /// A handler that needs a resource name was given none.
    #[error("Rule '{rule}' of type '{kind}' has no value")]
    MissingValue {
        /// Display name of the offending rule.
        rule: String,
        /// The rule's type tag.
        kind: String,
    },
}

/// Errors that abort the execution pass.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The OS refused to start the process (anything except "not found").
    #[error("failed to launch '{command}': {source}")]
    Launch {
        /// Fully resolved command line.
        command: String,
        /// Underlying OS error.
        source: std::io::Error,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn config_error_io_display() {
        let e = ConfigError::Io {
            path: PathBuf::from("/etc/rules.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(e.to_string().contains("/etc/rules.json"));
        assert!(e.to_string().contains("IO error reading rule file"));
    }

    #[test]
    fn config_error_io_has_source() {
        use std::error::Error as StdError;
        let e = ConfigError::Io {
            path: PathBuf::from("rules.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.source().is_some());
    }

    #[test]
    fn config_error_not_an_array_display() {
        let e = ConfigError::NotAnArray {
            path: PathBuf::from("rules.json"),
            found: "object",
        };
        assert_eq!(
            e.to_string(),
            "Rule file rules.json must contain a JSON array, found object"
        );
    }

    #[test]
    fn unknown_type_display() {
        let e = PrerequisiteError::UnknownType {
            rule: "web".to_string(),
            kind: "widget".to_string(),
        };
        assert_eq!(e.to_string(), "Unknown type: widget (rule 'web')");
    }

    #[test]
    fn missing_value_display() {
        let e = PrerequisiteError::MissingValue {
            rule: "svc".to_string(),
            kind: "user".to_string(),
        };
        assert_eq!(e.to_string(), "Rule 'svc' of type 'user' has no value");
    }

    #[test]
    fn launch_error_display() {
        let e = ExecutionError::Launch {
            command: "./script.sh arg".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.to_string().contains("./script.sh arg"));
        assert!(e.to_string().contains("permission denied"));
    }

    #[test]
    fn top_level_wraps_domain_errors() {
        let e: RulerunnerError = PrerequisiteError::UnknownType {
            rule: "r".to_string(),
            kind: "k".to_string(),
        }
        .into();
        assert!(e.to_string().starts_with("Prerequisite error"));

        let e: RulerunnerError = ExecutionError::Launch {
            command: "x".to_string(),
            source: io::Error::other("boom"),
        }
        .into();
        assert!(e.to_string().starts_with("Execution error"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<RulerunnerError>();
        assert_send_sync::<ConfigError>();
        assert_send_sync::<PrerequisiteError>();
        assert_send_sync::<ExecutionError>();
    }

    #[test]
    fn prerequisite_error_converts_to_anyhow() {
        let e = PrerequisiteError::MissingValue {
            rule: "r".to_string(),
            kind: "file".to_string(),
        };
        let anyhow_err: anyhow::Error = e.into();
        assert!(anyhow_err.downcast_ref::<PrerequisiteError>().is_some());
    }
}
