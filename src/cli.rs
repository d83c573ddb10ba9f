//! Command-line interface definitions.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_FILE;

/// Top-level CLI entry point for the rule runner.
#[derive(Parser, Debug)]
#[command(
    name = "rulerunner",
    about = "Provision host prerequisites and run rule commands",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Path to the JSON rule file
    #[arg(
        short,
        long,
        global = true,
        env = "RULERUNNER_CONFIG",
        default_value = DEFAULT_CONFIG_FILE
    )]
    pub config: PathBuf,

    /// Print commands without executing them
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Run each command through `bash -c` instead of invoking it directly
    #[arg(long, global = true)]
    pub use_bash: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Ensure prerequisites, then run every rule's commands
    Run,
    /// Ensure prerequisites only
    Prereqs,
    /// Run every rule's commands only
    Exec,
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the log file of this subcommand.
    #[must_use]
    pub const fn log_name(self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Prereqs => "prereqs",
            Self::Exec => "exec",
            Self::Version => "version",
        }
    }
}
