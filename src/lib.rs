//! Rule-driven host provisioner.
//!
//! Reads a JSON list of rules, makes sure each rule's OS-level prerequisite
//! (user, group, file or folder) exists, then runs the rule's commands with
//! the rule's value appended as the final argument.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: parse and validate the rule file
//! - **[`prerequisites`]**: idempotent `check + create` handlers selected by rule type
//! - **[`execution`]**: build and launch each rule's commands, or print them in dry-run mode
//! - **[`commands`]**: top-level subcommand orchestration (`run`, `prereqs`, `exec`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exec;
pub mod execution;
pub mod logging;
pub mod operations;
pub mod prerequisites;
