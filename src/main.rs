//! `rulerunner` command-line entry point.
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use rulerunner::cli::{Cli, Command};
use rulerunner::commands;
use rulerunner::logging::{self, Logger};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    if args.command == Command::Version {
        commands::version::run();
        return ExitCode::SUCCESS;
    }

    logging::init_subscriber(args.verbose, args.command.log_name());
    let log = Arc::new(Logger::new(args.command.log_name()));

    let result = match args.command {
        Command::Run => commands::run::run(&args.global, &log),
        Command::Prereqs => commands::prereqs::run(&args.global, &log),
        Command::Exec => commands::exec::run(&args.global, &log),
        Command::Version => Ok(()),
    };
    commands::finish(result, log.as_ref())
}
