// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scorecard CLI entry point.
//!
//! Every path out of the process ends in one of the documented exit codes.
//! Usage errors from clap land in the argument class (2).

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use scorecard::cli::{Cli, Command};
use scorecard::error::ExitCode;

mod cmd_assess;
mod cmd_checks;

/// Log filter variable; logging is off unless it is set.
const LOG_ENV: &str = "SCORECARD_LOG";

fn main() {
    init_logging();

    let code = match Cli::try_parse() {
        Ok(cli) => dispatch(&cli).unwrap_or_else(|err| report_failure(&err)),
        Err(err) => report_usage(&err),
    };
    std::process::exit(code as i32);
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn dispatch(cli: &Cli) -> anyhow::Result<ExitCode> {
    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(ExitCode::Success);
    };

    match command {
        Command::Assess(args) => cmd_assess::run(cli, args),
        Command::Checks(args) => cmd_checks::run(args),
    }
}

/// Print a command failure and classify it.
fn report_failure(err: &anyhow::Error) -> ExitCode {
    eprintln!("scorecard: {err}");
    err.downcast_ref::<scorecard::Error>()
        .map_or(ExitCode::InternalError, ExitCode::from)
}

/// Print clap's help, version or usage error.
fn report_usage(err: &clap::Error) -> ExitCode {
    if err.print().is_err() {
        return ExitCode::InternalError;
    }
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Success,
        _ => ExitCode::ConfigError,
    }
}
