// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::scoring::Grade;

/// Grades a repository's engineering safeguards for AI-assisted development
#[derive(Parser)]
#[command(name = "scorecard")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "SCORECARD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Assess a repository and print its scorecard
    Assess(AssessArgs),
    /// List every check with its category and points
    Checks(ChecksArgs),
}

#[derive(clap::Args)]
pub struct AssessArgs {
    /// Repository root to assess
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Maximum directory depth to traverse
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Run checks in parallel
    #[arg(short, long)]
    pub jobs: bool,

    /// Exit with status 1 when the grade is below this one
    #[arg(long, value_name = "GRADE")]
    pub min_grade: Option<Grade>,

    /// Force color output
    #[arg(long)]
    pub color: bool,

    /// Disable color output
    #[arg(long, conflicts_with = "color")]
    pub no_color: bool,
}

#[derive(clap::Args)]
pub struct ChecksArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
    /// shields.io endpoint badge JSON
    Badge,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
