// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Assess command implementation.

use std::io::Write;
use std::path::Path;

use termcolor::{NoColor, StandardStream};

use scorecard::checks;
use scorecard::cli::{AssessArgs, Cli, OutputFormat};
use scorecard::color;
use scorecard::config::{self, Config};
use scorecard::context::RepoContext;
use scorecard::discovery;
use scorecard::error::{Error, ExitCode};
use scorecard::output::text::TextFormatter;
use scorecard::output::{json, markdown};
use scorecard::runner::{self, CheckRunner};
use scorecard::scoring::Assessment;

/// Run the assess command.
pub fn run(cli: &Cli, args: &AssessArgs) -> anyhow::Result<ExitCode> {
    let config = match discovery::resolve_config(cli.config.as_deref(), &args.path)? {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            config::load(&path)?
        }
        None => {
            tracing::debug!("no config found, using defaults");
            Config::default()
        }
    };

    let mut options = config.context_options();
    if let Some(depth) = args.max_depth {
        options.max_depth = Some(depth);
    }

    let ctx = RepoContext::build(&args.path, &options)?;
    tracing::debug!(
        "indexed {} files, languages: {:?}, walk: {:?}",
        ctx.files().len(),
        ctx.languages(),
        ctx.walk_stats()
    );
    tracing::debug!(
        "parsed {} CI files ({} jobs), {} failed",
        ctx.ci_files().len(),
        ctx.ci().jobs.len(),
        ctx.ci_failures().len()
    );

    let registry = checks::registry();
    let assessment = runner::assess(
        &ctx,
        &registry,
        &config.weights(),
        CheckRunner::new(args.jobs),
    )?;

    write_report(args, &assessment)?;

    if let Some(minimum) = args.min_grade
        && !assessment.grade.meets(minimum)
    {
        eprintln!(
            "scorecard: grade {} is below the required {}",
            assessment.grade, minimum
        );
        return Ok(ExitCode::BelowThreshold);
    }

    Ok(ExitCode::Success)
}

fn write_report(args: &AssessArgs, assessment: &Assessment) -> anyhow::Result<()> {
    let report = match args.output {
        OutputFormat::Text => {
            if args.output_file.is_none() {
                let stdout = StandardStream::stdout(color::choose(args.color, args.no_color));
                TextFormatter::new(stdout.lock()).write_assessment(assessment)?;
                return Ok(());
            }
            let mut formatter = TextFormatter::new(NoColor::new(Vec::new()));
            formatter.write_assessment(assessment)?;
            String::from_utf8_lossy(&formatter.into_inner().into_inner()).into_owned()
        }
        OutputFormat::Json => json::render(assessment)?,
        OutputFormat::Markdown => markdown::render(assessment)?,
        OutputFormat::Badge => json::render_badge(assessment)?,
    };

    match &args.output_file {
        Some(path) => write_file(path, &report)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(report.as_bytes())?;
            if !report.ends_with('\n') {
                writeln!(stdout)?;
            }
        }
    }
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<(), Error> {
    let mut content = content.to_string();
    if !content.ends_with('\n') {
        content.push('\n');
    }
    std::fs::write(path, content).map_err(|e| {
        Error::Argument(format!("cannot write output file {}: {}", path.display(), e))
    })?;
    tracing::info!("report written to {}", path.display());
    Ok(())
}
