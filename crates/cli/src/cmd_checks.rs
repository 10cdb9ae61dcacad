// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Checks command: list the registry.

use termcolor::StandardStream;

use scorecard::checks;
use scorecard::cli::{ChecksArgs, OutputFormat};
use scorecard::color;
use scorecard::error::{Error, ExitCode};
use scorecard::output::json;
use scorecard::output::text::TextFormatter;

/// Run the checks command.
pub fn run(args: &ChecksArgs) -> anyhow::Result<ExitCode> {
    let registry = checks::registry();

    match args.output {
        OutputFormat::Text => {
            let stdout = StandardStream::stdout(color::resolve_color());
            TextFormatter::new(stdout.lock()).write_check_list(&registry)?;
        }
        OutputFormat::Json => println!("{}", json::render_check_list(&registry)?),
        OutputFormat::Markdown | OutputFormat::Badge => {
            return Err(Error::Argument(
                "checks supports only text and json output".to_string(),
            )
            .into());
        }
    }
    Ok(ExitCode::Success)
}
