// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Markdown format report output.

use std::fmt::{self, Write};

use super::points;
use crate::scoring::Assessment;

/// Render a full assessment as Markdown.
pub fn render(assessment: &Assessment) -> Result<String, fmt::Error> {
    let mut out = String::with_capacity(4096);
    write_report(&mut out, assessment)?;
    Ok(out)
}

fn write_report(out: &mut String, assessment: &Assessment) -> fmt::Result {
    writeln!(out, "# AI Harness Scorecard: {}\n", cell(&assessment.repo_name))?;
    writeln!(
        out,
        "**Grade: {}** ({:.1}/100)\n",
        assessment.grade, assessment.overall
    )?;
    writeln!(out, "> {}\n", assessment.description())?;

    // Summary table
    writeln!(out, "## Summary\n")?;
    writeln!(out, "| Category | Weight | Score | Checks |")?;
    writeln!(out, "|----------|-------:|------:|:------:|")?;
    for category in &assessment.categories {
        writeln!(
            out,
            "| {} | {:.0}% | {:.0}% | {}/{} |",
            category.name,
            category.weight * 100.0,
            category.percentage(),
            category.passed_checks(),
            category.checks.len()
        )?;
    }
    writeln!(out)?;

    let languages = if assessment.languages.is_empty() {
        "none detected".to_string()
    } else {
        assessment.languages.join(", ")
    };
    writeln!(
        out,
        "**Total:** {}/{} checks passed  ",
        assessment.passed_checks, assessment.total_checks
    )?;
    writeln!(out, "**Languages:** {}", languages)?;

    for category in &assessment.categories {
        if category.checks.is_empty() {
            continue;
        }
        writeln!(out, "\n## {}\n", category.name)?;
        writeln!(out, "| Check | Status | Points | Evidence |")?;
        writeln!(out, "|-------|--------|-------:|----------|")?;
        for check in &category.checks {
            writeln!(
                out,
                "| {} | {} | {}/{} | {} |",
                cell(&check.name),
                check.status.label(),
                points(check.earned),
                points(check.max_points),
                cell(&check.evidence)
            )?;
        }

        let fixes: Vec<_> = category
            .checks
            .iter()
            .filter(|c| c.needs_attention() && !c.remediation.is_empty())
            .collect();
        if !fixes.is_empty() {
            writeln!(out, "\n**Remediation:**\n")?;
            for check in fixes {
                writeln!(out, "- **{}**: {}", check.name, check.remediation)?;
            }
        }
    }
    Ok(())
}

/// Escape text for a table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
#[path = "markdown_tests.rs"]
mod tests;
