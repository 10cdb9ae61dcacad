// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! ```text
//! Grade: C  (58.3/100)
//! Basic practices present but insufficient for safe AI scaling.
//!
//! Category                          Weight  Score  Checks
//! Architectural Documentation          20%    60%     3/5
//!
//! Architectural Documentation: needs attention
//!   FAIL ADR Presence: No architecture decision records found
//!     Fix: Create docs/adr/ and record significant design decisions.
//!
//! Total: 12/31 checks passed
//! Languages: python, rust
//! ```

use std::sync::Arc;

use termcolor::WriteColor;

use super::points;
use crate::check::{Check, CheckStatus};
use crate::color::scheme;
use crate::scoring::Assessment;

/// Width of the category column.
const NAME_WIDTH: usize = 32;

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor> {
    out: W,
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write the full report.
    pub fn write_assessment(&mut self, assessment: &Assessment) -> std::io::Result<()> {
        self.write_grade(assessment)?;
        self.write_categories(assessment)?;
        self.write_findings(assessment)?;
        self.write_totals(assessment)
    }

    fn write_grade(&mut self, assessment: &Assessment) -> std::io::Result<()> {
        write!(self.out, "Grade: ")?;
        self.out.set_color(&scheme::grade(assessment.grade))?;
        write!(self.out, "{}", assessment.grade)?;
        self.out.reset()?;
        writeln!(self.out, "  ({:.1}/100)", assessment.overall)?;

        self.out.set_color(&scheme::hint())?;
        write!(self.out, "{}", assessment.description())?;
        self.out.reset()?;
        writeln!(self.out)?;
        writeln!(self.out)
    }

    fn write_categories(&mut self, assessment: &Assessment) -> std::io::Result<()> {
        self.out.set_color(&scheme::heading())?;
        write!(
            self.out,
            "{:<width$}  {:>6}  {:>5}  {:>6}",
            "Category",
            "Weight",
            "Score",
            "Checks",
            width = NAME_WIDTH
        )?;
        self.out.reset()?;
        writeln!(self.out)?;

        for category in &assessment.categories {
            write!(
                self.out,
                "{:<width$}  {:>5.0}%  ",
                category.name,
                category.weight * 100.0,
                width = NAME_WIDTH
            )?;
            self.out.set_color(&scheme::score(category.percentage()))?;
            write!(self.out, "{:>4.0}%", category.percentage())?;
            self.out.reset()?;
            let checks = format!("{}/{}", category.passed_checks(), category.checks.len());
            writeln!(self.out, "  {:>6}", checks)?;
        }
        writeln!(self.out)
    }

    /// Every check short of full credit, grouped by category.
    fn write_findings(&mut self, assessment: &Assessment) -> std::io::Result<()> {
        for category in &assessment.categories {
            let open: Vec<_> = category
                .checks
                .iter()
                .filter(|c| c.needs_attention())
                .collect();
            if open.is_empty() {
                continue;
            }

            self.out.set_color(&scheme::heading())?;
            write!(self.out, "{}", category.name)?;
            self.out.reset()?;
            writeln!(self.out, ": needs attention")?;

            for check in open {
                write!(self.out, "  ")?;
                self.out.set_color(&scheme::status(check.status))?;
                write!(self.out, "{}", check.status.label())?;
                self.out.reset()?;
                write!(self.out, " {}: {}", check.name, check.evidence)?;
                if check.status == CheckStatus::Partial {
                    write!(
                        self.out,
                        " ({}/{})",
                        points(check.earned),
                        points(check.max_points)
                    )?;
                }
                writeln!(self.out)?;

                if !check.remediation.is_empty() {
                    self.out.set_color(&scheme::hint())?;
                    write!(self.out, "    Fix: {}", check.remediation)?;
                    self.out.reset()?;
                    writeln!(self.out)?;
                }
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn write_totals(&mut self, assessment: &Assessment) -> std::io::Result<()> {
        self.out.set_color(&scheme::heading())?;
        write!(self.out, "Total:")?;
        self.out.reset()?;
        writeln!(
            self.out,
            " {}/{} checks passed",
            assessment.passed_checks, assessment.total_checks
        )?;

        let languages = if assessment.languages.is_empty() {
            "none detected".to_string()
        } else {
            assessment.languages.join(", ")
        };
        self.out.set_color(&scheme::hint())?;
        write!(self.out, "Languages: {}", languages)?;
        self.out.reset()?;
        writeln!(self.out)
    }

    /// Write the check catalog for `scorecard checks`.
    pub fn write_check_list(&mut self, checks: &[Arc<dyn Check>]) -> std::io::Result<()> {
        let mut current = None;
        for check in checks {
            if current != Some(check.category()) {
                if current.is_some() {
                    writeln!(self.out)?;
                }
                current = Some(check.category());
                self.out.set_color(&scheme::heading())?;
                write!(self.out, "{}", check.category().name())?;
                self.out.reset()?;
                writeln!(self.out)?;
            }
            writeln!(
                self.out,
                "  {:<28} {:>3}  {}",
                check.id(),
                points(check.max_points()),
                check.description()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
