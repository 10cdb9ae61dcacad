// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Color detection and terminal styling.
//!
//! Detection order:
//! 1. `--no-color` / `--color` flags
//! 2. NO_COLOR env var → no color
//! 3. COLOR env var → use color
//! 4. default:
//!    - If not stdout.is_tty() → no color
//!    - If CLAUDE_CODE, CODEX, CI, or CURSOR env var set → no color
//!    - Else → use color

use std::io::IsTerminal;

use termcolor::ColorChoice;

/// Resolve color choice from flags, then environment variables.
pub fn choose(force: bool, disable: bool) -> ColorChoice {
    if disable {
        return ColorChoice::Never;
    }
    if force {
        return ColorChoice::Always;
    }
    resolve_color()
}

/// Resolve color choice from environment variables.
///
/// Priority: NO_COLOR > COLOR > auto-detect
///
/// Per [no-color.org](https://no-color.org/), `NO_COLOR` when set to any value
/// (including empty string) disables color.
pub fn resolve_color() -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    if std::env::var_os("COLOR").is_some() {
        return ColorChoice::Always;
    }
    if !std::io::stdout().is_terminal() {
        return ColorChoice::Never;
    }
    if is_agent_environment() {
        return ColorChoice::Never;
    }
    ColorChoice::Auto
}

/// Check if running in an AI agent or CI environment.
fn is_agent_environment() -> bool {
    std::env::var_os("CLAUDE_CODE").is_some()
        || std::env::var_os("CODEX").is_some()
        || std::env::var_os("CURSOR").is_some()
        || std::env::var_os("CI").is_some()
}

/// Color scheme for the text report.
pub mod scheme {
    use termcolor::{Color, ColorSpec};

    use crate::check::CheckStatus;
    use crate::scoring::Grade;

    /// Bold section and category names.
    pub fn heading() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        spec
    }

    /// Bold grade letter, colored by grade.
    pub fn grade(grade: Grade) -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(grade_color(grade))).set_bold(true);
        spec
    }

    /// Percentage colored by the grade it would earn.
    pub fn score(percentage: f64) -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(grade_color(Grade::from_score(percentage))));
        spec
    }

    fn grade_color(grade: Grade) -> Color {
        match grade {
            Grade::A => Color::Green,
            Grade::B => Color::Blue,
            Grade::C => Color::Yellow,
            Grade::D | Grade::F => Color::Red,
        }
    }

    /// Status label: PASS green, FAIL red, PARTIAL yellow, N/A dimmed.
    pub fn status(status: CheckStatus) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match status {
            CheckStatus::Pass => spec.set_fg(Some(Color::Green)).set_bold(true),
            CheckStatus::Fail => spec.set_fg(Some(Color::Red)).set_bold(true),
            CheckStatus::Partial => spec.set_fg(Some(Color::Yellow)).set_bold(true),
            CheckStatus::NotApplicable => spec.set_dimmed(true),
        };
        spec
    }

    /// Dimmed hints: grade description, remediation, languages.
    pub fn hint() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_dimmed(true);
        spec
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
