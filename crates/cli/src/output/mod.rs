// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report formatters.
//!
//! Each formatter is stateless and depends only on the [`Assessment`]
//! (or the check registry, for `scorecard checks`).
//!
//! [`Assessment`]: crate::scoring::Assessment

pub mod json;
pub mod markdown;
pub mod text;

/// Round to one decimal place for display.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Format points without a trailing `.0` (e.g., `3`, `1.5`).
pub fn points(value: f64) -> String {
    let rounded = round1(value);
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded:.1}")
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
