// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check runner with error isolation.
//!
//! Runs checks sequentially or on rayon workers, isolating panics so one
//! broken check doesn't prevent the others from scoring. Results always
//! follow registration order.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use rayon::prelude::*;

use crate::check::{Category, Check, CheckResult, CheckStatus};
use crate::context::RepoContext;
use crate::error::Result;
use crate::scoring::{self, Assessment, CategoryInput, Weights};

/// Evidence recorded when a check panics.
pub const PANIC_EVIDENCE: &str = "internal error: check panicked";

/// Evidence recorded when a check's languages are absent.
pub const NOT_APPLICABLE_EVIDENCE: &str = "not applicable to detected languages";

/// Runs checks against a shared, read-only context.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckRunner {
    parallel: bool,
}

impl CheckRunner {
    pub fn new(parallel: bool) -> Self {
        Self { parallel }
    }

    /// Run every check, returning results in the order given.
    pub fn run(&self, checks: &[Arc<dyn Check>], ctx: &RepoContext) -> Vec<CheckResult> {
        if self.parallel {
            // Indexed parallel iterators collect in source order.
            checks
                .par_iter()
                .map(|check| run_one(check.as_ref(), ctx))
                .collect()
        } else {
            checks
                .iter()
                .map(|check| run_one(check.as_ref(), ctx))
                .collect()
        }
    }
}

fn run_one(check: &dyn Check, ctx: &RepoContext) -> CheckResult {
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        check.applies_to(ctx).then(|| check.run(ctx))
    }));

    let mut result = match outcome {
        Ok(Some(result)) => result,
        Ok(None) => {
            tracing::debug!("{}: not applicable", check.id());
            return CheckResult::not_applicable(check, NOT_APPLICABLE_EVIDENCE);
        }
        Err(_) => {
            tracing::warn!("check {} panicked", check.id());
            return CheckResult::fail(
                check,
                PANIC_EVIDENCE,
                "Report this as a bug in scorecard.",
            );
        }
    };

    if check.uses_ci() && result.status == CheckStatus::Fail && !ctx.ci_failures().is_empty() {
        let paths: Vec<&str> = ctx.ci_failures().iter().map(|f| f.path.as_str()).collect();
        result.evidence = format!(
            "could not parse CI configuration ({}); {}",
            paths.join(", "),
            result.evidence
        );
    }

    tracing::debug!(
        "{}: {} ({}/{})",
        check.id(),
        result.status.label(),
        result.earned,
        result.max_points
    );
    result
}

/// Validate, run and score `checks` against `ctx`.
pub fn assess(
    ctx: &RepoContext,
    checks: &[Arc<dyn Check>],
    weights: &Weights,
    runner: CheckRunner,
) -> Result<Assessment> {
    crate::checks::validate(checks, weights)?;

    let results = runner.run(checks, ctx);
    let categories = Category::ALL
        .iter()
        .map(|category| {
            let in_category = results
                .iter()
                .filter(|r| r.category == *category)
                .cloned()
                .collect();
            CategoryInput::new(*category, weights.get(*category), in_category)
        })
        .collect();

    scoring::aggregate(
        ctx.name(),
        ctx.languages().iter().cloned().collect(),
        categories,
    )
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
