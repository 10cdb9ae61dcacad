// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check registry.
//!
//! Checks are grouped by category, one module per category:
//! - documentation: architecture docs, agent instructions, ADRs, boundaries, API docs
//! - constraints: CI, linters, formatters, type safety, audits, commit format, unsafe code
//! - testing: suite, matrix, coverage, mutation, property, fuzz, contract, blocking tests
//! - review: code review, scheduled CI, stale docs, templates, bots, doc sync
//! - safeguards: AI norms, small batches, design-first, error handling, security marking
//!
//! [`registry`] assembles them explicitly; there is no global state.

use std::collections::HashSet;
use std::sync::Arc;

use crate::check::Check;
use crate::error::{Error, Result};
use crate::scoring::Weights;

/// Implements [`Check`] for a unit struct whose inherent `evaluate` holds
/// the decision ladder.
macro_rules! define_check {
    (@uses_ci) => { false };
    (@uses_ci $value:literal) => { $value };
    (@applies $ctx:ident) => {{
        let _ = $ctx;
        true
    }};
    (@applies $ctx:ident $predicate:path) => { $predicate($ctx) };
    (
        $(#[$meta:meta])*
        $ty:ident {
            id: $id:literal,
            name: $name:literal,
            description: $description:literal,
            source: $source:literal,
            category: $category:expr,
            max_points: $points:literal,
            $(uses_ci: $uses_ci:literal,)?
            $(applies_to: $applies:path,)?
        }
    ) => {
        $(#[$meta])*
        pub struct $ty;

        impl $crate::check::Check for $ty {
            fn id(&self) -> &'static str {
                $id
            }

            fn name(&self) -> &'static str {
                $name
            }

            fn description(&self) -> &'static str {
                $description
            }

            fn source(&self) -> &'static str {
                $source
            }

            fn category(&self) -> $crate::check::Category {
                $category
            }

            fn max_points(&self) -> f64 {
                $points
            }

            fn uses_ci(&self) -> bool {
                define_check!(@uses_ci $($uses_ci)?)
            }

            fn applies_to(&self, ctx: &$crate::context::RepoContext) -> bool {
                define_check!(@applies ctx $($applies)?)
            }

            fn run(&self, ctx: &$crate::context::RepoContext) -> $crate::check::CheckResult {
                self.evaluate(ctx)
            }
        }
    };
}

pub mod constraints;
pub mod documentation;
pub mod review;
pub mod safeguards;
pub mod testing;

/// Every check, grouped by category in report order.
pub fn registry() -> Vec<Arc<dyn Check>> {
    let mut checks = documentation::checks();
    checks.extend(constraints::checks());
    checks.extend(testing::checks());
    checks.extend(review::checks());
    checks.extend(safeguards::checks());
    checks
}

/// Reject a broken registry before anything is scored.
///
/// Fails on a non-positive `max_points`, a duplicate id, or weights that do
/// not sum to 1.
pub fn validate(checks: &[Arc<dyn Check>], weights: &Weights) -> Result<()> {
    let mut seen = HashSet::new();
    for check in checks {
        let points = check.max_points();
        if !(points.is_finite() && points > 0.0) {
            return Err(Error::Configuration(format!(
                "check {} has non-positive max points ({})",
                check.id(),
                points
            )));
        }
        if !seen.insert(check.id()) {
            return Err(Error::Configuration(format!(
                "duplicate check id: {}",
                check.id()
            )));
        }
    }
    weights.validate()
}

/// Look up a check by id.
pub fn get_check(id: &str) -> Option<Arc<dyn Check>> {
    registry().into_iter().find(|c| c.id() == id)
}

/// Join the first `limit` names for evidence text.
pub(crate) fn first_names<S: AsRef<str>>(names: &[S], limit: usize) -> String {
    names
        .iter()
        .take(limit)
        .map(|n| n.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
