// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The check contract and its result type.

use serde::Serialize;

use crate::context::RepoContext;

/// Scoring category a check belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Documentation,
    Constraints,
    Testing,
    Review,
    AiSafeguards,
}

impl Category {
    /// Every category in report order.
    pub const ALL: [Category; 5] = [
        Category::Documentation,
        Category::Constraints,
        Category::Testing,
        Category::Review,
        Category::AiSafeguards,
    ];

    /// Stable identifier used in config files and JSON.
    pub fn id(self) -> &'static str {
        match self {
            Category::Documentation => "documentation",
            Category::Constraints => "constraints",
            Category::Testing => "testing",
            Category::Review => "review",
            Category::AiSafeguards => "ai_safeguards",
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Category::Documentation => "Architectural Documentation",
            Category::Constraints => "Mechanical Constraints",
            Category::Testing => "Testing & Stability",
            Category::Review => "Review & Drift Prevention",
            Category::AiSafeguards => "AI-Specific Safeguards",
        }
    }

    /// Weight used when no override is configured.
    pub fn default_weight(self) -> f64 {
        match self {
            Category::Documentation => 0.20,
            Category::Constraints => 0.25,
            Category::Testing => 0.25,
            Category::Review => 0.15,
            Category::AiSafeguards => 0.15,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

/// A single assessable practice.
///
/// Object-safe to allow dynamic dispatch via `Arc<dyn Check>`.
pub trait Check: Send + Sync {
    /// Unique identifier (e.g., "architecture_doc").
    fn id(&self) -> &'static str;

    /// Human-readable name.
    fn name(&self) -> &'static str;

    /// One-line description for `scorecard checks`.
    fn description(&self) -> &'static str;

    /// Research or practice the check is drawn from.
    fn source(&self) -> &'static str;

    fn category(&self) -> Category;

    /// Points awarded on a full pass. Must be positive.
    fn max_points(&self) -> f64;

    /// Whether the check is meaningful for this repository.
    ///
    /// When false the runner records a not-applicable result without
    /// calling [`Check::run`].
    fn applies_to(&self, _ctx: &RepoContext) -> bool {
        true
    }

    /// Whether the outcome depends on parsed CI configuration.
    fn uses_ci(&self) -> bool {
        false
    }

    /// Evaluate the check.
    ///
    /// Implementations should:
    /// - Only read repository content through `ctx`
    /// - Turn read errors into a fail result rather than panicking
    fn run(&self, ctx: &RepoContext) -> CheckResult;
}

/// Outcome class of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
    Partial,
    NotApplicable,
}

impl CheckStatus {
    pub fn label(self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Partial => "PARTIAL",
            CheckStatus::NotApplicable => "N/A",
        }
    }
}

/// Result of running a single check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    /// Check identifier.
    pub id: String,

    pub name: String,

    pub category: Category,

    /// Points earned, always within `0..=max_points`.
    pub earned: f64,

    pub max_points: f64,

    pub status: CheckStatus,

    /// What was (or was not) found.
    pub evidence: String,

    /// How to improve; empty on a pass.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub remediation: String,

    /// Citation for the practice.
    pub source: String,
}

impl CheckResult {
    fn new(
        check: &dyn Check,
        status: CheckStatus,
        earned: f64,
        evidence: impl Into<String>,
        remediation: impl Into<String>,
    ) -> Self {
        Self {
            id: check.id().to_string(),
            name: check.name().to_string(),
            category: check.category(),
            earned,
            max_points: check.max_points(),
            status,
            evidence: evidence.into(),
            remediation: remediation.into(),
            source: check.source().to_string(),
        }
    }

    /// Full credit.
    pub fn pass(check: &dyn Check, evidence: impl Into<String>) -> Self {
        let max = check.max_points();
        Self::new(check, CheckStatus::Pass, max, evidence, "")
    }

    /// No credit.
    pub fn fail(
        check: &dyn Check,
        evidence: impl Into<String>,
        remediation: impl Into<String>,
    ) -> Self {
        Self::new(check, CheckStatus::Fail, 0.0, evidence, remediation)
    }

    /// Partial credit, clamped to `0..=max`.
    ///
    /// Zero (or a non-finite value) is reported as a fail and the maximum
    /// as a pass.
    pub fn partial(
        check: &dyn Check,
        earned: f64,
        evidence: impl Into<String>,
        remediation: impl Into<String>,
    ) -> Self {
        let max = check.max_points().max(0.0);
        let earned = if earned.is_finite() {
            earned.clamp(0.0, max)
        } else {
            0.0
        };
        let status = if earned <= 0.0 {
            CheckStatus::Fail
        } else if earned >= max {
            CheckStatus::Pass
        } else {
            CheckStatus::Partial
        };
        Self::new(check, status, earned, evidence, remediation)
    }

    /// Zero points, excluded from the category total.
    pub fn not_applicable(check: &dyn Check, evidence: impl Into<String>) -> Self {
        Self::new(check, CheckStatus::NotApplicable, 0.0, evidence, "")
    }

    pub fn is_applicable(&self) -> bool {
        self.status != CheckStatus::NotApplicable
    }

    /// Any credit earned: a pass or a partial.
    pub fn passed(&self) -> bool {
        self.is_applicable() && self.earned > 0.0
    }

    /// Anything short of full credit, including not-applicable results.
    pub fn needs_attention(&self) -> bool {
        self.status != CheckStatus::Pass
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
