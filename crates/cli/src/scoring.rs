// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Weighted aggregation of check results into a percentage and grade.
//!
//! Per category, earned and max points are summed over applicable checks
//! and normalized to `0..=1`. The overall score is the weighted sum of the
//! normalized category scores, scaled to `0..=100`.

use serde::{Deserialize, Serialize};

use crate::check::{Category, CheckResult};
use crate::error::{Error, Result};

/// Allowed drift of the weight sum from 1.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Category weights.
///
/// Deserialized from the `[weights]` config table, which must name every
/// category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Weights {
    pub documentation: f64,
    pub constraints: f64,
    pub testing: f64,
    pub review: f64,
    pub ai_safeguards: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            documentation: Category::Documentation.default_weight(),
            constraints: Category::Constraints.default_weight(),
            testing: Category::Testing.default_weight(),
            review: Category::Review.default_weight(),
            ai_safeguards: Category::AiSafeguards.default_weight(),
        }
    }
}

impl Weights {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Documentation => self.documentation,
            Category::Constraints => self.constraints,
            Category::Testing => self.testing,
            Category::Review => self.review,
            Category::AiSafeguards => self.ai_safeguards,
        }
    }

    /// Every weight within `0..=1` and the sum within tolerance of 1.
    pub fn validate(&self) -> Result<()> {
        let weights: Vec<f64> = Category::ALL.iter().map(|c| self.get(*c)).collect();
        validate_weights(&weights)
    }
}

fn validate_weights(weights: &[f64]) -> Result<()> {
    if let Some(bad) = weights
        .iter()
        .find(|w| !(w.is_finite() && (0.0..=1.0).contains(*w)))
    {
        return Err(Error::Configuration(format!(
            "category weight {bad} is outside 0..=1"
        )));
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(Error::Configuration(format!(
            "category weights sum to {sum}, expected 1"
        )));
    }
    Ok(())
}

/// Letter grade. Variants are ordered best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Lower bound of each passing grade; anything lower is F.
    const THRESHOLDS: [(Grade, f64); 4] = [
        (Grade::A, 85.0),
        (Grade::B, 70.0),
        (Grade::C, 55.0),
        (Grade::D, 40.0),
    ];

    /// Grade for a score in `0..=100`. A boundary belongs to the higher grade.
    pub fn from_score(score: f64) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|(_, min)| score >= *min)
            .map(|(grade, _)| *grade)
            .unwrap_or(Grade::F)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Grade::A => "Strong harness. AI-generated code has robust mechanical safeguards.",
            Grade::B => "Good foundation. Some gaps in enforcement or feedback loops.",
            Grade::C => "Basic practices present but insufficient for safe AI scaling.",
            Grade::D => "Significant gaps. AI code likely accumulating undetected debt.",
            Grade::F => "No meaningful harness. AI output is essentially unaudited.",
        }
    }

    /// Whether this grade is at least as good as `minimum`.
    pub fn meets(self, minimum: Grade) -> bool {
        self <= minimum
    }

    /// Parse a grade letter, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Grade::A),
            "B" => Some(Grade::B),
            "C" => Some(Grade::C),
            "D" => Some(Grade::D),
            "F" => Some(Grade::F),
            _ => None,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Grade::parse(s).ok_or_else(|| format!("invalid grade '{s}' (expected A, B, C, D or F)"))
    }
}

/// One category's results, ready for aggregation.
#[derive(Debug, Clone)]
pub struct CategoryInput {
    pub id: String,
    pub name: String,
    pub weight: f64,
    pub results: Vec<CheckResult>,
}

impl CategoryInput {
    pub fn new(category: Category, weight: f64, results: Vec<CheckResult>) -> Self {
        Self {
            id: category.id().to_string(),
            name: category.name().to_string(),
            weight,
            results,
        }
    }
}

/// Aggregated score for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryResult {
    pub id: String,
    pub name: String,
    pub weight: f64,
    /// Sum of earned points over applicable checks.
    pub earned: f64,
    /// Sum of max points over applicable checks.
    pub max: f64,
    /// `earned / max`, or 0 when nothing applied.
    pub normalized: f64,
    pub checks: Vec<CheckResult>,
}

impl CategoryResult {
    fn from_input(input: CategoryInput) -> Self {
        let (earned, max) = input
            .results
            .iter()
            .filter(|r| r.is_applicable())
            .fold((0.0, 0.0), |(earned, max), r| {
                (earned + r.earned, max + r.max_points)
            });
        let normalized = if max > 0.0 {
            (earned / max).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            id: input.id,
            name: input.name,
            weight: input.weight,
            earned,
            max,
            normalized,
            checks: input.results,
        }
    }

    /// Normalized score as a percentage.
    pub fn percentage(&self) -> f64 {
        self.normalized * 100.0
    }

    pub fn passed_checks(&self) -> usize {
        self.checks.iter().filter(|c| c.passed()).count()
    }
}

/// Complete, immutable assessment of one repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub repo_name: String,
    pub languages: Vec<String>,
    pub categories: Vec<CategoryResult>,
    /// Weighted score in `0..=100`.
    pub overall: f64,
    pub grade: Grade,
    pub total_checks: usize,
    pub passed_checks: usize,
}

impl Assessment {
    pub fn description(&self) -> &'static str {
        self.grade.description()
    }
}

/// Combine category results into an [`Assessment`].
///
/// Rejects weights that are out of range or do not sum to 1, and any result
/// with non-positive max points, before scoring anything.
pub fn aggregate(
    repo_name: impl Into<String>,
    languages: Vec<String>,
    categories: Vec<CategoryInput>,
) -> Result<Assessment> {
    let weights: Vec<f64> = categories.iter().map(|c| c.weight).collect();
    validate_weights(&weights)?;

    for input in &categories {
        if let Some(bad) = input
            .results
            .iter()
            .find(|r| !(r.max_points.is_finite() && r.max_points > 0.0))
        {
            return Err(Error::Configuration(format!(
                "check {} has non-positive max points ({})",
                bad.id, bad.max_points
            )));
        }
    }

    let categories: Vec<CategoryResult> = categories
        .into_iter()
        .map(CategoryResult::from_input)
        .collect();

    let overall = categories
        .iter()
        .map(|c| c.weight * c.normalized * 100.0)
        .sum::<f64>()
        .clamp(0.0, 100.0);
    let total_checks = categories.iter().map(|c| c.checks.len()).sum();
    let passed_checks = categories.iter().map(CategoryResult::passed_checks).sum();

    Ok(Assessment {
        repo_name: repo_name.into(),
        languages,
        grade: Grade::from_score(overall),
        categories,
        overall,
        total_checks,
        passed_checks,
    })
}

#[cfg(test)]
#[path = "scoring_tests.rs"]
mod tests;
