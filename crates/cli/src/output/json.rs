// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! JSON is buffered and written at the end (not streamed). Scores are
//! rounded to one decimal; nothing time-dependent is emitted, so an
//! unchanged repository always yields the same bytes.

use std::sync::Arc;

use serde::Serialize;

use super::round1;
use crate::check::{Check, CheckResult, CheckStatus};
use crate::scoring::{Assessment, CategoryResult, Grade};

#[derive(Debug, Serialize)]
struct Report<'a> {
    repo_name: &'a str,
    languages: &'a [String],
    overall_score: f64,
    grade: Grade,
    grade_description: &'a str,
    total_checks: usize,
    passed_checks: usize,
    categories: Vec<CategoryOutput<'a>>,
}

#[derive(Debug, Serialize)]
struct CategoryOutput<'a> {
    category_id: &'a str,
    name: &'a str,
    weight: f64,
    score: f64,
    max_score: f64,
    percentage: f64,
    checks: Vec<CheckOutput<'a>>,
}

#[derive(Debug, Serialize)]
struct CheckOutput<'a> {
    check_id: &'a str,
    name: &'a str,
    status: CheckStatus,
    passed: bool,
    score: f64,
    max_points: f64,
    evidence: &'a str,
    remediation: &'a str,
    source: &'a str,
}

impl<'a> From<&'a CategoryResult> for CategoryOutput<'a> {
    fn from(category: &'a CategoryResult) -> Self {
        Self {
            category_id: &category.id,
            name: &category.name,
            weight: category.weight,
            score: round1(category.earned),
            max_score: round1(category.max),
            percentage: round1(category.percentage()),
            checks: category.checks.iter().map(Into::into).collect(),
        }
    }
}

impl<'a> From<&'a CheckResult> for CheckOutput<'a> {
    fn from(check: &'a CheckResult) -> Self {
        Self {
            check_id: &check.id,
            name: &check.name,
            status: check.status,
            passed: check.passed(),
            score: round1(check.earned),
            max_points: round1(check.max_points),
            evidence: &check.evidence,
            remediation: &check.remediation,
            source: &check.source,
        }
    }
}

/// Render a full assessment as pretty JSON.
pub fn render(assessment: &Assessment) -> serde_json::Result<String> {
    let report = Report {
        repo_name: &assessment.repo_name,
        languages: &assessment.languages,
        overall_score: round1(assessment.overall),
        grade: assessment.grade,
        grade_description: assessment.description(),
        total_checks: assessment.total_checks,
        passed_checks: assessment.passed_checks,
        categories: assessment.categories.iter().map(Into::into).collect(),
    };
    serde_json::to_string_pretty(&report)
}

/// shields.io endpoint badge.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Badge {
    schema_version: u8,
    label: &'static str,
    message: String,
    color: &'static str,
    named_logo: &'static str,
}

fn badge_color(grade: Grade) -> &'static str {
    match grade {
        Grade::A => "brightgreen",
        Grade::B => "blue",
        Grade::C => "yellow",
        Grade::D => "orange",
        Grade::F => "red",
    }
}

/// Render a shields.io endpoint badge (<https://shields.io/endpoint>).
pub fn render_badge(assessment: &Assessment) -> serde_json::Result<String> {
    let badge = Badge {
        schema_version: 1,
        label: "AI Harness Scorecard",
        message: format!("{} {:.0}/100", assessment.grade, assessment.overall),
        color: badge_color(assessment.grade),
        named_logo: "shield",
    };
    serde_json::to_string_pretty(&badge)
}

#[derive(Debug, Serialize)]
struct CheckInfo {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    max_points: f64,
    description: &'static str,
    source: &'static str,
    uses_ci: bool,
}

/// Render the check catalog for `scorecard checks`.
pub fn render_check_list(checks: &[Arc<dyn Check>]) -> serde_json::Result<String> {
    let infos: Vec<CheckInfo> = checks
        .iter()
        .map(|c| CheckInfo {
            id: c.id(),
            name: c.name(),
            category: c.category().id(),
            max_points: c.max_points(),
            description: c.description(),
            source: c.source(),
            uses_ci: c.uses_ci(),
        })
        .collect();
    serde_json::to_string_pretty(&infos)
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
