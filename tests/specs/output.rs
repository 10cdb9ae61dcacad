//! Behavioral specs for report formats and color handling.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

// =============================================================================
// Text Output Format
// =============================================================================

#[test]
fn text_output_shows_grade_and_categories() {
    let repo = Repo::empty();
    assess(repo.path())
        .passes()
        .stdout_has(predicates::str::starts_with("Grade: F  (0.0/100)\n"))
        .stdout_has("Architectural Documentation")
        .stdout_has("Review & Drift Prevention")
        .stdout_has("Total: 0/31 checks passed")
        .stdout_has("Languages: none detected");
}

/// > Failing checks list their remediation indented under the finding
#[test]
fn text_output_lists_remediation() {
    let repo = Repo::empty();
    assess(repo.path())
        .passes()
        .stdout_has("Testing & Stability: needs attention")
        .stdout_has("  FAIL Test Suite: No test suite found\n")
        .stdout_has(predicates::str::is_match(r"\n    Fix: \S").unwrap());
}

// =============================================================================
// Machine formats
// =============================================================================

#[test]
fn json_output_has_report_fields() {
    let repo = Repo::harnessed();
    let report = assess(repo.path()).json().passes();
    let value = report.value();

    for key in [
        "repo_name",
        "languages",
        "overall_score",
        "grade",
        "grade_description",
        "total_checks",
        "passed_checks",
        "categories",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    assert_eq!(value["categories"].as_array().unwrap().len(), 5);

    let check = report.check("code_review_required");
    assert_eq!(check["passed"], true);
    assert_eq!(check["max_points"], 4.0);
    assert_eq!(check["score"], 4.0);
}

#[test]
fn markdown_output() {
    let repo = Repo::empty();
    assess(repo.path())
        .args(&["-o", "markdown"])
        .passes()
        .stdout_has(predicates::str::starts_with("# AI Harness Scorecard: "))
        .stdout_has("**Grade: F** (0.0/100)")
        .stdout_has("| Category |");
}

#[test]
fn badge_output_is_shields_endpoint() {
    let repo = Repo::empty();
    let output = assess(repo.path()).args(&["-o", "badge"]).passes();

    let badge: serde_json::Value = serde_json::from_str(&output.stdout()).unwrap();
    assert_eq!(badge["schemaVersion"], 1);
    assert_eq!(badge["label"], "AI Harness Scorecard");
    assert_eq!(badge["message"], "F 0/100");
}

/// > --output-file writes the report instead of printing it
#[test]
fn output_file_receives_report() {
    let repo = Repo::empty();
    let out = Repo::empty();
    let path = out.path().join("report.json");

    assess(repo.path())
        .args(&["-o", "json", "--output-file", path.to_str().unwrap()])
        .passes()
        .stdout_has(predicates::str::is_empty());

    let written = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["grade"], "F");
}

#[test]
fn text_output_file_has_no_ansi_codes() {
    let repo = Repo::empty();
    let out = Repo::empty();
    let path = out.path().join("report.txt");

    assess(repo.path())
        .args(&["--color", "--output-file", path.to_str().unwrap()])
        .passes();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("Grade: F"));
    assert!(!written.contains("\x1b["));
}

#[test]
fn unwritable_output_file_exits_2() {
    let repo = Repo::empty();
    let path = repo.path().join("missing-dir").join("report.json");

    assess(repo.path())
        .args(&["-o", "json", "--output-file", path.to_str().unwrap()])
        .exits(2)
        .stderr_has("cannot write output file");
}

// =============================================================================
// Color
// =============================================================================

/// > NO_COLOR disables color output
#[test]
fn no_color_env_disables_color() {
    let repo = Repo::empty();
    assess(repo.path())
        .env("NO_COLOR", "1")
        .passes()
        .stdout_lacks("\x1b[");
}

#[test]
fn color_flag_forces_color() {
    let repo = Repo::empty();
    assess(repo.path())
        .args(&["--color"])
        .passes()
        .stdout_has("\x1b[");
}

#[test]
fn no_color_flag_beats_color_env() {
    let repo = Repo::empty();
    assess(repo.path())
        .args(&["--no-color"])
        .env("COLOR", "1")
        .passes()
        .stdout_lacks("\x1b[");
}

#[test]
fn piped_output_has_no_color_by_default() {
    let repo = Repo::empty();
    assess(repo.path()).passes().stdout_lacks("\x1b[");
}
