//! Behavioral specs for `scorecard assess`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

// =============================================================================
// SCORING
// =============================================================================

/// > An empty repository scores 0 with grade F and every check reported.
#[test]
fn empty_repo_scores_zero() {
    let repo = Repo::empty();
    let report = assess(repo.path()).json().passes();

    assert_eq!(report.overall(), 0.0);
    assert_eq!(report.grade(), "F");
    assert_eq!(report.value()["total_checks"], 31);
    assert_eq!(report.value()["passed_checks"], 0);
    assert_eq!(report.value()["languages"], serde_json::json!([]));
}

/// > Tests executed by a blocking CI job earn Testing credit; CODEOWNERS and
/// > a blocking linter earn Review and Constraints credit.
#[test]
fn harnessed_repo_earns_credit() {
    let repo = Repo::harnessed();
    let report = assess(repo.path()).json().passes();

    assert_eq!(report.status("test_suite_exists"), "pass");
    assert_eq!(report.status("tests_blocking_ci"), "pass");
    assert_eq!(report.status("code_review_required"), "pass");
    assert_eq!(report.status("linter_enforcement"), "pass");
    assert_eq!(report.status("ci_pipeline_exists"), "pass");

    assert!(report.category("testing")["score"].as_f64().unwrap() > 0.0);
    assert!(report.category("review")["score"].as_f64().unwrap() > 0.0);
    assert!(report.overall() > 0.0);
    assert_eq!(report.value()["languages"], serde_json::json!(["rust"]));
}

#[test]
fn tests_without_ci_earn_partial_credit() {
    let repo = Repo::empty();
    repo.file("tests/test_app.py", "def test_ok():\n    assert True\n");

    let report = assess(repo.path()).json().passes();
    let check = report.check("test_suite_exists");
    assert_eq!(check["status"], "partial");
    assert_eq!(check["score"], 1.5);
    assert_eq!(check["passed"], true);
}

/// > A malformed CI file never aborts the run; affected checks say why.
#[test]
fn malformed_ci_is_reported_in_evidence() {
    let repo = Repo::empty();
    repo.file(".github/workflows/ci.yml", "jobs: [unclosed\n  - : :\n");

    let report = assess(repo.path()).json().passes();
    let ci_checks = ci_check_ids();
    assert!(ci_checks.len() > 5, "ci checks: {ci_checks:?}");

    let mut failed = 0;
    for id in &ci_checks {
        let check = report.check(id);
        if check["status"] != "fail" {
            continue;
        }
        failed += 1;
        let evidence = check["evidence"].as_str().unwrap();
        assert!(
            evidence.starts_with("could not parse CI configuration ("),
            "{id} evidence: {evidence}"
        );
        assert!(evidence.contains("ci.yml"), "{id} evidence: {evidence}");
    }
    assert!(failed > 0);
    assert!(ci_checks.iter().any(|id| id == "test_suite_exists"));
    assert_eq!(report.status("test_suite_exists"), "fail");
}

/// > A pipeline made only of includes still counts as CI.
#[test]
fn include_only_pipeline_counts_as_ci() {
    let repo = Repo::empty();
    repo.file(
        ".gitlab-ci.yml",
        "include:\n  - template: Auto-DevOps.gitlab-ci.yml\n",
    );

    let report = assess(repo.path()).json().passes();
    assert_eq!(report.status("ci_pipeline_exists"), "pass");
    assert_eq!(
        report.check("ci_pipeline_exists")["evidence"],
        "CI detected: gitlab"
    );
}

#[test]
fn not_applicable_checks_earn_nothing() {
    let repo = Repo::empty();
    let report = assess(repo.path()).json().passes();

    // No languages are detected, so the error-handling policy has nothing to judge.
    let check = report.check("error_handling_policy");
    assert_eq!(check["status"], "not_applicable");
    assert_eq!(check["passed"], false);
}

// =============================================================================
// DETERMINISM
// =============================================================================

/// > Same repository state yields identical JSON.
#[test]
fn json_output_is_deterministic() {
    let repo = Repo::harnessed();
    let first = assess(repo.path()).json().passes();
    let second = assess(repo.path()).json().passes();
    similar_asserts::assert_eq!(first.raw_json(), second.raw_json());
}

#[test]
fn parallel_run_matches_sequential() {
    let repo = Repo::harnessed();
    let sequential = assess(repo.path()).json().passes();
    let parallel = assess(repo.path()).args(&["--jobs"]).json().passes();
    similar_asserts::assert_eq!(sequential.raw_json(), parallel.raw_json());
}

// =============================================================================
// EXIT CODES
// =============================================================================

/// > Exit code 3 when the repository path is missing
#[test]
fn missing_repo_exits_3() {
    let repo = Repo::empty();
    let missing = repo.path().join("does-not-exist");
    assess(&missing)
        .exits(3)
        .stderr_has("invalid repository path");
}

#[test]
fn file_as_repo_exits_3() {
    let repo = Repo::empty();
    repo.file("README.md", "# demo\n");
    assess(&repo.path().join("README.md")).exits(3);
}

/// > --min-grade fails the run when the grade is worse
#[test]
fn min_grade_not_met_exits_1() {
    let repo = Repo::empty();
    assess(repo.path())
        .args(&["--min-grade", "A"])
        .exits(1)
        .stdout_has("Grade: F")
        .stderr_has("below the required A");
}

#[test]
fn min_grade_f_always_passes() {
    let repo = Repo::empty();
    assess(repo.path()).args(&["--min-grade", "f"]).passes();
}

#[test]
fn invalid_min_grade_exits_2() {
    let repo = Repo::empty();
    assess(repo.path()).args(&["--min-grade", "Z"]).exits(2);
}

// =============================================================================
// WALK LIMITS
// =============================================================================

#[test]
fn max_depth_flag_limits_indexing() {
    let repo = Repo::empty();
    repo.file("a/b/c/tests/test_deep.py", "def test_ok():\n    pass\n");

    let shallow = assess(repo.path()).args(&["--max-depth", "1"]).json().passes();
    assert_eq!(shallow.status("test_suite_exists"), "fail");

    let deep = assess(repo.path()).json().passes();
    assert_eq!(deep.status("test_suite_exists"), "partial");
}

#[test]
fn dependency_directories_are_not_indexed() {
    let repo = Repo::empty();
    repo.file("node_modules/pkg/tests/test_vendored.py", "def test_ok():\n    pass\n");

    let report = assess(repo.path()).json().passes();
    assert_eq!(report.status("test_suite_exists"), "fail");
}

#[test]
fn gitignore_does_not_hide_files() {
    let repo = Repo::empty();
    std::fs::create_dir(repo.path().join(".git")).unwrap();
    repo.file(".gitignore", "CODEOWNERS\n");
    repo.file("CODEOWNERS", "* @demo\n");

    let report = assess(repo.path()).json().passes();
    assert_eq!(report.status("code_review_required"), "pass");
}
