// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::check::CheckStatus;
use crate::test_utils::repo_context;

fn workflow(steps: &[&str], continue_on_error: bool) -> String {
    let mut yaml = String::from("on: push\njobs:\n  check:\n");
    if continue_on_error {
        yaml.push_str("    continue-on-error: true\n");
    }
    yaml.push_str("    steps:\n");
    for step in steps {
        yaml.push_str(&format!("      - run: {step}\n"));
    }
    yaml
}

#[test]
fn ci_pipeline_reports_platforms() {
    let ci = workflow(&["make"], false);
    let (_dir, ctx) = repo_context(&[
        (".github/workflows/ci.yml", ci.as_str()),
        (".gitlab-ci.yml", "build:\n  script: make\n"),
    ]);
    assert_eq!(
        CiPipelineExists.run(&ctx).evidence,
        "CI detected: gitlab, github"
    );
}

#[test]
fn ci_pipeline_accepts_other_platforms() {
    let (_dir, ctx) = repo_context(&[("Jenkinsfile", "pipeline {}")]);
    assert_eq!(
        CiPipelineExists.run(&ctx).evidence,
        "CI config found: Jenkinsfile"
    );
}

#[test]
fn ci_pipeline_counts_include_only_pipeline() {
    let (_dir, ctx) = repo_context(&[(
        ".gitlab-ci.yml",
        "include:\n  - template: Auto-DevOps.gitlab-ci.yml\n",
    )]);
    assert!(ctx.ci().is_empty());

    let result = CiPipelineExists.run(&ctx);
    assert_eq!(result.status, CheckStatus::Pass);
    assert_eq!(result.evidence, "CI detected: gitlab");
}

#[test]
fn ci_pipeline_counts_workflow_without_jobs() {
    let (_dir, ctx) = repo_context(&[(".github/workflows/ci.yml", "on: push\njobs: {}\n")]);
    assert_eq!(CiPipelineExists.run(&ctx).status, CheckStatus::Pass);
}

#[test]
fn ci_pipeline_missing() {
    let (_dir, ctx) = repo_context(&[]);
    assert_eq!(CiPipelineExists.run(&ctx).status, CheckStatus::Fail);
}

#[test]
fn blocking_linter_passes() {
    let ci = workflow(&["cargo clippy -- -D warnings"], false);
    let (_dir, ctx) = repo_context(&[(".github/workflows/ci.yml", ci.as_str())]);
    let result = LinterEnforcement.run(&ctx);
    assert_eq!(result.status, CheckStatus::Pass);
    assert_eq!(result.evidence, "Blocking linter found in CI: clippy");
}

#[test]
fn non_blocking_linter_is_partial() {
    let ci = workflow(&["npx eslint ."], true);
    let (_dir, ctx) = repo_context(&[(".github/workflows/ci.yml", ci.as_str())]);
    let result = LinterEnforcement.run(&ctx);
    assert_eq!(result.status, CheckStatus::Partial);
    assert_eq!(result.earned, 2.0);
}

#[test]
fn formatter_requires_check_flag() {
    let ci = workflow(&["cargo fmt"], false);
    let (_dir, ctx) = repo_context(&[(".github/workflows/ci.yml", ci.as_str())]);
    assert_eq!(FormatterEnforcement.run(&ctx).status, CheckStatus::Fail);

    let ci = workflow(&["cargo fmt --all -- --check"], false);
    let (_dir, ctx) = repo_context(&[(".github/workflows/ci.yml", ci.as_str())]);
    assert_eq!(FormatterEnforcement.run(&ctx).status, CheckStatus::Pass);
}

#[test]
fn type_safety_not_applicable_without_language() {
    let (_dir, ctx) = repo_context(&[("README.md", "")]);
    assert!(!TypeSafety.applies_to(&ctx));
}

#[test]
fn type_safety_compiled_language_passes() {
    let (_dir, ctx) = repo_context(&[("go.mod", "module x")]);
    assert!(TypeSafety.applies_to(&ctx));
    assert_eq!(
        TypeSafety.run(&ctx).evidence,
        "Go: type safety enforced by compiler"
    );
}

#[test]
fn type_safety_typescript_strictness() {
    let (_dir, ctx) = repo_context(&[(
        "tsconfig.json",
        r#"{ "compilerOptions": { "strict": true } }"#,
    )]);
    assert_eq!(TypeSafety.run(&ctx).status, CheckStatus::Pass);

    let (_dir, ctx) = repo_context(&[("tsconfig.json", "{}")]);
    let result = TypeSafety.run(&ctx);
    assert_eq!(result.status, CheckStatus::Partial);
    assert_eq!(result.earned, 1.5);
}

#[test]
fn type_safety_python_config_only_is_partial() {
    let (_dir, ctx) = repo_context(&[("pyproject.toml", "[tool.mypy]\nstrict = true\n")]);
    assert_eq!(TypeSafety.run(&ctx).status, CheckStatus::Partial);
}

#[test]
fn dependency_audit_ladder() {
    let ci = workflow(&["cargo deny check"], false);
    let (_dir, ctx) = repo_context(&[(".github/workflows/ci.yml", ci.as_str())]);
    assert_eq!(DependencyAuditing.run(&ctx).earned, 4.0);

    let ci = workflow(&["npm audit"], true);
    let (_dir, ctx) = repo_context(&[(".github/workflows/ci.yml", ci.as_str())]);
    assert_eq!(DependencyAuditing.run(&ctx).earned, 2.0);

    let (_dir, ctx) = repo_context(&[("deny.toml", "")]);
    assert_eq!(DependencyAuditing.run(&ctx).earned, 1.0);

    let (_dir, ctx) = repo_context(&[]);
    assert_eq!(DependencyAuditing.run(&ctx).earned, 0.0);
}

#[test]
fn conventional_commits_config_file() {
    let (_dir, ctx) = repo_context(&[("commitlint.config.js", "module.exports = {}")]);
    assert_eq!(ConventionalCommits.run(&ctx).status, CheckStatus::Pass);
}

#[test]
fn unsafe_code_policy_from_cargo_lints() {
    let (_dir, ctx) = repo_context(&[(
        "Cargo.toml",
        "[workspace.lints.rust]\nunsafe_code = \"forbid\"\n",
    )]);
    assert_eq!(
        UnsafeCodePolicy.run(&ctx).evidence,
        "Rust: unsafe_code = forbid"
    );
}

#[test]
fn unsafe_code_policy_from_raw_ci() {
    let (_dir, ctx) = repo_context(&[(
        ".gitlab-ci.yml",
        "include:\n  - template: Security/SAST.gitlab-ci.yml\nbuild:\n  script: make\n",
    )]);
    assert_eq!(
        UnsafeCodePolicy.run(&ctx).evidence,
        "SAST scanning found in CI"
    );
}

#[test]
fn registers_seven_constraint_checks() {
    let checks = checks();
    assert_eq!(checks.len(), 7);
    let total: f64 = checks.iter().map(|c| c.max_points()).sum();
    assert_eq!(total, 22.0);
}
