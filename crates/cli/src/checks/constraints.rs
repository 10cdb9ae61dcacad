// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mechanical constraints: rules enforced by tools and CI gates.

use std::sync::Arc;

use crate::check::{Category, Check, CheckResult};
use crate::context::RepoContext;

pub fn checks() -> Vec<Arc<dyn Check>> {
    vec![
        Arc::new(CiPipelineExists),
        Arc::new(LinterEnforcement),
        Arc::new(FormatterEnforcement),
        Arc::new(TypeSafety),
        Arc::new(DependencyAuditing),
        Arc::new(ConventionalCommits),
        Arc::new(UnsafeCodePolicy),
    ]
}

/// CI files of platforms the unifier does not parse.
const OTHER_CI_FILES: &[&str] = &[
    ".travis.yml",
    "Jenkinsfile",
    ".circleci/config.yml",
    "azure-pipelines.yml",
    "bitbucket-pipelines.yml",
];

define_check! {
    CiPipelineExists {
        id: "ci_pipeline_exists",
        name: "CI Pipeline",
        description: "CI configuration present for automated checks",
        source: "DORA 2025 Report",
        category: Category::Constraints,
        max_points: 3.0,
        uses_ci: true,
    }
}

impl CiPipelineExists {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        let platforms = ctx.ci_platforms();
        if !platforms.is_empty() {
            return CheckResult::pass(self, format!("CI detected: {}", platforms.join(", ")));
        }

        if let Some(found) = ctx.has_file(OTHER_CI_FILES) {
            return CheckResult::pass(self, format!("CI config found: {found}"));
        }

        CheckResult::fail(
            self,
            "No CI configuration found",
            "Add .gitlab-ci.yml or .github/workflows/ to run automated checks on every change.",
        )
    }
}

/// (tool, pattern) pairs for lint runs.
const LINTERS: &[(&str, &str)] = &[
    ("clippy", r"cargo\s+clippy"),
    ("eslint", r"eslint"),
    ("flake8", r"flake8"),
    ("pylint", r"pylint"),
    ("ruff", r"ruff\s+(check|\.)"),
    ("rubocop", r"rubocop"),
    ("golangci-lint", r"golangci-lint"),
    ("mypy", r"mypy"),
    ("pyright", r"pyright"),
    ("ktlint", r"ktlint"),
    ("swiftlint", r"swiftlint"),
];

define_check! {
    LinterEnforcement {
        id: "linter_enforcement",
        name: "Linter Enforcement",
        description: "Linter runs in CI with blocking severity",
        source: "OpenAI Harness Engineering - mechanical constraints",
        category: Category::Constraints,
        max_points: 4.0,
        uses_ci: true,
    }
}

impl LinterEnforcement {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if let Some((tool, _)) = LINTERS
            .iter()
            .find(|(_, pattern)| ctx.ci_has_blocking_command(pattern))
        {
            return CheckResult::pass(self, format!("Blocking linter found in CI: {tool}"));
        }

        if let Some((tool, _)) = LINTERS
            .iter()
            .find(|(_, pattern)| ctx.ci_has_command(pattern))
        {
            return CheckResult::partial(
                self,
                2.0,
                format!("Linter found in CI ({tool}) but not blocking"),
                "Ensure the linter job is not set to allow_failure / continue-on-error.",
            );
        }

        CheckResult::fail(
            self,
            "No linter found in CI",
            "Add a linter to CI that blocks merges on violations \
             (e.g. cargo clippy -- -D warnings, eslint --max-warnings 0).",
        )
    }
}

const FORMATTERS: &[(&str, &str)] = &[
    ("cargo fmt", r"cargo\s+fmt.*--check"),
    ("prettier", r"prettier\s+--check"),
    ("black", r"black\s+--check"),
    ("ruff format", r"ruff\s+format\s+--check"),
    ("gofmt", r"gofmt\s+-l"),
    ("goimports", r"goimports"),
    ("rustfmt", r"rustfmt.*--check"),
    ("scalafmt", r"scalafmt\s+--check"),
];

define_check! {
    FormatterEnforcement {
        id: "formatter_enforcement",
        name: "Formatter Enforcement",
        description: "Code formatter check runs in CI",
        source: "OpenAI Harness Engineering - mechanical constraints",
        category: Category::Constraints,
        max_points: 3.0,
        uses_ci: true,
    }
}

impl FormatterEnforcement {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        match FORMATTERS
            .iter()
            .find(|(_, pattern)| ctx.ci_has_command(pattern))
        {
            Some((tool, _)) => {
                CheckResult::pass(self, format!("Formatter check found in CI: {tool}"))
            }
            None => CheckResult::fail(
                self,
                "No formatter check found in CI",
                "Add a formatter check to CI (e.g. cargo fmt --all -- --check, prettier --check).",
            ),
        }
    }
}

fn has_any_language(ctx: &RepoContext) -> bool {
    !ctx.languages().is_empty()
}

define_check! {
    TypeSafety {
        id: "type_safety",
        name: "Type Safety",
        description: "Type checking enforced via language features or tools",
        source: "SlopCodeBench - preventing subtle type errors",
        category: Category::Constraints,
        max_points: 3.0,
        uses_ci: true,
        applies_to: has_any_language,
    }
}

impl TypeSafety {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if ctx.has_language("rust") {
            return CheckResult::pass(self, "Rust: type safety enforced by compiler");
        }
        if ctx.has_language("go") {
            return CheckResult::pass(self, "Go: type safety enforced by compiler");
        }
        if ctx.has_language("java") || ctx.has_language("kotlin") {
            return CheckResult::pass(self, "JVM language: type safety enforced by compiler");
        }

        if let Some(tsconfig) = ctx.has_file(&["tsconfig.json"]) {
            if ctx.search_file(tsconfig, r#""strict"\s*:\s*true"#) {
                return CheckResult::pass(self, "TypeScript strict mode enabled");
            }
            return CheckResult::partial(
                self,
                1.5,
                "TypeScript found but strict mode not confirmed",
                "Enable \"strict\": true in tsconfig.json.",
            );
        }

        if ctx.ci_has_command(r"mypy|pyright|pytype") {
            return CheckResult::pass(self, "Python type checker found in CI");
        }

        if let Some(pyproject) = ctx.has_file(&["pyproject.toml"])
            && ctx.search_file(pyproject, r"\[tool\.mypy\]|\[tool\.pyright\]")
        {
            return CheckResult::partial(
                self,
                1.5,
                "Type checker configured but not confirmed in CI",
                "Add mypy/pyright to your CI pipeline.",
            );
        }

        CheckResult::fail(
            self,
            "No type safety enforcement found",
            "Use a statically typed language, enable TypeScript strict mode, \
             or add mypy/pyright to CI for Python.",
        )
    }
}

const AUDITORS: &[(&str, &str)] = &[
    ("cargo audit/deny", r"cargo\s+(audit|deny)"),
    ("npm audit", r"npm\s+audit"),
    ("safety", r"safety\s+check"),
    ("pip-audit", r"pip-audit"),
    ("snyk", r"snyk\s+test"),
    ("trivy", r"trivy\s+fs"),
    ("grype", r"grype"),
    ("dependency scanning", r"dependency.scanning"),
    ("gemnasium", r"gemnasium"),
    ("dependabot", r"dependabot"),
    ("renovate", r"renovate"),
];

define_check! {
    DependencyAuditing {
        id: "dependency_auditing",
        name: "Dependency Auditing",
        description: "Dependency vulnerability scanning in CI (blocking)",
        source: "Blog: security infrastructure reliability",
        category: Category::Constraints,
        max_points: 4.0,
        uses_ci: true,
    }
}

impl DependencyAuditing {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if let Some((tool, _)) = AUDITORS
            .iter()
            .find(|(_, pattern)| ctx.ci_has_blocking_command(pattern))
        {
            return CheckResult::pass(self, format!("Blocking dependency audit in CI: {tool}"));
        }

        if let Some((tool, _)) = AUDITORS
            .iter()
            .find(|(_, pattern)| ctx.ci_has_command(pattern))
        {
            return CheckResult::partial(
                self,
                2.0,
                format!("Dependency audit found ({tool}) but set to allow_failure"),
                "Make the audit job blocking (remove allow_failure / continue-on-error).",
            );
        }

        if let Some(config) =
            ctx.has_file(&["deny.toml", ".cargo/audit.toml", ".snyk", "renovate.json"])
        {
            return CheckResult::partial(
                self,
                1.0,
                format!("Audit config found ({config}) but not confirmed in CI"),
                "Add the audit tool to your CI pipeline as a blocking job.",
            );
        }

        CheckResult::fail(
            self,
            "No dependency auditing found",
            "Add cargo deny/audit, npm audit, pip-audit, or Snyk to CI as a blocking check.",
        )
    }
}

define_check! {
    ConventionalCommits {
        id: "conventional_commits",
        name: "Conventional Commits",
        description: "Commit or MR title format enforced in CI",
        source: "DORA 2025 - working in small batches",
        category: Category::Constraints,
        max_points: 2.0,
        uses_ci: true,
    }
}

impl ConventionalCommits {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if ctx.ci_has_command(r"commitlint|conventional-changelog|semantic-release") {
            return CheckResult::pass(self, "Conventional commit enforcement found in CI");
        }

        if let Some(config) = ctx.has_file(&[
            ".commitlintrc.yml",
            ".commitlintrc.json",
            ".commitlintrc.js",
            "commitlint.config.js",
            ".releaserc.json",
            ".releaserc.yml",
        ]) {
            return CheckResult::pass(self, format!("Commit lint config found: {config}"));
        }

        CheckResult::fail(
            self,
            "No conventional commit enforcement found",
            "Add commitlint or equivalent to CI to enforce consistent commit message format.",
        )
    }
}

define_check! {
    UnsafeCodePolicy {
        id: "unsafe_code_policy",
        name: "Unsafe Code Policy",
        description: "Explicit policy against dangerous code patterns",
        source: "Blog: 80% problem in AI-generated code",
        category: Category::Constraints,
        max_points: 3.0,
        uses_ci: true,
    }
}

impl UnsafeCodePolicy {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if let Some(cargo) = ctx.has_file(&["cargo.toml"])
            && ctx.search_file(cargo, r#"unsafe_code\s*=\s*"forbid""#)
        {
            return CheckResult::pass(self, "Rust: unsafe_code = forbid");
        }

        if let Some(eslint) = ctx.has_file(&[
            ".eslintrc.json",
            ".eslintrc.yml",
            ".eslintrc.js",
            "eslint.config.js",
        ]) && ctx.search_file(eslint, r"no-eval|no-implied-eval")
        {
            return CheckResult::pass(self, "ESLint unsafe pattern rules found");
        }

        if ctx.ci_has_command(r"semgrep|bandit|brakeman|gosec") {
            return CheckResult::pass(self, "Security linter found in CI");
        }

        let raw = ctx.ci_raw_content().to_lowercase();
        if raw.contains("sast") || raw.contains("semgrep") {
            return CheckResult::pass(self, "SAST scanning found in CI");
        }

        CheckResult::fail(
            self,
            "No explicit policy against unsafe code patterns",
            "Add unsafe_code = forbid (Rust), security linting (semgrep/bandit), \
             or ESLint rules against dangerous patterns.",
        )
    }
}

#[cfg(test)]
#[path = "constraints_tests.rs"]
mod tests;
