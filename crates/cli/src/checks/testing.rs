// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Testing and stability: tests define what correct means.

use std::sync::Arc;

use super::first_names;
use crate::check::{Category, Check, CheckResult};
use crate::ci::CiJob;
use crate::context::RepoContext;

pub fn checks() -> Vec<Arc<dyn Check>> {
    vec![
        Arc::new(TestSuiteExists),
        Arc::new(FeatureMatrixTesting),
        Arc::new(CoverageMeasurement),
        Arc::new(MutationTesting),
        Arc::new(PropertyBasedTesting),
        Arc::new(FuzzTesting),
        Arc::new(ContractTests),
        Arc::new(TestsBlockingCi),
    ]
}

/// Commands that run a test suite.
const TEST_RUNNERS: &str = r"cargo\s+(test|nextest)|pytest|jest|mocha|vitest|go\s+test|rspec|gradle\s+test|mvn\s+test|dotnet\s+test";

/// Words that mark a job as running tests.
const TEST_KEYWORDS: &[&str] = &["test", "pytest", "jest", "rspec", "nextest"];

fn step_text(job: &CiJob) -> String {
    job.steps.join(" ").to_lowercase()
}

define_check! {
    TestSuiteExists {
        id: "test_suite_exists",
        name: "Test Suite",
        description: "Tests present and executed in CI",
        source: "Kent Beck - tests define what correct means",
        category: Category::Testing,
        max_points: 3.0,
        uses_ci: true,
    }
}

impl TestSuiteExists {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        let has_tests = ctx
            .has_dir(&["tests", "test", "spec", "src/test", "__tests__"])
            .is_some()
            || ctx
                .has_file(&[
                    "tests/*.rs",
                    "tests/*.py",
                    "tests/*.ts",
                    "tests/*.js",
                    "**/test_*.py",
                    "**/*_test.go",
                    "**/*_test.rs",
                    "**/*.test.ts",
                    "**/*.test.js",
                    "**/*.spec.ts",
                    "**/*.spec.js",
                ])
                .is_some();

        let in_ci = ctx.ci_has_command(TEST_RUNNERS);

        match (has_tests, in_ci) {
            (true, true) => CheckResult::pass(self, "Tests present and executed in CI"),
            (true, false) => CheckResult::partial(
                self,
                1.5,
                "Tests found but not confirmed in CI",
                "Add test execution to your CI pipeline.",
            ),
            (false, _) => CheckResult::fail(
                self,
                "No test suite found",
                "Add tests and run them in CI; the tests define what correct means.",
            ),
        }
    }
}

const FEATURE_FLAGS: &[&str] = &[
    r"--all-features",
    r"--no-default-features",
    r"--features\s",
    r"NODE_ENV=",
];

define_check! {
    FeatureMatrixTesting {
        id: "feature_matrix_testing",
        name: "Feature Matrix Testing",
        description: "Multiple feature/configuration combinations tested in CI",
        source: "DORA 2025 - stability through comprehensive testing",
        category: Category::Testing,
        max_points: 3.0,
        uses_ci: true,
    }
}

impl FeatureMatrixTesting {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        let test_jobs: Vec<&str> = ctx
            .ci()
            .jobs
            .iter()
            .filter(|job| {
                let steps = step_text(job);
                TEST_KEYWORDS.iter().any(|kw| steps.contains(kw))
            })
            .map(|job| job.id.as_str())
            .collect();

        if test_jobs.len() >= 3 {
            return CheckResult::pass(
                self,
                format!("Multiple test jobs in CI: {}", first_names(&test_jobs, 5)),
            );
        }

        let raw = ctx.ci_raw_content().to_lowercase();
        if raw.contains("matrix") || raw.contains("parallel") {
            return CheckResult::pass(self, "Matrix/parallel testing strategy found in CI");
        }

        let variants = FEATURE_FLAGS
            .iter()
            .filter(|pattern| ctx.ci_has_command(pattern))
            .count();
        if variants >= 2 {
            return CheckResult::pass(
                self,
                format!("Feature combination testing found ({variants} variants)"),
            );
        }

        if test_jobs.len() == 2 {
            return CheckResult::partial(
                self,
                1.5,
                "Two test jobs found, consider adding more configurations",
                "Test with different feature flags, environments, or dependency versions.",
            );
        }

        CheckResult::fail(
            self,
            "Only one test configuration found",
            "Add CI jobs for different feature flags, environments, or dependency versions \
             (e.g. --all-features, --no-default-features, MSRV check).",
        )
    }
}

const COVERAGE_TOOLS: &[(&str, &str)] = &[
    ("llvm-cov/tarpaulin", r"llvm-cov|tarpaulin|cargo-llvm-cov"),
    ("coverage.py", r"coverage\.py|pytest-cov|--cov"),
    ("istanbul/nyc/c8", r"istanbul|nyc|c8\s"),
    ("jacoco/cobertura", r"jacoco|cobertura"),
    ("simplecov", r"simplecov"),
    ("go cover", r"go\s+tool\s+cover|gocover"),
    ("codecov/coveralls", r"codecov|coveralls"),
];

define_check! {
    CoverageMeasurement {
        id: "coverage_measurement",
        name: "Code Coverage",
        description: "Code coverage measured in CI",
        source: "DORA 2025 - stability feedback loops",
        category: Category::Testing,
        max_points: 4.0,
        uses_ci: true,
    }
}

impl CoverageMeasurement {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if let Some((tool, _)) = COVERAGE_TOOLS
            .iter()
            .find(|(_, pattern)| ctx.ci_has_command(pattern))
        {
            return CheckResult::pass(self, format!("Coverage measurement in CI: {tool}"));
        }

        if let Some(config) = ctx.has_file(&[
            ".codecov.yml",
            "codecov.yml",
            ".coveragerc",
            "coverage.config.js",
            "jest.config.*",
        ]) {
            return CheckResult::partial(
                self,
                2.0,
                format!("Coverage config found ({config}) but not confirmed in CI"),
                "Add coverage reporting to your CI pipeline.",
            );
        }

        CheckResult::fail(
            self,
            "No code coverage measurement found",
            "Add cargo llvm-cov, pytest-cov, istanbul/c8, or equivalent to CI.",
        )
    }
}

define_check! {
    MutationTesting {
        id: "mutation_testing",
        name: "Mutation Testing",
        description: "Mutation testing configured or running",
        source: "SlopCodeBench - code that 'appears correct but is unreliable'",
        category: Category::Testing,
        max_points: 4.0,
        uses_ci: true,
    }
}

impl MutationTesting {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if ctx.ci_has_command(r"cargo[\s-]mutants|stryker|mutmut|pitest|mull") {
            return CheckResult::pass(self, "Mutation testing found in CI");
        }

        if let Some(config) = ctx.has_file(&[
            "stryker.conf.js",
            "stryker.conf.json",
            ".stryker-tmp",
            "mutmut_config.py",
            ".mutmut",
        ]) {
            return CheckResult::partial(
                self,
                2.0,
                format!("Mutation testing config found ({config})"),
                "Add mutation testing to CI, even on a scheduled basis.",
            );
        }

        CheckResult::fail(
            self,
            "No mutation testing found",
            "Add cargo-mutants (Rust), Stryker (JS/TS), mutmut (Python), or PIT (Java).",
        )
    }
}

/// Languages with a mainstream property-testing library.
const PROPERTY_LANGUAGES: &[&str] = &["rust", "python", "javascript", "typescript", "go"];

fn has_property_language(ctx: &RepoContext) -> bool {
    PROPERTY_LANGUAGES.iter().any(|lang| ctx.has_language(lang))
}

const DEPENDENCY_MANIFESTS: &[&str] = &[
    "**/cargo.toml",
    "**/pyproject.toml",
    "**/package.json",
    "**/go.mod",
];

const PROPERTY_LIBRARIES: &str = r"proptest|quickcheck|arbtest|hypothesis|fast-check|jsverify|rapid";

const PROPERTY_TEST_FILES: &[&str] = &["tests/*.rs", "tests/*.py", "**/test_*.py", "**/*.test.ts"];

const PROPERTY_TEST_MARKERS: &str = r"proptest!|@given|fc\.(assert|property)|rapid\.Check";

define_check! {
    PropertyBasedTesting {
        id: "property_based_testing",
        name: "Property-Based Testing",
        description: "Property-based or generative testing libraries used",
        source: "Blog: catching edge cases in AI-generated code",
        category: Category::Testing,
        max_points: 3.0,
        applies_to: has_property_language,
    }
}

impl PropertyBasedTesting {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if let Some(manifest) = DEPENDENCY_MANIFESTS
            .iter()
            .find_map(|pattern| ctx.search_any_file(&[*pattern], PROPERTY_LIBRARIES))
        {
            return CheckResult::pass(
                self,
                format!("Property-based testing library found in {manifest}"),
            );
        }

        if let Some(file) = ctx.search_any_file(PROPERTY_TEST_FILES, PROPERTY_TEST_MARKERS) {
            return CheckResult::pass(self, format!("Property-based tests found in {file}"));
        }

        CheckResult::fail(
            self,
            "No property-based testing found",
            "Add proptest (Rust), hypothesis (Python), or fast-check (JS/TS) \
             for testing invariants with random structured inputs.",
        )
    }
}

define_check! {
    FuzzTesting {
        id: "fuzz_testing",
        name: "Fuzz Testing",
        description: "Fuzz testing targets present",
        source: "Blog: 80% problem - catching what AI misses",
        category: Category::Testing,
        max_points: 3.0,
        uses_ci: true,
    }
}

impl FuzzTesting {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        if let Some(dir) = ctx.has_dir(&["fuzz", "fuzz_targets", "fuzzing"]) {
            return CheckResult::pass(self, format!("Fuzz testing directory found: {dir}"));
        }

        if let Some(target) = ctx.has_file(&[
            "fuzz/fuzz_targets/*.rs",
            "fuzz/*.py",
            "**/fuzz_test.go",
            "**/*_fuzz_test.go",
        ]) {
            return CheckResult::pass(self, format!("Fuzz target found: {target}"));
        }

        if ctx.ci_has_command(r"cargo\s+fuzz|go\s+test.*-fuzz|afl-fuzz|honggfuzz") {
            return CheckResult::pass(self, "Fuzz testing found in CI");
        }

        CheckResult::fail(
            self,
            "No fuzz testing found",
            "Add fuzz targets for parsing-heavy and input-handling code paths.",
        )
    }
}

/// Names that mark contract, golden or snapshot tests, in a file or directory name.
const CONTRACT_PATTERNS: &[&str] = &[
    "**/*contract*",
    "**/*contract*/**",
    "**/*golden*",
    "**/*golden*/**",
    "**/*compat*",
    "**/*compat*/**",
    "**/*snapshot*",
    "**/*snapshot*/**",
    "**/*fixture*",
    "**/*fixture*/**",
];

const CONTRACT_EXTENSIONS: &[&str] = &[".rs", ".py", ".ts", ".js", ".go", ".json"];

define_check! {
    ContractTests {
        id: "contract_tests",
        name: "Contract / Compatibility Tests",
        description: "Tests that verify external interface contracts or compatibility",
        source: "OpenAI Harness Engineering - mechanical constraints",
        category: Category::Testing,
        max_points: 3.0,
        uses_ci: true,
    }
}

impl ContractTests {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        let files: Vec<&str> = ctx
            .find_files(CONTRACT_PATTERNS)
            .into_iter()
            .filter(|path| CONTRACT_EXTENSIONS.iter().any(|ext| path.ends_with(ext)))
            .collect();

        if !files.is_empty() {
            return CheckResult::pass(
                self,
                format!(
                    "Contract/compatibility tests found: {}",
                    first_names(&files, 3)
                ),
            );
        }

        if ctx.ci_has_command(r"golden|snapshot|contract") {
            return CheckResult::pass(self, "Contract/snapshot testing found in CI");
        }

        CheckResult::fail(
            self,
            "No contract or compatibility tests found",
            "Add contract tests that verify external interface stability \
             (golden fixtures, snapshot tests, wire-format checks).",
        )
    }
}

define_check! {
    TestsBlockingCi {
        id: "tests_blocking_ci",
        name: "Tests Block Merge",
        description: "Test jobs are blocking (not allow_failure)",
        source: "DORA 2025 - stability metrics",
        category: Category::Testing,
        max_points: 2.0,
        uses_ci: true,
    }
}

impl TestsBlockingCi {
    fn evaluate(&self, ctx: &RepoContext) -> CheckResult {
        let mut blocking = Vec::new();
        let mut non_blocking = Vec::new();

        for job in &ctx.ci().jobs {
            let id = job.id.to_lowercase();
            let steps = step_text(job);
            let is_test_job = TEST_KEYWORDS
                .iter()
                .chain(&["spec"])
                .any(|kw| id.contains(kw) || steps.contains(kw));
            if !is_test_job {
                continue;
            }
            if job.allow_failure {
                non_blocking.push(job.id.as_str());
            } else {
                blocking.push(job.id.as_str());
            }
        }

        match (blocking.is_empty(), non_blocking.is_empty()) {
            (false, true) => CheckResult::pass(
                self,
                format!("All test jobs are blocking: {}", first_names(&blocking, 3)),
            ),
            (false, false) => CheckResult::partial(
                self,
                1.0,
                format!(
                    "Some test jobs are allow_failure: {}",
                    first_names(&non_blocking, 3)
                ),
                "Make all test jobs blocking to prevent merging broken code.",
            ),
            (true, false) => CheckResult::fail(
                self,
                format!(
                    "Test jobs found but all are allow_failure: {}",
                    first_names(&non_blocking, 3)
                ),
                "Remove allow_failure from test jobs.",
            ),
            (true, true) => CheckResult::fail(
                self,
                "No test jobs found in CI",
                "Add test execution to CI as a blocking job.",
            ),
        }
    }
}

#[cfg(test)]
#[path = "testing_tests.rs"]
mod tests;
