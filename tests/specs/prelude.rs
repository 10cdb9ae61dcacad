//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running the scorecard binary against
//! temporary repositories.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the scorecard binary
pub fn scorecard_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("scorecard"));
    for key in ["SCORECARD_CONFIG", "SCORECARD_LOG", "COLOR", "NO_COLOR"] {
        cmd.env_remove(key);
    }
    cmd
}

/// Ids of every registered check whose outcome depends on CI configuration.
pub fn ci_check_ids() -> Vec<String> {
    let output = scorecard_cmd()
        .args(["checks", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let checks: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    checks
        .as_array()
        .unwrap()
        .iter()
        .filter(|c| c["uses_ci"] == true)
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect()
}

/// Create an assess builder for the given repository
pub fn assess(repo: &Path) -> AssessBuilder<Text> {
    AssessBuilder::new(repo)
}

/// Typestate markers for output mode
pub struct Text;
pub struct Json;

/// High-level assess builder for fluent test assertions
pub struct AssessBuilder<Mode = Text> {
    repo: PathBuf,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    _mode: PhantomData<Mode>,
}

#[allow(dead_code)]
impl AssessBuilder<Text> {
    fn new(repo: &Path) -> Self {
        Self {
            repo: repo.to_path_buf(),
            args: Vec::new(),
            envs: Vec::new(),
            _mode: PhantomData,
        }
    }

    pub fn json(self) -> AssessBuilder<Json> {
        AssessBuilder {
            repo: self.repo,
            args: self.args,
            envs: self.envs,
            _mode: PhantomData,
        }
    }

    pub fn passes(self) -> RunAssert {
        run_exits(self.command(), 0)
    }

    pub fn exits(self, code: i32) -> RunAssert {
        run_exits(self.command(), code)
    }
}

impl AssessBuilder<Json> {
    pub fn passes(self) -> AssessmentJson {
        let output = run_exits(self.command(), 0);
        AssessmentJson::new(&output.output.stdout)
    }
}

#[allow(dead_code)]
impl<Mode: 'static> AssessBuilder<Mode> {
    /// Add CLI arguments after `assess <repo>`
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    fn command(self) -> Command {
        let is_json = std::any::TypeId::of::<Mode>() == std::any::TypeId::of::<Json>();
        let mut cmd = scorecard_cmd();
        cmd.arg("assess").arg(&self.repo);
        if is_json {
            cmd.args(["-o", "json"]);
        }
        cmd.args(&self.args);
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd
    }
}

fn run_exits(mut cmd: Command, code: i32) -> RunAssert {
    let output = cmd.output().expect("command should run");
    assert_eq!(
        output.status.code(),
        Some(code),
        "unexpected exit code\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    RunAssert { output }
}

/// Parsed JSON report
pub struct AssessmentJson {
    value: serde_json::Value,
    raw: String,
}

#[allow(dead_code)]
impl AssessmentJson {
    fn new(stdout: &[u8]) -> Self {
        let raw = String::from_utf8_lossy(stdout).into_owned();
        let value = serde_json::from_str(&raw).expect("output should be valid JSON");
        Self { value, raw }
    }

    pub fn value(&self) -> &serde_json::Value {
        &self.value
    }

    pub fn raw_json(&self) -> &str {
        &self.raw
    }

    pub fn overall(&self) -> f64 {
        self.value["overall_score"].as_f64().unwrap()
    }

    pub fn grade(&self) -> &str {
        self.value["grade"].as_str().unwrap()
    }

    /// Find a category by id
    pub fn category(&self, id: &str) -> &serde_json::Value {
        self.value["categories"]
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["category_id"] == id)
            .unwrap_or_else(|| panic!("category {id} missing:\n{}", self.raw))
    }

    /// Find a check result by id across all categories
    pub fn check(&self, id: &str) -> &serde_json::Value {
        self.value["categories"]
            .as_array()
            .unwrap()
            .iter()
            .flat_map(|c| c["checks"].as_array().unwrap())
            .find(|c| c["check_id"] == id)
            .unwrap_or_else(|| panic!("check {id} missing:\n{}", self.raw))
    }

    pub fn status(&self, id: &str) -> &str {
        self.check(id)["status"].as_str().unwrap()
    }
}

/// Result of a run for chaining assertions
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = self.stdout();
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = self.stdout();
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = self.stderr();
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }
}

// =============================================================================
// Repo
// =============================================================================

/// Temporary repository with helper methods.
///
/// Parent directories are created automatically and errors panic.
pub struct Repo {
    dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl Repo {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// A small Rust project with tests, a blocking CI test job, CODEOWNERS
    /// and a lint configuration.
    pub fn harnessed() -> Self {
        let repo = Self::empty();
        repo.file(
            "Cargo.toml",
            "[package]\nname = \"demo\"\nversion = \"0.1.0\"\nedition = \"2021\"\n",
        );
        repo.file("src/lib.rs", "pub fn add(a: i32, b: i32) -> i32 { a + b }\n");
        repo.file("tests/basic.rs", "#[test]\nfn adds() { assert_eq!(demo::add(1, 2), 3); }\n");
        repo.file("clippy.toml", "msrv = \"1.75\"\n");
        repo.file("CODEOWNERS", "* @demo/maintainers\n");
        repo.file(
            ".github/workflows/ci.yml",
            r#"name: ci
on: [push, pull_request]
jobs:
  test:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - run: cargo clippy -- -D warnings
      - run: cargo test
"#,
        );
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write scorecard.toml (prefixes `version = 1` if not present)
    pub fn config(&self, content: &str) {
        let content = if content.contains("version") {
            content.to_string()
        } else {
            format!("version = 1\n{}", content)
        };
        self.file("scorecard.toml", &content);
    }

    /// Write a file at the given path
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }
}
