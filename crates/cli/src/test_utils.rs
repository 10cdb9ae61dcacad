//! Shared unit test utilities.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::check::{Category, CheckResult, CheckStatus};
use crate::context::{ContextOptions, RepoContext};
use crate::scoring::{Assessment, CategoryInput, aggregate};

/// Creates a temp directory laid out as a repository from (path, content) pairs.
pub fn temp_repo(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    create_tree(dir.path(), files);
    dir
}

/// Builds a context over a fresh repository; keep the `TempDir` alive.
pub fn repo_context(files: &[(&str, &str)]) -> (TempDir, RepoContext) {
    let dir = temp_repo(files);
    let ctx = RepoContext::build(dir.path(), &ContextOptions::default()).unwrap();
    (dir, ctx)
}

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
///
/// # Example
///
/// ```ignore
/// let tmp = TempDir::new().unwrap();
/// create_tree(tmp.path(), &[
///     ("src/lib.rs", "fn main() {}"),
///     ("tests/smoke.rs", "#[test] fn smoke() {}"),
/// ]);
/// ```
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

/// An assessment with one scored category: a pass, a fail, a partial and an
/// N/A in documentation, nothing elsewhere.
pub fn sample_assessment() -> Assessment {
    let result = |id: &str, earned: f64, max: f64, status: CheckStatus, remediation: &str| {
        CheckResult {
            id: id.to_string(),
            name: id.replace('_', " "),
            category: Category::Documentation,
            earned,
            max_points: max,
            status,
            evidence: format!("evidence for {id}"),
            remediation: remediation.to_string(),
            source: "DORA 2025 Report".to_string(),
        }
    };
    let categories = Category::ALL
        .iter()
        .map(|c| {
            let results = if *c == Category::Documentation {
                vec![
                    result("architecture_doc", 5.0, 5.0, CheckStatus::Pass, ""),
                    result("adr_presence", 0.0, 3.0, CheckStatus::Fail, "Write ADRs."),
                    result("api_contracts", 1.5, 3.0, CheckStatus::Partial, "Publish a spec."),
                    result("type_safety", 0.0, 3.0, CheckStatus::NotApplicable, ""),
                ]
            } else {
                vec![]
            };
            CategoryInput::new(*c, c.default_weight(), results)
        })
        .collect();
    aggregate("demo", vec!["rust".to_string()], categories).unwrap()
}

/// An assessment of nothing: every category empty.
pub fn empty_assessment() -> Assessment {
    let categories = Category::ALL
        .iter()
        .map(|c| CategoryInput::new(*c, c.default_weight(), vec![]))
        .collect();
    aggregate("empty", vec![], categories).unwrap()
}
