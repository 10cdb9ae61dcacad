// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded repository walking.
//!
//! Uses the `ignore` crate's walker with every ignore-file source turned
//! off: the index reflects what is in the clone, not what a local git
//! configuration hides. Symlinks are never followed, directories below
//! `max_depth` are not entered, and files over `max_file_size` are skipped.
//! Output is sorted by relative path.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use ignore::overrides::{Override, OverrideBuilder};

use crate::error::{Error, Result};
use crate::reader::{MAX_FILE_SIZE, display_size};

/// Default maximum directory depth.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Directory names never entered, at any depth.
pub const SKIP_DIRECTORIES: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "target",
    "__pycache__",
    ".venv",
    "venv",
    "dist",
    "build",
    ".tox",
    ".mypy_cache",
    ".pytest_cache",
    "vendor",
    ".bundle",
    ".cargo",
];

/// Limits applied while walking.
#[derive(Debug, Clone)]
pub struct WalkLimits {
    /// Deepest directory level entered; the root is level 0.
    pub max_depth: Option<usize>,
    /// Files larger than this are left out.
    pub max_file_size: u64,
    /// Globs relative to the root whose matches are left out.
    pub exclude: Vec<String>,
}

impl Default for WalkLimits {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            max_file_size: MAX_FILE_SIZE,
            exclude: Vec::new(),
        }
    }
}

/// A regular file inside the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedFile {
    /// Forward-slash path relative to the root.
    pub relative: String,
    pub path: PathBuf,
    pub size: u64,
}

/// Counters for what the walk left out.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WalkStats {
    pub files_found: usize,
    pub files_skipped_size: usize,
    pub symlinks_skipped: usize,
    pub errors: usize,
}

/// Result of walking a repository.
#[derive(Debug, Default)]
pub struct Walk {
    pub files: Vec<WalkedFile>,
    pub stats: WalkStats,
}

/// Single-threaded walker over one repository root.
pub struct RepoWalker {
    limits: WalkLimits,
}

impl RepoWalker {
    pub fn new(limits: WalkLimits) -> Self {
        Self { limits }
    }

    /// Walk `root`, collecting every regular file within the limits.
    ///
    /// Unreadable entries are counted and skipped.
    pub fn walk(&self, root: &Path) -> Result<Walk> {
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .hidden(false)
            .follow_links(false)
            .max_depth(self.limits.max_depth)
            .filter_entry(|entry| !is_skipped_dir(entry));
        if let Some(overrides) = self.excludes(root)? {
            builder.overrides(overrides);
        }

        let mut walk = Walk::default();
        for entry in builder.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("walk error: {}", e);
                    walk.stats.errors += 1;
                    continue;
                }
            };
            let Some(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_symlink() {
                tracing::debug!("not following symlink {}", entry.path().display());
                walk.stats.symlinks_skipped += 1;
                continue;
            }
            if !file_type.is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(root).map(to_slash) else {
                continue;
            };

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    tracing::warn!("cannot stat {}: {}", relative, e);
                    walk.stats.errors += 1;
                    continue;
                }
            };
            if size > self.limits.max_file_size {
                tracing::warn!(
                    "skipping {} ({} > {} limit)",
                    relative,
                    display_size(size),
                    display_size(self.limits.max_file_size)
                );
                walk.stats.files_skipped_size += 1;
                continue;
            }

            walk.stats.files_found += 1;
            walk.files.push(WalkedFile {
                relative,
                path: entry.into_path(),
                size,
            });
        }

        walk.files.sort_by(|a, b| a.relative.cmp(&b.relative));
        Ok(walk)
    }

    /// Override set that excludes every configured glob.
    fn excludes(&self, root: &Path) -> Result<Option<Override>> {
        if self.limits.exclude.is_empty() {
            return Ok(None);
        }
        let mut overrides = OverrideBuilder::new(root);
        for pattern in &self.limits.exclude {
            if let Err(e) = overrides.add(&format!("!{pattern}")) {
                tracing::warn!("invalid ignore pattern '{}': {}", pattern, e);
            }
        }
        overrides.build().map(Some).map_err(|e| Error::Walk {
            message: e.to_string(),
        })
    }
}

fn is_skipped_dir(entry: &ignore::DirEntry) -> bool {
    entry.file_type().is_some_and(|t| t.is_dir())
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIP_DIRECTORIES.contains(&name))
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
