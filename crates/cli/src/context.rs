// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Repository context: the indexed, read-only view every check consumes.
//!
//! Built once per run. The tree is walked a single time; afterwards all
//! queries run against the in-memory index, and every content read goes
//! through [`RepoContext::resolve`], which keeps access inside the root.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::{Component, Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use regex::{Regex, RegexBuilder};

use crate::ci::{self, CiConfig, CiSource};
use crate::error::{Error, Result};
use crate::language;
use crate::reader::{FileReader, MAX_FILE_SIZE};
use crate::walker::{DEFAULT_MAX_DEPTH, RepoWalker, WalkLimits, WalkStats};

/// Bytes read when sniffing a `#!` line.
const SHEBANG_PROBE: u64 = 256;

/// Options for building a context.
#[derive(Debug, Clone)]
pub struct ContextOptions {
    pub max_depth: Option<usize>,
    pub max_file_size: u64,
    /// Extra walk exclusions (globs relative to the root).
    pub exclude_patterns: Vec<String>,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            max_file_size: MAX_FILE_SIZE,
            exclude_patterns: Vec::new(),
        }
    }
}

/// One file in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedFile {
    /// Forward-slash path relative to the root.
    pub path: String,
    pub size: u64,
    pub language: Option<&'static str>,
}

/// A discovered CI file that could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiParseFailure {
    pub path: String,
    pub message: String,
}

/// Raw text of a successfully parsed CI file.
#[derive(Debug, Clone)]
pub struct CiFile {
    pub source: CiSource,
    pub raw: String,
}

/// Immutable snapshot of a repository.
#[derive(Debug)]
pub struct RepoContext {
    root: PathBuf,
    name: String,
    files: Vec<IndexedFile>,
    dirs: BTreeSet<String>,
    languages: BTreeSet<String>,
    reader: FileReader,
    walk_stats: WalkStats,
    ci: CiConfig,
    ci_files: Vec<CiFile>,
    ci_failures: Vec<CiParseFailure>,
}

impl RepoContext {
    /// Walk `root` and build the index, then parse discovered CI files.
    ///
    /// Fails only when the root itself is unusable; unreadable or malformed
    /// files inside it are recorded and skipped.
    pub fn build(root: &Path, options: &ContextOptions) -> Result<Self> {
        let metadata = std::fs::metadata(root).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::InvalidRoot {
                path: root.to_path_buf(),
            },
            _ => Error::Io {
                path: root.to_path_buf(),
                source: e,
            },
        })?;
        if !metadata.is_dir() {
            return Err(Error::InvalidRoot {
                path: root.to_path_buf(),
            });
        }

        let root = root.canonicalize().map_err(|e| Error::Io {
            path: root.to_path_buf(),
            source: e,
        })?;
        // Surface permission problems on the root instead of an empty index.
        std::fs::read_dir(&root).map_err(|e| Error::Io {
            path: root.clone(),
            source: e,
        })?;

        let walk = RepoWalker::new(WalkLimits {
            max_depth: options.max_depth,
            max_file_size: options.max_file_size,
            exclude: options.exclude_patterns.clone(),
        })
        .walk(&root)?;

        let mut files = Vec::with_capacity(walk.files.len());
        let mut dirs = BTreeSet::new();
        let mut languages = BTreeSet::new();

        for entry in walk.files {
            let path = entry.relative;
            let file_name = path.rsplit('/').next().unwrap_or(&path);

            let first_line = if language::extension(file_name).is_none() {
                shebang_line(&root, &path)
            } else {
                None
            };
            let lang = language::language_for_file(file_name, first_line.as_deref());

            languages.extend(language::languages_for_manifest(file_name).map(String::from));

            let mut parent = path.as_str();
            while let Some((dir, _)) = parent.rsplit_once('/') {
                if !dirs.insert(dir.to_string()) {
                    break;
                }
                parent = dir;
            }

            files.push(IndexedFile {
                path,
                size: entry.size,
                language: lang,
            });
        }

        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "repository".to_string());

        tracing::debug!(
            "indexed {} files, {} directories, languages: {:?}",
            files.len(),
            dirs.len(),
            languages
        );

        let mut context = Self {
            root,
            name,
            files,
            dirs,
            languages,
            reader: FileReader::with_limit(options.max_file_size),
            walk_stats: walk.stats,
            ci: CiConfig::default(),
            ci_files: Vec::new(),
            ci_failures: Vec::new(),
        };
        context.load_ci();
        Ok(context)
    }

    fn load_ci(&mut self) {
        let sources = ci::discover(self.files.iter().map(|f| f.path.as_str()));

        for source in sources {
            let parsed = self
                .read_to_string(&source.path)
                .and_then(|raw| ci::parse(&raw, &source).map(|config| (raw, config)));
            match parsed {
                Ok((raw, config)) => {
                    tracing::debug!("{}: {} jobs", source.path, config.jobs.len());
                    self.ci.extend(config);
                    self.ci_files.push(CiFile { source, raw });
                }
                Err(err) => {
                    tracing::warn!("could not parse CI configuration {}: {}", source.path, err);
                    self.ci_failures.push(CiParseFailure {
                        path: source.path,
                        message: err.to_string(),
                    });
                }
            }
        }
    }

    /// Map a relative path to a location inside the root.
    ///
    /// Rejects absolute paths, `..` that climbs above the root, and existing
    /// paths whose canonical form lies outside the canonical root. The error
    /// carries only the requested path.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf> {
        confine(&self.root, relative)
    }

    /// Read a file's bytes through the root-confined resolver.
    pub fn read_file(&self, relative: &str) -> Result<Vec<u8>> {
        let resolved = self.resolve_file(relative)?;
        self.reader
            .read(&resolved)
            .map_err(|err| relabel(err, relative))
    }

    /// Read a file as text, replacing invalid UTF-8.
    pub fn read_to_string(&self, relative: &str) -> Result<String> {
        let resolved = self.resolve_file(relative)?;
        self.reader
            .read_text(&resolved)
            .map_err(|err| relabel(err, relative))
    }

    fn resolve_file(&self, relative: &str) -> Result<PathBuf> {
        let resolved = self.resolve(relative)?;
        if !resolved.is_file() {
            return Err(Error::NotFound {
                path: relative.to_string(),
            });
        }
        Ok(resolved)
    }

    /// Repository directory name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn files(&self) -> &[IndexedFile] {
        &self.files
    }

    pub fn walk_stats(&self) -> &WalkStats {
        &self.walk_stats
    }

    /// Detected repository languages, sorted.
    pub fn languages(&self) -> &BTreeSet<String> {
        &self.languages
    }

    pub fn has_language(&self, lang: &str) -> bool {
        self.languages.contains(lang)
    }

    /// Indexed paths, optionally filtered by a glob.
    pub fn list_files(&self, pattern: Option<&str>) -> Vec<&str> {
        match pattern {
            None => self.files.iter().map(|f| f.path.as_str()).collect(),
            Some(pattern) => self.find_files(&[pattern]),
        }
    }

    /// First file matching any pattern, trying patterns in order.
    pub fn has_file(&self, patterns: &[&str]) -> Option<&str> {
        compile_globs(patterns).iter().find_map(|glob| {
            self.files
                .iter()
                .map(|f| f.path.as_str())
                .find(|path| glob.is_match(path))
        })
    }

    /// Every file matching any pattern, grouped by pattern, without repeats.
    pub fn find_files(&self, patterns: &[&str]) -> Vec<&str> {
        let mut found: Vec<&str> = Vec::new();
        for glob in compile_globs(patterns) {
            for file in &self.files {
                if glob.is_match(&file.path) && !found.contains(&file.path.as_str()) {
                    found.push(&file.path);
                }
            }
        }
        found
    }

    /// First directory (holding at least one indexed file) matching a pattern.
    pub fn has_dir(&self, patterns: &[&str]) -> Option<&str> {
        compile_globs(patterns)
            .iter()
            .find_map(|glob| self.dirs.iter().find(|dir| glob.is_match(dir.as_str())))
            .map(String::as_str)
    }

    /// Whether the file's content matches `pattern` (case-insensitive,
    /// multi-line). Unreadable files never match.
    pub fn search_file(&self, relative: &str, pattern: &str) -> bool {
        let Some(regex) = compile_regex(pattern) else {
            return false;
        };
        self.search_with(relative, &regex)
    }

    /// First file matching any of `file_patterns` whose content matches.
    pub fn search_any_file(&self, file_patterns: &[&str], pattern: &str) -> Option<&str> {
        let regex = compile_regex(pattern)?;
        self.find_files(file_patterns)
            .into_iter()
            .find(|path| self.search_with(path, &regex))
    }

    fn search_with(&self, relative: &str, regex: &Regex) -> bool {
        match self.read_to_string(relative) {
            Ok(text) => regex.is_match(&text),
            Err(err) => {
                tracing::debug!("search skipped {}: {}", relative, err);
                false
            }
        }
    }

    /// Merged CI model from every parsed file.
    pub fn ci(&self) -> &CiConfig {
        &self.ci
    }

    pub fn ci_files(&self) -> &[CiFile] {
        &self.ci_files
    }

    /// Distinct platforms of every parsed CI file, in discovery order.
    ///
    /// A file counts even when it defines no jobs of its own (an
    /// include-only pipeline, an empty `jobs` map).
    pub fn ci_platforms(&self) -> Vec<&'static str> {
        let mut platforms = Vec::new();
        for file in &self.ci_files {
            let name = file.source.format.platform();
            if !platforms.contains(&name) {
                platforms.push(name);
            }
        }
        platforms
    }

    pub fn ci_failures(&self) -> &[CiParseFailure] {
        &self.ci_failures
    }

    /// Any CI step matches `pattern` (case-insensitive).
    pub fn ci_has_command(&self, pattern: &str) -> bool {
        self.ci_command_matches(pattern, false)
    }

    /// Any CI step in a job that is not allowed to fail matches `pattern`.
    pub fn ci_has_blocking_command(&self, pattern: &str) -> bool {
        self.ci_command_matches(pattern, true)
    }

    fn ci_command_matches(&self, pattern: &str, blocking_only: bool) -> bool {
        let Some(regex) = compile_regex(pattern) else {
            return false;
        };
        self.ci
            .jobs
            .iter()
            .filter(|job| !blocking_only || !job.allow_failure)
            .flat_map(|job| &job.steps)
            .any(|step| regex.is_match(step))
    }

    pub fn ci_has_schedule(&self) -> bool {
        self.ci.has_schedule()
    }

    /// Raw text of every parsed CI file, newline-joined in discovery order.
    pub fn ci_raw_content(&self) -> String {
        self.ci_files
            .iter()
            .map(|f| f.raw.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Resolve `relative` against the canonical `root`, refusing any escape.
fn confine(root: &Path, relative: &str) -> Result<PathBuf> {
    let escape = || Error::PathEscape {
        path: relative.to_string(),
    };

    let mut normalized = PathBuf::new();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return Err(escape());
                }
            }
            Component::RootDir | Component::Prefix(_) => return Err(escape()),
        }
    }

    let candidate = root.join(&normalized);
    match candidate.canonicalize() {
        Ok(canonical) if canonical.starts_with(root) => Ok(canonical),
        Ok(_) => {
            tracing::warn!("rejected symlink escape: {}", relative);
            Err(escape())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(candidate),
        Err(e) => Err(Error::Io {
            path: normalized,
            source: e,
        }),
    }
}

/// First line of an indexed file when it is a `#!` line.
///
/// Confined to the root like every other content read.
fn shebang_line(root: &Path, relative: &str) -> Option<String> {
    let path = confine(root, relative).ok()?;
    let mut buf = Vec::new();
    File::open(path)
        .ok()?
        .take(SHEBANG_PROBE)
        .read_to_end(&mut buf)
        .ok()?;
    if !buf.starts_with(b"#!") {
        return None;
    }
    let line = buf.split(|&b| b == b'\n').next()?;
    Some(String::from_utf8_lossy(line).trim_end().to_string())
}

/// Report read failures against the requested path, not the resolved one.
fn relabel(err: Error, relative: &str) -> Error {
    match err {
        Error::Io { source, .. } => Error::Io {
            path: PathBuf::from(relative),
            source,
        },
        Error::FileTooLarge { size, max_size, .. } => Error::FileTooLarge {
            path: PathBuf::from(relative),
            size,
            max_size,
        },
        other => other,
    }
}

fn compile_globs(patterns: &[&str]) -> Vec<GlobMatcher> {
    patterns
        .iter()
        .filter_map(|pattern| {
            GlobBuilder::new(pattern)
                .case_insensitive(true)
                .literal_separator(true)
                .build()
                .map(|glob| glob.compile_matcher())
                .map_err(|e| tracing::warn!("invalid glob '{}': {}", pattern, e))
                .ok()
        })
        .collect()
}

fn compile_regex(pattern: &str) -> Option<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .multi_line(true)
        .build()
        .map_err(|e| tracing::warn!("invalid regex '{}': {}", pattern, e))
        .ok()
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
