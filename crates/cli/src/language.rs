// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Language detection.
//!
//! Two levels:
//! - per file: a tag inferred from the extension, or from a `#!` line for
//!   extensionless scripts;
//! - per repository: the languages whose manifest files are present.
//!   Checks consult the repository set to decide applicability.

/// Manifest files that mark a repository as using a language.
///
/// Matched case-insensitively against file names at any depth. Patterns
/// starting with `*.` match by extension.
pub const LANGUAGE_INDICATORS: &[(&str, &[&str])] = &[
    ("rust", &["Cargo.toml"]),
    (
        "python",
        &["pyproject.toml", "setup.py", "setup.cfg", "requirements.txt"],
    ),
    ("javascript", &["package.json"]),
    ("typescript", &["tsconfig.json"]),
    ("go", &["go.mod"]),
    ("java", &["pom.xml", "build.gradle", "build.gradle.kts"]),
    ("ruby", &["Gemfile"]),
    ("csharp", &["*.csproj", "*.sln"]),
    ("swift", &["Package.swift"]),
    ("kotlin", &["build.gradle.kts"]),
];

/// Language tag for a single file, or `None` for data/docs/unknown files.
pub fn language_for_file(file_name: &str, first_line: Option<&str>) -> Option<&'static str> {
    match extension(file_name) {
        Some(ext) => language_for_extension(&ext.to_ascii_lowercase()),
        None => first_line.and_then(language_for_shebang),
    }
}

/// Extension of a file name; dotfiles like `.bashrc` have none.
pub fn extension(file_name: &str) -> Option<&str> {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}

fn language_for_extension(ext: &str) -> Option<&'static str> {
    let lang = match ext {
        "rs" => "rust",
        "py" | "pyi" => "python",
        "js" | "jsx" | "mjs" | "cjs" => "javascript",
        "ts" | "tsx" | "mts" | "cts" => "typescript",
        "go" => "go",
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "rb" | "rake" => "ruby",
        "cs" => "csharp",
        "swift" => "swift",
        "c" | "h" => "c",
        "cc" | "cpp" | "cxx" | "hpp" | "hh" => "cpp",
        "sh" | "bash" | "zsh" => "shell",
        "php" => "php",
        "scala" => "scala",
        _ => return None,
    };
    Some(lang)
}

/// Interpret a `#!` line, handling `/usr/bin/env` indirection.
fn language_for_shebang(line: &str) -> Option<&'static str> {
    let rest = line.strip_prefix("#!")?.trim();
    let mut parts = rest.split_whitespace();
    let mut program = parts.next()?.rsplit('/').next()?;
    if program == "env" {
        program = parts.find(|p| !p.starts_with('-'))?;
    }
    let program = program.trim_end_matches(|c: char| c.is_ascii_digit() || c == '.');

    match program {
        "sh" | "bash" | "zsh" | "dash" | "ksh" => Some("shell"),
        "python" => Some("python"),
        "node" | "deno" | "bun" => Some("javascript"),
        "ruby" => Some("ruby"),
        _ => None,
    }
}

/// Languages indicated by a manifest file name, if any.
pub fn languages_for_manifest(file_name: &str) -> impl Iterator<Item = &'static str> + '_ {
    let lower = file_name.to_ascii_lowercase();
    LANGUAGE_INDICATORS
        .iter()
        .filter(move |(_, indicators)| {
            indicators.iter().any(|indicator| {
                let indicator = indicator.to_ascii_lowercase();
                match indicator.strip_prefix('*') {
                    Some(suffix) => lower.ends_with(suffix),
                    None => lower == indicator,
                }
            })
        })
        .map(|(lang, _)| *lang)
}

#[cfg(test)]
#[path = "language_tests.rs"]
mod tests;
