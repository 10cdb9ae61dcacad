// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    rust = { "lib.rs", Some("rust") },
    python = { "app.py", Some("python") },
    typescript = { "index.TSX", Some("typescript") },
    go = { "main.go", Some("go") },
    markdown = { "README.md", None },
    dotfile = { ".gitignore", None },
    no_extension = { "Makefile", None },
)]
fn file_language_by_extension(name: &str, expected: Option<&str>) {
    assert_eq!(language_for_file(name, None), expected);
}

#[parameterized(
    bash = { "#!/bin/bash", Some("shell") },
    env_python = { "#!/usr/bin/env python3", Some("python") },
    env_flag = { "#!/usr/bin/env -S node --harmony", Some("javascript") },
    ruby = { "#!/usr/local/bin/ruby -w", Some("ruby") },
    unknown = { "#!/usr/bin/perl", None },
    not_shebang = { "echo hi", None },
)]
fn file_language_by_shebang(first_line: &str, expected: Option<&str>) {
    assert_eq!(language_for_file("script", Some(first_line)), expected);
}

#[test]
fn extension_wins_over_shebang() {
    assert_eq!(
        language_for_file("tool.py", Some("#!/bin/bash")),
        Some("python")
    );
}

#[test]
fn gradle_kts_indicates_java_and_kotlin() {
    let langs: Vec<_> = languages_for_manifest("build.gradle.kts").collect();
    assert_eq!(langs, vec!["java", "kotlin"]);
}

#[test]
fn manifest_match_is_case_insensitive() {
    let langs: Vec<_> = languages_for_manifest("cargo.TOML").collect();
    assert_eq!(langs, vec!["rust"]);
}

#[test]
fn csproj_suffix_indicator() {
    let langs: Vec<_> = languages_for_manifest("Service.csproj").collect();
    assert_eq!(langs, vec!["csharp"]);
}

#[test]
fn non_manifest_has_no_languages() {
    assert_eq!(languages_for_manifest("README.md").count(), 0);
}

#[parameterized(
    plain = { "main.rs", Some("rs") },
    double = { "archive.tar.gz", Some("gz") },
    dotfile = { ".bashrc", None },
    trailing_dot = { "weird.", None },
    bare = { "Makefile", None },
)]
fn file_extension(name: &str, expected: Option<&str>) {
    assert_eq!(extension(name), expected);
}
