//! Behavioral specs for scorecard.toml handling.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

#[test]
fn valid_config_no_warnings() {
    let repo = Repo::empty();
    repo.config("[walk]\nmax_depth = 10\n");

    assess(repo.path())
        .passes()
        .stderr_has(predicates::str::contains("warning").not());
}

/// > Unknown keys are warnings (forward compatibility)
#[test]
fn unknown_config_key_warns() {
    let repo = Repo::empty();
    repo.config("unknown_key = true\n");

    assess(repo.path())
        .passes()
        .stderr_has("unrecognized field `unknown_key`");
}

/// > Weights that do not sum to 1.0 are a configuration error (exit 2)
#[test]
fn bad_weights_exit_2() {
    let repo = Repo::empty();
    repo.config(
        "[weights]\ndocumentation = 0.5\nconstraints = 0.5\ntesting = 0.5\nreview = 0.1\nai_safeguards = 0.1\n",
    );

    assess(repo.path())
        .exits(2)
        .stderr_has("invalid [weights]")
        .stdout_lacks("Grade:");
}

#[test]
fn unsupported_version_exits_2() {
    let repo = Repo::empty();
    repo.config("version = 2\n");

    assess(repo.path())
        .exits(2)
        .stderr_has("unsupported config version 2");
}

#[test]
fn malformed_toml_exits_2() {
    let repo = Repo::empty();
    repo.file("scorecard.toml", "version = \n");

    assess(repo.path()).exits(2);
}

/// > Custom weights shift the overall score
#[test]
fn custom_weights_change_overall() {
    let repo = Repo::empty();
    repo.file("CODEOWNERS", "* @demo\n");
    let default = assess(repo.path()).json().passes();

    repo.config(
        "[weights]\ndocumentation = 0.0\nconstraints = 0.0\ntesting = 0.0\nreview = 1.0\nai_safeguards = 0.0\n",
    );
    let review_only = assess(repo.path()).json().passes();

    assert!(review_only.overall() > default.overall());
    assert_eq!(review_only.category("review")["weight"], 1.0);
}

#[test]
fn project_ignore_excludes_paths() {
    let repo = Repo::empty();
    repo.file("legacy/tests/test_old.py", "def test_ok():\n    pass\n");

    let before = assess(repo.path()).json().passes();
    assert_eq!(before.status("test_suite_exists"), "partial");

    repo.config("[project]\nignore = [\"legacy/**\"]\n");
    let after = assess(repo.path()).json().passes();
    assert_eq!(after.status("test_suite_exists"), "fail");
}

/// > -C / SCORECARD_CONFIG select an explicit config file
#[test]
fn explicit_config_flag_is_used() {
    let repo = Repo::empty();
    let other = Repo::empty();
    other.file("custom.toml", "version = 2\n");
    let path = other.path().join("custom.toml");

    scorecard_cmd()
        .args(["-C", path.to_str().unwrap(), "assess"])
        .arg(repo.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("unsupported config version"));
}

#[test]
fn env_config_sets_path() {
    let repo = Repo::empty();
    let other = Repo::empty();
    other.file("custom.toml", "version = 2\n");

    assess(repo.path())
        .env(
            "SCORECARD_CONFIG",
            other.path().join("custom.toml").to_str().unwrap(),
        )
        .exits(2);
}

#[test]
fn missing_explicit_config_exits_2() {
    let repo = Repo::empty();
    assess(repo.path())
        .env(
            "SCORECARD_CONFIG",
            repo.path().join("nope.toml").to_str().unwrap(),
        )
        .exits(2)
        .stderr_has("config file not found");
}
