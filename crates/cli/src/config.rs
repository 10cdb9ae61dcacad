// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles scorecard.toml parsing with version validation and unknown key warnings.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::context::ContextOptions;
use crate::error::{Error, Result};
use crate::scoring::Weights;

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Config file name looked up at the repository root.
pub const CONFIG_FILE: &str = "scorecard.toml";

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &["version", "project", "walk", "weights"];

/// Known project keys in the config.
const KNOWN_PROJECT_KEYS: &[&str] = &["ignore"];

/// Known walk keys in the config.
const KNOWN_WALK_KEYS: &[&str] = &["max_depth", "max_file_size"];

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: i64,

    #[serde(default)]
    project: Option<toml::Value>,

    #[serde(default)]
    walk: Option<toml::Value>,

    #[serde(default)]
    weights: Option<toml::Value>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    pub project: ProjectConfig,

    pub walk: WalkConfig,

    /// Category weight override; `None` keeps the defaults.
    pub weights: Option<Weights>,
}

impl Config {
    /// Effective category weights.
    pub fn weights(&self) -> Weights {
        self.weights.unwrap_or_default()
    }

    /// Context options from the config, before CLI overrides.
    pub fn context_options(&self) -> ContextOptions {
        let defaults = ContextOptions::default();
        ContextOptions {
            max_depth: self.walk.max_depth.or(defaults.max_depth),
            max_file_size: self.walk.max_file_size.unwrap_or(defaults.max_file_size),
            exclude_patterns: self.project.ignore.clone(),
        }
    }
}

/// Project-level configuration.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProjectConfig {
    /// Extra walk exclusions (e.g., "fixtures/**", "vendor/").
    pub ignore: Vec<String>,
}

/// Walk limits.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WalkConfig {
    pub max_depth: Option<usize>,
    pub max_file_size: Option<u64>,
}

/// Load config, warning on unknown keys.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("cannot read config: {e}"),
        path: Some(path.to_path_buf()),
    })?;

    parse(&content, path)
}

/// Parse config from string content, warning on unknown keys.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let config_error = |message: String| Error::Config {
        message,
        path: Some(path.to_path_buf()),
    };

    let flexible: FlexibleConfig =
        toml::from_str(content).map_err(|e| config_error(e.to_string()))?;

    if flexible.version != SUPPORTED_VERSION {
        return Err(config_error(format!(
            "unsupported config version {} (supported: {})",
            flexible.version, SUPPORTED_VERSION
        )));
    }

    for key in flexible.unknown.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, key);
        }
    }

    let project = match flexible.project {
        Some(toml::Value::Table(t)) => {
            let ignore = match t.get("ignore") {
                None => Vec::new(),
                Some(value) => string_array(value)
                    .ok_or_else(|| config_error("project.ignore must be an array of strings".into()))?,
            };

            for key in t.keys() {
                if !KNOWN_PROJECT_KEYS.contains(&key.as_str()) {
                    warn_unknown_key(path, &format!("project.{}", key));
                }
            }

            ProjectConfig { ignore }
        }
        Some(_) => return Err(config_error("[project] must be a table".into())),
        None => ProjectConfig::default(),
    };

    let walk = match flexible.walk {
        Some(toml::Value::Table(t)) => {
            let max_depth = non_negative(t.get("max_depth"), "walk.max_depth")
                .map_err(config_error)?
                .map(|v| v as usize);
            let max_file_size = non_negative(t.get("max_file_size"), "walk.max_file_size")
                .map_err(config_error)?;

            for key in t.keys() {
                if !KNOWN_WALK_KEYS.contains(&key.as_str()) {
                    warn_unknown_key(path, &format!("walk.{}", key));
                }
            }

            WalkConfig {
                max_depth,
                max_file_size,
            }
        }
        Some(_) => return Err(config_error("[walk] must be a table".into())),
        None => WalkConfig::default(),
    };

    let weights = match flexible.weights {
        Some(value) => {
            let weights: Weights = value
                .try_into()
                .map_err(|e| config_error(format!("invalid [weights]: {e}")))?;
            weights
                .validate()
                .map_err(|e| config_error(format!("invalid [weights]: {e}")))?;
            Some(weights)
        }
        None => None,
    };

    Ok(Config {
        version: flexible.version,
        project,
        walk,
        weights,
    })
}

fn string_array(value: &toml::Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(String::from))
        .collect()
}

fn non_negative(value: Option<&toml::Value>, key: &str) -> std::result::Result<Option<u64>, String> {
    match value {
        None => Ok(None),
        Some(value) => value
            .as_integer()
            .and_then(|v| u64::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| format!("{key} must be a non-negative integer")),
    }
}

fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "scorecard: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
