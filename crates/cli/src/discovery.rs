// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery.
//!
//! The config lives at the root of the repository being assessed.

use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE;
use crate::error::{Error, Result};

/// `scorecard.toml` directly under `root`, if present.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    let path = root.join(CONFIG_FILE);
    path.is_file().then_some(path)
}

/// Resolve config path from CLI arg, env var, or discovery.
///
/// Priority:
/// 1. CLI flag `--config` (handled by clap with env = "SCORECARD_CONFIG")
/// 2. `scorecard.toml` at the repository root
/// 3. None (use defaults)
pub fn resolve_config(explicit: Option<&Path>, root: &Path) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) => {
            if path.is_file() {
                Ok(Some(path.to_path_buf()))
            } else {
                Err(Error::Config {
                    message: format!("config file not found: {}", path.display()),
                    path: Some(path.to_path_buf()),
                })
            }
        }
        None => Ok(find_config(root)),
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
