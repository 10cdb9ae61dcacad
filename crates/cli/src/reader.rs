// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded file reads.
//!
//! The size cap is enforced twice: against the file's metadata before
//! reading, and against the bytes actually read, so a file that grows
//! between indexing and reading still cannot exceed it. Callers pass paths
//! already resolved inside the repository root.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

/// Default per-file cap for indexing and reading (10MB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Reads at or above this size are logged.
const LARGE_READ: u64 = 1024 * 1024;

/// Reader that refuses files above a byte limit.
#[derive(Debug, Clone, Copy)]
pub struct FileReader {
    limit: u64,
}

impl Default for FileReader {
    fn default() -> Self {
        Self::with_limit(MAX_FILE_SIZE)
    }
}

impl FileReader {
    pub fn with_limit(limit: u64) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Read the whole file, or fail with `FileTooLarge` past the limit.
    pub fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let io_error = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_error)?;
        let declared = file.metadata().map_err(io_error)?.len();
        if declared > self.limit {
            return Err(self.too_large(path, declared));
        }
        if declared >= LARGE_READ {
            tracing::debug!("reading {} ({})", path.display(), display_size(declared));
        }

        let mut bytes = Vec::with_capacity(declared as usize);
        file.take(self.limit.saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(io_error)?;

        let actual = bytes.len() as u64;
        if actual > self.limit {
            return Err(self.too_large(path, actual));
        }
        Ok(bytes)
    }

    /// Read the file as text, replacing invalid UTF-8.
    pub fn read_text(&self, path: &Path) -> Result<String> {
        self.read(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    fn too_large(&self, path: &Path, size: u64) -> Error {
        Error::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size: self.limit,
        }
    }
}

/// Compact size for log lines ("512B", "1.5KB", "10.0MB").
pub fn display_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{bytes}B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1}{}", UNITS[unit])
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
