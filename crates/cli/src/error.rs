// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

/// Scorecard error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Broken check set or category weights (fatal, raised before scoring).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// Repository root is missing or not a directory.
    #[error("invalid repository path: {}", .path.display())]
    InvalidRoot { path: PathBuf },

    /// Access would leave the repository root.
    ///
    /// Carries only the path as requested, never the resolved location.
    #[error("path escapes repository root: {path}")]
    PathEscape { path: String },

    /// File not present in the repository.
    #[error("file not found: {path}")]
    NotFound { path: String },

    /// File I/O error
    #[error("io error: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds maximum size limit.
    #[error("file too large: {} ({} bytes, max: {} bytes)", .path.display(), .size, .max_size)]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Malformed CI configuration.
    #[error("parse error: {path}: {message}")]
    Parse { path: String, message: String },

    /// Walker error.
    #[error("walk error: {message}")]
    Walk { message: String },

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type using scorecard Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
///
/// A completed assessment exits with `Success` whatever the grade; only
/// `--min-grade` turns a low grade into `BelowThreshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Assessment completed
    Success = 0,
    /// Grade below the requested minimum
    BelowThreshold = 1,
    /// Configuration or argument error
    ConfigError = 2,
    /// Repository path invalid or unreadable
    InvalidRepository = 3,
    /// Internal error
    InternalError = 4,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Configuration(_) | Error::Argument(_) => {
                ExitCode::ConfigError
            }
            Error::InvalidRoot { .. } | Error::Io { .. } | Error::Walk { .. } => {
                ExitCode::InvalidRepository
            }
            Error::PathEscape { .. }
            | Error::NotFound { .. }
            | Error::FileTooLarge { .. }
            | Error::Parse { .. }
            | Error::Internal(_) => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
