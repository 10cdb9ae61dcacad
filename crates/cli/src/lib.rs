pub mod check;
pub mod checks;
pub mod ci;
pub mod cli;
pub mod color;
pub mod config;
pub mod context;
pub mod discovery;
pub mod error;
pub mod language;
pub mod output;
pub mod reader;
pub mod runner;
pub mod scoring;
pub mod walker;

pub use check::{Category, Check, CheckResult, CheckStatus};
pub use cli::{AssessArgs, ChecksArgs, Cli, Command, OutputFormat};
pub use context::{ContextOptions, RepoContext};
pub use error::{Error, ExitCode, Result};
pub use reader::FileReader;
pub use scoring::{Assessment, Grade, Weights};
pub use walker::{RepoWalker, Walk, WalkLimits, WalkStats, WalkedFile};

#[cfg(test)]
pub mod test_utils;
