use std::io;
use thiserror::Error;

use crate::config::settings::ConfigError;
use crate::github::client::GitHubError;

/// Errors that can occur during git operations
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Command '{command}' failed with exit code {exit_code}: {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error(
        "On {} instead of configured branch {expected}",
        .current.as_deref().unwrap_or("a detached HEAD")
    )]
    BranchMismatch {
        expected: String,
        current: Option<String>,
    },

    #[error("Failed to execute git: {0}")]
    SpawnFailed(String),

    #[error("Empty git command")]
    EmptyCommand,

    #[error("Failed to parse git output: {0}")]
    ParseError(String),

    #[error("Git version {0} is too old. Minimum required: 2.20")]
    GitVersionTooOld(String),

    #[error("Failed to detect git version: {0}")]
    GitVersionDetectionFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Top-level error for a push run.
///
/// Every module error converts into `AppError` via `From`, so the workflow can
/// use `?` across configuration, API and git boundaries while `main` still
/// sees which subsystem failed.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("GitHub error: {0}")]
    GitHub(#[from] GitHubError),

    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for git operations
pub type GitResult<T> = std::result::Result<T, GitError>;

/// Result type for application-level operations
pub type AppResult<T> = std::result::Result<T, AppError>;
