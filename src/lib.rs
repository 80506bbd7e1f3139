pub mod audit;
pub mod config;
pub mod error;
pub mod error_translation;
pub mod git;
pub mod github;
pub mod ignore;
pub mod report;
pub mod security;
pub mod workflow;

// Re-export commonly used types for convenience
pub use config::{ConfigError, ConfigOverrides, Settings};
pub use error::{AppError, AppResult, GitError, GitResult};
pub use git::{GitVersion, Repository, RepositoryState};
pub use github::{GitHubApi, GitHubClient, GitHubError};
pub use report::Reporter;
pub use workflow::{PushOutcome, RunSummary, Stage, Workflow};
