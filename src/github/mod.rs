pub mod client;
pub mod types;

pub use client::{GitHubApi, GitHubClient, GitHubError};
pub use types::{CreateRepoRequest, RepoInfo, User};
