use crate::audit::AuditLogger;
use crate::github::types::{CreateRepoRequest, ErrorBody, RepoInfo, User};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const API_VERSION: &str = "2022-11-28";
const AGENT: &str = concat!("ghpush/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur while talking to the GitHub REST API
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub token is invalid or expired (401)")]
    Authentication,

    #[error("GitHub API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Repository {owner}/{repo} not found")]
    RepositoryNotFound { owner: String, repo: String },

    #[error("Token belongs to {login}, not {owner}; refusing to create the repository under {login}")]
    AccountMismatch { login: String, owner: String },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// The three GitHub calls the push workflow makes
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Identity behind the token
    async fn authenticated_user(&self) -> Result<User, GitHubError>;

    /// `Ok(None)` when the repository does not exist (404)
    async fn get_repository(&self, owner: &str, repo: &str) -> Result<Option<RepoInfo>, GitHubError>;

    /// Create a repository owned by the authenticated user
    async fn create_repository(&self, request: &CreateRepoRequest) -> Result<RepoInfo, GitHubError>;
}

/// `reqwest` implementation of [`GitHubApi`]
pub struct GitHubClient {
    api_url: String,
    token: String,
    http_client: Client,
    audit: Option<AuditLogger>,
}

impl GitHubClient {
    pub fn new(api_url: &str, token: &str) -> Result<Self, GitHubError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(AGENT));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));

        let http_client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            http_client,
            audit: None,
        })
    }

    /// Record every request in the given audit log
    pub fn with_audit(mut self, audit: Option<AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn send(&self, method: &str, url: &str, request: RequestBuilder) -> Result<Response, GitHubError> {
        let result = request.bearer_auth(&self.token).send().await;

        if let Some(audit) = &self.audit {
            let status = result.as_ref().ok().map(|r| r.status().as_u16());
            let _ = audit.log_request(method, url, status);
        }

        Ok(result?)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GitHubError> {
        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                GitHubError::InvalidResponse(e.to_string())
            } else {
                GitHubError::Network(e)
            }
        })
    }

    /// Map a non-success response to an error, reading GitHub's message
    async fn error_from(response: Response) -> GitHubError {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return GitHubError::Authentication;
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or_else(|_| body.trim().to_string());
        let message = if message.is_empty() {
            status.canonical_reason().unwrap_or("unknown error").to_string()
        } else {
            message
        };

        GitHubError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn authenticated_user(&self) -> Result<User, GitHubError> {
        let url = self.endpoint("/user");
        let response = self.send("GET", &url, self.http_client.get(&url)).await?;

        if response.status() != StatusCode::OK {
            return Err(Self::error_from(response).await);
        }

        Self::decode(response).await
    }

    async fn get_repository(&self, owner: &str, repo: &str) -> Result<Option<RepoInfo>, GitHubError> {
        let url = self.endpoint(&format!("/repos/{owner}/{repo}"));
        let response = self.send("GET", &url, self.http_client.get(&url)).await?;

        match response.status() {
            StatusCode::OK => Ok(Some(Self::decode(response).await?)),
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(Self::error_from(response).await),
        }
    }

    async fn create_repository(&self, request: &CreateRepoRequest) -> Result<RepoInfo, GitHubError> {
        let url = self.endpoint("/user/repos");
        let response = self
            .send("POST", &url, self.http_client.post(&url).json(request))
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        Self::decode(response).await
    }
}
