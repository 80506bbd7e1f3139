use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::git::remote::encode_userinfo;
use crate::security::validator::{self, ValidationError};

pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_SERVER_URL: &str = "https://github.com";
pub const SETTINGS_FILE_NAME: &str = "ghpush.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Project directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Settings file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read settings file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse settings file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(#[from] ValidationError),
}

/// What to do when the target repository does not exist on GitHub
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CreateRepoPolicy {
    /// Abort the run
    #[default]
    Never,
    /// Ask on the terminal
    Prompt,
    /// Create it without asking
    Always,
}

/// How `origin` authenticates pushes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RemoteAuth {
    /// Account and token inside the remote URL
    #[default]
    EmbeddedToken,
    /// Credential-free URL; git's credential helper supplies the token
    CredentialHelper,
}

/// Contents of a `ghpush.toml` settings file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    pub project_dir: Option<PathBuf>,
    pub username: Option<String>,
    pub token: Option<String>,
    pub repo_name: Option<String>,
    pub branch: Option<String>,
    pub api_url: Option<String>,
    pub server_url: Option<String>,
    pub create_repo: Option<CreateRepoPolicy>,
    pub private: Option<bool>,
    pub description: Option<String>,
    pub remote_auth: Option<RemoteAuth>,
    pub gitignore: Option<bool>,
    pub message: Option<String>,
    pub audit_log: Option<PathBuf>,
    pub audit: Option<bool>,
}

/// Values taken from command-line flags or their environment variables
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// Project directory to push
    #[arg(long = "dir", env = "PROJECT_DIR", value_name = "PATH")]
    pub project_dir: Option<PathBuf>,

    /// GitHub account that owns the repository
    #[arg(long, env = "GITHUB_USERNAME")]
    pub username: Option<String>,

    /// GitHub personal access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Repository name on GitHub
    #[arg(long = "repo", env = "REPO_NAME", value_name = "NAME")]
    pub repo_name: Option<String>,

    /// Branch to create and push [default: main]
    #[arg(long, env = "BRANCH")]
    pub branch: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Base URL remotes are built from
    #[arg(long, env = "GITHUB_SERVER_URL", value_name = "URL")]
    pub server_url: Option<String>,

    /// Create the repository when it does not exist
    #[arg(long, value_enum)]
    pub create_repo: Option<CreateRepoPolicy>,

    /// Make a newly created repository private
    #[arg(long)]
    pub private: bool,

    /// Description for a newly created repository
    #[arg(long)]
    pub description: Option<String>,

    /// How the origin remote authenticates
    #[arg(long, value_enum)]
    pub remote_auth: Option<RemoteAuth>,

    /// Do not write a .gitignore
    #[arg(long)]
    pub no_gitignore: bool,

    /// Commit message to use instead of the timestamped default
    #[arg(long, short)]
    pub message: Option<String>,

    /// Audit log location
    #[arg(long, value_name = "PATH")]
    pub audit_log: Option<PathBuf>,

    /// Disable the audit log
    #[arg(long)]
    pub no_audit: bool,
}

/// Validated, immutable configuration for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub project_dir: PathBuf,
    pub username: String,
    pub token: String,
    pub repo_name: String,
    pub branch: String,
    pub api_url: String,
    pub server_url: String,
    pub create_repo: CreateRepoPolicy,
    pub private: bool,
    pub description: Option<String>,
    pub remote_auth: RemoteAuth,
    pub write_gitignore: bool,
    pub commit_message: Option<String>,
    /// `None` when auditing is disabled
    pub audit_log: Option<PathBuf>,
}

/// Directory holding the default settings file and audit log
pub fn config_dir() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("ghpush"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Settings {
    /// Read the settings file (if any) and merge it with `overrides`
    ///
    /// An explicit `config_path` must exist; otherwise `./ghpush.toml` and
    /// `<config dir>/config.toml` are tried in order.
    pub fn load(overrides: &ConfigOverrides, config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) if !path.is_file() => return Err(ConfigError::FileNotFound(path.to_path_buf())),
            Some(path) => Self::read_file(path)?,
            None => match Self::default_paths().into_iter().find(|p| p.is_file()) {
                Some(path) => Self::read_file(&path)?,
                None => FileSettings::default(),
            },
        };

        Self::resolve(overrides, file)
    }

    /// Candidate settings files, most specific first
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(SETTINGS_FILE_NAME)];
        if let Some(dir) = config_dir() {
            paths.push(dir.join("config.toml"));
        }
        paths
    }

    /// Parse a settings file
    pub fn read_file(path: &Path) -> Result<FileSettings, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Merge flag/env values over file values and validate the result
    ///
    /// Performs no network access and writes nothing.
    pub fn resolve(overrides: &ConfigOverrides, file: FileSettings) -> Result<Self, ConfigError> {
        let project_dir = overrides
            .project_dir
            .clone()
            .or(file.project_dir)
            .filter(|p| !p.as_os_str().is_empty());
        let username = non_empty(overrides.username.clone()).or(non_empty(file.username));
        let token = non_empty(overrides.token.clone()).or(non_empty(file.token));
        let repo_name = non_empty(overrides.repo_name.clone()).or(non_empty(file.repo_name));

        let mut missing = Vec::new();
        if project_dir.is_none() {
            missing.push("PROJECT_DIR");
        }
        if username.is_none() {
            missing.push("GITHUB_USERNAME");
        }
        if token.is_none() {
            missing.push("GITHUB_TOKEN");
        }
        if repo_name.is_none() {
            missing.push("REPO_NAME");
        }

        let (Some(project_dir), Some(username), Some(token), Some(repo_name)) =
            (project_dir, username, token, repo_name)
        else {
            return Err(ConfigError::Missing(missing));
        };

        let audit_log = if overrides.no_audit || file.audit == Some(false) {
            None
        } else {
            overrides
                .audit_log
                .clone()
                .or(file.audit_log)
                .or_else(|| config_dir().map(|dir| dir.join("history.log")))
        };

        let settings = Settings {
            project_dir,
            username,
            token,
            repo_name,
            branch: non_empty(overrides.branch.clone())
                .or(non_empty(file.branch))
                .unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            api_url: non_empty(overrides.api_url.clone())
                .or(non_empty(file.api_url))
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            server_url: non_empty(overrides.server_url.clone())
                .or(non_empty(file.server_url))
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            create_repo: overrides.create_repo.or(file.create_repo).unwrap_or_default(),
            private: overrides.private || file.private.unwrap_or(false),
            description: non_empty(overrides.description.clone()).or(non_empty(file.description)),
            remote_auth: overrides.remote_auth.or(file.remote_auth).unwrap_or_default(),
            write_gitignore: !overrides.no_gitignore && file.gitignore.unwrap_or(true),
            commit_message: non_empty(overrides.message.clone()).or(non_empty(file.message)),
            audit_log,
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Validate names and the project directory
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.project_dir.is_dir() {
            return Err(ConfigError::DirectoryNotFound(self.project_dir.clone()));
        }

        validator::validate_username(&self.username)?;
        validator::validate_repo_name(&self.repo_name)?;
        validator::validate_branch_name(&self.branch)?;
        validator::validate_api_url("api_url", &self.api_url)?;
        validator::validate_base_url("server_url", &self.server_url)?;

        Ok(())
    }

    /// `owner/repo` on GitHub
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.username, self.repo_name)
    }

    /// Values that must be masked wherever commands or URLs are logged
    pub fn secrets(&self) -> Vec<String> {
        vec![self.token.clone(), encode_userinfo(&self.token)]
    }
}
