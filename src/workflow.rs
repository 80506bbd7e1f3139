//! The push run: connect, initialize, configure the remote, write the ignore
//! file, then commit and push.
//!
//! Stages run strictly in order and the first error ends the run. Nothing
//! touches the project directory before the GitHub checks have passed.

use chrono::{DateTime, Local};
use std::fmt;

use crate::audit::AuditLogger;
use crate::config::prompt::{Confirm, StdinConfirm};
use crate::config::settings::{CreateRepoPolicy, Settings};
use crate::error::{AppResult, GitError};
use crate::git::executor::GitExecutor;
use crate::git::remote::{self, ORIGIN, RemoteAction};
use crate::git::repository::{InitOutcome, Repository};
use crate::git::version::GitVersion;
use crate::github::client::{GitHubApi, GitHubError};
use crate::github::types::CreateRepoRequest;
use crate::ignore::{self, IgnoreOutcome};
use crate::report::Reporter;

/// Last stage a run completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Validated,
    Connected,
    Initialized,
    RemoteReady,
    Committed,
    Pushed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validated => "configuration validated",
            Stage::Connected => "connected to GitHub",
            Stage::Initialized => "repository initialized",
            Stage::RemoteReady => "remote configured",
            Stage::Committed => "changes committed",
            Stage::Pushed => "changes pushed",
        };
        f.write_str(name)
    }
}

/// Whether the GitHub repository was found or created by this run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoAvailability {
    Existing,
    Created,
}

/// Result of the connectivity checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub login: String,
    pub repository: RepoAvailability,
}

/// Result of the commit-and-push stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// The working tree was clean; nothing was committed or pushed
    UpToDate,
    Pushed {
        /// Abbreviated id of the pushed tip
        commit: String,
        files: usize,
        /// `false` when the commit failed and the existing tip was pushed
        committed: bool,
    },
}

/// What a successful run did at each stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub connection: Connection,
    pub init: InitOutcome,
    pub remote: RemoteAction,
    pub ignore: IgnoreOutcome,
    pub push: PushOutcome,
}

/// `Auto-commit: updates at 2024-05-01 12:00:00 (3 files changed)`
pub fn auto_commit_message(now: DateTime<Local>, files: usize) -> String {
    format!(
        "Auto-commit: updates at {} ({} {} changed)",
        now.format("%Y-%m-%d %H:%M:%S"),
        files,
        if files == 1 { "file" } else { "files" }
    )
}

pub struct Workflow<'a> {
    settings: &'a Settings,
    api: &'a dyn GitHubApi,
    reporter: &'a Reporter,
    repo: Repository,
    confirm: Box<dyn Confirm + 'a>,
    stage: Stage,
}

impl<'a> Workflow<'a> {
    /// Start from already validated settings
    pub fn new(
        settings: &'a Settings,
        api: &'a dyn GitHubApi,
        reporter: &'a Reporter,
        audit: Option<AuditLogger>,
    ) -> Self {
        let executor = GitExecutor::new(&settings.project_dir)
            .with_audit(audit)
            .with_secrets(settings.secrets());

        Self {
            settings,
            api,
            reporter,
            repo: Repository::from_executor(executor),
            confirm: Box::new(StdinConfirm),
            stage: Stage::Validated,
        }
    }

    /// Replace the terminal prompt used by `--create-repo prompt`
    pub fn with_confirm(mut self, confirm: Box<dyn Confirm + 'a>) -> Self {
        self.confirm = confirm;
        self
    }

    /// Last completed stage
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// Run every stage in order
    pub async fn run(&mut self) -> AppResult<RunSummary> {
        let version = GitVersion::validate()?;
        self.reporter.info(format!("Using git {version}"));

        let connection = self.connect().await?;
        let init = self.initialize()?;
        let remote = self.configure_remote()?;
        let ignore = self.write_ignore()?;
        let push = self.commit_and_push()?;

        Ok(RunSummary {
            connection,
            init,
            remote,
            ignore,
            push,
        })
    }

    /// Check the token and make sure the target repository exists
    pub async fn connect(&mut self) -> AppResult<Connection> {
        let settings = self.settings;
        self.reporter.progress("Testing GitHub connectivity...");

        let user = self.api.authenticated_user().await?;
        self.reporter
            .success(format!("Connected as GitHub user: {}", user.login));
        if !user.login.eq_ignore_ascii_case(&settings.username) {
            self.reporter.warning(format!(
                "Token belongs to {} but the configured account is {}",
                user.login, settings.username
            ));
        }

        let repository = match self
            .api
            .get_repository(&settings.username, &settings.repo_name)
            .await?
        {
            Some(info) => {
                self.reporter
                    .success(format!("Repository {} access confirmed", info.full_name));
                if let Some(default) = info.default_branch.filter(|d| *d != settings.branch) {
                    self.reporter.info(format!(
                        "Default branch on GitHub is {default}; pushing {}",
                        settings.branch
                    ));
                }
                RepoAvailability::Existing
            }
            None => {
                self.reporter.warning(format!(
                    "Repository {} not found (404)",
                    settings.full_name()
                ));
                self.create_missing_repository(&user.login).await?;
                RepoAvailability::Created
            }
        };

        self.stage = Stage::Connected;
        Ok(Connection {
            login: user.login,
            repository,
        })
    }

    /// `POST /user/repos` creates under the token's login, so the login must
    /// be the configured owner
    async fn create_missing_repository(&mut self, login: &str) -> AppResult<()> {
        let settings = self.settings;
        let not_found = || GitHubError::RepositoryNotFound {
            owner: settings.username.clone(),
            repo: settings.repo_name.clone(),
        };

        if settings.create_repo == CreateRepoPolicy::Never {
            return Err(not_found().into());
        }
        if !login.eq_ignore_ascii_case(&settings.username) {
            return Err(GitHubError::AccountMismatch {
                login: login.to_string(),
                owner: settings.username.clone(),
            }
            .into());
        }

        let wanted = settings.create_repo == CreateRepoPolicy::Always
            || self.confirm.confirm(&format!(
                "Create repository {} on GitHub?",
                settings.full_name()
            ))?;
        if !wanted {
            return Err(not_found().into());
        }

        let request = CreateRepoRequest {
            name: settings.repo_name.clone(),
            description: settings.description.clone(),
            private: settings.private,
        };
        let created = self.api.create_repository(&request).await?;
        self.reporter.success(format!(
            "Created {} repository {}",
            if created.private { "private" } else { "public" },
            created.full_name
        ));
        Ok(())
    }

    /// Create `.git` and the target branch unless already present
    pub fn initialize(&mut self) -> AppResult<InitOutcome> {
        let branch = &self.settings.branch;
        let outcome = self.repo.init(branch)?;

        match outcome {
            InitOutcome::Created => self
                .reporter
                .success(format!("Initialized git repository on branch {branch}")),
            InitOutcome::AlreadyInitialized => {
                self.reporter.info("Git repository already initialized");
                match self.repo.current_branch()? {
                    Some(current) if current != *branch => self.reporter.warning(format!(
                        "Current branch is {current}, not {branch}; pending changes will not be committed"
                    )),
                    None => self.reporter.warning(format!(
                        "HEAD is detached; check out {branch} to commit pending changes"
                    )),
                    _ => {}
                }
            }
        }

        self.stage = Stage::Initialized;
        Ok(outcome)
    }

    /// Add `origin` or point it at the configured repository
    pub fn configure_remote(&mut self) -> AppResult<RemoteAction> {
        self.reporter.progress("Setting up remote origin...");
        let url = remote::origin_url(self.settings);
        let action = remote::configure_origin(&self.repo, &url)?;

        let shown = self.repo.executor().redact(&url);
        match action {
            RemoteAction::Added => self.reporter.success(format!("Added remote origin {shown}")),
            RemoteAction::Updated => self
                .reporter
                .success(format!("Updated remote origin to {shown}")),
            RemoteAction::Unchanged => self.reporter.info("Remote origin already up to date"),
        }

        self.stage = Stage::RemoteReady;
        Ok(action)
    }

    pub fn write_ignore(&mut self) -> AppResult<IgnoreOutcome> {
        if !self.settings.write_gitignore {
            return Ok(IgnoreOutcome::Disabled);
        }

        let outcome = ignore::write_gitignore(self.repo.path())?;
        match outcome {
            IgnoreOutcome::Written => self.reporter.success("Created .gitignore"),
            IgnoreOutcome::AlreadyPresent => self.reporter.info(".gitignore already present"),
            IgnoreOutcome::Disabled => {}
        }
        Ok(outcome)
    }

    /// Stage, commit and push pending changes
    ///
    /// A clean tree ends the stage successfully without committing or
    /// pushing. Pending changes are only committed on the configured branch.
    /// A failed commit is only a warning; a failed push is fatal and leaves
    /// any new local commit in place.
    pub fn commit_and_push(&mut self) -> AppResult<PushOutcome> {
        let branch = &self.settings.branch;
        self.reporter.progress("Checking working tree...");

        let state = self.repo.state()?;
        if state.is_clean() {
            self.reporter
                .success("Working tree clean, nothing to commit or push");
            return Ok(PushOutcome::UpToDate);
        }

        let files = state.changed_file_count();
        if state.current_branch.as_deref() != Some(branch.as_str()) {
            return Err(GitError::BranchMismatch {
                expected: branch.clone(),
                current: state.current_branch,
            }
            .into());
        }

        self.repo.stage_all()?;

        let message = self
            .settings
            .commit_message
            .clone()
            .unwrap_or_else(|| auto_commit_message(Local::now(), files));

        let committed = match self.repo.commit(&message) {
            Ok(output) => {
                self.reporter.detail(&output.stdout);
                self.reporter.success(format!("Committed: {message}"));
                self.stage = Stage::Committed;
                true
            }
            Err(e) => {
                self.reporter
                    .warning(format!("Nothing to commit (or commit failed): {e}"));
                false
            }
        };

        self.reporter
            .progress(format!("Pushing {branch} to {ORIGIN}..."));
        let output = self.repo.push(ORIGIN, branch, true)?;
        // git reports push progress on stderr
        self.reporter.detail(&self.repo.executor().redact(&output.stderr));

        let commit = self.repo.rev_parse(branch, true)?;
        self.stage = Stage::Pushed;
        self.reporter
            .success(format!("All changes pushed successfully ({commit})"));

        Ok(PushOutcome::Pushed {
            commit,
            files,
            committed,
        })
    }
}
