use crate::error::GitResult;
use crate::git::executor::{CommandOutput, GitExecutor};
use crate::git::parser::{self, FileStatus, StatusEntry};
use std::path::{Path, PathBuf};

/// Result of [`Repository::init`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// `.git` was created and the branch checked out
    Created,
    /// The directory already had `.git`; nothing was run
    AlreadyInitialized,
}

/// A project directory and the git operations the push workflow needs
#[derive(Debug, Clone)]
pub struct Repository {
    path: PathBuf,
    executor: GitExecutor,
}

impl Repository {
    /// Create a Repository for a directory with a plain executor
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::from_executor(GitExecutor::new(path))
    }

    /// Create a Repository around a configured executor
    pub fn from_executor(executor: GitExecutor) -> Self {
        Self {
            path: executor.repo_path().to_path_buf(),
            executor,
        }
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the directory already holds git metadata
    pub fn is_initialized(&self) -> bool {
        self.path.join(".git").exists()
    }

    /// Initialize the repository and create `branch`, unless `.git` exists
    pub fn init(&self, branch: &str) -> GitResult<InitOutcome> {
        if self.is_initialized() {
            return Ok(InitOutcome::AlreadyInitialized);
        }

        self.executor.execute(&["init"])?;
        self.executor.execute(&["checkout", "-b", branch])?;

        Ok(InitOutcome::Created)
    }

    /// Name of the checked-out branch, `None` when HEAD is detached
    pub fn current_branch(&self) -> GitResult<Option<String>> {
        // `symbolic-ref` works on unborn branches and on git < 2.22.
        let output = self.executor.run(&["symbolic-ref", "--short", "-q", "HEAD"])?;
        let branch = output.stdout.trim();

        if !output.success || branch.is_empty() {
            return Ok(None);
        }

        Ok(Some(branch.to_string()))
    }

    /// Query the working tree state
    pub fn state(&self) -> GitResult<RepositoryState> {
        let output = self.executor.execute(&[
            "status",
            "--porcelain=v2",
            "--untracked-files=all",
        ])?;
        let entries = parser::parse_status_porcelain_v2(&output.stdout)?;

        Ok(RepositoryState {
            current_branch: self.current_branch()?,
            entries,
        })
    }

    /// Names of all configured remotes
    pub fn remotes(&self) -> GitResult<Vec<String>> {
        let output = self.executor.execute(&["remote"])?;
        Ok(parser::parse_remote_list(&output.stdout))
    }

    /// Fetch URL of a remote
    pub fn remote_url(&self, name: &str) -> GitResult<String> {
        let output = self.executor.execute(&["remote", "get-url", name])?;
        Ok(output.stdout.trim().to_string())
    }

    pub fn add_remote(&self, name: &str, url: &str) -> GitResult<()> {
        self.executor.execute(&["remote", "add", name, url])?;
        Ok(())
    }

    pub fn set_remote_url(&self, name: &str, url: &str) -> GitResult<()> {
        self.executor.execute(&["remote", "set-url", name, url])?;
        Ok(())
    }

    /// Stage every change in the working tree, deletions included
    pub fn stage_all(&self) -> GitResult<()> {
        self.executor.execute(&["add", "-A"])?;
        Ok(())
    }

    pub fn commit(&self, message: &str) -> GitResult<CommandOutput> {
        self.executor.execute(&["commit", "-m", message])
    }

    /// Push `branch` to `remote`, optionally recording it as upstream
    pub fn push(&self, remote: &str, branch: &str, set_upstream: bool) -> GitResult<CommandOutput> {
        let mut args = vec!["push"];
        if set_upstream {
            args.push("-u");
        }
        args.extend([remote, branch]);
        self.executor.execute(&args)
    }

    /// Object id of a revision
    pub fn rev_parse(&self, rev: &str, short: bool) -> GitResult<String> {
        let mut args = vec!["rev-parse", "--verify"];
        if short {
            args.push("--short");
        }
        args.push(rev);
        let output = self.executor.execute(&args)?;
        Ok(output.stdout.trim().to_string())
    }

    /// Get the git executor for this repository
    pub fn executor(&self) -> &GitExecutor {
        &self.executor
    }
}

/// Snapshot of the working tree
#[derive(Debug, Clone)]
pub struct RepositoryState {
    pub current_branch: Option<String>,
    pub entries: Vec<StatusEntry>,
}

impl RepositoryState {
    /// No staged, unstaged or untracked changes
    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct paths with pending changes
    pub fn changed_file_count(&self) -> usize {
        self.entries.len()
    }

    pub fn untracked(&self) -> impl Iterator<Item = &StatusEntry> {
        self.entries
            .iter()
            .filter(|e| e.status == FileStatus::Untracked)
    }

    /// Check if in detached HEAD state
    pub fn is_detached(&self) -> bool {
        self.current_branch.is_none()
    }
}
