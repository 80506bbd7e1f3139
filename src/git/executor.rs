use crate::audit::AuditLogger;
use crate::error::{GitError, GitResult};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const REDACTED: &str = "***";

/// Result of executing a git command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub success: bool,
}

/// Executes git commands within a project directory.
///
/// Commands are always passed as argument vectors and never go through a
/// shell. Any configured secret is masked in audit entries and error messages.
#[derive(Debug, Clone)]
pub struct GitExecutor {
    repo_path: PathBuf,
    audit: Option<AuditLogger>,
    secrets: Vec<String>,
}

impl GitExecutor {
    /// Create a new GitExecutor for the given directory
    pub fn new<P: AsRef<Path>>(repo_path: P) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
            audit: None,
            secrets: Vec::new(),
        }
    }

    /// Record every invocation in the given audit log
    pub fn with_audit(mut self, audit: Option<AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    /// Register values that must never appear in logs or errors
    pub fn with_secrets<I, S>(mut self, secrets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.secrets
            .extend(secrets.into_iter().map(Into::into).filter(|s| !s.is_empty()));
        // Longest first so a secret containing another is masked whole.
        self.secrets
            .sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        self.secrets.dedup();
        self
    }

    /// Execute a git command, failing on a non-zero exit status
    ///
    /// The arguments should not include the "git" program itself.
    /// Example: `executor.execute(&["status", "--porcelain=v2"])`
    pub fn execute(&self, args: &[&str]) -> GitResult<CommandOutput> {
        let output = self.run(args)?;

        if !output.success {
            return Err(GitError::CommandFailed {
                command: self.display_command(args),
                exit_code: output.exit_code,
                stderr: self.redact(output.stderr.trim()),
            });
        }

        Ok(output)
    }

    /// Execute a git command and return its output whatever the exit status
    pub fn run(&self, args: &[&str]) -> GitResult<CommandOutput> {
        if args.is_empty() {
            return Err(GitError::EmptyCommand);
        }

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .map_err(|e| GitError::SpawnFailed(e.to_string()))?;

        let result = Self::process_output(output);

        if let Some(audit) = &self.audit {
            // Audit failures must not break the run.
            let _ = audit.log_command(&self.display_command(args), &self.repo_path, result.exit_code);
        }

        Ok(result)
    }

    fn process_output(output: Output) -> CommandOutput {
        CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            success: output.status.success(),
        }
    }

    /// Human-readable command line with secrets masked
    pub fn display_command(&self, args: &[&str]) -> String {
        self.redact(&format!("git {}", args.join(" ")))
    }

    /// Replace every registered secret in `text` with `***`
    pub fn redact(&self, text: &str) -> String {
        self.secrets
            .iter()
            .fold(text.to_string(), |acc, secret| acc.replace(secret.as_str(), REDACTED))
    }

    /// Get the working directory commands run in
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }
}
