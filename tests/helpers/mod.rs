#![allow(dead_code)]

use ghpush::config::{ConfigOverrides, FileSettings, Settings};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Run git in `dir` and return trimmed stdout, panicking on failure
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Give a repository a local commit identity
pub fn configure_identity(repo_path: &Path) {
    git(repo_path, &["config", "user.name", "Test User"]);
    git(repo_path, &["config", "user.email", "test@example.com"]);
}

/// `git init` on `branch` with a local identity, as a user's existing checkout
pub fn init_project(repo_path: &Path, branch: &str) {
    git(repo_path, &["init"]);
    git(repo_path, &["checkout", "-b", branch]);
    configure_identity(repo_path);
}

/// Helper to create a test git repository
pub fn create_test_repo() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let repo_path = temp_dir.path().to_path_buf();

    init_project(&repo_path, "main");

    (temp_dir, repo_path)
}

/// Helper to create a commit
pub fn create_commit(repo_path: &Path, file: &str, content: &str, message: &str) {
    fs::write(repo_path.join(file), content).expect("Failed to write file");
    git(repo_path, &["add", file]);
    git(repo_path, &["commit", "-m", message]);
}

/// Stand-in for a git host: bare repositories under `<root>/<owner>/<repo>.git`
pub struct FakeServer {
    pub root: TempDir,
}

impl FakeServer {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().unwrap(),
        }
    }

    /// Value for `server_url`
    pub fn url(&self) -> String {
        format!("file://{}", self.root.path().display())
    }

    /// Create the bare repository pushes for `owner/repo` land in
    pub fn create_repo(&self, owner: &str, repo: &str) -> PathBuf {
        let path = self.repo_path(owner, repo);
        fs::create_dir_all(&path).unwrap();
        git(&path, &["init", "--bare"]);
        path
    }

    pub fn repo_path(&self, owner: &str, repo: &str) -> PathBuf {
        self.root.path().join(owner).join(format!("{repo}.git"))
    }
}

/// Overrides for `octocat/hello` in `project_dir` against the given servers
pub fn overrides(project_dir: &Path, api_url: &str, server_url: &str) -> ConfigOverrides {
    ConfigOverrides {
        project_dir: Some(project_dir.to_path_buf()),
        username: Some("octocat".to_string()),
        token: Some("ghp_secret_token".to_string()),
        repo_name: Some("hello".to_string()),
        api_url: Some(api_url.to_string()),
        server_url: Some(server_url.to_string()),
        no_audit: true,
        ..Default::default()
    }
}

pub fn settings(overrides: &ConfigOverrides) -> Settings {
    Settings::resolve(overrides, FileSettings::default()).expect("valid settings")
}
