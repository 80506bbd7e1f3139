use crate::config::settings::ConfigError;
use crate::error::{AppError, GitError};
use crate::github::client::GitHubError;

#[derive(Debug, Clone)]
pub struct UserFriendlyError {
    pub simple_message: String,
    pub suggestion: Option<String>,
    pub raw_error: String,
}

impl UserFriendlyError {
    fn new(simple_message: &str, suggestion: Option<&str>, raw_error: String) -> Self {
        Self {
            simple_message: simple_message.to_string(),
            suggestion: suggestion.map(str::to_string),
            raw_error,
        }
    }
}

pub struct ErrorTranslator;

impl ErrorTranslator {
    /// Translate an AppError into a user-friendly error message
    pub fn translate_app_error(error: &AppError) -> UserFriendlyError {
        match error {
            AppError::Config(config_err) => Self::translate_config(config_err),
            AppError::GitHub(github_err) => Self::translate_github(github_err),
            AppError::Git(git_err) => Self::translate(git_err),
            AppError::Io(io_err) => UserFriendlyError::new(
                "I/O error occurred.",
                Some("Check file permissions and disk space"),
                io_err.to_string(),
            ),
        }
    }

    fn translate_config(error: &ConfigError) -> UserFriendlyError {
        let raw = error.to_string();
        match error {
            ConfigError::Missing(_) => UserFriendlyError::new(
                "Required settings are missing.",
                Some("Set them as flags, environment variables, or in ghpush.toml"),
                raw,
            ),
            ConfigError::DirectoryNotFound(_) => UserFriendlyError::new(
                "The project directory does not exist.",
                Some("Check --dir / PROJECT_DIR"),
                raw,
            ),
            ConfigError::FileNotFound(_) => UserFriendlyError::new(
                "The settings file passed with --config does not exist.",
                None,
                raw,
            ),
            ConfigError::ReadError(_) | ConfigError::ParseError(_) => UserFriendlyError::new(
                "The settings file could not be read.",
                Some("Check the TOML syntax and key names"),
                raw,
            ),
            ConfigError::InvalidValue(_) => UserFriendlyError::new(
                "A configured value is not valid.",
                None,
                raw,
            ),
        }
    }

    fn translate_github(error: &GitHubError) -> UserFriendlyError {
        let raw = error.to_string();
        match error {
            GitHubError::Authentication => UserFriendlyError::new(
                "GitHub rejected the token.",
                Some("Check GITHUB_TOKEN is valid, not expired, and has the repo scope"),
                raw,
            ),
            GitHubError::RepositoryNotFound { .. } => UserFriendlyError::new(
                "The repository does not exist on GitHub.",
                Some("Create it first, or rerun with --create-repo prompt or --create-repo always"),
                raw,
            ),
            GitHubError::AccountMismatch { .. } => UserFriendlyError::new(
                "The token belongs to a different GitHub account.",
                Some("Use a token for the configured account, or set GITHUB_USERNAME to the token's login"),
                raw,
            ),
            GitHubError::Api { status: 403, .. } => UserFriendlyError::new(
                "GitHub refused the request.",
                Some("The token may lack permissions, or the API rate limit was hit"),
                raw,
            ),
            GitHubError::Api { status: 422, .. } => UserFriendlyError::new(
                "GitHub could not create the repository.",
                Some("A repository with that name may already exist under another account"),
                raw,
            ),
            GitHubError::Api { .. } | GitHubError::InvalidResponse(_) => {
                UserFriendlyError::new("Unexpected response from GitHub.", None, raw)
            }
            GitHubError::Network(_) => UserFriendlyError::new(
                "Could not reach GitHub.",
                Some("Check your network connection and GITHUB_API_URL"),
                raw,
            ),
        }
    }

    /// Translate a GitError into a user-friendly error message
    pub fn translate(error: &GitError) -> UserFriendlyError {
        let raw_error = error.to_string();

        let (simple_message, suggestion) = match error {
            GitError::SpawnFailed(_) | GitError::GitVersionDetectionFailed(_) => (
                "git could not be run.".to_string(),
                Some("Install git and make sure it is on PATH".to_string()),
            ),
            GitError::BranchMismatch { expected, .. } => (
                "Pending changes are on a different branch than the one to push.".to_string(),
                Some(format!(
                    "Run: git checkout {expected}, or pass --branch with the current branch"
                )),
            ),
            GitError::GitVersionTooOld(_) => (
                "The installed git is too old.".to_string(),
                Some("Upgrade git to 2.20 or newer".to_string()),
            ),
            _ => Self::match_error_patterns(&raw_error),
        };

        UserFriendlyError {
            simple_message,
            suggestion,
            raw_error,
        }
    }

    /// Match common git error patterns and provide user-friendly messages
    fn match_error_patterns(error_text: &str) -> (String, Option<String>) {
        let lower = error_text.to_lowercase();

        // Remote has commits the local branch lacks
        if lower.contains("non-fast-forward")
            || lower.contains("fetch first")
            || (lower.contains("rejected") && lower.contains("behind"))
        {
            return (
                "The remote branch has commits that are not in the local branch.".to_string(),
                Some("Pull and merge the remote changes, then run again".to_string()),
            );
        }

        if lower.contains("authentication failed")
            || lower.contains("permission denied")
            || lower.contains("could not read username")
        {
            return (
                "git could not authenticate with the remote.".to_string(),
                Some("Check the token, or configure a credential helper for --remote-auth credential-helper".to_string()),
            );
        }

        if lower.contains("src refspec") && lower.contains("does not match any") {
            return (
                "The branch to push has no commits.".to_string(),
                Some("Add at least one file to the project directory".to_string()),
            );
        }

        if lower.contains("please tell me who you are") || lower.contains("unable to auto-detect email") {
            return (
                "git has no commit identity configured.".to_string(),
                Some("Run: git config --global user.name and git config --global user.email".to_string()),
            );
        }

        if lower.contains("could not resolve host") || lower.contains("failed to connect") {
            return (
                "Could not reach the git server.".to_string(),
                Some("Check your network connection and GITHUB_SERVER_URL".to_string()),
            );
        }

        if (lower.contains("repository") && lower.contains("not found"))
            || lower.contains("does not appear to be a git repository")
        {
            return (
                "Remote repository not found.".to_string(),
                Some("Check the repository name and that the token can access it".to_string()),
            );
        }

        if lower.contains("already exists") && lower.contains("branch") {
            return (
                "A branch with that name already exists.".to_string(),
                None,
            );
        }

        // Default: return the error as-is with no suggestion
        (error_text.to_string(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::validator::ValidationError;

    fn failed(stderr: &str) -> GitError {
        GitError::CommandFailed {
            command: "git push -u origin main".to_string(),
            exit_code: 1,
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn test_translate_rejected_push() {
        let error = failed(
            "! [rejected]        main -> main (fetch first)\nerror: failed to push some refs",
        );
        let translated = ErrorTranslator::translate(&error);

        assert!(translated.simple_message.contains("remote branch has commits"));
        assert!(translated.suggestion.unwrap().contains("Pull"));
    }

    #[test]
    fn test_translate_authentication_failed() {
        let error = failed("remote: Invalid username or token.\nfatal: Authentication failed for 'https://github.com/o/r.git/'");
        let translated = ErrorTranslator::translate(&error);

        assert!(translated.simple_message.contains("authenticate"));
        assert!(translated.suggestion.is_some());
    }

    #[test]
    fn test_translate_empty_branch() {
        let error = failed("error: src refspec main does not match any");
        let translated = ErrorTranslator::translate(&error);

        assert!(translated.simple_message.contains("no commits"));
    }

    #[test]
    fn test_translate_missing_identity() {
        let error = failed("*** Please tell me who you are.\n\nRun\n\n  git config --global user.email");
        let translated = ErrorTranslator::translate(&error);

        assert!(translated.simple_message.contains("identity"));
        assert!(translated.suggestion.unwrap().contains("user.email"));
    }

    #[test]
    fn test_translate_unresolved_host() {
        let error = failed("fatal: unable to access 'https://github.com/o/r.git/': Could not resolve host: github.com");
        let translated = ErrorTranslator::translate(&error);

        assert!(translated.simple_message.contains("Could not reach"));
    }

    #[test]
    fn test_translate_old_git() {
        let translated = ErrorTranslator::translate(&GitError::GitVersionTooOld("2.17.1".to_string()));
        assert!(translated.suggestion.unwrap().contains("2.20"));
    }

    #[test]
    fn test_translate_branch_mismatch() {
        let error = GitError::BranchMismatch {
            expected: "main".to_string(),
            current: Some("work".to_string()),
        };
        let translated = ErrorTranslator::translate(&error);

        assert!(translated.suggestion.unwrap().contains("git checkout main"));
        assert_eq!(
            translated.raw_error,
            "On work instead of configured branch main"
        );

        let detached = GitError::BranchMismatch {
            expected: "main".to_string(),
            current: None,
        };
        assert!(detached.to_string().starts_with("On a detached HEAD"));
    }

    #[test]
    fn test_translate_unknown_error() {
        let error = failed("Some unknown error message");
        let translated = ErrorTranslator::translate(&error);

        assert!(translated.simple_message.contains("Some unknown error message"));
        assert!(translated.suggestion.is_none());
    }

    #[test]
    fn test_translate_github_errors() {
        let auth = ErrorTranslator::translate_app_error(&AppError::GitHub(GitHubError::Authentication));
        assert!(auth.suggestion.unwrap().contains("repo scope"));

        let missing = ErrorTranslator::translate_app_error(&AppError::GitHub(
            GitHubError::RepositoryNotFound {
                owner: "octocat".to_string(),
                repo: "hello".to_string(),
            },
        ));
        assert!(missing.suggestion.unwrap().contains("--create-repo"));
        assert!(missing.raw_error.contains("octocat/hello"));

        let mismatch = ErrorTranslator::translate_app_error(&AppError::GitHub(
            GitHubError::AccountMismatch {
                login: "someone-else".to_string(),
                owner: "octocat".to_string(),
            },
        ));
        assert!(mismatch.simple_message.contains("different GitHub account"));
        assert!(mismatch.raw_error.contains("someone-else"));
    }

    #[test]
    fn test_translate_config_errors() {
        let missing = ErrorTranslator::translate_app_error(&AppError::Config(ConfigError::Missing(
            vec!["GITHUB_TOKEN"],
        )));
        assert!(missing.raw_error.contains("GITHUB_TOKEN"));
        assert!(missing.suggestion.is_some());

        let invalid = ErrorTranslator::translate_app_error(&AppError::Config(
            ConfigError::InvalidValue(ValidationError::Empty { field: "branch" }),
        ));
        assert!(invalid.simple_message.contains("not valid"));
    }

    #[test]
    fn test_raw_error_preserved() {
        let error = failed("fatal: repository 'https://github.com/o/r.git/' not found");
        let translated = ErrorTranslator::translate(&error);

        assert!(translated.raw_error.contains("git push -u origin main"));
        assert!(translated.simple_message.contains("Remote repository not found"));
    }
}
