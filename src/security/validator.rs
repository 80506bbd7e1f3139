use thiserror::Error;

const MAX_USERNAME_LEN: usize = 39;
const MAX_REPO_NAME_LEN: usize = 100;

/// Characters git forbids anywhere in a ref name
const FORBIDDEN_REF_CHARS: &[char] = &['~', '^', ':', '?', '*', '[', '\\'];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is empty")]
    Empty { field: &'static str },

    #[error("{field} is longer than {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} contains invalid character {ch:?}")]
    InvalidCharacter { field: &'static str, ch: char },

    #[error("{field} {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
}

fn check_length(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// GitHub login: alphanumerics and hyphens, no leading or trailing hyphen
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    const FIELD: &str = "username";
    check_length(FIELD, username, MAX_USERNAME_LEN)?;

    if let Some(ch) = username
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-'))
    {
        return Err(ValidationError::InvalidCharacter { field: FIELD, ch });
    }

    if username.starts_with('-') || username.ends_with('-') {
        return Err(ValidationError::InvalidFormat {
            field: FIELD,
            reason: "cannot start or end with '-'",
        });
    }

    Ok(())
}

/// Repository name: `[A-Za-z0-9._-]`, not `.` or `..`
pub fn validate_repo_name(name: &str) -> Result<(), ValidationError> {
    const FIELD: &str = "repository name";
    check_length(FIELD, name, MAX_REPO_NAME_LEN)?;

    if let Some(ch) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
    {
        return Err(ValidationError::InvalidCharacter { field: FIELD, ch });
    }

    if name == "." || name == ".." {
        return Err(ValidationError::InvalidFormat {
            field: FIELD,
            reason: "cannot be '.' or '..'",
        });
    }

    Ok(())
}

/// Branch name following `git check-ref-format --branch` rules
pub fn validate_branch_name(branch: &str) -> Result<(), ValidationError> {
    const FIELD: &str = "branch";

    if branch.is_empty() {
        return Err(ValidationError::Empty { field: FIELD });
    }

    if let Some(ch) = branch
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || FORBIDDEN_REF_CHARS.contains(c))
    {
        return Err(ValidationError::InvalidCharacter { field: FIELD, ch });
    }

    let reason = if branch.starts_with('-') {
        Some("cannot start with '-'")
    } else if branch == "@" {
        Some("cannot be '@'")
    } else if branch.contains("..") || branch.contains("@{") || branch.contains("//") {
        Some("cannot contain '..', '@{' or '//'")
    } else if branch.starts_with('/') || branch.ends_with('/') || branch.ends_with('.') {
        Some("cannot start with '/' or end with '/' or '.'")
    } else if branch.ends_with(".lock") {
        Some("cannot end with '.lock'")
    } else if branch.split('/').any(|part| part.starts_with('.')) {
        Some("components cannot start with '.'")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ValidationError::InvalidFormat {
            field: FIELD,
            reason,
        }),
        None => Ok(()),
    }
}

/// Git server base URL with an `http`, `https` or `file` scheme
pub fn validate_base_url(field: &'static str, url: &str) -> Result<(), ValidationError> {
    check_url(
        field,
        url,
        &["https://", "http://", "file://"],
        "must be an http(s):// or file:// URL",
    )
}

/// REST API base URL; only `http` and `https` can be requested
pub fn validate_api_url(field: &'static str, url: &str) -> Result<(), ValidationError> {
    check_url(field, url, &["https://", "http://"], "must be an http(s):// URL")
}

fn check_url(
    field: &'static str,
    url: &str,
    schemes: &[&str],
    reason: &'static str,
) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    let supported = schemes
        .iter()
        .any(|scheme| url.starts_with(scheme) && url.len() > scheme.len());

    if !supported {
        return Err(ValidationError::InvalidFormat { field, reason });
    }

    if let Some(ch) = url.chars().find(|c| c.is_whitespace()) {
        return Err(ValidationError::InvalidCharacter { field, ch });
    }

    Ok(())
}
