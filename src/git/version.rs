use crate::error::{GitError, GitResult};
use std::fmt;
use std::process::Command;

/// Oldest git release whose porcelain v2 status and remote handling we rely on
const MINIMUM: GitVersion = GitVersion {
    major: 2,
    minor: 20,
    patch: 0,
};

/// Version of the installed git binary
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct GitVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl GitVersion {
    /// Detect the version of `git` on the PATH
    pub fn detect() -> GitResult<Self> {
        Self::detect_from("git")
    }

    /// Detect the version of a specific git executable
    pub fn detect_from(program: &str) -> GitResult<Self> {
        let output = Command::new(program)
            .arg("--version")
            .output()
            .map_err(|e| {
                GitError::GitVersionDetectionFailed(format!("could not run {program}: {e}"))
            })?;

        if !output.status.success() {
            return Err(GitError::GitVersionDetectionFailed(format!(
                "{program} --version exited with {}",
                output.status
            )));
        }

        Self::parse(&String::from_utf8_lossy(&output.stdout))
    }

    /// Parse output such as "git version 2.39.2" or "git version 2.39.2.windows.1"
    pub fn parse(version_str: &str) -> GitResult<Self> {
        let number = version_str
            .trim()
            .strip_prefix("git version ")
            .and_then(|rest| rest.split_whitespace().next())
            .ok_or_else(|| {
                GitError::ParseError(format!("Unexpected git version format: {version_str}"))
            })?;

        let mut components = number.split('.');
        let mut numeric = |what: &str| -> GitResult<u32> {
            components
                .next()
                .and_then(|c| c.parse().ok())
                .ok_or_else(|| GitError::ParseError(format!("Invalid {what} version in {number}")))
        };

        let major = numeric("major")?;
        let minor = numeric("minor")?;
        // Patch may be missing or carry a vendor suffix (e.g. "2.rc0").
        let patch = numeric("patch").unwrap_or(0);

        Ok(GitVersion {
            major,
            minor,
            patch,
        })
    }

    /// Whether this version meets the minimum requirement
    pub fn is_supported(&self) -> bool {
        (self.major, self.minor) >= (MINIMUM.major, MINIMUM.minor)
    }

    /// Detect the installed git and reject versions below the minimum
    pub fn validate() -> GitResult<Self> {
        let version = Self::detect()?;

        if !version.is_supported() {
            return Err(GitError::GitVersionTooOld(version.to_string()));
        }

        Ok(version)
    }
}

impl fmt::Display for GitVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(major: u32, minor: u32, patch: u32) -> GitVersion {
        GitVersion {
            major,
            minor,
            patch,
        }
    }

    #[test]
    fn test_parse_release_output() {
        assert_eq!(GitVersion::parse("git version 2.43.0\n").unwrap(), v(2, 43, 0));
    }

    #[test]
    fn test_parse_vendor_builds() {
        assert_eq!(
            GitVersion::parse("git version 2.39.2.windows.1").unwrap(),
            v(2, 39, 2)
        );
        assert_eq!(
            GitVersion::parse("git version 2.39.3 (Apple Git-145)").unwrap(),
            v(2, 39, 3)
        );
    }

    #[test]
    fn test_parse_without_patch() {
        assert_eq!(GitVersion::parse("git version 2.39").unwrap(), v(2, 39, 0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(GitVersion::parse("version 2.39.2").is_err());
        assert!(GitVersion::parse("git version").is_err());
        assert!(GitVersion::parse("git version two.three").is_err());
    }

    #[test]
    fn test_minimum_boundary() {
        assert!(v(2, 20, 0).is_supported());
        assert!(v(3, 0, 0).is_supported());
        assert!(!v(2, 19, 9).is_supported());
        assert!(!v(1, 99, 0).is_supported());
    }

    #[test]
    fn test_missing_binary_is_detection_failure() {
        let result = GitVersion::detect_from("definitely-not-a-git-binary");
        assert!(matches!(
            result,
            Err(GitError::GitVersionDetectionFailed(_))
        ));
    }

    #[test]
    fn test_installed_git_is_supported() {
        let version = GitVersion::validate().expect("git >= 2.20 is required to run tests");
        assert!(version >= MINIMUM);
    }

    #[test]
    fn test_display() {
        assert_eq!(v(2, 39, 2).to_string(), "2.39.2");
    }
}
