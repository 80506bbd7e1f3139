use crate::error::{GitError, GitResult};

/// Parse `git status --porcelain=v2` output
///
/// Header lines (`#`) and ignored entries (`!`) are skipped.
pub fn parse_status_porcelain_v2(output: &str) -> GitResult<Vec<StatusEntry>> {
    let mut entries = Vec::new();

    for line in output.lines() {
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let entry = match line.as_bytes()[0] {
            // 1 <XY> <sub> <mH> <mI> <mW> <hH> <hI> <path>
            b'1' => tracked_entry(line, 9)?,
            // 2 <XY> <sub> <mH> <mI> <mW> <hH> <hI> <X><score> <path><TAB><origPath>
            b'2' => tracked_entry(line, 10)?,
            // u <XY> <sub> <m1> <m2> <m3> <mW> <h1> <h2> <h3> <path>
            b'u' => {
                let mut entry = tracked_entry(line, 11)?;
                entry.status = FileStatus::Unmerged;
                entry
            }
            b'?' => {
                let path = line
                    .strip_prefix("? ")
                    .ok_or_else(|| GitError::ParseError(format!("Malformed status line: {line}")))?;
                StatusEntry {
                    status: FileStatus::Untracked,
                    path: path.to_string(),
                    staged: false,
                    unstaged: true,
                }
            }
            _ => {
                return Err(GitError::ParseError(format!(
                    "Unknown status line: {line}"
                )));
            }
        };

        entries.push(entry);
    }

    Ok(entries)
}

fn tracked_entry(line: &str, fields: usize) -> GitResult<StatusEntry> {
    let parts: Vec<&str> = line.splitn(fields, ' ').collect();
    if parts.len() < fields {
        return Err(GitError::ParseError(format!("Truncated status line: {line}")));
    }

    let xy = parts[1].as_bytes();
    if xy.len() != 2 {
        return Err(GitError::ParseError(format!("Invalid XY field: {}", parts[1])));
    }

    // Renames carry "<path>\t<origPath>"; keep the new path.
    let path = parts[fields - 1]
        .split('\t')
        .next()
        .unwrap_or_default()
        .to_string();

    let (index, worktree) = (xy[0], xy[1]);
    let code = if index != b'.' { index } else { worktree };

    Ok(StatusEntry {
        status: FileStatus::from_code(code),
        path,
        staged: index != b'.',
        unstaged: worktree != b'.',
    })
}

/// Parse `git remote` output into remote names
pub fn parse_remote_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Represents a file status entry from git status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub status: FileStatus,
    pub path: String,
    pub staged: bool,
    pub unstaged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Modified,
    Added,
    Deleted,
    Renamed,
    Copied,
    TypeChanged,
    Unmerged,
    Untracked,
    Unknown,
}

impl FileStatus {
    fn from_code(code: u8) -> Self {
        match code {
            b'M' => FileStatus::Modified,
            b'A' => FileStatus::Added,
            b'D' => FileStatus::Deleted,
            b'R' => FileStatus::Renamed,
            b'C' => FileStatus::Copied,
            b'T' => FileStatus::TypeChanged,
            b'U' => FileStatus::Unmerged,
            _ => FileStatus::Unknown,
        }
    }
}
