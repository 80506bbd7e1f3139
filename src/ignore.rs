use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

pub const GITIGNORE_FILE: &str = ".gitignore";

/// Patterns written to a project that has no `.gitignore` yet
pub const GITIGNORE_TEMPLATE: &str = "\
# Dependencies
node_modules/
vendor/
.venv/
venv/
__pycache__/
*.py[cod]

# Build output
target/
dist/
build/
out/
*.o
*.class

# Editors
.vscode/
.idea/
*.swp
*.swo
*~

# OS
.DS_Store
Thumbs.db
desktop.ini

# Logs
*.log
logs/

# Secrets
.env
.env.*
!.env.example
*.pem
*.key
*.p12
secrets.json
credentials.json
";

/// Result of [`write_gitignore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreOutcome {
    Written,
    /// A `.gitignore` existed and was left untouched
    AlreadyPresent,
    /// Writing was turned off in the settings
    Disabled,
}

/// Write [`GITIGNORE_TEMPLATE`] to `<project_dir>/.gitignore` unless the file exists
pub fn write_gitignore(project_dir: &Path) -> io::Result<IgnoreOutcome> {
    let path = project_dir.join(GITIGNORE_FILE);

    let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Ok(IgnoreOutcome::AlreadyPresent);
        }
        Err(e) => return Err(e),
    };

    file.write_all(GITIGNORE_TEMPLATE.as_bytes())?;
    Ok(IgnoreOutcome::Written)
}
