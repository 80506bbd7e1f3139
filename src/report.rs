use crossterm::style::Stylize;
use std::io::{self, IsTerminal};

/// Kind of status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Progress,
    Success,
    Info,
    Warning,
    Error,
}

impl Level {
    fn icon(self) -> &'static str {
        match self {
            Level::Progress => "→",
            Level::Success => "✓",
            Level::Info => "ℹ",
            Level::Warning => "⚠",
            Level::Error => "✗",
        }
    }
}

/// Console output for a run, written to stderr
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    color: bool,
    quiet: bool,
    silent: bool,
}

impl Reporter {
    /// Colors follow the terminal and `NO_COLOR`; `quiet` keeps only
    /// warnings and errors
    pub fn new(quiet: bool) -> Self {
        let color = io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self {
            color,
            quiet,
            silent: false,
        }
    }

    /// Prints nothing at all
    pub fn silent() -> Self {
        Self {
            color: false,
            quiet: true,
            silent: true,
        }
    }

    pub fn banner(&self, title: &str) {
        if self.quiet || self.silent {
            return;
        }
        if self.color {
            eprintln!("\n{}\n", title.cyan().bold());
        } else {
            eprintln!("\n{title}\n");
        }
    }

    pub fn progress(&self, message: impl AsRef<str>) {
        self.emit(Level::Progress, message.as_ref());
    }

    pub fn success(&self, message: impl AsRef<str>) {
        self.emit(Level::Success, message.as_ref());
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.emit(Level::Info, message.as_ref());
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.emit(Level::Warning, message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.emit(Level::Error, message.as_ref());
    }

    /// Indented output of an external command
    pub fn detail(&self, text: &str) {
        if self.quiet || self.silent {
            return;
        }
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            eprintln!("    {line}");
        }
    }

    fn emit(&self, level: Level, message: &str) {
        if self.silent {
            return;
        }
        if self.quiet && !matches!(level, Level::Warning | Level::Error) {
            return;
        }
        eprintln!("{}", format_line(level, message, self.color));
    }
}

/// Render one status line
pub fn format_line(level: Level, message: &str, color: bool) -> String {
    let line = format!("{} {}", level.icon(), message);
    if !color {
        return line;
    }

    match level {
        Level::Progress => line.as_str().blue().to_string(),
        Level::Success => line.as_str().green().to_string(),
        Level::Info => line,
        Level::Warning => line.as_str().yellow().to_string(),
        Level::Error => line.as_str().red().bold().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines() {
        assert_eq!(format_line(Level::Success, "done", false), "✓ done");
        assert_eq!(format_line(Level::Error, "bad", false), "✗ bad");
        assert_eq!(format_line(Level::Warning, "hmm", false), "⚠ hmm");
    }

    #[test]
    fn test_colored_lines_wrap_message() {
        let line = format_line(Level::Success, "done", true);
        // crossterm drops the escape codes itself when NO_COLOR is set
        assert!(line.contains("✓ done"));
    }

    #[test]
    fn test_info_is_never_colored() {
        assert_eq!(format_line(Level::Info, "note", true), "ℹ note");
    }
}
