use std::io::{self, BufRead, IsTerminal, Write};

/// Yes/no questions asked during a run
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Asks on stderr and reads the answer from stdin.
///
/// A non-interactive stdin is treated as "no" without blocking.
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        if !io::stdin().is_terminal() {
            return Ok(false);
        }

        let stdin = io::stdin();
        ask(question, &mut stdin.lock(), &mut io::stderr())
    }
}

/// Always gives the same answer
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&mut self, _question: &str) -> io::Result<bool> {
        Ok(self.0)
    }
}

/// Prompt until the answer is y/yes, n/no, or empty (default no)
pub fn ask<R: BufRead, W: Write>(question: &str, input: &mut R, output: &mut W) -> io::Result<bool> {
    loop {
        write!(output, "{question} [y/N]: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }

        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "" | "n" | "no" => return Ok(false),
            _ => writeln!(output, "Please answer y or n.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(input: &str) -> (bool, String) {
        let mut output = Vec::new();
        let result = ask("Create repository?", &mut Cursor::new(input), &mut output).unwrap();
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_yes() {
        assert!(answer("y\n").0);
        assert!(answer("YES\n").0);
    }

    #[test]
    fn test_default_is_no() {
        assert!(!answer("\n").0);
        assert!(!answer("").0);
        assert!(!answer("no\n").0);
    }

    #[test]
    fn test_reprompts_on_garbage() {
        let (result, output) = answer("maybe\ny\n");
        assert!(result);
        assert_eq!(output.matches("Create repository? [y/N]: ").count(), 2);
        assert!(output.contains("Please answer y or n."));
    }

    #[test]
    fn test_fixed_answer() {
        assert!(FixedAnswer(true).confirm("?").unwrap());
        assert!(!FixedAnswer(false).confirm("?").unwrap());
    }
}
