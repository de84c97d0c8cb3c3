//! Line-based question/answer input.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use super::error::{AuthError, AuthResult};

/// Source of answers to credential questions.
pub trait Prompter {
    /// Asks `question` and returns the answer without its line terminator.
    ///
    /// When `hidden` is set the answer must not be echoed.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Interrupted`] when the input stream is closed.
    fn ask(&mut self, question: &str, hidden: bool) -> AuthResult<String>;
}

/// Prompter reading from the controlling terminal.
///
/// Questions go to stderr so stdout stays free for fetched content. Visible
/// answers are read from stdin; hidden answers go through `rpassword` so they
/// are not echoed.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    /// Creates a terminal prompter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &str, hidden: bool) -> AuthResult<String> {
        if hidden {
            return rpassword::prompt_password(question).map_err(map_eof);
        }

        eprint!("{}", question);
        io::stderr().flush()?;

        let mut input = String::new();
        let read = io::stdin().lock().read_line(&mut input)?;
        if read == 0 {
            return Err(AuthError::Interrupted);
        }

        Ok(trim_line_ending(&input).to_string())
    }
}

fn map_eof(err: io::Error) -> AuthError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        AuthError::Interrupted
    } else {
        AuthError::Io(err)
    }
}

fn trim_line_ending(line: &str) -> &str {
    line.strip_suffix('\n').map_or(line, |l| l.strip_suffix('\r').unwrap_or(l))
}

/// Prompter answering from a fixed queue.
///
/// Used for non-interactive runs and tests. Every question is recorded; once
/// the queue is exhausted the input stream counts as closed.
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<(String, bool)>,
}

impl ScriptedPrompter {
    /// Creates a prompter that replies with `answers` in order.
    pub fn new<S: Into<String>>(answers: impl IntoIterator<Item = S>) -> Self {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Questions asked so far with their hidden flag.
    pub fn asked(&self) -> &[(String, bool)] {
        &self.asked
    }

    /// Number of answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str, hidden: bool) -> AuthResult<String> {
        self.asked.push((question.to_string(), hidden));
        self.answers.pop_front().ok_or(AuthError::Interrupted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_prompter_answers_in_order() {
        let mut prompter = ScriptedPrompter::new(["octocat", "hunter2"]);
        assert_eq!(prompter.ask("username: ", false).unwrap(), "octocat");
        assert_eq!(prompter.ask("password: ", true).unwrap(), "hunter2");
        assert_eq!(
            prompter.asked(),
            &[("username: ".to_string(), false), ("password: ".to_string(), true)]
        );
    }

    #[test]
    fn test_scripted_prompter_exhausted_is_interrupted() {
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
        assert!(matches!(prompter.ask("username: ", false), Err(AuthError::Interrupted)));
    }

    #[test]
    fn test_trim_line_ending() {
        assert_eq!(trim_line_ending("octocat\n"), "octocat");
        assert_eq!(trim_line_ending("octocat\r\n"), "octocat");
        assert_eq!(trim_line_ending("octocat"), "octocat");
        assert_eq!(trim_line_ending(" spaced \n"), " spaced ");
    }

    #[test]
    fn test_map_eof() {
        let err = map_eof(io::Error::new(io::ErrorKind::UnexpectedEof, "eof"));
        assert!(matches!(err, AuthError::Interrupted));
        let err = map_eof(io::Error::new(io::ErrorKind::Other, "tty"));
        assert!(matches!(err, AuthError::Io(_)));
    }
}
