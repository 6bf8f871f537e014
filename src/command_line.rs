// src/command_line.rs

//! Assembling the supervised command line from argument tokens.

use std::borrow::Cow;
use std::fmt;

use crate::errors::{KeepaliveError, Result};

/// The command to keep alive: its tokens plus the joined command-line string.
///
/// Immutable once built and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<String>,
    line: String,
}

impl CommandLine {
    /// Build a command line from raw argument tokens (program name first).
    ///
    /// Returns [`KeepaliveError::Usage`] when `tokens` is empty.
    pub fn new<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        if tokens.is_empty() {
            return Err(KeepaliveError::Usage(
                "at least one command-line token is required".to_string(),
            ));
        }

        let line = join_tokens(&tokens);
        Ok(Self { tokens, line })
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// First token: the program to launch.
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// Everything after the program.
    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    pub fn as_str(&self) -> &str {
        &self.line
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

/// Join tokens into one command-line string.
///
/// A token is wrapped in double quotes iff it contains a space. Embedded
/// quotes are passed through unescaped.
pub fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(|t| quote_token(t.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_token(token: &str) -> Cow<'_, str> {
    if token.contains(' ') {
        Cow::Owned(format!("\"{token}\""))
    } else {
        Cow::Borrowed(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_list_is_a_usage_error() {
        let err = CommandLine::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, KeepaliveError::Usage(_)));
    }

    #[test]
    fn program_and_args_split_tokens() {
        let cmd = CommandLine::new(["app", "-a", "b c"]).unwrap();
        assert_eq!(cmd.program(), "app");
        assert_eq!(cmd.args(), &["-a".to_string(), "b c".to_string()]);
        assert_eq!(cmd.as_str(), "app -a \"b c\"");
    }

    #[test]
    fn single_token_has_no_separator() {
        let cmd = CommandLine::new(["notepad.exe"]).unwrap();
        assert_eq!(cmd.to_string(), "notepad.exe");
    }
}
