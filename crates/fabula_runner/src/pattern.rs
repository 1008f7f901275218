//! Regex filters for topics, stories and paths.

use fabula_error::{RunError, RunErrorKind};
use regex::Regex;
use std::str::FromStr;

/// A regex filter, optionally inverted with a leading `!`.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    inverted: bool,
}

impl Pattern {
    /// Compiles a pattern. `"!expr"` matches everything `expr` does not.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression is not a valid regex.
    pub fn new(source: &str) -> Result<Self, RunError> {
        let (inverted, expr) = match source.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, source),
        };
        let regex = Regex::new(expr).map_err(|e| {
            RunError::new(RunErrorKind::InvalidPattern {
                pattern: source.to_string(),
                message: e.to_string(),
            })
        })?;
        Ok(Self { regex, inverted })
    }

    /// True when `text` is selected by this pattern.
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text) != self.inverted
    }

    /// True for a `!` pattern.
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }
}

impl FromStr for Pattern {
    type Err = RunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::new(s)
    }
}

/// True when any pattern selects `text`.
pub fn any_match(patterns: &[Pattern], text: &str) -> bool {
    patterns.iter().any(|p| p.matches(text))
}

/// Parses a comma-separated pattern list such as `"users,!admin"`.
///
/// Empty entries are ignored.
///
/// # Errors
///
/// Returns an error for the first entry that fails to compile.
pub fn parse_patterns(list: &str) -> Result<Vec<Pattern>, RunError> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Pattern::new)
        .collect()
}
