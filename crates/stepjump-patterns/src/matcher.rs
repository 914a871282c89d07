//! Whole-text matching of step text against a pattern.

use regex::Regex;

use crate::errors::PatternError;
use crate::pattern::compile_regex_from_pattern;

/// A compiled step pattern.
///
/// Compile once and test many candidates; each test matches the entire
/// candidate text, ignoring case.
#[derive(Debug, Clone)]
pub struct StepPattern {
    source: String,
    regex: Regex,
}

impl StepPattern {
    /// Compile `pattern`.
    ///
    /// # Errors
    /// Returns [`PatternError`] when the pattern is malformed.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        Ok(Self {
            source: pattern.to_owned(),
            regex: compile_regex_from_pattern(pattern)?,
        })
    }

    /// The pattern text this matcher was compiled from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `text` satisfies the pattern as a whole.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Whether `candidate` satisfies `pattern` as a whole.
///
/// # Errors
/// Returns [`PatternError`] when `pattern` is malformed, regardless of the
/// candidate. Passing an empty candidate therefore validates a pattern.
pub fn matches(candidate: &str, pattern: &str) -> Result<bool, PatternError> {
    StepPattern::compile(pattern).map(|compiled| compiled.is_match(candidate))
}
