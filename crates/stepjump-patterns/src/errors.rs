//! Error types raised while compiling step patterns.

use std::fmt;
use thiserror::Error;

/// Location and context of a malformed placeholder.
///
/// # Examples
/// ```
/// use stepjump_patterns::PlaceholderErrorInfo;
/// let info = PlaceholderErrorInfo::new("invalid placeholder", 3, Some("value".into()));
/// assert_eq!(info.placeholder.as_deref(), Some("value"));
/// assert_eq!(info.position, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderErrorInfo {
    /// Human-readable reason.
    pub message: &'static str,
    /// Zero-based byte offset of the offending brace.
    pub position: usize,
    /// Placeholder name, when one had been read.
    pub placeholder: Option<String>,
}

impl PlaceholderErrorInfo {
    /// Describe a placeholder failure.
    #[must_use]
    pub fn new(message: &'static str, position: usize, placeholder: Option<String>) -> Self {
        Self {
            message,
            position,
            placeholder,
        }
    }
}

impl fmt::Display for PlaceholderErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.placeholder.as_deref() {
            Some("") => write!(
                f,
                "{} for anonymous placeholder at byte {}",
                self.message, self.position
            ),
            Some(name) => write!(
                f,
                "{} for placeholder `{}` at byte {}",
                self.message, name, self.position
            ),
            None => write!(f, "{} at byte {}", self.message, self.position),
        }
    }
}

/// Errors surfaced while turning a step pattern into a matcher.
///
/// # Examples
/// ```
/// use stepjump_patterns::{PatternError, matches};
/// let err = matches("x", "{unknownType:frobnicate}").unwrap_err();
/// assert!(matches!(err, PatternError::UnknownType { .. }));
/// ```
#[derive(Debug, Error)]
pub enum PatternError {
    /// A placeholder or brace sequence is malformed.
    #[error("{0}")]
    Placeholder(PlaceholderErrorInfo),
    /// A placeholder names a type outside the built-in vocabulary.
    #[error("unknown type `{hint}` for placeholder `{placeholder}` at byte {position}")]
    UnknownType {
        /// The unrecognised type hint.
        hint: String,
        /// Placeholder name (empty for anonymous placeholders).
        placeholder: String,
        /// Zero-based byte offset of the placeholder.
        position: usize,
    },
    /// The generated expression was rejected by the regex engine.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

pub(crate) fn placeholder_error(
    message: &'static str,
    position: usize,
    placeholder: Option<String>,
) -> PatternError {
    PatternError::Placeholder(PlaceholderErrorInfo::new(message, position, placeholder))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_placeholder_with_name() {
        let info = PlaceholderErrorInfo::new("invalid", 4, Some("count".into()));
        assert_eq!(info.to_string(), "invalid for placeholder `count` at byte 4");
    }

    #[test]
    fn formats_anonymous_placeholder() {
        let info = PlaceholderErrorInfo::new("invalid", 0, Some(String::new()));
        assert_eq!(info.to_string(), "invalid for anonymous placeholder at byte 0");
    }

    #[test]
    fn formats_placeholder_without_name() {
        let info = PlaceholderErrorInfo::new("oops", 1, None);
        assert_eq!(info.to_string(), "oops at byte 1");
    }

    #[test]
    fn names_unknown_type_hints() {
        let err = PatternError::UnknownType {
            hint: "frobnicate".into(),
            placeholder: "x".into(),
            position: 0,
        };
        assert_eq!(
            err.to_string(),
            "unknown type `frobnicate` for placeholder `x` at byte 0"
        );
    }
}
