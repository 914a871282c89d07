//! Error types for step resolution.
//!
//! Hard failures abort a single query and surface as [`EngineError`]. The
//! recoverable problems found while sweeping many files travel as values
//! instead (see [`crate::resolver::Finding`] and [`LookupError::soft_errors`]).

use std::fmt;
use std::io;
use std::path::PathBuf;

use stepjump_patterns::PatternError;
use thiserror::Error;

/// Errors raised by the resolution engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No ancestor of the given path contains a `features` directory.
    #[error("test layout not found above {}", .0.display())]
    NotFound(PathBuf),

    /// The buffer is neither a `.feature` nor a `.rs` file.
    #[error("unexpected file type: {}", .0.display())]
    UnsupportedFileType(PathBuf),

    /// The cursor sits above the first step of the buffer.
    #[error("{0}")]
    NotAStep(&'static str),

    /// A file failed to parse.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// A step pattern is malformed.
    #[error("invalid step pattern `{pattern}`: {source}")]
    Pattern {
        /// The offending pattern text.
        pattern: String,
        /// The underlying pattern error.
        #[source]
        source: PatternError,
    },

    /// Cross-referencing produced no usable result.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A feature or Rust file that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}:{line}: {message}", filepath.display())]
pub struct SyntaxError {
    /// File that failed to parse.
    pub filepath: PathBuf,
    /// 1-based line of the failure.
    pub line: usize,
    /// Parser message.
    pub message: String,
}

/// Why a reference lookup failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupCause {
    /// No feature step uses the implementation under the cursor.
    UnusedImplementation,
    /// No implementation matches the feature step under the cursor.
    MissingImplementation,
    /// The implementation under the cursor declares a malformed pattern.
    InvalidPattern(String),
}

impl fmt::Display for LookupCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnusedImplementation => f.write_str("Unused step implementation"),
            Self::MissingImplementation => f.write_str("Step implementation not found"),
            Self::InvalidPattern(reason) => write!(f, "Error while parsing step: {reason}"),
        }
    }
}

/// A failed reference lookup, with the soft errors met along the way.
#[derive(Debug)]
pub struct LookupError {
    /// Primary reason.
    pub cause: LookupCause,
    /// Problems with other files or patterns that did not abort the scan.
    pub soft_errors: Vec<EngineError>,
}

impl LookupError {
    /// A lookup error without soft errors.
    #[must_use]
    pub fn new(cause: LookupCause) -> Self {
        Self {
            cause,
            soft_errors: Vec::new(),
        }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cause = &self.cause;
        match self.soft_errors.as_slice() {
            [] => write!(f, "{cause}"),
            [only] => write!(f, "{cause}. Also registered an error: {only}"),
            many => write!(
                f,
                "{cause}. Also registered {} errors, use `stepjump errors` to see them.",
                many.len()
            ),
        }
    }
}

impl std::error::Error for LookupError {}

/// An invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(pub String);
