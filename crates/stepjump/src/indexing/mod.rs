//! Step scanners for both sides of a BDD suite.
//!
//! Feature files are parsed with the `gherkin` crate and yield one
//! [`StepOccurrence`] per step line. Rust step files are parsed with `syn`
//! and yield one occurrence per `#[given]`, `#[when]`, `#[then]` or `#[step]`
//! attribute carrying a string literal. Both scanners work on source text so
//! that unsaved editor buffers can be scanned; [`scan_file`] reads from disk.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{EngineError, SyntaxError};

mod feature;
mod rust;

pub use feature::scan_feature_source;
pub use rust::scan_rust_source;

/// The keyword class of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepType {
    /// `Given` steps and `#[given]` implementations.
    Given,
    /// `When` steps and `#[when]` implementations.
    When,
    /// `Then` steps and `#[then]` implementations.
    Then,
    /// `#[step]` implementations, matching any keyword.
    Step,
}

impl StepType {
    /// Lower-case attribute name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Given => "given",
            Self::When => "when",
            Self::Then => "then",
            Self::Step => "step",
        }
    }

    /// Whether an occurrence of this type may pair with one of `other`.
    ///
    /// Equal types pair, and [`StepType::Step`] pairs with anything.
    #[must_use]
    pub fn pairs_with(self, other: Self) -> bool {
        self == Self::Step || other == Self::Step || self == other
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<gherkin::StepType> for StepType {
    fn from(value: gherkin::StepType) -> Self {
        match value {
            gherkin::StepType::Given => Self::Given,
            gherkin::StepType::When => Self::When,
            gherkin::StepType::Then => Self::Then,
        }
    }
}

/// Error returned when text names no known step type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown step type '{0}'")]
pub struct UnknownStepType(pub String);

impl FromStr for StepType {
    type Err = UnknownStepType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "given" => Ok(Self::Given),
            "when" => Ok(Self::When),
            "then" => Ok(Self::Then),
            "step" => Ok(Self::Step),
            _ => Err(UnknownStepType(s.to_owned())),
        }
    }
}

/// A step found in a feature file or a step implementation found in a Rust
/// file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOccurrence {
    /// Keyword class.
    pub step_type: StepType,
    /// Display text: `Given a <color> cat` for feature steps,
    /// `#[given("a {color} cat")]` for implementations.
    pub description: String,
    /// Text used for matching: the step text with outline placeholders
    /// substituted, or the raw implementation pattern.
    pub name: String,
    /// File containing the occurrence.
    pub filepath: PathBuf,
    /// 1-based line of the step or of the attribute.
    pub line: usize,
}

/// Location of a file that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSyntaxLocation {
    /// File that failed to parse.
    pub filepath: PathBuf,
    /// 1-based line reported by the parser.
    pub line: usize,
}

impl From<&SyntaxError> for InvalidSyntaxLocation {
    fn from(err: &SyntaxError) -> Self {
        Self {
            filepath: err.filepath.clone(),
            line: err.line,
        }
    }
}

/// The side of the suite a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A Gherkin `.feature` file.
    Feature,
    /// A Rust `.rs` step implementation file.
    Implementation,
}

impl FileKind {
    /// Classify `path` by its extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "feature" => Some(Self::Feature),
            "rs" => Some(Self::Implementation),
            _ => None,
        }
    }

    /// The kind on the other side of the suite.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Feature => Self::Implementation,
            Self::Implementation => Self::Feature,
        }
    }
}

/// Scan source text of the given kind.
///
/// `language` selects the Gherkin dialect and is ignored for Rust sources.
///
/// # Errors
///
/// Returns [`SyntaxError`] when the source fails to parse.
pub fn scan_source(
    kind: FileKind,
    content: &str,
    filepath: &Path,
    language: Option<&str>,
) -> Result<Vec<StepOccurrence>, SyntaxError> {
    match kind {
        FileKind::Feature => scan_feature_source(content, filepath, language),
        FileKind::Implementation => scan_rust_source(content, filepath),
    }
}

/// Read and scan a file from disk.
///
/// # Errors
///
/// Returns [`EngineError::Io`] when the file cannot be read and
/// [`EngineError::Syntax`] when it fails to parse.
pub fn scan_file(
    kind: FileKind,
    path: &Path,
    language: Option<&str>,
) -> Result<Vec<StepOccurrence>, EngineError> {
    let content = std::fs::read_to_string(path).map_err(|err| EngineError::io(path, err))?;
    let steps = scan_source(kind, &content, path, language)?;
    tracing::trace!(path = %path.display(), steps = steps.len(), "scanned file");
    Ok(steps)
}
