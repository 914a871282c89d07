//! Cross-referencing feature steps and step implementations.
//!
//! Every query rescans the project; nothing is cached between calls.

use std::path::{Path, PathBuf};

use crate::discovery::ProjectLayout;
use crate::error::{EngineError, LookupCause, LookupError};
use crate::indexing::{FileKind, StepOccurrence, scan_file, scan_source};
use crate::matching;

mod validate;

pub use validate::{Finding, FindingLocation, validate_project};

/// An editor buffer: a file name and its current, possibly unsaved, lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    /// Path of the file being edited. It need not exist on disk.
    pub name: PathBuf,
    /// Buffer contents, one entry per line, without terminators.
    pub lines: Vec<String>,
}

impl Buffer {
    /// A buffer holding `text`.
    #[must_use]
    pub fn from_text(name: impl Into<PathBuf>, text: &str) -> Self {
        Self {
            name: name.into(),
            lines: text.lines().map(str::to_owned).collect(),
        }
    }

    /// A buffer loaded from the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Io`] when the file cannot be read.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, EngineError> {
        let name = path.into();
        let text = std::fs::read_to_string(&name).map_err(|err| EngineError::io(&name, err))?;
        Ok(Self::from_text(name, &text))
    }

    /// The buffer contents joined with newlines.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// The step or implementation governing `line` of `buffer`.
///
/// That is the last occurrence starting at or above the 1-based `line`.
///
/// # Errors
///
/// Returns [`EngineError::NotFound`] outside a project,
/// [`EngineError::UnsupportedFileType`] for files that are neither `.feature`
/// nor `.rs`, [`EngineError::Syntax`] when the buffer fails to parse and
/// [`EngineError::NotAStep`] when no occurrence starts at or above `line`.
pub fn resolve_at_cursor(buffer: &Buffer, line: usize) -> Result<StepOccurrence, EngineError> {
    let layout = ProjectLayout::discover(&buffer.name)?;
    resolve_in(&layout, buffer, line)
}

/// [`resolve_at_cursor`] against an already discovered layout.
///
/// # Errors
///
/// As [`resolve_at_cursor`], minus layout discovery.
pub fn resolve_in(
    layout: &ProjectLayout,
    buffer: &Buffer,
    line: usize,
) -> Result<StepOccurrence, EngineError> {
    let kind = file_kind(&buffer.name)?;
    let occurrences = scan_source(kind, &buffer.text(), &buffer.name, layout.language())?;
    occurrences
        .into_iter()
        .take_while(|occurrence| occurrence.line <= line)
        .last()
        .ok_or_else(|| {
            EngineError::NotAStep(match kind {
                FileKind::Feature => "Not a step definition",
                FileKind::Implementation => "Not a step implementation",
            })
        })
}

/// Resolve the occurrence under the cursor and find its references.
///
/// # Errors
///
/// Any error of [`resolve_at_cursor`] or [`find_references`].
pub fn references_at_cursor(
    buffer: &Buffer,
    line: usize,
) -> Result<Vec<StepOccurrence>, EngineError> {
    let layout = ProjectLayout::discover(&buffer.name)?;
    let occurrence = resolve_in(&layout, buffer, line)?;
    find_references(&occurrence, &layout)
}

/// Every occurrence on the opposite side of the suite matching `occurrence`.
///
/// Implementation patterns are always matched against feature step names.
/// Results keep scan order. Files that fail to parse, and malformed
/// implementation patterns met while looking up a feature step, do not stop
/// the scan; they are reported with the failure if nothing matches.
///
/// # Errors
///
/// Returns [`EngineError::Lookup`] when nothing matches, or immediately when
/// `occurrence` is an implementation with a malformed pattern.
pub fn find_references(
    occurrence: &StepOccurrence,
    layout: &ProjectLayout,
) -> Result<Vec<StepOccurrence>, EngineError> {
    let origin = file_kind(&occurrence.filepath)?;
    let target = origin.opposite();
    let own_pattern = match origin {
        FileKind::Implementation => Some(matching::compile(&occurrence.name)),
        FileKind::Feature => None,
    };

    let mut found = Vec::new();
    let mut soft_errors = Vec::new();

    for path in layout.files(target) {
        let candidates = match scan_file(target, &path, layout.language()) {
            Ok(candidates) => candidates,
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "skipping candidate file");
                soft_errors.push(err);
                continue;
            }
        };

        for candidate in candidates {
            if !occurrence.step_type.pairs_with(candidate.step_type) {
                continue;
            }
            let hit = match own_pattern.as_ref() {
                Some(Ok(pattern)) => pattern.is_match(&candidate.name),
                Some(Err(err)) => {
                    let cause = LookupCause::InvalidPattern(pattern_reason(err));
                    return Err(LookupError::new(cause).into());
                }
                None => match matching::matches(&occurrence.name, &candidate.name) {
                    Ok(hit) => hit,
                    Err(err) => {
                        soft_errors.push(err);
                        continue;
                    }
                },
            };
            if hit {
                found.push(candidate);
            }
        }
    }

    tracing::debug!(
        step = %occurrence.name,
        matches = found.len(),
        soft_errors = soft_errors.len(),
        "resolved references"
    );

    if found.is_empty() {
        let cause = match origin {
            FileKind::Implementation => LookupCause::UnusedImplementation,
            FileKind::Feature => LookupCause::MissingImplementation,
        };
        return Err(LookupError { cause, soft_errors }.into());
    }
    Ok(found)
}

fn file_kind(path: &Path) -> Result<FileKind, EngineError> {
    FileKind::from_path(path).ok_or_else(|| EngineError::UnsupportedFileType(path.to_path_buf()))
}

fn pattern_reason(err: &EngineError) -> String {
    match err {
        EngineError::Pattern { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}
