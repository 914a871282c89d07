//! Conversions between engine locations and LSP protocol types.
//!
//! The engine reports 1-based line numbers while the LSP protocol uses
//! 0-based lines.

use std::path::Path;

use lsp_types::{Location, Position, Range, Url};
use stepjump::indexing::StepOccurrence;

/// A zero-width range at the start of the 1-based `line`.
///
/// # Examples
///
/// ```
/// use stepjump_server::handlers::util::line_range;
///
/// let range = line_range(3);
/// assert_eq!(range.start.line, 2);
/// assert_eq!(range.start, range.end);
/// ```
#[must_use]
pub fn line_range(line: usize) -> Range {
    let line = u32::try_from(line.saturating_sub(1)).unwrap_or(u32::MAX);
    let start = Position::new(line, 0);
    Range { start, end: start }
}

/// The 1-based engine line of a 0-based LSP position.
#[must_use]
pub fn engine_line(position: Position) -> usize {
    usize::try_from(position.line).map_or(usize::MAX, |line| line.saturating_add(1))
}

/// The `file://` URL of `path`, if it is absolute.
#[must_use]
pub fn path_to_url(path: &Path) -> Option<Url> {
    Url::from_file_path(path).ok()
}

/// The location of an occurrence's first line.
#[must_use]
pub fn occurrence_location(occurrence: &StepOccurrence) -> Option<Location> {
    let uri = path_to_url(&occurrence.filepath)?;
    Some(Location {
        uri,
        range: line_range(occurrence.line),
    })
}
