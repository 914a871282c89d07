//! Front-end adapter.
//!
//! The resolver knows nothing about how results are presented. A front end
//! implements [`Host`] to supply the current buffer and cursor and to
//! present jumps, location lists and messages; [`jump`] and
//! [`report_errors`] drive the resolver on its behalf. Engine errors never
//! escape these functions; they become one-line messages.

use std::path::{Path, PathBuf};

use crate::discovery::ProjectLayout;
use crate::indexing::StepOccurrence;
use crate::resolver::{Finding, references_at_cursor, validate_project};

pub use crate::resolver::Buffer;

/// Maximum visible height of a location or quick-fix list.
pub const MAX_LIST_HEIGHT: usize = 5;

/// File-type labels [`jump`] accepts.
pub const SUPPORTED_FILE_TYPES: [&str; 2] = ["cucumber", "rust"];

/// One row of a location or quick-fix list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ListEntry {
    /// File to open.
    pub filepath: PathBuf,
    /// 1-based line.
    pub line: usize,
    /// Text shown next to the location.
    pub text: String,
}

impl From<StepOccurrence> for ListEntry {
    fn from(occurrence: StepOccurrence) -> Self {
        Self {
            filepath: occurrence.filepath,
            line: occurrence.line,
            text: occurrence.description,
        }
    }
}

/// Capabilities a front end provides.
pub trait Host {
    /// Error raised while presenting output.
    type Error;

    /// The buffer the user is looking at.
    fn buffer(&self) -> &Buffer;

    /// File-type label of the buffer, if known.
    fn file_type(&self) -> Option<&str>;

    /// 1-based cursor line.
    fn cursor_line(&self) -> usize;

    /// Open `target` at its line.
    ///
    /// # Errors
    /// Front-end specific.
    fn jump(&mut self, target: &StepOccurrence) -> Result<(), Self::Error>;

    /// Show a location list of `height` visible rows.
    ///
    /// # Errors
    /// Front-end specific.
    fn show_locations(&mut self, entries: Vec<ListEntry>, height: usize) -> Result<(), Self::Error>;

    /// Show a quick-fix list of `height` visible rows.
    ///
    /// # Errors
    /// Front-end specific.
    fn show_quickfix(&mut self, entries: Vec<ListEntry>, height: usize) -> Result<(), Self::Error>;

    /// Show a one-line message.
    ///
    /// # Errors
    /// Front-end specific.
    fn message(&mut self, text: &str) -> Result<(), Self::Error>;
}

/// Visible height for a list of `len` entries. Lists are never truncated.
#[must_use]
pub fn list_height(len: usize) -> usize {
    len.min(MAX_LIST_HEIGHT)
}

/// Jump from the step or implementation under the cursor to its
/// counterparts.
///
/// A single match is opened directly; several are shown as a location list
/// labelled with each occurrence's description.
///
/// # Errors
///
/// Only errors raised by the host while presenting output.
pub fn jump<H: Host>(host: &mut H) -> Result<(), H::Error> {
    let label = host.file_type().unwrap_or("<UNKNOWN>").to_owned();
    if !SUPPORTED_FILE_TYPES.contains(&label.as_str()) {
        return host.message(&format!("File type \"{label}\" is not supported"));
    }

    match references_at_cursor(host.buffer(), host.cursor_line()) {
        Err(err) => host.message(&err.to_string()),
        Ok(targets) => match <[StepOccurrence; 1]>::try_from(targets) {
            Ok([target]) => host.jump(&target),
            Err(targets) => {
                let height = list_height(targets.len());
                let entries = targets.into_iter().map(ListEntry::from).collect();
                host.show_locations(entries, height)
            }
        },
    }
}

/// Validate the project of the current buffer and show what is wrong.
///
/// Paths are shown relative to the current directory when possible.
///
/// # Errors
///
/// Only errors raised by the host while presenting output.
pub fn report_errors<H: Host>(host: &mut H) -> Result<(), H::Error> {
    let layout = match ProjectLayout::discover(&host.buffer().name) {
        Ok(layout) => layout,
        Err(err) => return host.message(&err.to_string()),
    };
    let findings = validate_project(&layout);
    if findings.is_empty() {
        return host.message("No errors found");
    }

    let cwd = std::env::current_dir().ok();
    let height = list_height(findings.len());
    let entries = findings
        .into_iter()
        .map(|finding| quickfix_entry(finding, cwd.as_deref()))
        .collect();
    host.show_quickfix(entries, height)
}

fn quickfix_entry(finding: Finding, cwd: Option<&Path>) -> ListEntry {
    let filepath = cwd
        .and_then(|dir| finding.filepath().strip_prefix(dir).ok())
        .unwrap_or_else(|| finding.filepath())
        .to_path_buf();
    ListEntry {
        line: finding.line(),
        filepath,
        text: finding.message,
    }
}

#[cfg(test)]
mod tests;
