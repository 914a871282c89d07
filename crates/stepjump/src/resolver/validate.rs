//! Project-wide sweep for malformed patterns and unparsable files.

use std::path::Path;

use crate::discovery::ProjectLayout;
use crate::error::EngineError;
use crate::indexing::{FileKind, InvalidSyntaxLocation, StepOccurrence, scan_file};
use crate::matching;

/// Where a finding applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindingLocation {
    /// A step or implementation with a malformed pattern.
    Step(StepOccurrence),
    /// A file that failed to parse.
    InvalidSyntax(InvalidSyntaxLocation),
}

/// One problem found by [`validate_project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Where the problem is.
    pub location: FindingLocation,
    /// What is wrong.
    pub message: String,
}

impl Finding {
    /// File the finding applies to.
    #[must_use]
    pub fn filepath(&self) -> &Path {
        match &self.location {
            FindingLocation::Step(step) => &step.filepath,
            FindingLocation::InvalidSyntax(location) => &location.filepath,
        }
    }

    /// 1-based line the finding applies to.
    #[must_use]
    pub fn line(&self) -> usize {
        match &self.location {
            FindingLocation::Step(step) => step.line,
            FindingLocation::InvalidSyntax(location) => location.line,
        }
    }
}

/// Sweep every feature file, then every implementation file, of `layout`.
///
/// Each occurrence's `name` is compiled as a pattern; failures are reported
/// against the occurrence. Files that fail to parse are reported at the line
/// the parser names; files that cannot be read are reported at line 1. The
/// sweep never stops early.
#[must_use]
pub fn validate_project(layout: &ProjectLayout) -> Vec<Finding> {
    let mut findings = Vec::new();
    for kind in [FileKind::Feature, FileKind::Implementation] {
        for path in layout.files(kind) {
            validate_file(kind, &path, layout.language(), &mut findings);
        }
    }
    tracing::debug!(
        features_dir = %layout.features_dir().display(),
        findings = findings.len(),
        "validated project"
    );
    findings
}

fn validate_file(
    kind: FileKind,
    path: &Path,
    language: Option<&str>,
    findings: &mut Vec<Finding>,
) {
    match scan_file(kind, path, language) {
        Ok(occurrences) => {
            for occurrence in occurrences {
                if let Err(EngineError::Pattern { source, .. }) = matching::matches("", &occurrence.name)
                {
                    findings.push(Finding {
                        message: source.to_string(),
                        location: FindingLocation::Step(occurrence),
                    });
                }
            }
        }
        Err(EngineError::Syntax(err)) => findings.push(Finding {
            location: FindingLocation::InvalidSyntax(InvalidSyntaxLocation::from(&err)),
            message: err.message,
        }),
        Err(EngineError::Io { path, source }) => findings.push(Finding {
            location: FindingLocation::InvalidSyntax(InvalidSyntaxLocation { filepath: path, line: 1 }),
            message: source.to_string(),
        }),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "skipping file during validation");
        }
    }
}
