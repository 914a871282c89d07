//! Gherkin `.feature` step scanning.

use std::error::Error;
use std::path::Path;
use std::sync::LazyLock;

use gherkin::GherkinEnv;
use regex::Regex;

use super::{StepOccurrence, StepType};
use crate::error::SyntaxError;

mod dialect;
mod outline;

use dialect::{KeywordTracker, header_language};
use outline::FirstExampleRow;

const DEFAULT_LANGUAGE: &str = "en";

static ERROR_LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bat (\d+):(\d+)").unwrap_or_else(|_| unreachable!()));

/// Scan feature source text for steps.
///
/// Steps are yielded in file order: background, scenarios, then each rule's
/// background and scenarios. `language` is the project dialect; a
/// `# language:` header in the source takes precedence.
///
/// # Errors
///
/// Returns [`SyntaxError`] when the dialect is unknown or the source is not
/// valid Gherkin.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use stepjump::indexing::scan_feature_source;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = "Feature: f\n  Scenario: s\n    Given a user\n    And she is logged in\n";
/// let steps = scan_feature_source(source, Path::new("f.feature"), None)?;
/// assert_eq!(steps[1].description, "Given she is logged in");
/// # Ok(())
/// # }
/// ```
pub fn scan_feature_source(
    content: &str,
    filepath: &Path,
    language: Option<&str>,
) -> Result<Vec<StepOccurrence>, SyntaxError> {
    let env = match language {
        Some(code) => GherkinEnv::new(code).map_err(|err| SyntaxError {
            filepath: filepath.to_path_buf(),
            line: 1,
            message: err.to_string(),
        })?,
        None => GherkinEnv::default(),
    };

    let mut text = content.to_owned();
    normalise_trailing_newline(&mut text);

    let feature =
        gherkin::Feature::parse(&text, env).map_err(|err| syntax_error(filepath, &err))?;
    let dialect = header_language(&text)
        .or(language)
        .unwrap_or(DEFAULT_LANGUAGE);

    let mut steps = Vec::new();
    let mut scan = |block: &[gherkin::Step], outline: &FirstExampleRow| {
        scan_block(block, outline, dialect, filepath, &mut steps);
    };
    let no_outline = FirstExampleRow::default();

    if let Some(background) = feature.background.as_ref() {
        scan(&background.steps, &no_outline);
    }
    for scenario in &feature.scenarios {
        scan(&scenario.steps, &FirstExampleRow::of(scenario));
    }
    for rule in &feature.rules {
        if let Some(background) = rule.background.as_ref() {
            scan(&background.steps, &no_outline);
        }
        for scenario in &rule.scenarios {
            scan(&scenario.steps, &FirstExampleRow::of(scenario));
        }
    }

    tracing::debug!(path = %filepath.display(), steps = steps.len(), "scanned feature");
    Ok(steps)
}

fn scan_block(
    block: &[gherkin::Step],
    outline: &FirstExampleRow,
    dialect: &str,
    filepath: &Path,
    out: &mut Vec<StepOccurrence>,
) {
    let mut tracker = KeywordTracker::new(dialect);
    for step in block {
        let keyword = tracker.display_keyword(&step.keyword);
        out.push(StepOccurrence {
            step_type: StepType::from(step.ty),
            description: format!("{keyword} {}", step.value),
            name: outline.expand(&step.value),
            filepath: filepath.to_path_buf(),
            line: step.position.line,
        });
    }
}

fn normalise_trailing_newline(text: &mut String) {
    if !text.ends_with('\n') {
        text.push('\n');
    }
}

/// Recover the reported line from a parse error and its sources.
fn syntax_error(filepath: &Path, err: &(dyn Error + 'static)) -> SyntaxError {
    let mut message = err.to_string();
    let mut line = None;
    let mut current = Some(err);
    while let Some(cause) = current {
        let text = cause.to_string();
        if let Some(found) = reported_line(&text) {
            line = Some(found);
            message = text;
        }
        current = cause.source();
    }
    SyntaxError {
        filepath: filepath.to_path_buf(),
        line: line.unwrap_or(1),
        message,
    }
}

fn reported_line(text: &str) -> Option<usize> {
    ERROR_LOCATION_RE
        .captures(text)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}
