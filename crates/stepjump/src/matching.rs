//! Pattern matching between feature step text and implementation patterns.

use stepjump_patterns::StepPattern;

use crate::error::EngineError;

/// Compile an implementation pattern.
///
/// # Errors
///
/// Returns [`EngineError::Pattern`] when the pattern is malformed.
pub fn compile(pattern: &str) -> Result<StepPattern, EngineError> {
    StepPattern::compile(pattern).map_err(|source| EngineError::Pattern {
        pattern: pattern.to_owned(),
        source,
    })
}

/// Whether `candidate` satisfies `pattern` as a whole, ignoring case.
///
/// # Errors
///
/// Returns [`EngineError::Pattern`] when the pattern is malformed, whatever
/// the candidate.
pub fn matches(candidate: &str, pattern: &str) -> Result<bool, EngineError> {
    compile(pattern).map(|compiled| compiled.is_match(candidate))
}
