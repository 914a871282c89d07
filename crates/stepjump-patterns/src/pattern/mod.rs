//! Step-pattern lexing and compilation.

mod compiler;
mod lexer;
mod placeholder;
#[cfg(test)]
mod test_support;

use crate::errors::PatternError;
use regex::{Regex, RegexBuilder};

pub use compiler::build_regex_from_pattern;

/// Build and compile a step pattern into a case-insensitive regex.
///
/// # Errors
/// Returns [`PatternError`] when placeholder parsing fails or the generated
/// source is rejected by the regex engine.
pub fn compile_regex_from_pattern(pat: &str) -> Result<Regex, PatternError> {
    let source = build_regex_from_pattern(pat)?;
    RegexBuilder::new(&source)
        .case_insensitive(true)
        .build()
        .map_err(PatternError::from)
}
