//! Step-pattern parsing and matching for stepjump.
//!
//! Step implementations declare the text they bind to with a small pattern
//! language: literal text, `{name}` placeholders matching any non-empty text
//! and `{name:type}` placeholders restricted by a built-in type vocabulary.
//! This crate lexes those patterns, compiles them into anchored regular
//! expressions and answers whether a concrete step text satisfies one.
//!
//! ```
//! use stepjump_patterns::matches;
//!
//! # fn main() -> Result<(), stepjump_patterns::PatternError> {
//! assert!(matches("a user named Alice", "a user named {name}")?);
//! assert!(!matches("a user named Alice", "a user named {age:int}")?);
//! assert!(matches("x", "{unknownType:frobnicate}").is_err());
//! # Ok(())
//! # }
//! ```

mod errors;
mod hint;
mod matcher;
mod pattern;

pub use errors::{PatternError, PlaceholderErrorInfo};
pub use hint::get_type_pattern;
pub use matcher::{StepPattern, matches};
pub use pattern::{build_regex_from_pattern, compile_regex_from_pattern};
