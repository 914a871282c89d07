//! Lowers lexed tokens into an anchored regular-expression source.

use crate::errors::{PatternError, placeholder_error};
use crate::hint::get_type_pattern;

use super::lexer::{Token, lex_pattern};

/// Build the anchored regular-expression source for a step pattern.
///
/// Each placeholder becomes one capture group; literal text is escaped.
///
/// # Errors
/// Returns [`PatternError`] for malformed placeholders, unbalanced braces and
/// type hints outside the built-in vocabulary.
///
/// # Examples
/// ```
/// # use stepjump_patterns::build_regex_from_pattern;
/// let regex = build_regex_from_pattern("I have {count:u32} cukes")?;
/// assert_eq!(regex, r"^I have (\d+) cukes$");
/// # Ok::<(), stepjump_patterns::PatternError>(())
/// ```
pub fn build_regex_from_pattern(pat: &str) -> Result<String, PatternError> {
    let tokens = lex_pattern(pat)?;
    let mut regex = String::with_capacity(pat.len().saturating_mul(2) + 2);
    regex.push('^');
    let mut stray_depth = 0usize;

    for token in tokens {
        match token {
            Token::Literal(text) => regex.push_str(&regex::escape(&text)),
            Token::Placeholder { start, name, hint } => {
                let fragment =
                    get_type_pattern(hint.as_deref()).ok_or_else(|| PatternError::UnknownType {
                        hint: hint.unwrap_or_default(),
                        placeholder: name,
                        position: start,
                    })?;
                regex.push('(');
                regex.push_str(fragment);
                regex.push(')');
            }
            Token::OpenBrace { .. } => {
                stray_depth = stray_depth.saturating_add(1);
                regex.push_str(r"\{");
            }
            Token::CloseBrace { index } => {
                if stray_depth == 0 {
                    return Err(placeholder_error(
                        "unmatched closing brace '}' in step pattern",
                        index,
                        None,
                    ));
                }
                stray_depth -= 1;
                regex.push_str(r"\}");
            }
        }
    }

    if stray_depth != 0 {
        return Err(placeholder_error(
            "unbalanced braces in step pattern",
            pat.len(),
            None,
        ));
    }

    regex.push('$');
    Ok(regex)
}
