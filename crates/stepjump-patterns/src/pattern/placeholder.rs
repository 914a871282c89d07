//! Parses a single `{name}`, `{name:hint}`, `{}` or `{:hint}` placeholder.

use crate::errors::{PatternError, placeholder_error};

const INVALID: &str = "invalid placeholder in step pattern";
const UNCLOSED: &str = "missing closing '}' for placeholder";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlaceholderSpec {
    pub name: String,
    pub hint: Option<String>,
    pub start: usize,
}

/// Finds the brace closing an untyped placeholder, skipping nested pairs.
fn find_closing_brace(bytes: &[u8], from: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (index, &b) in bytes.iter().enumerate().skip(from) {
        match b {
            b'{' => depth = depth.saturating_add(1),
            b'}' if depth == 0 => return Some(index),
            b'}' => depth -= 1,
            _ => {}
        }
    }
    None
}

fn read_name(bytes: &[u8], from: usize) -> (String, usize) {
    let len = bytes
        .iter()
        .skip(from)
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    let name = bytes
        .get(from..from + len)
        .map(|raw| String::from_utf8_lossy(raw).into_owned())
        .unwrap_or_default();
    (name, from + len)
}

fn skip_whitespace(bytes: &[u8], from: usize) -> usize {
    from + bytes
        .iter()
        .skip(from)
        .take_while(|b| b.is_ascii_whitespace())
        .count()
}

/// Reads the hint after `:` up to the closing brace.
fn read_hint(bytes: &[u8], from: usize) -> Option<(String, usize)> {
    let len = bytes.iter().skip(from).take_while(|b| **b != b'}').count();
    let raw = std::str::from_utf8(bytes.get(from..from + len)?).ok()?;
    let valid = !raw.is_empty() && !raw.contains(|c: char| c.is_whitespace() || c == '{');
    valid.then(|| (raw.to_owned(), from + len))
}

/// Parse the placeholder opening at `start`; returns the index after its
/// closing brace.
pub(crate) fn parse_placeholder(
    bytes: &[u8],
    start: usize,
) -> Result<(usize, PlaceholderSpec), PatternError> {
    let (name, after_name) = read_name(bytes, start + 1);

    let mut index = after_name;
    if bytes.get(index).is_some_and(u8::is_ascii_whitespace) {
        index = skip_whitespace(bytes, index);
        if matches!(bytes.get(index), Some(b':' | b'}')) {
            return Err(placeholder_error(INVALID, start, Some(name)));
        }
    }

    let hint = if bytes.get(index) == Some(&b':') {
        let (hint, end) = read_hint(bytes, index + 1)
            .ok_or_else(|| placeholder_error(INVALID, start, Some(name.clone())))?;
        index = end;
        Some(hint)
    } else {
        index = find_closing_brace(bytes, index)
            .ok_or_else(|| placeholder_error(UNCLOSED, start, Some(name.clone())))?;
        None
    };

    if bytes.get(index) != Some(&b'}') {
        return Err(placeholder_error(UNCLOSED, start, Some(name)));
    }

    Ok((index + 1, PlaceholderSpec { name, hint, start }))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{parse_err, parse_ok};
    use rstest::rstest;

    #[rstest]
    #[case("{value}", "value", None)]
    #[case("{value:u32}", "value", Some("u32"))]
    #[case("{outer {inner}}", "outer", None)]
    #[case("{}", "", None)]
    #[case("{:word}", "", Some("word"))]
    fn parses_placeholder_forms(
        #[case] pattern: &str,
        #[case] name: &str,
        #[case] hint: Option<&str>,
    ) {
        let (next, spec) = parse_ok(pattern);
        assert_eq!(next, pattern.len());
        assert_eq!(spec.name, name);
        assert_eq!(spec.hint.as_deref(), hint);
    }

    #[test]
    fn stops_after_closing_brace() {
        let (next, spec) = parse_ok("{count} cukes");
        assert_eq!(next, 7);
        assert_eq!(spec.start, 0);
    }

    #[rstest]
    #[case("{value", "missing closing")]
    #[case("{value:int", "missing closing")]
    #[case("{value :u32}", "invalid placeholder")]
    #[case("{value:}", "invalid placeholder")]
    #[case("{value:a b}", "invalid placeholder")]
    fn rejects_malformed_placeholders(#[case] pattern: &str, #[case] fragment: &str) {
        let err = parse_err(pattern);
        assert!(err.to_string().contains(fragment), "{err}");
    }
}
