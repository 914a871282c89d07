//! The built-in placeholder type vocabulary.

const ANY_TEXT: &str = r".+?";
const SIGNED: &str = r"[+-]?\d+";
const UNSIGNED: &str = r"\d+";
const FLOAT: &str = r"(?i:(?:[+-]?(?:\d+\.\d*|\.\d+|\d+)(?:[eE][+-]?\d+)?|nan|inf|infinity))";
const WORD: &str = r"\w+";

/// Translate a placeholder type hint into a regular-expression fragment.
///
/// `None` (no hint) matches any non-empty text. Returns `None` for hints
/// outside the vocabulary.
///
/// # Examples
/// ```
/// use stepjump_patterns::get_type_pattern;
/// assert_eq!(get_type_pattern(Some("u32")), Some(r"\d+"));
/// assert_eq!(get_type_pattern(Some("word")), Some(r"\w+"));
/// assert_eq!(get_type_pattern(None), Some(".+?"));
/// assert_eq!(get_type_pattern(Some("frobnicate")), None);
/// ```
#[must_use]
pub fn get_type_pattern(type_hint: Option<&str>) -> Option<&'static str> {
    let Some(hint) = type_hint else {
        return Some(ANY_TEXT);
    };
    match hint {
        "S" | "String" | "str" => Some(ANY_TEXT),
        "d" | "int" | "i8" | "i16" | "i32" | "i64" | "i128" | "isize" => Some(SIGNED),
        "u8" | "u16" | "u32" | "u64" | "u128" | "usize" => Some(UNSIGNED),
        "f" | "float" | "f32" | "f64" => Some(FLOAT),
        "w" | "word" => Some(WORD),
        _ => None,
    }
}
