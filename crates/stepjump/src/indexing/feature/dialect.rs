//! Gherkin dialect helpers: the `# language:` header and continuation
//! keywords.
//!
//! `gherkin` resolves `And`/`But` to the preceding step type but keeps the
//! literal keyword. Descriptions show the keyword the step continues, so the
//! scanner needs to know which keywords continue a step in each dialect.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static LANGUAGE_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*#\s*language\s*:\s*([A-Za-z][A-Za-z0-9_-]*)\s*$")
        .unwrap_or_else(|_| unreachable!())
});

/// Localised "And" keywords per dialect, trimmed, as shipped by `gherkin`.
static CONTINUATIONS: LazyLock<HashMap<String, Vec<String>>> =
    LazyLock::new(|| serde_json::from_str(include_str!("continuations.json")).unwrap_or_default());

/// Dialect requested by a `# language:` comment above the first keyword line.
pub(super) fn header_language(source: &str) -> Option<&str> {
    for line in source.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !trimmed.starts_with('#') {
            return None;
        }
        if let Some(found) = LANGUAGE_HEADER_RE.captures(line).and_then(|caps| caps.get(1)) {
            return Some(found.as_str());
        }
    }
    None
}

/// Whether `keyword` continues the previous step in `language`.
fn is_continuation(language: &str, keyword: &str) -> bool {
    keyword == "*"
        || CONTINUATIONS
            .get(language)
            .is_some_and(|words| words.iter().any(|word| word == keyword))
}

/// Rewrites continuation keywords to the last explicit keyword of a block.
///
/// Create one tracker per background or scenario.
pub(super) struct KeywordTracker<'a> {
    language: &'a str,
    last: Option<String>,
}

impl<'a> KeywordTracker<'a> {
    pub(super) fn new(language: &'a str) -> Self {
        Self {
            language,
            last: None,
        }
    }

    /// The keyword to display for a step written with `keyword`.
    pub(super) fn display_keyword(&mut self, keyword: &str) -> String {
        let keyword = keyword.trim();
        if is_continuation(self.language, keyword) {
            return self.last.clone().unwrap_or_else(|| keyword.to_owned());
        }
        self.last = Some(keyword.to_owned());
        keyword.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("# language: fr\nFonctionnalité: x\n", Some("fr"))]
    #[case("\n  #language:zh-CN\n", Some("zh-CN"))]
    #[case("# a comment\n# language: de\nFunktionalität: x\n", Some("de"))]
    #[case("Feature: x\n# language: fr\n", None)]
    #[case("Feature: x\n", None)]
    fn reads_language_header(#[case] source: &str, #[case] expected: Option<&str>) {
        assert_eq!(header_language(source), expected);
    }

    #[test]
    fn rewrites_continuations_to_last_keyword() {
        let mut tracker = KeywordTracker::new("en");
        assert_eq!(tracker.display_keyword("Given "), "Given");
        assert_eq!(tracker.display_keyword("And "), "Given");
        assert_eq!(tracker.display_keyword("* "), "Given");
        assert_eq!(tracker.display_keyword("When "), "When");
        assert_eq!(tracker.display_keyword("And "), "When");
        assert_eq!(tracker.display_keyword("But "), "But");
    }

    #[test]
    fn leading_continuation_keeps_its_keyword() {
        let mut tracker = KeywordTracker::new("en");
        assert_eq!(tracker.display_keyword("And "), "And");
    }

    #[test]
    fn uses_localised_continuations() {
        let mut tracker = KeywordTracker::new("fr");
        assert_eq!(tracker.display_keyword("Soit "), "Soit");
        assert_eq!(tracker.display_keyword("Et que "), "Soit");
        assert_eq!(tracker.display_keyword("Et "), "Soit");
    }

    #[rstest]
    #[case("hu", "Amennyiben ", "És ")]
    #[case("ro", "Date fiind ", "Și ")]
    #[case("vi", "Biết ", "Và ")]
    #[case("en-pirate", "Gangway! ", "Aye ")]
    #[case("id", "Dengan ", "Dan ")]
    fn continues_in_every_parser_dialect(
        #[case] language: &str,
        #[case] given: &str,
        #[case] and: &str,
    ) {
        let mut tracker = KeywordTracker::new(language);
        assert_eq!(tracker.display_keyword(given), given.trim());
        assert_eq!(tracker.display_keyword(and), given.trim());
    }

    #[test]
    fn continuation_table_covers_parser_dialects() {
        assert_eq!(CONTINUATIONS.len(), 77);
        assert!(CONTINUATIONS.values().all(|words| !words.is_empty()));
    }

    #[test]
    fn unknown_dialect_only_continues_with_asterisk() {
        let mut tracker = KeywordTracker::new("xx");
        assert_eq!(tracker.display_keyword("Foo "), "Foo");
        assert_eq!(tracker.display_keyword("And "), "And");
        assert_eq!(tracker.display_keyword("* "), "And");
    }
}
