//! Splits a step pattern into literal runs, placeholders and stray braces.

use crate::errors::PatternError;

use super::placeholder::{PlaceholderSpec, parse_placeholder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Literal(String),
    Placeholder {
        start: usize,
        name: String,
        hint: Option<String>,
    },
    OpenBrace {
        index: usize,
    },
    CloseBrace {
        index: usize,
    },
}

/// Literal bytes are buffered raw and decoded on flush. Tokens only split at
/// ASCII delimiters, so every buffered run is valid UTF-8.
#[derive(Default)]
struct LiteralBuffer(Vec<u8>);

impl LiteralBuffer {
    fn push(&mut self, byte: u8) {
        self.0.push(byte);
    }

    fn flush_into(&mut self, tokens: &mut Vec<Token>) {
        if self.0.is_empty() {
            return;
        }
        let bytes = std::mem::take(&mut self.0);
        tokens.push(Token::Literal(String::from_utf8_lossy(&bytes).into_owned()));
    }
}

fn opens_placeholder(next: Option<&u8>) -> bool {
    matches!(next, Some(b) if b.is_ascii_alphabetic() || matches!(b, b'_' | b':' | b'}'))
}

pub(crate) fn lex_pattern(pattern: &str) -> Result<Vec<Token>, PatternError> {
    let bytes = pattern.as_bytes();
    let mut tokens = Vec::new();
    let mut literal = LiteralBuffer::default();
    let mut pos = 0;

    while let Some(&b) = bytes.get(pos) {
        match (b, bytes.get(pos + 1)) {
            (b'\\', Some(&next)) => {
                literal.push(next);
                pos += 2;
            }
            (b'{', Some(b'{')) => {
                literal.push(b'{');
                pos += 2;
            }
            (b'}', Some(b'}')) => {
                literal.push(b'}');
                pos += 2;
            }
            (b'{', next) if opens_placeholder(next) => {
                literal.flush_into(&mut tokens);
                let (next_pos, PlaceholderSpec { start, name, hint }) =
                    parse_placeholder(bytes, pos)?;
                tokens.push(Token::Placeholder { start, name, hint });
                pos = next_pos;
            }
            (b'{', _) => {
                literal.flush_into(&mut tokens);
                tokens.push(Token::OpenBrace { index: pos });
                pos += 1;
            }
            (b'}', _) => {
                literal.flush_into(&mut tokens);
                tokens.push(Token::CloseBrace { index: pos });
                pos += 1;
            }
            _ => {
                literal.push(b);
                pos += 1;
            }
        }
    }

    literal.flush_into(&mut tokens);
    Ok(tokens)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests exercise lexing fallibility")]
mod tests {
    use super::*;

    fn placeholder(start: usize, name: &str, hint: Option<&str>) -> Token {
        Token::Placeholder {
            start,
            name: name.into(),
            hint: hint.map(Into::into),
        }
    }

    #[test]
    fn tokenises_literals_and_placeholders() {
        let tokens = lex_pattern("a user aged {age:int}").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Literal("a user aged ".into()),
                placeholder(12, "age", Some("int")),
            ]
        );
    }

    #[test]
    fn tokenises_anonymous_placeholders() {
        let tokens = lex_pattern("{} and {:d}").unwrap();
        assert_eq!(
            tokens,
            vec![
                placeholder(0, "", None),
                Token::Literal(" and ".into()),
                placeholder(7, "", Some("d")),
            ]
        );
    }

    #[test]
    fn keeps_multibyte_literals_intact() {
        let tokens = lex_pattern("пользователь {имя}").unwrap();
        assert_eq!(tokens.first(), Some(&Token::Literal("пользователь ".into())));
    }

    #[test]
    fn recognises_doubled_braces_as_literals() {
        let tokens = lex_pattern("{{json}} {key}").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Literal("{json} ".into()),
                placeholder(9, "key", None),
            ]
        );
    }

    #[test]
    fn unescapes_backslashes() {
        let tokens = lex_pattern(r"a \{ brace").unwrap();
        assert_eq!(tokens, vec![Token::Literal("a { brace".into())]);
    }

    #[test]
    fn records_stray_braces() {
        let tokens = lex_pattern("{ spaced }").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::OpenBrace { index: 0 },
                Token::Literal(" spaced ".into()),
                Token::CloseBrace { index: 9 },
            ]
        );
    }
}
