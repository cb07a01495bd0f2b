//! String literal lexing with escape sequence handling
//!
//! Handles single- and double-quoted literals, the JSON escape set, and
//! `\uXXXX` escapes including UTF-16 surrogate pairs.

use super::Lexer;
use crate::error::{PathError, PathResult};
use crate::tokens::TokenKind;

/// Lex a quoted string literal starting at the opening quote
pub(crate) fn lex_string(lexer: &mut Lexer<'_>) -> PathResult<()> {
    let (start_offset, quote) = lexer.chars[lexer.pos];
    let mut i = lexer.pos + 1;
    let mut value = String::new();

    while i < lexer.chars.len() {
        let (_, c) = lexer.chars[i];
        if c == quote {
            lexer.push(TokenKind::String(value), start_offset);
            lexer.pos = i + 1;
            return Ok(());
        }
        if c == '\\' {
            let Some(&(esc_offset, esc)) = lexer.chars.get(i + 1) else {
                return Err(PathError::lex("unterminated string literal", start_offset));
            };
            match esc {
                '"' => value.push('"'),
                '\'' => value.push('\''),
                '\\' => value.push('\\'),
                '/' => value.push('/'),
                'b' => value.push('\u{0008}'),
                'f' => value.push('\u{000C}'),
                'n' => value.push('\n'),
                'r' => value.push('\r'),
                't' => value.push('\t'),
                'u' => {
                    i = lex_unicode_escape(lexer, i + 1, &mut value)?;
                    continue;
                }
                _ => {
                    return Err(PathError::lex(
                        format!("invalid escape sequence '\\{esc}'"),
                        esc_offset,
                    ));
                }
            }
            i += 2;
        } else {
            value.push(c);
            i += 1;
        }
    }

    Err(PathError::lex("unterminated string literal", start_offset))
}

/// Lex a `\uXXXX` escape with surrogate pair support
///
/// `u_pos` indexes the `u` character; returns the index just past the
/// consumed escape.
fn lex_unicode_escape(
    lexer: &Lexer<'_>,
    u_pos: usize,
    value: &mut String,
) -> PathResult<usize> {
    let offset = lexer.chars[u_pos].0;
    let high = read_hex4(lexer, u_pos + 1)
        .ok_or_else(|| PathError::lex("incomplete unicode escape sequence", offset))?;

    if (0xD800..=0xDBFF).contains(&high) {
        // High surrogate; the low half must follow immediately as \uXXXX.
        let follows_escape = lexer.chars.get(u_pos + 5).map(|&(_, c)| c) == Some('\\')
            && lexer.chars.get(u_pos + 6).map(|&(_, c)| c) == Some('u');
        if !follows_escape {
            return Err(PathError::lex(
                "high surrogate not followed by low surrogate escape",
                offset,
            ));
        }
        let low = read_hex4(lexer, u_pos + 7)
            .ok_or_else(|| PathError::lex("incomplete unicode escape sequence", offset))?;
        if !(0xDC00..=0xDFFF).contains(&low) {
            return Err(PathError::lex(
                "high surrogate not followed by valid low surrogate",
                offset,
            ));
        }
        let scalar = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        match char::from_u32(scalar) {
            Some(c) => value.push(c),
            None => return Err(PathError::lex("invalid surrogate pair", offset)),
        }
        Ok(u_pos + 11)
    } else if (0xDC00..=0xDFFF).contains(&high) {
        Err(PathError::lex(
            "low surrogate without preceding high surrogate",
            offset,
        ))
    } else {
        match char::from_u32(high) {
            Some(c) => value.push(c),
            None => return Err(PathError::lex("invalid unicode code point", offset)),
        }
        Ok(u_pos + 5)
    }
}

fn read_hex4(lexer: &Lexer<'_>, start: usize) -> Option<u32> {
    if start + 4 > lexer.chars.len() {
        return None;
    }
    let digits: String = lexer.chars[start..start + 4].iter().map(|&(_, c)| c).collect();
    u32::from_str_radix(&digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::tokenizer::tokenize;
    use crate::tokens::TokenKind;

    fn string_token(input: &str) -> String {
        let tokens = tokenize(input, false).expect("tokenize");
        tokens
            .into_iter()
            .find_map(|t| match t.kind {
                TokenKind::String(s) => Some(s),
                _ => None,
            })
            .expect("string token")
    }

    #[test]
    fn basic_escapes() {
        assert_eq!(string_token(r#"$["a\n\t\\b"]"#), "a\n\t\\b");
        assert_eq!(string_token(r"$['it\'s']"), "it's");
    }

    #[test]
    fn unicode_escape() {
        assert_eq!(string_token("$[\"\\u00e9\"]"), "\u{e9}");
    }

    #[test]
    fn surrogate_pair_escape() {
        assert_eq!(string_token("$[\"\\uD83D\\uDE00\"]"), "\u{1F600}");
    }

    #[test]
    fn lone_high_surrogate_is_rejected() {
        let err = tokenize(r#"$["\uD83D"]"#, false).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lex);
    }

    #[test]
    fn unterminated_string_reports_offset() {
        let err = tokenize("$['abc", false).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lex);
        assert_eq!(err.offset, Some(2));
    }

    #[test]
    fn invalid_escape_is_rejected() {
        let err = tokenize(r"$['\q']", false).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lex);
    }
}
