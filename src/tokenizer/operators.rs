//! Operator lexing for filter expressions
//!
//! Multi-character comparison and logical operators, plus the JavaScript
//! `===`/`!==` synonyms, which are accepted outside strict mode only.

use super::Lexer;
use crate::error::{PathError, PathResult};
use crate::tokens::TokenKind;

/// Lex an operator starting at `=`, `!`, `<`, `>`, `&`, or `|`
pub(crate) fn lex_operator(lexer: &mut Lexer<'_>) -> PathResult<()> {
    let (offset, c) = lexer.chars[lexer.pos];
    match c {
        '=' => {
            if lexer.peek_char(1) != Some('=') {
                return Err(PathError::lex(
                    "single '=' not supported, use '==' for equality",
                    offset,
                ));
            }
            if lexer.peek_char(2) == Some('=') {
                if lexer.strict {
                    return Err(PathError::extension_disabled("===", offset));
                }
                lexer.push(TokenKind::Eq, offset);
                lexer.pos += 3;
            } else {
                lexer.push(TokenKind::Eq, offset);
                lexer.pos += 2;
            }
        }
        '!' => {
            if lexer.peek_char(1) == Some('=') {
                if lexer.peek_char(2) == Some('=') {
                    if lexer.strict {
                        return Err(PathError::extension_disabled("!==", offset));
                    }
                    lexer.push(TokenKind::Ne, offset);
                    lexer.pos += 3;
                } else {
                    lexer.push(TokenKind::Ne, offset);
                    lexer.pos += 2;
                }
            } else {
                lexer.push(TokenKind::Not, offset);
                lexer.pos += 1;
            }
        }
        '<' => {
            if lexer.peek_char(1) == Some('=') {
                lexer.push(TokenKind::Le, offset);
                lexer.pos += 2;
            } else {
                lexer.push(TokenKind::Lt, offset);
                lexer.pos += 1;
            }
        }
        '>' => {
            if lexer.peek_char(1) == Some('=') {
                lexer.push(TokenKind::Ge, offset);
                lexer.pos += 2;
            } else {
                lexer.push(TokenKind::Gt, offset);
                lexer.pos += 1;
            }
        }
        '&' => {
            if lexer.peek_char(1) != Some('&') {
                return Err(PathError::lex(
                    "single '&' not supported, use '&&' for logical AND",
                    offset,
                ));
            }
            lexer.push(TokenKind::And, offset);
            lexer.pos += 2;
        }
        '|' => {
            if lexer.peek_char(1) != Some('|') {
                return Err(PathError::lex(
                    "single '|' not supported, use '||' for logical OR",
                    offset,
                ));
            }
            lexer.push(TokenKind::Or, offset);
            lexer.pos += 2;
        }
        _ => {
            return Err(PathError::lex(
                format!("unexpected operator character '{c}'"),
                offset,
            ));
        }
    }
    Ok(())
}
