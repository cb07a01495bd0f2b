//! Numeric literal lexing
//!
//! Segment mode admits signed integers only (indices and slice bounds).
//! Filter mode admits decimals and exponents as well. Leading zeros and
//! negative zero are rejected per the RFC 9535 number grammar.

use super::{Lexer, Mode};
use crate::error::{PathError, PathResult};
use crate::tokens::TokenKind;

/// Lex an integer or floating-point literal starting at `-` or a digit
pub(crate) fn lex_number(lexer: &mut Lexer<'_>) -> PathResult<()> {
    let (start_offset, first) = lexer.chars[lexer.pos];
    let start = lexer.pos;
    let mut i = start;
    if first == '-' {
        i += 1;
    }

    let digit_start = i;
    while i < lexer.chars.len() && lexer.chars[i].1.is_ascii_digit() {
        i += 1;
    }
    if i == digit_start {
        return Err(PathError::lex("expected digit", start_offset));
    }
    if i > digit_start + 1 && lexer.chars[digit_start].1 == '0' {
        return Err(PathError::lex(
            "integers cannot have leading zeros",
            lexer.chars[digit_start].0,
        ));
    }

    let mut is_float = false;
    if lexer.mode == Mode::Filter {
        // Fractional part: a '.' only counts when a digit follows, otherwise
        // it belongs to an embedded path segment.
        if i < lexer.chars.len()
            && lexer.chars[i].1 == '.'
            && lexer.chars.get(i + 1).is_some_and(|&(_, c)| c.is_ascii_digit())
        {
            is_float = true;
            i += 1;
            while i < lexer.chars.len() && lexer.chars[i].1.is_ascii_digit() {
                i += 1;
            }
        }
        if i < lexer.chars.len() && matches!(lexer.chars[i].1, 'e' | 'E') {
            let mut j = i + 1;
            if j < lexer.chars.len() && matches!(lexer.chars[j].1, '+' | '-') {
                j += 1;
            }
            if j < lexer.chars.len() && lexer.chars[j].1.is_ascii_digit() {
                is_float = true;
                i = j;
                while i < lexer.chars.len() && lexer.chars[i].1.is_ascii_digit() {
                    i += 1;
                }
            } else {
                return Err(PathError::lex(
                    "exponent requires at least one digit",
                    lexer.chars[i].0,
                ));
            }
        }
    }

    let text: String = lexer.chars[start..i].iter().map(|&(_, c)| c).collect();
    if is_float {
        match text.parse::<f64>() {
            Ok(v) => lexer.push(TokenKind::Float(v), start_offset),
            Err(_) => {
                return Err(PathError::lex("invalid number literal", start_offset));
            }
        }
    } else {
        if first == '-' && text == "-0" {
            return Err(PathError::lex("negative zero is not allowed", start_offset));
        }
        match text.parse::<i64>() {
            Ok(v) => lexer.push(TokenKind::Integer(v), start_offset),
            Err(_) => {
                return Err(PathError::lex("integer literal out of range", start_offset));
            }
        }
    }
    lexer.pos = i;
    Ok(())
}
