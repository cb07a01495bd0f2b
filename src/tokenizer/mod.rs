//! Two-mode lexer for path expressions
//!
//! Segment mode covers the path proper (`$`, `.name`, `..`, brackets, `^`,
//! `~`); filter mode is entered at `[?` and covers the filter sub-grammar
//! (literals, operators, context variables, embedded paths). The mode to
//! restore at each closing bracket is kept on a stack so embedded bracket
//! selectors inside filters lex correctly.

pub(crate) mod numbers;
pub(crate) mod operators;
pub(crate) mod strings;

use crate::error::{PathError, PathResult};
use crate::tokens::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Segment,
    Filter,
}

/// Lexer state shared with the per-concern submodules
pub(crate) struct Lexer<'a> {
    pub(crate) input: &'a str,
    pub(crate) chars: Vec<(usize, char)>,
    pub(crate) pos: usize,
    pub(crate) mode: Mode,
    pub(crate) mode_stack: Vec<Mode>,
    pub(crate) strict: bool,
    pub(crate) tokens: Vec<Token>,
}

/// Tokenize a complete path expression
pub(crate) fn tokenize(input: &str, strict: bool) -> PathResult<Vec<Token>> {
    let mut lexer = Lexer {
        input,
        chars: input.char_indices().collect(),
        pos: 0,
        mode: Mode::Segment,
        mode_stack: Vec::new(),
        strict,
        tokens: Vec::new(),
    };
    lexer.run()?;
    Ok(lexer.tokens)
}

impl<'a> Lexer<'a> {
    fn run(&mut self) -> PathResult<()> {
        while self.pos < self.chars.len() {
            let (offset, c) = self.chars[self.pos];
            match c {
                ' ' | '\t' | '\n' | '\r' => self.pos += 1,
                '\'' | '"' => strings::lex_string(self)?,
                '$' => self.push_single(TokenKind::Root, offset),
                '@' => self.lex_at(offset)?,
                '.' => {
                    if self.peek_char(1) == Some('.') {
                        self.push(TokenKind::DoubleDot, offset);
                        self.pos += 2;
                    } else {
                        self.push_single(TokenKind::Dot, offset);
                    }
                }
                '*' => self.push_single(TokenKind::Star, offset),
                '[' => {
                    self.mode_stack.push(self.mode);
                    self.push_single(TokenKind::LeftBracket, offset);
                }
                ']' => {
                    self.mode = self.mode_stack.pop().unwrap_or(Mode::Segment);
                    self.push_single(TokenKind::RightBracket, offset);
                }
                ',' => self.push_single(TokenKind::Comma, offset),
                ':' => self.push_single(TokenKind::Colon, offset),
                '?' => {
                    self.mode = Mode::Filter;
                    self.push_single(TokenKind::Question, offset);
                }
                '^' => self.lex_extension_selector(TokenKind::Caret, "^", offset)?,
                '~' => self.lex_extension_selector(TokenKind::Tilde, "~", offset)?,
                '(' if self.mode == Mode::Filter => {
                    self.push_single(TokenKind::LeftParen, offset);
                }
                ')' if self.mode == Mode::Filter => {
                    self.push_single(TokenKind::RightParen, offset);
                }
                '=' | '!' | '<' | '>' | '&' | '|' if self.mode == Mode::Filter => {
                    operators::lex_operator(self)?;
                }
                c if c.is_ascii_digit() => numbers::lex_number(self)?,
                '-' if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                    numbers::lex_number(self)?;
                }
                c if is_name_start(c) => self.lex_name(),
                _ => {
                    return Err(PathError::lex(
                        format!("unrecognized character '{c}'"),
                        offset,
                    ));
                }
            }
        }
        let end = self.input.len();
        self.push(TokenKind::Eof, end);
        Ok(())
    }

    /// Lex `@` and the `@property`-family context variables
    ///
    /// In strict mode `@` never fuses with a following identifier, so the
    /// extension variables cannot be formed at all.
    fn lex_at(&mut self, offset: usize) -> PathResult<()> {
        if self.mode == Mode::Filter && self.peek_char(1).is_some_and(is_name_start) {
            let start = self.pos + 1;
            let mut end = start;
            while end < self.chars.len() && is_ident_char(self.chars[end].1) {
                end += 1;
            }
            let name: String = self.chars[start..end].iter().map(|&(_, c)| c).collect();
            let kind = match name.as_str() {
                "property" => TokenKind::CtxProperty,
                "index" => TokenKind::CtxIndex,
                "path" => TokenKind::CtxPath,
                "parent" => TokenKind::CtxParent,
                "parentProperty" => TokenKind::CtxParentProperty,
                "root" => TokenKind::CtxRoot,
                _ => {
                    return Err(PathError::lex(
                        format!("unknown context variable '@{name}'"),
                        offset,
                    ));
                }
            };
            if self.strict {
                return Err(PathError::extension_disabled(&format!("@{name}"), offset));
            }
            self.push(kind, offset);
            self.pos = end;
        } else {
            self.push_single(TokenKind::At, offset);
        }
        Ok(())
    }

    fn lex_extension_selector(
        &mut self,
        kind: TokenKind,
        display: &str,
        offset: usize,
    ) -> PathResult<()> {
        if self.mode == Mode::Filter {
            return Err(PathError::lex(
                format!("unrecognized character '{display}' in filter expression"),
                offset,
            ));
        }
        if self.strict {
            return Err(PathError::extension_disabled(display, offset));
        }
        self.push_single(kind, offset);
        Ok(())
    }

    /// Lex a name or, in filter mode, a keyword
    ///
    /// Segment-mode names admit `-` after the first character (dot shorthand
    /// such as `$.content-type`); filter-mode identifiers do not, so that `-`
    /// stays available to numeric literals.
    fn lex_name(&mut self) {
        let (offset, _) = self.chars[self.pos];
        let start = self.pos;
        let mut end = start;
        while end < self.chars.len() {
            let c = self.chars[end].1;
            let ok = match self.mode {
                Mode::Segment => is_ident_char(c) || c == '-',
                Mode::Filter => is_ident_char(c),
            };
            if !ok {
                break;
            }
            end += 1;
        }
        let name: String = self.chars[start..end].iter().map(|&(_, c)| c).collect();
        let kind = if self.mode == Mode::Filter {
            match name.as_str() {
                "true" => TokenKind::True,
                "false" => TokenKind::False,
                "null" => TokenKind::Null,
                _ => TokenKind::Name(name),
            }
        } else {
            TokenKind::Name(name)
        };
        self.push(kind, offset);
        self.pos = end;
    }

    #[inline]
    pub(crate) fn peek_char(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).map(|&(_, c)| c)
    }

    #[inline]
    pub(crate) fn push(&mut self, kind: TokenKind, offset: usize) {
        self.tokens.push(Token::new(kind, offset));
    }

    #[inline]
    fn push_single(&mut self, kind: TokenKind, offset: usize) {
        self.push(kind, offset);
        self.pos += 1;
    }
}

#[inline]
fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[inline]
fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
