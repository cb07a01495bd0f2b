//! Recursive-descent parser for path expressions
//!
//! Builds the segment/selector AST from the token stream. The filter
//! sub-grammar lives in [`filter`]; bracket parsing is shared between
//! top-level segments and paths embedded in filter expressions.

pub(crate) mod filter;

use crate::ast::{PathAnchor, PathExpr, Segment, Selector};
use crate::config::QueryOptions;
use crate::error::{PathError, PathResult};
use crate::tokenizer;
use crate::tokens::{Token, TokenKind};

/// Parse a complete top-level path expression
pub(crate) fn parse(input: &str, options: &QueryOptions) -> PathResult<PathExpr> {
    if input.trim().is_empty() {
        return Err(PathError::parse("empty expression", 0));
    }
    let tokens = tokenizer::tokenize(input, options.strict_rfc9535)?;
    let mut parser = Parser { tokens, pos: 0 };
    let path = parser.parse_root_path()?;
    parser.expect_eof()?;
    Ok(path)
}

pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn parse_root_path(&mut self) -> PathResult<PathExpr> {
        match self.peek() {
            TokenKind::Root => {
                self.advance();
            }
            TokenKind::At => {
                return Err(PathError::parse(
                    "current node identifier '@' is only valid within filter expressions",
                    self.offset(),
                ));
            }
            _ => {
                return Err(PathError::parse(
                    "path expressions must start with '$'",
                    self.offset(),
                ));
            }
        }
        let segments = self.parse_segments()?;
        Ok(PathExpr {
            anchor: PathAnchor::Root,
            segments,
        })
    }

    /// Parse the segment list of a path whose anchor token was consumed
    ///
    /// Stops at the first token that cannot continue a path, which lets the
    /// filter parser embed paths inside larger expressions.
    pub(crate) fn parse_segments(&mut self) -> PathResult<Vec<Segment>> {
        let mut segments = Vec::new();
        loop {
            match self.peek() {
                TokenKind::Dot => {
                    self.advance();
                    segments.push(Segment::child(vec![self.parse_shorthand_selector()?]));
                }
                TokenKind::DoubleDot => {
                    self.advance();
                    let selectors = match self.peek() {
                        TokenKind::Name(_) | TokenKind::Star => {
                            vec![self.parse_shorthand_selector()?]
                        }
                        TokenKind::LeftBracket => {
                            self.advance();
                            self.parse_bracketed()?
                        }
                        _ => {
                            return Err(PathError::parse(
                                "descendant segment '..' must be followed by a name, \
                                 wildcard, or bracket segment",
                                self.offset(),
                            ));
                        }
                    };
                    segments.push(Segment::descendant(selectors));
                }
                TokenKind::LeftBracket => {
                    self.advance();
                    segments.push(Segment::child(self.parse_bracketed()?));
                }
                TokenKind::Caret => {
                    self.advance();
                    segments.push(Segment::child(vec![Selector::ParentNode]));
                }
                TokenKind::Tilde => {
                    let offset = self.offset();
                    self.advance();
                    segments.push(Segment::child(vec![Selector::KeyName]));
                    if self.peek() != &TokenKind::Eof {
                        return Err(PathError::parse(
                            "'~' is terminal; no segments may follow it",
                            offset,
                        ));
                    }
                }
                _ => break,
            }
        }
        Ok(segments)
    }

    /// Parse the selector after `.` or `..` shorthand
    fn parse_shorthand_selector(&mut self) -> PathResult<Selector> {
        match self.peek().clone() {
            TokenKind::Name(name) => {
                self.advance();
                Ok(Selector::Name(name))
            }
            TokenKind::Star => {
                self.advance();
                Ok(Selector::Wildcard)
            }
            _ => Err(PathError::parse(
                format!("expected member name or '*' after '.', found {}", self.peek().describe()),
                self.offset(),
            )),
        }
    }

    /// Parse a comma-separated selector list; the opening `[` is consumed
    pub(crate) fn parse_bracketed(&mut self) -> PathResult<Vec<Selector>> {
        let mut selectors = Vec::new();
        loop {
            selectors.push(self.parse_bracket_selector()?);
            match self.peek() {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::RightBracket => {
                    self.advance();
                    return Ok(selectors);
                }
                _ => {
                    return Err(PathError::parse(
                        format!(
                            "expected ',' or ']' in bracket segment, found {}",
                            self.peek().describe()
                        ),
                        self.offset(),
                    ));
                }
            }
        }
    }

    fn parse_bracket_selector(&mut self) -> PathResult<Selector> {
        match self.peek().clone() {
            TokenKind::String(name) => {
                self.advance();
                Ok(Selector::Name(name))
            }
            TokenKind::Integer(index) => {
                self.advance();
                if self.peek() == &TokenKind::Colon {
                    self.parse_slice(Some(index))
                } else {
                    Ok(Selector::Index(index))
                }
            }
            TokenKind::Colon => self.parse_slice(None),
            TokenKind::Star => {
                self.advance();
                Ok(Selector::Wildcard)
            }
            TokenKind::Question => {
                self.advance();
                let expr = self.parse_filter_expression()?;
                Ok(Selector::Filter(expr))
            }
            other => Err(PathError::parse(
                format!("unexpected {} in bracket segment", other.describe()),
                self.offset(),
            )),
        }
    }

    /// Parse a slice; positioned at the first `:`, `start` already consumed
    fn parse_slice(&mut self, start: Option<i64>) -> PathResult<Selector> {
        self.advance(); // first ':'
        let end = match self.peek() {
            &TokenKind::Integer(end) => {
                self.advance();
                Some(end)
            }
            _ => None,
        };
        let step = if self.peek() == &TokenKind::Colon {
            self.advance();
            match self.peek() {
                &TokenKind::Integer(step) => {
                    let offset = self.offset();
                    self.advance();
                    if step == 0 {
                        return Err(PathError::parse(
                            "slice step cannot be zero",
                            offset,
                        ));
                    }
                    Some(step)
                }
                _ => None,
            }
        } else {
            None
        };
        Ok(Selector::Slice { start, end, step })
    }

    fn expect_eof(&mut self) -> PathResult<()> {
        if self.peek() == &TokenKind::Eof {
            Ok(())
        } else {
            Err(PathError::parse(
                format!("unexpected {} after path", self.peek().describe()),
                self.offset(),
            ))
        }
    }

    #[inline]
    pub(crate) fn peek(&self) -> &TokenKind {
        self.tokens
            .get(self.pos)
            .map_or(&TokenKind::Eof, |t| &t.kind)
    }

    #[inline]
    pub(crate) fn offset(&self) -> usize {
        self.tokens.get(self.pos).map_or(0, |t| t.offset)
    }

    #[inline]
    pub(crate) fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    #[inline]
    pub(crate) fn expect(&mut self, expected: &TokenKind) -> PathResult<()> {
        if std::mem::discriminant(self.peek()) == std::mem::discriminant(expected) {
            self.advance();
            Ok(())
        } else {
            Err(PathError::parse(
                format!(
                    "expected {}, found {}",
                    expected.describe(),
                    self.peek().describe()
                ),
                self.offset(),
            ))
        }
    }

}
