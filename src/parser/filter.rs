//! Filter expression parsing
//!
//! Implements the filter sub-grammar with the precedence ladder
//! `||` < `&&` < `!` < comparison, plus parenthesized groups, literals,
//! context variables, embedded paths, and function calls.

use super::Parser;
use crate::ast::{CompareOp, ContextVar, FilterExpr, Literal, PathAnchor, PathExpr};
use crate::error::{PathError, PathResult};
use crate::tokens::TokenKind;

impl Parser {
    /// Parse a complete filter expression (after the `?` marker)
    pub(crate) fn parse_filter_expression(&mut self) -> PathResult<FilterExpr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> PathResult<FilterExpr> {
        let mut left = self.parse_and()?;
        while self.peek() == &TokenKind::Or {
            self.advance();
            let right = self.parse_and()?;
            left = FilterExpr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> PathResult<FilterExpr> {
        let mut left = self.parse_unary()?;
        while self.peek() == &TokenKind::And {
            self.advance();
            let right = self.parse_unary()?;
            left = FilterExpr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> PathResult<FilterExpr> {
        if self.peek() == &TokenKind::Not {
            self.advance();
            let inner = self.parse_unary()?;
            return Ok(FilterExpr::Not(Box::new(inner)));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> PathResult<FilterExpr> {
        let left = self.parse_operand()?;
        let op = match self.peek() {
            TokenKind::Eq => CompareOp::Eq,
            TokenKind::Ne => CompareOp::Ne,
            TokenKind::Lt => CompareOp::Lt,
            TokenKind::Le => CompareOp::Le,
            TokenKind::Gt => CompareOp::Gt,
            TokenKind::Ge => CompareOp::Ge,
            _ => return Ok(left),
        };
        self.advance();
        let right = self.parse_operand()?;
        Ok(FilterExpr::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_operand(&mut self) -> PathResult<FilterExpr> {
        match self.peek().clone() {
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_or()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(expr)
            }
            TokenKind::String(s) => {
                self.advance();
                Ok(FilterExpr::Literal(Literal::String(s)))
            }
            TokenKind::Integer(i) => {
                self.advance();
                Ok(FilterExpr::Literal(Literal::Int(i)))
            }
            TokenKind::Float(f) => {
                self.advance();
                Ok(FilterExpr::Literal(Literal::Float(f)))
            }
            TokenKind::True => {
                self.advance();
                Ok(FilterExpr::Literal(Literal::Bool(true)))
            }
            TokenKind::False => {
                self.advance();
                Ok(FilterExpr::Literal(Literal::Bool(false)))
            }
            TokenKind::Null => {
                self.advance();
                Ok(FilterExpr::Literal(Literal::Null))
            }
            TokenKind::CtxProperty => {
                self.advance();
                Ok(FilterExpr::ContextVar(ContextVar::Property))
            }
            TokenKind::CtxIndex => {
                self.advance();
                Ok(FilterExpr::ContextVar(ContextVar::Index))
            }
            TokenKind::CtxPath => {
                self.advance();
                Ok(FilterExpr::ContextVar(ContextVar::Path))
            }
            TokenKind::CtxParentProperty => {
                self.advance();
                Ok(FilterExpr::ContextVar(ContextVar::ParentProperty))
            }
            TokenKind::At => {
                self.advance();
                self.parse_embedded_path(PathAnchor::Current)
            }
            TokenKind::CtxParent => {
                self.advance();
                self.parse_embedded_path(PathAnchor::Parent)
            }
            TokenKind::CtxRoot => {
                self.advance();
                self.parse_embedded_path(PathAnchor::Root)
            }
            TokenKind::Root => {
                self.advance();
                self.parse_embedded_path(PathAnchor::Root)
            }
            TokenKind::Name(name) => {
                let offset = self.offset();
                self.advance();
                if self.peek() != &TokenKind::LeftParen {
                    return Err(PathError::parse(
                        format!("unexpected identifier '{name}'; function calls require '('"),
                        offset,
                    ));
                }
                self.advance();
                let args = self.parse_call_args()?;
                Ok(FilterExpr::Call { name, args })
            }
            other => Err(PathError::parse(
                format!("unexpected {} in filter expression", other.describe()),
                self.offset(),
            )),
        }
    }

    fn parse_embedded_path(&mut self, anchor: PathAnchor) -> PathResult<FilterExpr> {
        let segments = self.parse_segments()?;
        Ok(FilterExpr::Path(PathExpr { anchor, segments }))
    }

    fn parse_call_args(&mut self) -> PathResult<Vec<FilterExpr>> {
        let mut args = Vec::new();
        if self.peek() == &TokenKind::RightParen {
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.parse_or()?);
            match self.peek() {
                TokenKind::Comma => self.advance(),
                TokenKind::RightParen => {
                    self.advance();
                    return Ok(args);
                }
                other => {
                    return Err(PathError::parse(
                        format!(
                            "expected ',' or ')' in function arguments, found {}",
                            other.describe()
                        ),
                        self.offset(),
                    ));
                }
            }
        }
    }
}
