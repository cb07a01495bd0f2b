//! Error types for path compilation and query evaluation
//!
//! Compilation errors carry the byte offset of the offending source text;
//! runtime errors carry the failure kind. Queries that simply match nothing
//! are not errors and return an empty nodelist.

use std::error::Error;
use std::fmt;

/// Failure categories for compilation and evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown character, unterminated string, or bad escape sequence
    Lex,
    /// Unexpected token, missing bracket, or invalid selector structure
    Parse,
    /// Function arity/type mismatch or an ill-typed comparison operand
    Type,
    /// An extension construct was used while strict RFC 9535 mode is active
    ExtensionDisabled,
    /// Invalid regular expression pattern
    Regex,
    /// Descendant traversal exceeded the configured depth bound
    DepthExceeded,
    /// The document adapter reported an inconsistent kind/value pair
    Adapter,
}

impl ErrorKind {
    fn label(self) -> &'static str {
        match self {
            ErrorKind::Lex => "lex error",
            ErrorKind::Parse => "parse error",
            ErrorKind::Type => "type error",
            ErrorKind::ExtensionDisabled => "extension disabled",
            ErrorKind::Regex => "regex error",
            ErrorKind::DepthExceeded => "depth exceeded",
            ErrorKind::Adapter => "adapter error",
        }
    }
}

/// Error produced while compiling or evaluating a path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathError {
    /// Failure category
    pub kind: ErrorKind,
    /// Human-readable description of the failure
    pub message: String,
    /// Byte offset into the source expression, when known
    pub offset: Option<usize>,
}

/// Result type for path operations
pub type PathResult<T> = Result<T, PathError>;

impl PathError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>, offset: Option<usize>) -> Self {
        Self {
            kind,
            message: message.into(),
            offset,
        }
    }

    pub(crate) fn lex(message: impl Into<String>, offset: usize) -> Self {
        Self::new(ErrorKind::Lex, message, Some(offset))
    }

    pub(crate) fn parse(message: impl Into<String>, offset: usize) -> Self {
        Self::new(ErrorKind::Parse, message, Some(offset))
    }

    pub(crate) fn type_error(message: impl Into<String>, offset: Option<usize>) -> Self {
        Self::new(ErrorKind::Type, message, offset)
    }

    pub(crate) fn extension_disabled(construct: &str, offset: usize) -> Self {
        Self::new(
            ErrorKind::ExtensionDisabled,
            format!("'{construct}' is not available in strict RFC 9535 mode"),
            Some(offset),
        )
    }

    pub(crate) fn regex(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Regex, message, None)
    }

    pub(crate) fn depth_exceeded(limit: usize) -> Self {
        Self::new(
            ErrorKind::DepthExceeded,
            format!("descendant traversal exceeded depth bound of {limit}"),
            None,
        )
    }

    pub(crate) fn adapter(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Adapter, message, None)
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => write!(
                f,
                "{} at offset {}: {}",
                self.kind.label(),
                offset,
                self.message
            ),
            None => write!(f, "{}: {}", self.kind.label(), self.message),
        }
    }
}

impl Error for PathError {}
