//! Error types.
//!
//! Lexing and parsing failures keep their own types so the lexer and parser
//! can be used on their own, but at the public entry points every kind of
//! bad expression text is folded into [`CordonError::Rejected`]. Messages
//! carry the expression text and never any context value.

use thiserror::Error;

use crate::ast::Span;
use crate::screener::DenyCategory;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("unterminated string starting at position {position}")]
    UnterminatedString { position: usize },

    #[error("invalid escape sequence '\\{ch}' at position {position}")]
    InvalidEscape { ch: char, position: usize },

    #[error("malformed number '{text}' at position {position}")]
    MalformedNumber { text: String, position: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expected {expected}, got {found} at {span}")]
    Expected {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("unexpected {found} at {span}")]
    UnexpectedToken { found: String, span: Span },

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("trailing input: {found} at {span}")]
    TrailingInput { found: String, span: Span },

    #[error("expression nested deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("expression tree taller than {limit} levels")]
    TooTall { limit: usize },

    #[error(transparent)]
    Lex(#[from] LexError),
}

/// Why an expression was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RejectReason {
    #[error("empty expression")]
    Empty,

    #[error("expression longer than {limit} characters")]
    TooLong { limit: usize },

    #[error("references a blocked identifier ({0})")]
    Denylisted(DenyCategory),

    #[error("invalid token: {0}")]
    Lex(LexError),

    #[error("syntax error: {0}")]
    Parse(ParseError),

    #[error("not a field path")]
    NotAFieldPath,
}

impl From<ParseError> for RejectReason {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::Lex(lex) => RejectReason::Lex(lex),
            other => RejectReason::Parse(other),
        }
    }
}

impl From<LexError> for RejectReason {
    fn from(e: LexError) -> Self {
        RejectReason::Lex(e)
    }
}

/// Top-level error type for cordon-lang.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CordonError {
    /// The expression text is unsafe or invalid. This is a permanent
    /// authoring error and must not be treated as a `false` result.
    #[error("expression not permitted: `{expression}` ({reason})")]
    Rejected {
        expression: String,
        reason: RejectReason,
    },

    /// The context handed in was not a mapping.
    #[error("context must be a JSON object, got {0}")]
    InvalidContext(&'static str),

    /// Field-condition operator outside the supported set.
    #[error("unsupported field operator '{0}'")]
    UnknownOperator(String),
}

impl CordonError {
    pub fn rejected(expression: &str, reason: impl Into<RejectReason>) -> Self {
        CordonError::Rejected {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, CordonError::Rejected { .. })
    }
}
