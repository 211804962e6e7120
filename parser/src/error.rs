use crate::token::{Token, TokenKind};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("Parse error at line {line}, column {column}: expected {expected} but found {found}")]
    UnexpectedToken {
        expected: String,
        found:    String,
        line:     usize,
        column:   usize,
    },

    #[error("Parse error at line {line}, column {column}: no prefix parse function for {kind} {literal:?}")]
    NoPrefixParse {
        kind:    TokenKind,
        literal: String,
        line:    usize,
        column:  usize,
    },

    #[error("Parse error at line {line}, column {column}: could not parse {literal:?} as integer")]
    InvalidInteger {
        literal: String,
        line:    usize,
        column:  usize,
    },
}

impl SyntaxError {
    pub(crate) fn unexpected(expected: impl Into<String>, found: &Token) -> Self {
        SyntaxError::UnexpectedToken {
            expected: expected.into(),
            found:    found.kind.to_string(),
            line:     found.line,
            column:   found.column,
        }
    }

    /// 1-based line and column of the offending token.
    pub fn position(&self) -> (usize, usize) {
        match *self {
            SyntaxError::UnexpectedToken { line, column, .. }
            | SyntaxError::NoPrefixParse { line, column, .. }
            | SyntaxError::InvalidInteger { line, column, .. } => (line, column),
        }
    }
}
