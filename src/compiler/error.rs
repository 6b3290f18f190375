//! Errors raised while translating a program.
use std::io;

use thiserror::Error;

use super::lexer::{Token, TokenKind};

/// The parser found a token it cannot accept in its current state.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
#[error("Syntax Error: Unexpected token '{token}'")]
pub struct SyntaxError {
    /// Literal text of the offending token.
    pub token: String,
    pub line: usize,
    /// `None` when a statement was expected.
    pub expected: Option<TokenKind>,
}

impl SyntaxError {
    pub fn unexpected(found: &Token, expected: Option<TokenKind>) -> Self {
        SyntaxError { token: found.text.clone(), line: found.line, expected }
    }

    /// Longer description including the location and what was wanted.
    pub fn detail(&self) -> String {
        match self.expected {
            Some(kind) => format!("line {}: expected {}, found '{}'", self.line, kind, self.token),
            None => format!("line {}: expected a statement, found '{}'", self.line, self.token),
        }
    }
}

#[derive(Error, Debug)]
pub enum CompileError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("unable to write instructions: {0}")]
    Io(#[from] io::Error),
}

impl CompileError {
    pub fn syntax(&self) -> Option<&SyntaxError> {
        match self {
            CompileError::Syntax(e) => Some(e),
            CompileError::Io(_) => None,
        }
    }
}
