//! The Parser module pulls tokens from the Lexer one at a time and hands
//! every complete statement to an Emitter.
//!
//! Grammar:
//!
//! ```text
//! statement  := assignment | print
//! assignment := IDENTIFIER "=" INTEGER "+" INTEGER ";"
//! print      := "print" IDENTIFIER ";"
//! ```
//!
//! There is no lookahead past the current token and no recovery: the first
//! token that does not fit stops the run. Statements emitted before that
//! point stay emitted.
use super::codegen::Emitter;
use super::error::{CompileError, SyntaxError};
use super::lexer::{Lexer, Token, TokenKind};

pub struct Parser<'a, E: Emitter> {
    lexer: Lexer<'a>,
    current: Token,
    emitter: E,
    strict: bool,
    statements: usize,
}

impl<'a, E: Emitter> Parser<'a, E> {
    pub fn new(mut lexer: Lexer<'a>, emitter: E) -> Self {
        let current = lexer.next_token();
        Parser { lexer, current, emitter, strict: false, statements: 0 }
    }

    /// In strict mode a stray symbol between statements is a syntax error
    /// instead of being skipped.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Run the parser to the end of input, returning how many statements
    /// were emitted.
    pub fn run(mut self) -> Result<usize, CompileError> {
        while self.statement()? {}

        debug!("parsed {} statement(s)", self.statements);
        Ok(self.statements)
    }

    /// Parses at most one statement. Returns false once input is exhausted.
    fn statement(&mut self) -> Result<bool, CompileError> {
        match self.current.kind {
            TokenKind::EndOfInput => Ok(false),
            TokenKind::Identifier => {
                let name = self.advance().text;
                self.assignment(name)?;
                Ok(true)
            },
            TokenKind::PrintKeyword => {
                self.advance();
                self.print()?;
                Ok(true)
            },
            TokenKind::Unknown if self.strict => {
                Err(SyntaxError::unexpected(&self.current, None).into())
            },
            _ => {
                let skipped = self.advance();
                warn!("skipping unexpected token '{}' on line {}", skipped.text, skipped.line);
                Ok(true)
            },
        }
    }

    // The target identifier has already been consumed.
    fn assignment(&mut self, target: String) -> Result<(), CompileError> {
        self.expect(TokenKind::Equals)?;
        let left = self.expect(TokenKind::IntegerLiteral)?;
        self.expect(TokenKind::Plus)?;
        let right = self.expect(TokenKind::IntegerLiteral)?;
        self.expect(TokenKind::Semicolon)?;

        debug!("assignment: {} = {} + {}", target, left.text, right.text);
        self.emitter.emit_assignment(&target, &left.text, &right.text)?;
        self.statements += 1;
        Ok(())
    }

    // The `print` keyword has already been consumed.
    fn print(&mut self) -> Result<(), CompileError> {
        let target = self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Semicolon)?;

        debug!("print: {}", target.text);
        self.emitter.emit_print(&target.text)?;
        self.statements += 1;
        Ok(())
    }

    /// Consumes the current token if it is of the given kind.
    fn expect(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        if self.current.kind == kind {
            Ok(self.advance())
        } else {
            Err(SyntaxError::unexpected(&self.current, Some(kind)))
        }
    }

    /// Pulls the next token, returning the one it replaces.
    #[inline]
    fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        trace!("token {:?} {:?} on line {}", next.kind, next.text, next.line);
        std::mem::replace(&mut self.current, next)
    }
}
