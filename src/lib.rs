//! Translator for a toy imperative language into pseudo-assembly.
//!
//! ```text
//! x = 10 + 5;
//! print x;
//! ```
//!
//! Each statement is tokenized, parsed and handed to an
//! [`Emitter`](compiler::codegen::Emitter) as soon as it is recognized.
#[macro_use] extern crate log;

pub mod compiler;

pub use compiler::codegen::{Emitter, Listing, PseudoAsm};
pub use compiler::error::{CompileError, SyntaxError};
pub use compiler::lexer::{Lexer, Token, TokenKind, LEGACY_TOKEN_LIMIT};
pub use compiler::parser::Parser;

/// Knobs for a single translation run.
#[derive(Copy, Clone, Default, Debug)]
pub struct Options {
    /// Keep at most this many characters of identifiers and numbers.
    pub max_token_len: Option<usize>,
    /// Treat unknown symbols between statements as syntax errors.
    pub strict: bool,
}

/// Translates `source`, feeding each statement to `emitter` in order.
/// Returns the number of statements emitted.
pub fn compile<E: Emitter>(source: &str, emitter: E, options: Options) -> Result<usize, CompileError> {
    let lexer = Lexer::with_max_token_len(source, options.max_token_len);
    Parser::new(lexer, emitter).strict(options.strict).run()
}
