//! The Compiler module is in charge of taking the source of a
//! program and producing pseudo-assembly through an Emitter.
//!
//! It does this by implementing a pull-based tokenizer
//! and a single-token recursive descent parser.

pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;
