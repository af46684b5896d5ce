//! SQL Lexer/Tokenizer
//!
//! A hand-written, single-pass lexer with one character of lookahead. It
//! consults the active [`Dialect`](crate::dialect::Dialect) for quoting,
//! comment and keyword rules.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
