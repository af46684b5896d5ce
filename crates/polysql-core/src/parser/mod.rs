//! SQL Parser
//!
//! A hand-written recursive descent parser with two tokens of lookahead and a
//! flat, left-associative infix loop for expressions. Productions are split
//! by statement family; every file adds methods to the same [`Parser`].

mod ddl;
mod error;
mod explain;
mod expr;
mod metrics;
mod parser;
mod pratt;
mod procedural;
mod query;
mod routine;
mod transaction;

pub use error::{ParseError, ParseErrorKind};
pub use metrics::ParseMetrics;
pub use parser::{Parser, ParserOptions};
