//! # polysql-core
//!
//! A multi-dialect SQL front end for SQL Server, MySQL, PostgreSQL and
//! SQLite.
//!
//! This crate provides:
//! - A dialect-aware lexer with source spans
//! - A hand-written recursive descent parser covering queries, DDL,
//!   stored routines, procedural blocks, transactions and EXPLAIN
//! - A closed AST with stable type tags and a read-only visitor
//! - A parse error channel, timing metrics and cooperative deadlines
//!
//! ## Parsing a script
//!
//! ```rust
//! use polysql_core::{parse_sql, DialectKind, Statement};
//!
//! let statements = parse_sql(
//!     "SELECT TOP 5 name FROM users ORDER BY name;
//!      SELECT name FROM users LIMIT 10 OFFSET 5;
//!      DELETE FROM audit",
//!     DialectKind::SqlServer,
//! )
//! .unwrap();
//!
//! assert_eq!(statements.len(), 3);
//! assert!(matches!(statements[1], Statement::Select(_)));
//! ```
//!
//! ## Dialect gating
//!
//! Constructs that only some vendors accept fail with a feature error in
//! the others:
//!
//! ```rust
//! use polysql_core::{parse_sql, DialectKind};
//!
//! let error = parse_sql(
//!     "CREATE MATERIALIZED VIEW totals AS SELECT 1 AS n",
//!     DialectKind::SqlServer,
//! )
//! .unwrap_err();
//! assert_eq!(
//!     error.message,
//!     "feature MATERIALIZED VIEW not supported in dialect sqlserver"
//! );
//! ```

pub mod ast;
pub mod dialect;
pub mod lexer;
pub mod parser;
pub mod pool;

pub use ast::{Expr, Node, Statement};
pub use dialect::{Dialect, DialectKind, Feature};
pub use lexer::{Keyword, Lexer, Span, Token, TokenKind};
pub use parser::{ParseError, ParseErrorKind, ParseMetrics, Parser, ParserOptions};

/// Parses every statement in `sql` with the given dialect.
///
/// # Errors
///
/// Returns the first parse error.
pub fn parse_sql(sql: &str, dialect: DialectKind) -> Result<Vec<Statement>, ParseError> {
    Parser::with_dialect(sql, dialect).parse_statements()
}
