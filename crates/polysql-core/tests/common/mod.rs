#![allow(dead_code)]

use polysql_core::ast::visit::type_tags;
use polysql_core::ast::{SelectStatement, Statement};
use polysql_core::{DialectKind, ParseError, Parser};

pub fn parse(sql: &str) -> Statement {
    parse_with(sql, DialectKind::SqlServer)
}

pub fn parse_with(sql: &str, dialect: DialectKind) -> Statement {
    Parser::with_dialect(sql, dialect)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse ({dialect}): {sql}\nError: {e}"))
}

pub fn parse_all(sql: &str, dialect: DialectKind) -> Vec<Statement> {
    Parser::with_dialect(sql, dialect)
        .parse_statements()
        .unwrap_or_else(|e| panic!("Failed to parse ({dialect}): {sql}\nError: {e}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    parse_err_with(sql, DialectKind::SqlServer)
}

pub fn parse_err_with(sql: &str, dialect: DialectKind) -> ParseError {
    Parser::with_dialect(sql, dialect)
        .parse_statement()
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_select(sql: &str) -> SelectStatement {
    parse_select_with(sql, DialectKind::SqlServer)
}

pub fn parse_select_with(sql: &str, dialect: DialectKind) -> SelectStatement {
    match parse_with(sql, dialect) {
        Statement::Select(s) => *s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

/// Pre-order node tags of the first statement in `sql`.
pub fn tags(sql: &str, dialect: DialectKind) -> Vec<&'static str> {
    type_tags(&parse_with(sql, dialect))
}
