//! EXPLAIN in its MySQL, PostgreSQL and SQLite spellings.

use std::collections::BTreeMap;

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::ExplainStatement;
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    pub(super) fn parse_explain_statement(&mut self) -> Result<ExplainStatement, ParseError> {
        self.expect_keyword(Keyword::Explain)?;

        let mut analyze = false;
        let mut verbose = false;
        let mut extended = false;
        let mut format = None;
        let mut options = BTreeMap::new();
        let mut query_plan = false;

        loop {
            match self.current.kind {
                TokenKind::Keyword(Keyword::Analyze) => {
                    self.advance();
                    analyze = true;
                }
                TokenKind::Keyword(Keyword::Verbose) => {
                    self.advance();
                    verbose = true;
                }
                TokenKind::Keyword(Keyword::Extended) => {
                    self.advance();
                    extended = true;
                }
                TokenKind::Keyword(Keyword::Format) => {
                    self.advance();
                    self.consume(&TokenKind::Assign);
                    format = Some(self.parse_option_value()?.to_ascii_uppercase());
                }
                TokenKind::Keyword(Keyword::Query) if self.peek_keyword(Keyword::Plan) => {
                    self.advance();
                    self.advance();
                    query_plan = true;
                }
                TokenKind::LeftParen => {
                    self.advance();
                    self.parse_explain_options(&mut options)?;
                }
                _ => break,
            }
        }

        if let Some(value) = options.get("ANALYZE") {
            analyze |= is_enabled(value);
        }
        if let Some(value) = options.get("VERBOSE") {
            verbose |= is_enabled(value);
        }
        if format.is_none() {
            format = options.get("FORMAT").cloned();
        }

        let statement = Box::new(self.dispatch_statement()?);
        Ok(ExplainStatement {
            analyze,
            verbose,
            extended,
            format,
            options,
            query_plan,
            statement,
        })
    }

    /// Parses `name [value], ...)` after the opening parenthesis.
    fn parse_explain_options(
        &mut self,
        options: &mut BTreeMap<String, String>,
    ) -> Result<(), ParseError> {
        loop {
            let name = self.parse_option_value()?.to_ascii_uppercase();
            let value = if self.check(&TokenKind::Comma) || self.check(&TokenKind::RightParen) {
                String::from("TRUE")
            } else {
                self.parse_option_value()?.to_ascii_uppercase()
            };
            options.insert(name, value);
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RightParen)
    }
}

fn is_enabled(value: &str) -> bool {
    !matches!(value, "FALSE" | "OFF" | "0")
}

#[cfg(test)]
mod tests {
    use crate::ast::Statement;
    use crate::dialect::DialectKind;
    use crate::parser::Parser;

    fn parse_explain(sql: &str, dialect: DialectKind) -> crate::ast::ExplainStatement {
        let Statement::Explain(explain) =
            Parser::with_dialect(sql, dialect).parse_statement().unwrap()
        else {
            panic!("Expected EXPLAIN statement");
        };
        *explain
    }

    #[test]
    fn test_postgres_options() {
        let explain = parse_explain(
            "EXPLAIN (ANALYZE, COSTS false, FORMAT json) SELECT * FROM users",
            DialectKind::PostgreSql,
        );
        assert!(explain.analyze);
        assert_eq!(explain.format.as_deref(), Some("JSON"));
        assert_eq!(explain.options.get("COSTS").map(String::as_str), Some("FALSE"));
        assert!(matches!(*explain.statement, Statement::Select(_)));
    }

    #[test]
    fn test_analyze_option_off() {
        let explain = parse_explain(
            "EXPLAIN (ANALYZE off) SELECT 1",
            DialectKind::PostgreSql,
        );
        assert!(!explain.analyze);
    }

    #[test]
    fn test_mysql_format() {
        let explain = parse_explain(
            "EXPLAIN FORMAT=JSON DELETE FROM t WHERE id = 1",
            DialectKind::MySql,
        );
        assert_eq!(explain.format.as_deref(), Some("JSON"));
        assert!(matches!(*explain.statement, Statement::Delete(_)));
    }

    #[test]
    fn test_sqlite_query_plan() {
        let explain = parse_explain(
            "EXPLAIN QUERY PLAN SELECT a FROM t",
            DialectKind::Sqlite,
        );
        assert!(explain.query_plan);
        assert_eq!(explain.to_string(), "EXPLAIN QUERY PLAN SELECT a FROM t");
    }
}
