//! Primary expressions, function calls, windows and data types.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    BoundType, CaseExpression, CastExpression, ColumnReference, DataType, ExistsExpression, Expr,
    FrameBound, FrameDirection, FrameType, FunctionCall, Literal, NullOrdering, OrderBy,
    OrderDirection, OverClause, StarExpression, SubqueryExpression, TypeModifier,
    UnaryExpression, UnaryOperator, WhenClause, WindowFrame, WindowFunction,
};
use crate::dialect::DialectKind;
use crate::lexer::{Keyword, TokenKind};
use crate::pool;

impl Parser<'_> {
    /// Parses a primary expression.
    pub(super) fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.current.kind {
            TokenKind::Number => self.parse_number(),
            TokenKind::String | TokenKind::DollarQuote => Ok(Expr::string(self.take_literal())),
            TokenKind::Star => {
                self.advance();
                Ok(Expr::Star(StarExpression::default()))
            }
            TokenKind::LeftParen => self.parse_grouped(),
            TokenKind::Minus => self.parse_unary(UnaryOperator::Minus),
            TokenKind::Plus => self.parse_unary(UnaryOperator::Plus),
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(Expr::Literal(Literal::Null))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Ok(Expr::Literal(Literal::Boolean(true)))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Ok(Expr::Literal(Literal::Boolean(false)))
            }
            TokenKind::Keyword(Keyword::Case) => self.parse_case_expression(),
            TokenKind::Keyword(Keyword::Exists) => self.parse_exists(false),
            TokenKind::Keyword(Keyword::Not) if self.peek_keyword(Keyword::Exists) => {
                self.advance();
                self.parse_exists(true)
            }
            TokenKind::Keyword(Keyword::Not) => {
                self.advance();
                let operand = self.parse_expression()?;
                Ok(Expr::Unary(UnaryExpression {
                    op: UnaryOperator::Not,
                    operand: Box::new(operand),
                }))
            }
            TokenKind::Keyword(Keyword::Cast) => self.parse_cast(),
            // Reserved words that double as function names.
            TokenKind::Keyword(Keyword::Left | Keyword::Right | Keyword::If)
                if self.check_peek(&TokenKind::LeftParen) =>
            {
                self.parse_name_expression()
            }
            _ if self.at_identifier() => self.parse_name_expression(),
            _ => Err(self.error_expected("expression")),
        }
    }

    fn parse_number(&mut self) -> Result<Expr, ParseError> {
        let span = self.current.span;
        let literal = self.take_literal();
        Literal::from_numeric(&literal).map(Expr::Literal).ok_or_else(|| {
            ParseError::structural(format!("invalid numeric literal {literal}"), span)
        })
    }

    fn parse_unary(&mut self, op: UnaryOperator) -> Result<Expr, ParseError> {
        self.advance();
        let operand = self.parse_primary()?;
        Ok(Expr::Unary(UnaryExpression {
            op,
            operand: Box::new(operand),
        }))
    }

    /// Parses `(expr)` or a scalar subquery `(SELECT ... [UNION ...])`.
    fn parse_grouped(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let expr = if self.check_keyword(Keyword::Select) {
            Expr::Subquery(SubqueryExpression {
                query: self.parse_subquery()?,
            })
        } else {
            self.parse_expression()?
        };
        self.expect(&TokenKind::RightParen)?;
        Ok(expr)
    }

    fn parse_exists(&mut self, not: bool) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Exists)?;
        self.expect(&TokenKind::LeftParen)?;
        let query = self.parse_subquery()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Exists(ExistsExpression {
            not,
            subquery: SubqueryExpression { query },
        }))
    }

    fn parse_cast(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Cast)?;
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expression()?;
        self.expect_keyword(Keyword::As)?;
        let data_type = self.parse_data_type()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Cast(CastExpression {
            expr: Box::new(expr),
            data_type,
        }))
    }

    /// Parses a column reference, `t.*` or a function call on a possibly
    /// qualified name.
    fn parse_name_expression(&mut self) -> Result<Expr, ParseError> {
        let mut parts = vec![self.take_literal()];
        while self.consume(&TokenKind::Dot) {
            if self.consume(&TokenKind::Star) {
                return Ok(Expr::Star(StarExpression {
                    table: Some(parts.join(".")),
                }));
            }
            parts.push(self.expect_identifier()?);
        }

        if self.check(&TokenKind::LeftParen) {
            return self.parse_function_call(parts.join("."));
        }

        let mut column: Box<ColumnReference> = pool::acquire();
        column.column = parts.pop().unwrap_or_default();
        column.table = (!parts.is_empty()).then(|| parts.join("."));
        Ok(Expr::Column(column))
    }

    /// Parses the argument list of a call and an optional `OVER` window.
    fn parse_function_call(&mut self, name: String) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut function = FunctionCall {
            name,
            args: vec![],
            distinct: false,
        };
        if !self.check(&TokenKind::RightParen) {
            function.distinct = self.consume_keyword(Keyword::Distinct);
            if !function.distinct {
                self.consume_keyword(Keyword::All);
            }
            function.args = self.parse_expression_list()?;
        }
        self.expect(&TokenKind::RightParen)?;

        if self.check_keyword(Keyword::Over) {
            let over = self.parse_over_clause()?;
            return Ok(Expr::Window(Box::new(WindowFunction { function, over })));
        }
        Ok(Expr::Function(function))
    }

    fn parse_over_clause(&mut self) -> Result<OverClause, ParseError> {
        self.expect_keyword(Keyword::Over)?;
        self.expect(&TokenKind::LeftParen)?;
        let mut over = OverClause::default();

        if self.consume_keyword(Keyword::Partition) {
            self.expect_keyword(Keyword::By)?;
            over.partition_by = self.parse_expression_list()?;
        }
        if self.consume_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            over.order_by = self.parse_order_by_list()?;
        }
        if self.check_keyword(Keyword::Rows) || self.check_keyword(Keyword::Range) {
            over.frame = Some(self.parse_window_frame()?);
        }

        self.expect(&TokenKind::RightParen)?;
        Ok(over)
    }

    fn parse_window_frame(&mut self) -> Result<WindowFrame, ParseError> {
        let frame_type = if self.consume_keyword(Keyword::Rows) {
            FrameType::Rows
        } else {
            self.expect_keyword(Keyword::Range)?;
            FrameType::Range
        };

        if self.consume_keyword(Keyword::Between) {
            let start = self.parse_frame_bound()?;
            self.expect_keyword(Keyword::And)?;
            let end = self.parse_frame_bound()?;
            Ok(WindowFrame {
                frame_type,
                start,
                end: Some(end),
            })
        } else {
            Ok(WindowFrame {
                frame_type,
                start: self.parse_frame_bound()?,
                end: None,
            })
        }
    }

    fn parse_frame_bound(&mut self) -> Result<FrameBound, ParseError> {
        if self.consume_keyword(Keyword::Unbounded) {
            return Ok(FrameBound {
                bound_type: BoundType::Unbounded,
                direction: Some(self.parse_frame_direction()?),
                offset: None,
            });
        }
        if self.consume_keyword(Keyword::Current) {
            self.expect_keyword(Keyword::Row)?;
            return Ok(FrameBound {
                bound_type: BoundType::Current,
                direction: None,
                offset: None,
            });
        }
        let offset = self.parse_primary()?;
        Ok(FrameBound {
            bound_type: BoundType::Expression,
            direction: Some(self.parse_frame_direction()?),
            offset: Some(Box::new(offset)),
        })
    }

    fn parse_frame_direction(&mut self) -> Result<FrameDirection, ParseError> {
        if self.consume_keyword(Keyword::Preceding) {
            Ok(FrameDirection::Preceding)
        } else if self.consume_keyword(Keyword::Following) {
            Ok(FrameDirection::Following)
        } else {
            Err(self.error_expected("PRECEDING or FOLLOWING"))
        }
    }

    /// Parses a simple or searched CASE expression.
    pub(super) fn parse_case_expression(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Case)?;

        // Simple CASE has an input expression before the first WHEN.
        let input = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };

        let mut when_clauses = Vec::new();
        while self.consume_keyword(Keyword::When) {
            let condition = self.parse_expression()?;
            self.expect_keyword(Keyword::Then)?;
            let result = self.parse_expression()?;
            when_clauses.push(WhenClause { condition, result });
        }
        if when_clauses.is_empty() {
            if self.is_cancelled() {
                return Err(self.error_expected("WHEN"));
            }
            return Err(ParseError::structural(
                "CASE expression requires at least one WHEN clause",
                self.current.span,
            ));
        }

        let else_result = if self.consume_keyword(Keyword::Else) {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };

        self.expect_keyword(Keyword::End)?;
        Ok(Expr::Case(CaseExpression {
            input,
            when_clauses,
            else_result,
        }))
    }

    /// Parses a comma-separated list of expressions.
    pub(super) fn parse_expression_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = vec![self.parse_expression()?];
        while self.consume(&TokenKind::Comma) {
            exprs.push(self.parse_expression()?);
        }
        Ok(exprs)
    }

    /// Parses `expr [ASC|DESC] [NULLS FIRST|LAST], ...`.
    pub(super) fn parse_order_by_list(&mut self) -> Result<Vec<OrderBy>, ParseError> {
        let mut items = Vec::new();
        loop {
            let expr = self.parse_expression()?;
            let direction = if self.consume_keyword(Keyword::Desc) {
                OrderDirection::Desc
            } else {
                self.consume_keyword(Keyword::Asc);
                OrderDirection::Asc
            };
            let nulls = if self.consume_keyword(Keyword::Nulls) {
                if self.consume_keyword(Keyword::First) {
                    Some(NullOrdering::First)
                } else {
                    self.expect_keyword(Keyword::Last)?;
                    Some(NullOrdering::Last)
                }
            } else {
                None
            };
            items.push(OrderBy {
                expr,
                direction,
                nulls,
            });
            if !self.consume(&TokenKind::Comma) {
                return Ok(items);
            }
        }
    }

    // ===================================================================
    // Data types
    // ===================================================================

    /// Parses a data type, including multi-word names, a parenthesized
    /// modifier, PostgreSQL array dimensions and MySQL `UNSIGNED`.
    pub(super) fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        let setof = self.consume_word("SETOF");
        if !self.at_identifier() {
            return Err(self.error_expected("data type"));
        }
        let mut name = self.take_literal().to_ascii_uppercase();
        match name.as_str() {
            "DOUBLE" if self.consume_word("PRECISION") => name.push_str(" PRECISION"),
            "CHARACTER" | "CHAR" if self.consume_word("VARYING") => name.push_str(" VARYING"),
            _ => {}
        }

        let mut data_type = DataType::new(name);
        if self.check(&TokenKind::LeftParen) {
            data_type.modifier = Some(self.parse_type_modifier()?);
        }

        if matches!(data_type.name.as_str(), "TIMESTAMP" | "TIME") {
            if self.check_keyword(Keyword::With) && self.peek_word("TIME") {
                self.advance();
                self.advance();
                self.expect_word("ZONE")?;
                data_type.name.push_str(" WITH TIME ZONE");
            } else if self.consume_word("WITHOUT") {
                self.expect_word("TIME")?;
                self.expect_word("ZONE")?;
                data_type.name.push_str(" WITHOUT TIME ZONE");
            }
        }

        while self.dialect == DialectKind::PostgreSql && self.consume(&TokenKind::LeftBracket) {
            let size = if self.check(&TokenKind::Number) {
                Some(self.parse_type_number()?)
            } else {
                None
            };
            self.expect(&TokenKind::RightBracket)?;
            data_type.array_dimensions.push(size);
        }

        data_type.unsigned = self.consume_word("UNSIGNED");
        if setof {
            data_type.name.insert_str(0, "SETOF ");
        }
        Ok(data_type)
    }

    fn parse_type_modifier(&mut self) -> Result<TypeModifier, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let modifier = if self.consume_word("MAX") {
            TypeModifier::Max
        } else {
            let precision = self.parse_type_number()?;
            if self.consume(&TokenKind::Comma) {
                TypeModifier::PrecisionScale {
                    precision,
                    scale: self.parse_type_number()?,
                }
            } else {
                TypeModifier::Length(precision)
            }
        };
        self.expect(&TokenKind::RightParen)?;
        Ok(modifier)
    }

    fn parse_type_number(&mut self) -> Result<u64, ParseError> {
        if !self.check(&TokenKind::Number) {
            return Err(self.error_expected("number"));
        }
        let span = self.current.span;
        let literal = self.take_literal();
        literal
            .parse::<u64>()
            .map_err(|_| ParseError::structural(format!("invalid type modifier {literal}"), span))
    }

    /// Parses a signed integer literal, as used by `IDENTITY(seed, step)`.
    pub(super) fn parse_integer(&mut self) -> Result<i64, ParseError> {
        let negative = self.consume(&TokenKind::Minus);
        if !self.check(&TokenKind::Number) {
            return Err(self.error_expected("integer"));
        }
        let span = self.current.span;
        let literal = self.take_literal();
        let value = literal
            .parse::<i64>()
            .map_err(|_| ParseError::structural(format!("invalid integer {literal}"), span))?;
        Ok(if negative { -value } else { value })
    }

    /// Checks if the lookahead token is the bare word `word`.
    pub(super) fn peek_word(&self, word: &str) -> bool {
        self.peek.kind == TokenKind::Identifier && self.peek.literal.eq_ignore_ascii_case(word)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{DataType, Expr, Literal, Statement, TypeModifier};
    use crate::parser::Parser;

    fn first_column(sql: &str) -> Expr {
        let mut parser = Parser::new(sql);
        let Statement::Select(mut select) = parser.parse_statement().unwrap() else {
            panic!("Expected SELECT statement");
        };
        select.columns.remove(0)
    }

    #[test]
    fn test_numeric_literals() {
        assert_eq!(first_column("SELECT 42"), Expr::integer(42));
        assert_eq!(first_column("SELECT 2.5"), Expr::Literal(Literal::Float(2.5)));
    }

    #[test]
    fn test_qualified_star() {
        let Expr::Star(star) = first_column("SELECT u.* FROM users u") else {
            panic!("Expected star");
        };
        assert_eq!(star.table.as_deref(), Some("u"));
    }

    #[test]
    fn test_reserved_function_name() {
        let Expr::Function(function) = first_column("SELECT LEFT(name, 3) FROM t") else {
            panic!("Expected function call");
        };
        assert_eq!(function.name, "LEFT");
        assert_eq!(function.args.len(), 2);
    }

    #[test]
    fn test_count_distinct() {
        let Expr::Function(function) = first_column("SELECT COUNT(DISTINCT dept) FROM emp") else {
            panic!("Expected function call");
        };
        assert!(function.distinct);
    }

    #[test]
    fn test_postgres_cast() {
        let mut parser = Parser::with_dialect(
            "SELECT price::NUMERIC(10, 2) FROM items",
            crate::dialect::DialectKind::PostgreSql,
        );
        let Statement::Select(select) = parser.parse_statement().unwrap() else {
            panic!("Expected SELECT statement");
        };
        let Expr::Cast(cast) = &select.columns[0] else {
            panic!("Expected cast");
        };
        assert_eq!(
            cast.data_type,
            DataType::new("NUMERIC").with_modifier(TypeModifier::PrecisionScale {
                precision: 10,
                scale: 2
            })
        );
    }

    #[test]
    fn test_postgres_array_cast() {
        let mut parser = Parser::with_dialect(
            "SELECT tags::TEXT[] FROM items",
            crate::dialect::DialectKind::PostgreSql,
        );
        let Statement::Select(select) = parser.parse_statement().unwrap() else {
            panic!("Expected SELECT statement");
        };
        let Expr::Cast(cast) = &select.columns[0] else {
            panic!("Expected cast");
        };
        assert!(cast.data_type.is_array());
        assert_eq!(cast.to_string(), "CAST(tags AS TEXT[])");
    }

    #[test]
    fn test_case_without_when() {
        let mut parser = Parser::new("SELECT CASE x END");
        let error = parser.parse_statement().unwrap_err();
        assert_eq!(error.message, "CASE expression requires at least one WHEN clause");
    }
}
