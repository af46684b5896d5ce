//! SELECT, set operations, WITH, and the DML statements.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    AliasedExpression, Assignment, CommonTableExpression, DeleteStatement, Expr, InsertSource,
    InsertStatement, JoinClause, JoinType, SelectStatement, SetOperation, SetOperator, Statement,
    TableReference, Top, UpdateStatement, WithStatement,
};
use crate::dialect::Feature;
use crate::lexer::{Keyword, TokenKind};
use crate::pool;

impl Parser<'_> {
    /// Parses a SELECT followed by an optional set-operation tail.
    pub(super) fn parse_query_statement(&mut self) -> Result<Statement, ParseError> {
        let mut statement = Statement::Select(self.parse_select()?);

        while let Some(op) = self.set_operator() {
            self.advance();
            let all = self.consume_keyword(Keyword::All);
            if !all {
                self.consume_keyword(Keyword::Distinct);
            }
            let right = self.parse_select()?;
            statement = Statement::SetOperation(SetOperation {
                left: Box::new(statement),
                op,
                all,
                right: Box::new(Statement::Select(right)),
            });
        }

        Ok(statement)
    }

    /// Parses the query inside a subquery or derived table.
    pub(super) fn parse_subquery(&mut self) -> Result<Box<Statement>, ParseError> {
        Ok(Box::new(self.parse_query_statement()?))
    }

    fn set_operator(&self) -> Option<SetOperator> {
        match self.current.kind {
            TokenKind::Keyword(Keyword::Union) => Some(SetOperator::Union),
            TokenKind::Keyword(Keyword::Intersect) => Some(SetOperator::Intersect),
            TokenKind::Keyword(Keyword::Except) => Some(SetOperator::Except),
            _ => None,
        }
    }

    /// Parses a query: `WITH ...` or `SELECT ...` with its set-operation tail.
    pub(super) fn parse_query(&mut self) -> Result<Statement, ParseError> {
        if self.check_keyword(Keyword::With) {
            self.parse_with_statement()
        } else if self.check_keyword(Keyword::Select) {
            self.parse_query_statement()
        } else {
            Err(self.error_expected("SELECT"))
        }
    }

    /// Parses a WITH statement.
    pub(super) fn parse_with_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::With)?;
        let recursive = self.consume_keyword(Keyword::Recursive);

        let mut ctes = Vec::new();
        loop {
            let name = self.expect_identifier()?;
            let columns = if self.check(&TokenKind::LeftParen) {
                self.parse_parenthesized_identifiers()?
            } else {
                vec![]
            };
            self.expect_keyword(Keyword::As)?;
            self.expect(&TokenKind::LeftParen)?;
            let query = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            ctes.push(CommonTableExpression {
                name,
                columns,
                query: Box::new(query),
            });
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }

        let span = self.current.span;
        let query = self.dispatch_statement()?;
        if !query.is_query() {
            return Err(ParseError::structural(
                "WITH must be followed by a query",
                span,
            ));
        }

        Ok(Statement::With(Box::new(WithStatement {
            recursive,
            ctes,
            query: Box::new(query),
        })))
    }

    /// Parses a SELECT statement into a pooled node.
    ///
    /// The node goes back to the pool if the statement fails to parse.
    pub(super) fn parse_select(&mut self) -> Result<Box<SelectStatement>, ParseError> {
        let mut select: Box<SelectStatement> = pool::acquire();
        match self.parse_select_body(&mut select) {
            Ok(()) => Ok(select),
            Err(error) => {
                pool::release(select);
                Err(error)
            }
        }
    }

    fn parse_select_body(&mut self, select: &mut SelectStatement) -> Result<(), ParseError> {
        self.expect_keyword(Keyword::Select)?;

        // DISTINCT or ALL
        select.distinct = if self.consume_keyword(Keyword::Distinct) {
            true
        } else {
            self.consume_keyword(Keyword::All);
            false
        };

        // TOP clause
        if self.check_keyword(Keyword::Top) {
            let span = self.current.span;
            self.require_feature(Feature::Top, span)?;
            self.advance();
            select.top = Some(self.parse_top()?);
        }

        select.columns = self.parse_select_columns()?;

        // INTO targets
        if self.consume_keyword(Keyword::Into) {
            select.into = vec![self.parse_qualified_identifier()?];
            while self.consume(&TokenKind::Comma) {
                select.into.push(self.parse_qualified_identifier()?);
            }
        }

        // FROM clause (optional for expressions like SELECT 1+1)
        if self.consume_keyword(Keyword::From) {
            select.from.push(self.parse_table_reference()?);
            while self.consume(&TokenKind::Comma) {
                select.from.push(self.parse_table_reference()?);
            }
            while self.is_join_keyword() {
                let join = self.parse_join()?;
                select.joins.push(join);
            }
        }

        // WHERE clause
        if self.consume_keyword(Keyword::Where) {
            select.where_clause = Some(self.parse_expression()?);
        }

        // GROUP BY clause
        if self.consume_keyword(Keyword::Group) {
            self.expect_keyword(Keyword::By)?;
            select.group_by = self.parse_expression_list()?;
        }

        // HAVING clause
        if self.consume_keyword(Keyword::Having) {
            select.having = Some(self.parse_expression()?);
        }

        // ORDER BY clause
        if self.consume_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            select.order_by = self.parse_order_by_list()?;
        }

        // LIMIT clause, including MySQL `LIMIT offset, count`
        if self.consume_keyword(Keyword::Limit) {
            let first = self.parse_expression()?;
            if self.consume(&TokenKind::Comma) {
                select.offset = Some(first);
                select.limit = Some(self.parse_expression()?);
            } else {
                select.limit = Some(first);
            }
        }

        // OFFSET n [ROW|ROWS]
        if self.consume_keyword(Keyword::Offset) {
            select.offset = Some(self.parse_expression()?);
            if !self.consume_keyword(Keyword::Rows) {
                self.consume_keyword(Keyword::Row);
            }
        }

        // FETCH FIRST|NEXT n ROW|ROWS ONLY
        if self.check_keyword(Keyword::Fetch)
            && (self.peek_keyword(Keyword::First) || self.peek_keyword(Keyword::Next))
        {
            self.advance();
            self.advance();
            select.fetch = Some(self.parse_expression()?);
            if !self.consume_keyword(Keyword::Rows) {
                self.expect_keyword(Keyword::Row)?;
            }
            self.expect_keyword(Keyword::Only)?;
        }

        Ok(())
    }

    /// Parses the part of `TOP n [PERCENT] [WITH TIES]` after `TOP`.
    fn parse_top(&mut self) -> Result<Top, ParseError> {
        let quantity = if self.consume(&TokenKind::LeftParen) {
            let quantity = self.parse_expression()?;
            self.expect(&TokenKind::RightParen)?;
            quantity
        } else {
            self.parse_primary()?
        };
        let percent = self.consume_keyword(Keyword::Percent);
        let with_ties = if self.check_keyword(Keyword::With) && self.peek_keyword(Keyword::Ties) {
            self.advance();
            self.advance();
            true
        } else {
            false
        };
        Ok(Top {
            quantity,
            percent,
            with_ties,
        })
    }

    fn parse_select_columns(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut columns = vec![self.parse_select_column()?];
        while self.consume(&TokenKind::Comma) {
            columns.push(self.parse_select_column()?);
        }
        Ok(columns)
    }

    fn parse_select_column(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;
        match self.parse_optional_alias()? {
            Some(alias) => Ok(Expr::Aliased(AliasedExpression {
                expr: Box::new(expr),
                alias,
            })),
            None => Ok(expr),
        }
    }

    /// Parses `AS alias` or an implicit alias.
    ///
    /// An implicit alias must be a plain or quoted identifier; keywords and
    /// the batch separator end the item instead.
    fn parse_optional_alias(&mut self) -> Result<Option<String>, ParseError> {
        if self.consume_keyword(Keyword::As) {
            return self.expect_identifier().map(Some);
        }
        let implicit = matches!(
            self.current.kind,
            TokenKind::Identifier | TokenKind::QuotedIdentifier
        ) && !self.at_batch_separator()
            && !self.check_peek(&TokenKind::Colon)
            && !self.check_peek(&TokenKind::ColonAssign);
        Ok(implicit.then(|| self.take_literal()))
    }

    /// Parses a FROM item: a table or a derived table.
    pub(super) fn parse_table_reference(&mut self) -> Result<TableReference, ParseError> {
        if self.check(&TokenKind::LeftParen) {
            let span = self.current.span;
            self.advance();
            let subquery = self.parse_subquery()?;
            self.expect(&TokenKind::RightParen)?;
            let Some(alias) = self.parse_optional_alias()? else {
                return Err(ParseError::structural("derived table requires an alias", span));
            };
            return Ok(TableReference {
                schema: None,
                name: alias.clone(),
                alias: Some(alias),
                subquery: Some(subquery),
                hints: vec![],
            });
        }

        let name = self.parse_object_name()?;
        let alias = self.parse_optional_alias()?;

        // SQL Server table hints: WITH (NOLOCK, ...)
        let mut hints = Vec::new();
        if self.check_keyword(Keyword::With) && self.check_peek(&TokenKind::LeftParen) {
            self.advance();
            self.advance();
            loop {
                hints.push(self.expect_identifier()?.to_ascii_uppercase());
                if !self.consume(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::RightParen)?;
        }

        Ok(TableReference {
            schema: name.schema,
            name: name.name,
            alias,
            subquery: None,
            hints,
        })
    }

    fn is_join_keyword(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::Keyword(
                Keyword::Join
                    | Keyword::Inner
                    | Keyword::Left
                    | Keyword::Right
                    | Keyword::Full
                    | Keyword::Cross
            )
        )
    }

    /// Parses a join clause into a pooled node.
    fn parse_join(&mut self) -> Result<JoinClause, ParseError> {
        let mut join: JoinClause = pool::acquire();
        match self.parse_join_body(&mut join) {
            Ok(()) => Ok(join),
            Err(error) => {
                pool::release(join);
                Err(error)
            }
        }
    }

    fn parse_join_body(&mut self, join: &mut JoinClause) -> Result<(), ParseError> {
        join.join_type = self.parse_join_type()?;
        join.table = self.parse_table_reference()?;

        if join.join_type == JoinType::Cross {
            return Ok(());
        }
        if self.consume_keyword(Keyword::On) {
            join.condition = Some(self.parse_expression()?);
        } else if self.consume_keyword(Keyword::Using) {
            join.using = self.parse_parenthesized_identifiers()?;
        } else {
            return Err(self.error_expected("ON or USING"));
        }
        Ok(())
    }

    fn parse_join_type(&mut self) -> Result<JoinType, ParseError> {
        let join_type = match self.current.kind {
            TokenKind::Keyword(Keyword::Join) => {
                self.advance();
                return Ok(JoinType::Inner);
            }
            TokenKind::Keyword(Keyword::Inner) => JoinType::Inner,
            TokenKind::Keyword(Keyword::Left) => JoinType::Left,
            TokenKind::Keyword(Keyword::Right) => JoinType::Right,
            TokenKind::Keyword(Keyword::Full) => JoinType::Full,
            TokenKind::Keyword(Keyword::Cross) => JoinType::Cross,
            _ => return Err(self.error_expected("JOIN")),
        };
        self.advance();
        if matches!(join_type, JoinType::Left | JoinType::Right | JoinType::Full) {
            self.consume_keyword(Keyword::Outer);
        }
        self.expect_keyword(Keyword::Join)?;
        Ok(join_type)
    }

    // ===================================================================
    // DML
    // ===================================================================

    pub(super) fn parse_insert_statement(&mut self) -> Result<InsertStatement, ParseError> {
        self.expect_keyword(Keyword::Insert)?;
        self.consume_keyword(Keyword::Into);
        let table = self.parse_object_name()?;

        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![]
        };

        let source = if self.consume_keyword(Keyword::Values) {
            let mut rows = Vec::new();
            loop {
                self.expect(&TokenKind::LeftParen)?;
                rows.push(self.parse_expression_list()?);
                self.expect(&TokenKind::RightParen)?;
                if !self.consume(&TokenKind::Comma) {
                    break;
                }
            }
            InsertSource::Values(rows)
        } else if self.check_keyword(Keyword::Default) {
            self.advance();
            self.expect_keyword(Keyword::Values)?;
            InsertSource::DefaultValues
        } else if self.check_keyword(Keyword::Select) || self.check_keyword(Keyword::With) {
            InsertSource::Query(Box::new(self.parse_query()?))
        } else {
            return Err(self.error_expected("VALUES, SELECT or DEFAULT VALUES"));
        };

        Ok(InsertStatement {
            table,
            columns,
            source,
        })
    }

    pub(super) fn parse_update_statement(&mut self) -> Result<UpdateStatement, ParseError> {
        self.expect_keyword(Keyword::Update)?;
        let table = self.parse_table_reference()?;
        self.expect_keyword(Keyword::Set)?;
        let assignments = self.parse_assignment_list()?;

        let mut from = Vec::new();
        if self.consume_keyword(Keyword::From) {
            from.push(self.parse_table_reference()?);
            while self.consume(&TokenKind::Comma) {
                from.push(self.parse_table_reference()?);
            }
        }

        let where_clause = if self.consume_keyword(Keyword::Where) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(UpdateStatement {
            table,
            assignments,
            from,
            where_clause,
        })
    }

    pub(super) fn parse_delete_statement(&mut self) -> Result<DeleteStatement, ParseError> {
        self.expect_keyword(Keyword::Delete)?;
        self.consume_keyword(Keyword::From);
        let table = self.parse_table_reference()?;

        let where_clause = if self.consume_keyword(Keyword::Where) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(DeleteStatement {
            table,
            where_clause,
        })
    }

    /// Parses `target = expr, ...`; `:=` is accepted in place of `=`.
    pub(super) fn parse_assignment_list(&mut self) -> Result<Vec<Assignment>, ParseError> {
        let mut assignments = Vec::new();
        loop {
            let target = self.parse_qualified_identifier()?;
            if !self.consume(&TokenKind::ColonAssign) {
                self.expect(&TokenKind::Assign)?;
            }
            let value = self.parse_expression()?;
            assignments.push(Assignment { target, value });
            if !self.consume(&TokenKind::Comma) {
                return Ok(assignments);
            }
        }
    }
}
