//! CREATE PROCEDURE, CREATE FUNCTION and routine bodies.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    BlockStatement, CreateFunctionStatement, CreateProcedureStatement, CursorDeclaration,
    DataAccess, DataType, Declaration, ExceptionBlock, Parameter, ParameterMode, RoutineOptions,
    SecurityMode, VariableDeclaration, Volatility, WhenExceptionClause,
};
use crate::dialect::{DialectKind, Feature};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    pub(super) fn parse_create_procedure(
        &mut self,
        or_replace: bool,
    ) -> Result<CreateProcedureStatement, ParseError> {
        if !self.consume_keyword(Keyword::Procedure) {
            self.expect_word("PROC")?;
        }
        let name = self.parse_object_name()?;
        let parameters = self.parse_parameters()?;

        let mut options = RoutineOptions::default();
        self.parse_routine_options(&mut options)?;
        let body = self.parse_routine_body()?;
        self.parse_routine_options(&mut options)?;

        Ok(CreateProcedureStatement {
            or_replace,
            name,
            parameters,
            options,
            body,
        })
    }

    pub(super) fn parse_create_function(
        &mut self,
        or_replace: bool,
    ) -> Result<CreateFunctionStatement, ParseError> {
        self.expect_keyword(Keyword::Function)?;
        let name = self.parse_object_name()?;
        let parameters = self.parse_parameters()?;

        if !self.consume_keyword(Keyword::Returns) {
            return Err(ParseError::structural(
                "FUNCTION requires a RETURNS clause",
                self.current.span,
            ));
        }
        let return_type = self.parse_return_type()?;

        let mut options = RoutineOptions::default();
        self.parse_routine_options(&mut options)?;
        let body = self.parse_routine_body()?;
        self.parse_routine_options(&mut options)?;

        Ok(CreateFunctionStatement {
            or_replace,
            name,
            parameters,
            return_type,
            options,
            body,
        })
    }

    /// Parses the type after `RETURNS`, including `TABLE (...)` results.
    fn parse_return_type(&mut self) -> Result<DataType, ParseError> {
        // T-SQL table variable: RETURNS @result TABLE (...)
        if self.current.literal.starts_with('@') && self.peek_keyword(Keyword::Table) {
            self.advance();
        }
        if self.consume_keyword(Keyword::Table) {
            if self.check(&TokenKind::LeftParen) {
                self.skip_parenthesized()?;
            }
            return Ok(DataType::new("TABLE"));
        }
        self.parse_data_type()
    }

    /// Runs `parse` one routine level deeper, where a bare `BEGIN` opens a
    /// block.
    pub(super) fn in_routine_body<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.routine_depth += 1;
        let result = parse(self);
        self.routine_depth -= 1;
        result
    }

    // ===================================================================
    // Parameters
    // ===================================================================

    /// Parses a parenthesized parameter list, or T-SQL `@p type, ...`
    /// without parentheses.
    fn parse_parameters(&mut self) -> Result<Vec<Parameter>, ParseError> {
        if self.consume(&TokenKind::LeftParen) {
            if self.consume(&TokenKind::RightParen) {
                return Ok(vec![]);
            }
            let parameters = self.parse_parameter_list()?;
            self.expect(&TokenKind::RightParen)?;
            Ok(parameters)
        } else if self.current.kind == TokenKind::Identifier && self.current.literal.starts_with('@')
        {
            self.parse_parameter_list()
        } else {
            Ok(vec![])
        }
    }

    fn parse_parameter_list(&mut self) -> Result<Vec<Parameter>, ParseError> {
        let mut parameters = vec![self.parse_parameter()?];
        while self.consume(&TokenKind::Comma) {
            parameters.push(self.parse_parameter()?);
        }
        Ok(parameters)
    }

    fn parse_parameter(&mut self) -> Result<Parameter, ParseError> {
        let mut mode = match self.current.kind {
            TokenKind::Keyword(Keyword::In) => Some(ParameterMode::In),
            TokenKind::Keyword(Keyword::Out) => Some(ParameterMode::Out),
            TokenKind::Keyword(Keyword::Inout) => Some(ParameterMode::InOut),
            _ => None,
        };
        if mode.is_some() {
            self.advance();
        }

        let variadic = if self.check_keyword(Keyword::Variadic) {
            let span = self.current.span;
            self.require_feature(Feature::Variadic, span)?;
            self.advance();
            true
        } else {
            false
        };

        // A name is present when a type follows it; `f(INT, TEXT)` has none.
        let name = if self.at_identifier() && Self::is_identifier(&self.peek) {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        let data_type = self.parse_data_type()?;

        let default = if self.consume_keyword(Keyword::Default) || self.consume(&TokenKind::Assign)
        {
            Some(self.parse_expression()?)
        } else {
            None
        };

        if self.consume_word("OUTPUT") || self.consume_keyword(Keyword::Out) {
            mode = Some(ParameterMode::Out);
        } else {
            self.consume_word("READONLY");
        }

        Ok(Parameter {
            mode,
            variadic,
            name,
            data_type,
            default,
        })
    }

    // ===================================================================
    // Options
    // ===================================================================

    /// Parses routine characteristics in any order.
    fn parse_routine_options(&mut self, options: &mut RoutineOptions) -> Result<(), ParseError> {
        loop {
            match self.current.kind {
                TokenKind::Keyword(Keyword::Language) => {
                    self.advance();
                    let span = self.current.span;
                    let language = self.expect_identifier()?.to_ascii_uppercase();
                    if language == "PLPGSQL" {
                        self.require_feature(Feature::Plpgsql, span)?;
                    }
                    options.language = Some(language);
                }
                TokenKind::Keyword(Keyword::Sql) if self.peek_keyword(Keyword::Security) => {
                    self.advance();
                }
                TokenKind::Keyword(Keyword::Security) => {
                    self.advance();
                    options.security = if self.consume_keyword(Keyword::Definer) {
                        Some(SecurityMode::Definer)
                    } else {
                        self.expect_keyword(Keyword::Invoker)?;
                        Some(SecurityMode::Invoker)
                    };
                }
                TokenKind::Keyword(Keyword::Deterministic) => {
                    self.advance();
                    options.deterministic = Some(true);
                }
                TokenKind::Keyword(Keyword::Not) if self.peek_keyword(Keyword::Deterministic) => {
                    self.advance();
                    self.advance();
                    options.deterministic = Some(false);
                }
                TokenKind::Keyword(Keyword::Contains) => {
                    self.advance();
                    self.expect_keyword(Keyword::Sql)?;
                    options.data_access = Some(DataAccess::ContainsSql);
                }
                TokenKind::Keyword(Keyword::No) if self.peek_keyword(Keyword::Sql) => {
                    self.advance();
                    self.advance();
                    options.data_access = Some(DataAccess::NoSql);
                }
                TokenKind::Keyword(Keyword::Reads) => {
                    self.advance();
                    self.expect_keyword(Keyword::Sql)?;
                    self.expect_keyword(Keyword::Data)?;
                    options.data_access = Some(DataAccess::ReadsSqlData);
                }
                TokenKind::Keyword(Keyword::Modifies) => {
                    self.advance();
                    self.expect_keyword(Keyword::Sql)?;
                    self.expect_keyword(Keyword::Data)?;
                    options.data_access = Some(DataAccess::ModifiesSqlData);
                }
                TokenKind::Keyword(Keyword::Comment) if self.check_peek(&TokenKind::String) => {
                    self.advance();
                    options.comment = Some(self.take_literal());
                }
                TokenKind::Keyword(Keyword::Immutable) => {
                    self.advance();
                    options.volatility = Some(Volatility::Immutable);
                }
                TokenKind::Keyword(Keyword::Stable) => {
                    self.advance();
                    options.volatility = Some(Volatility::Stable);
                }
                TokenKind::Keyword(Keyword::Volatile) => {
                    self.advance();
                    options.volatility = Some(Volatility::Volatile);
                }
                // T-SQL: WITH RECOMPILE, ENCRYPTION
                TokenKind::Keyword(Keyword::With)
                    if self.dialect == DialectKind::SqlServer
                        && Self::is_identifier(&self.peek) =>
                {
                    self.advance();
                    self.parse_identifier_list()?;
                }
                _ => return Ok(()),
            }
        }
    }

    // ===================================================================
    // Bodies
    // ===================================================================

    /// Parses a routine body after the header and options.
    fn parse_routine_body(&mut self) -> Result<BlockStatement, ParseError> {
        if !self.consume_keyword(Keyword::As) {
            self.consume_keyword(Keyword::Is);
        }

        match self.current.kind {
            TokenKind::DollarQuote => self.parse_quoted_body(),
            TokenKind::String if self.dialect == DialectKind::PostgreSql => {
                self.parse_quoted_body()
            }
            _ if self.at_block_start() => self.in_routine_body(Self::parse_labeled_block),
            _ if self.dialect == DialectKind::SqlServer => {
                let statements = self.in_routine_body(|parser| parser.parse_statement_list(&[]))?;
                Ok(BlockStatement {
                    statements,
                    ..BlockStatement::default()
                })
            }
            _ => {
                let statement = self.in_routine_body(Self::dispatch_statement)?;
                Ok(BlockStatement {
                    statements: vec![statement],
                    ..BlockStatement::default()
                })
            }
        }
    }

    /// Returns true at `BEGIN` (not a transaction or TRY), a `<<label>>`, or
    /// a PL/pgSQL `DECLARE` section.
    fn at_block_start(&self) -> bool {
        match self.current.kind {
            TokenKind::Keyword(Keyword::Begin) => !matches!(
                self.peek.kind,
                TokenKind::Keyword(
                    Keyword::Try | Keyword::Tran | Keyword::Transaction | Keyword::Work
                )
            ),
            TokenKind::Keyword(Keyword::Declare) => self.dialect == DialectKind::PostgreSql,
            TokenKind::Lt => self.check_peek(&TokenKind::Lt),
            _ => false,
        }
    }

    fn parse_labeled_block(&mut self) -> Result<BlockStatement, ParseError> {
        let label = if self.check(&TokenKind::Lt) {
            Some(self.parse_angle_label()?)
        } else {
            None
        };
        self.parse_block(label)
    }

    /// Parses a dollar-quoted (or PostgreSQL string) body with a nested
    /// parser. Errors inside are reported at the body's position.
    ///
    /// The nested parser resumes after a failed statement, so a body can
    /// report several errors: the first is returned and the rest are
    /// recorded after it.
    fn parse_quoted_body(&mut self) -> Result<BlockStatement, ParseError> {
        let span = self.current.span;
        let source = self.take_literal();

        let mut nested = Parser::nested(&source, self.dialect, self.deadline());
        let result = nested.parse_routine_source();
        if nested.is_cancelled() {
            self.cancel();
            return Err(ParseError::cancelled(span));
        }
        let fatal = match result {
            Ok(block) if nested.errors().is_empty() => return Ok(block),
            Ok(_) => None,
            Err(error) => Some(error),
        };
        let mut errors: Vec<ParseError> = nested
            .errors()
            .iter()
            .cloned()
            .chain(fatal)
            .map(|error| ParseError { span, ..error })
            .collect();
        let first = errors.remove(0);
        self.defer_errors(errors);
        Err(first)
    }

    /// Parses the whole source of a quoted body.
    fn parse_routine_source(&mut self) -> Result<BlockStatement, ParseError> {
        let block = if self.at_block_start() {
            self.parse_labeled_block()?
        } else {
            BlockStatement {
                statements: self.parse_statement_list(&[])?,
                ..BlockStatement::default()
            }
        };
        self.skip_semicolons();
        if self.is_at_end() {
            Ok(block)
        } else {
            Err(self.error_expected("end of routine body"))
        }
    }

    /// Parses `[DECLARE section] BEGIN [DECLARE ...;]* statements
    /// [EXCEPTION handlers] END [label]`.
    pub(super) fn parse_block(&mut self, label: Option<String>) -> Result<BlockStatement, ParseError> {
        let mut block = BlockStatement {
            label,
            ..BlockStatement::default()
        };

        // PL/pgSQL declaration section before BEGIN
        if self.consume_keyword(Keyword::Declare) {
            while !self.check_keyword(Keyword::Begin) && !self.is_at_end() {
                block.declarations.push(self.parse_section_declaration()?);
            }
        }

        self.expect_keyword(Keyword::Begin)?;

        loop {
            self.skip_semicolons();
            if !self.consume_keyword(Keyword::Declare) {
                break;
            }
            block.declarations.push(self.parse_declaration()?);
        }

        block.statements = self.parse_statement_list(&[Keyword::End, Keyword::Exception])?;

        if self.consume_keyword(Keyword::Exception) {
            block.exception = Some(self.parse_exception_block()?);
        }

        self.expect_keyword(Keyword::End)?;
        block.end_label = self.parse_end_label();
        Ok(block)
    }

    /// Parses one PL/pgSQL section item, `;` included.
    fn parse_section_declaration(&mut self) -> Result<Declaration, ParseError> {
        let name = self.expect_identifier()?;

        let declaration = if self.consume_keyword(Keyword::Cursor) {
            if !self.consume_keyword(Keyword::For) {
                self.expect_keyword(Keyword::Is)?;
            }
            Declaration::Cursor(CursorDeclaration {
                name,
                options: vec![],
                query: Box::new(self.parse_query()?),
            })
        } else {
            let constant = self.consume_keyword(Keyword::Constant);
            let data_type = self.parse_data_type()?;
            let not_null = if self.check_keyword(Keyword::Not) && self.peek_keyword(Keyword::Null)
            {
                self.advance();
                self.advance();
                true
            } else {
                false
            };
            let default = if self.consume(&TokenKind::ColonAssign)
                || self.consume(&TokenKind::Assign)
                || self.consume_keyword(Keyword::Default)
            {
                Some(self.parse_expression()?)
            } else {
                None
            };
            Declaration::Variable(VariableDeclaration {
                names: vec![name],
                data_type,
                default,
                constant,
                not_null,
            })
        };

        self.expect(&TokenKind::Semicolon)?;
        Ok(declaration)
    }

    /// Parses `WHEN cond [OR cond] THEN statements ...` after `EXCEPTION`.
    fn parse_exception_block(&mut self) -> Result<ExceptionBlock, ParseError> {
        let mut handlers = Vec::new();
        while self.consume_keyword(Keyword::When) {
            let mut conditions = vec![self.parse_exception_condition()?];
            while self.consume_keyword(Keyword::Or) {
                conditions.push(self.parse_exception_condition()?);
            }
            self.expect_keyword(Keyword::Then)?;
            let statements = self.parse_statement_list(&[Keyword::When, Keyword::End])?;
            handlers.push(WhenExceptionClause {
                conditions,
                statements,
            });
        }
        if handlers.is_empty() {
            return Err(self.error_expected("WHEN"));
        }
        Ok(ExceptionBlock { handlers })
    }

    fn parse_exception_condition(&mut self) -> Result<String, ParseError> {
        match self.current.kind {
            TokenKind::Keyword(Keyword::Sqlstate) => {
                self.advance();
                if !self.check(&TokenKind::String) {
                    return Err(self.error_expected("string"));
                }
                Ok(format!("SQLSTATE '{}'", self.take_literal()))
            }
            TokenKind::Keyword(keyword) if !keyword.is_reserved() => {
                self.advance();
                Ok(keyword.as_str().to_string())
            }
            _ => self.expect_identifier(),
        }
    }
}
