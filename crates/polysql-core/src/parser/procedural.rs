//! Procedural statements: declarations, control flow, cursors and errors.
//!
//! These appear inside routine bodies and, for T-SQL batches, at the top
//! level as well.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    Assignment, AssignmentStatement, CallStatement, CaseStatement, CaseStatementWhen, CatchBlock,
    CloseStatement, ContinueStatement, CursorDeclaration, DataType, DeallocateStatement,
    Declaration, ElseIf, ExitStatement, Expr, FetchDirection, FetchStatement, ForRange,
    ForStatement, HandlerAction, HandlerCondition, HandlerDeclaration, IfStatement, Literal,
    LoopStatement, ObjectName, OpenStatement, RaiseLevel, RaiseStatement, RepeatStatement,
    ReturnStatement, SetOptionStatement, SignalStatement, Statement, SubqueryExpression,
    ThrowStatement, TryStatement, VariableDeclaration, WhileStatement,
};
use crate::dialect::DialectKind;
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    // ===================================================================
    // DECLARE
    // ===================================================================

    pub(super) fn parse_declare_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Declare)?;
        Ok(Statement::Declare(Box::new(self.parse_declaration()?)))
    }

    /// Parses one declaration after `DECLARE`.
    pub(super) fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        if matches!(
            self.current.kind,
            TokenKind::Keyword(Keyword::Continue | Keyword::Exit | Keyword::Undo)
        ) && self.peek_keyword(Keyword::Handler)
        {
            return Ok(Declaration::Handler(self.parse_handler_declaration()?));
        }

        let name = self.expect_identifier()?;

        if self.consume_keyword(Keyword::Cursor) {
            // T-SQL options such as LOCAL FAST_FORWARD come before FOR.
            let mut options = Vec::new();
            while !self.check_keyword(Keyword::For) && !self.check_keyword(Keyword::Is) {
                if !self.at_identifier() {
                    return Err(self.error_expected("FOR"));
                }
                options.push(self.take_literal().to_ascii_uppercase());
            }
            self.advance();
            return Ok(Declaration::Cursor(CursorDeclaration {
                name,
                options,
                query: Box::new(self.parse_query()?),
            }));
        }

        // MySQL: DECLARE a, b INT
        let mut names = vec![name];
        while self.consume(&TokenKind::Comma) {
            names.push(self.expect_identifier()?);
        }

        self.consume_keyword(Keyword::As);
        let constant = self.consume_keyword(Keyword::Constant);
        let data_type = if self.consume_keyword(Keyword::Table) {
            self.skip_parenthesized()?;
            DataType::new("TABLE")
        } else {
            self.parse_data_type()?
        };
        let not_null = if self.check_keyword(Keyword::Not) && self.peek_keyword(Keyword::Null) {
            self.advance();
            self.advance();
            true
        } else {
            false
        };
        let default = if self.consume_keyword(Keyword::Default)
            || self.consume(&TokenKind::Assign)
            || self.consume(&TokenKind::ColonAssign)
        {
            Some(self.parse_expression()?)
        } else {
            None
        };

        if self.dialect == DialectKind::SqlServer && self.check(&TokenKind::Comma) {
            return Err(ParseError::unsupported(
                "DECLARE with several typed variables",
                self.current.span,
            ));
        }

        Ok(Declaration::Variable(VariableDeclaration {
            names,
            data_type,
            default,
            constant,
            not_null,
        }))
    }

    fn parse_handler_declaration(&mut self) -> Result<HandlerDeclaration, ParseError> {
        let action = match self.current.kind {
            TokenKind::Keyword(Keyword::Continue) => HandlerAction::Continue,
            TokenKind::Keyword(Keyword::Exit) => HandlerAction::Exit,
            _ => HandlerAction::Undo,
        };
        self.advance();
        self.expect_keyword(Keyword::Handler)?;
        self.expect_keyword(Keyword::For)?;

        let mut conditions = vec![self.parse_handler_condition()?];
        while self.consume(&TokenKind::Comma) {
            conditions.push(self.parse_handler_condition()?);
        }

        let body = if self.check_keyword(Keyword::Begin) {
            Statement::Block(Box::new(self.parse_block(None)?))
        } else {
            self.dispatch_statement()?
        };

        Ok(HandlerDeclaration {
            action,
            conditions,
            body: Box::new(body),
        })
    }

    fn parse_handler_condition(&mut self) -> Result<HandlerCondition, ParseError> {
        match self.current.kind {
            TokenKind::Keyword(Keyword::Sqlexception) => {
                self.advance();
                Ok(HandlerCondition::SqlException)
            }
            TokenKind::Keyword(Keyword::Sqlwarning) => {
                self.advance();
                Ok(HandlerCondition::SqlWarning)
            }
            TokenKind::Keyword(Keyword::Not) => {
                self.advance();
                self.expect_keyword(Keyword::Found)?;
                Ok(HandlerCondition::NotFound)
            }
            TokenKind::Keyword(Keyword::Sqlstate) => {
                self.advance();
                Ok(HandlerCondition::SqlState(self.parse_sqlstate()?))
            }
            TokenKind::Number => Ok(HandlerCondition::ErrorCode(self.parse_integer()?)),
            _ => Ok(HandlerCondition::Named(self.expect_identifier()?)),
        }
    }

    /// Parses `[VALUE] 'code'` after `SQLSTATE`.
    fn parse_sqlstate(&mut self) -> Result<String, ParseError> {
        self.consume_word("VALUE");
        if self.check(&TokenKind::String) {
            Ok(self.take_literal())
        } else {
            Err(self.error_expected("string"))
        }
    }

    // ===================================================================
    // Control flow
    // ===================================================================

    pub(super) fn parse_if_statement(&mut self) -> Result<IfStatement, ParseError> {
        const BRANCH_END: &[Keyword] = &[
            Keyword::Elseif,
            Keyword::Elsif,
            Keyword::Else,
            Keyword::End,
            Keyword::Endif,
        ];

        self.expect_keyword(Keyword::If)?;
        let condition = self.parse_expression()?;

        if !self.consume_keyword(Keyword::Then) {
            // T-SQL: IF cond statement [ELSE statement]
            let then_block = vec![self.dispatch_statement()?];
            if self.check(&TokenKind::Semicolon) && self.peek_keyword(Keyword::Else) {
                self.advance();
            }
            let else_block = if self.consume_keyword(Keyword::Else) {
                Some(vec![self.dispatch_statement()?])
            } else {
                None
            };
            return Ok(IfStatement {
                condition,
                then_block,
                else_ifs: vec![],
                else_block,
            });
        }

        let then_block = self.parse_statement_list(BRANCH_END)?;

        let mut else_ifs = Vec::new();
        while self.consume_keyword(Keyword::Elseif) || self.consume_keyword(Keyword::Elsif) {
            let condition = self.parse_expression()?;
            self.expect_keyword(Keyword::Then)?;
            let statements = self.parse_statement_list(BRANCH_END)?;
            else_ifs.push(ElseIf {
                condition,
                statements,
            });
        }

        let else_block = if self.consume_keyword(Keyword::Else) {
            Some(self.parse_statement_list(&[Keyword::End, Keyword::Endif])?)
        } else {
            None
        };

        if !self.consume_keyword(Keyword::Endif) {
            self.expect_keyword(Keyword::End)?;
            self.expect_keyword(Keyword::If)?;
        }

        Ok(IfStatement {
            condition,
            then_block,
            else_ifs,
            else_block,
        })
    }

    pub(super) fn parse_while_statement(
        &mut self,
        label: Option<String>,
    ) -> Result<WhileStatement, ParseError> {
        self.expect_keyword(Keyword::While)?;
        let condition = self.parse_expression()?;

        let body = if self.consume_keyword(Keyword::Do) {
            let body = self.parse_statement_list(&[Keyword::End])?;
            self.expect_loop_end(Keyword::While, label.as_deref())?;
            body
        } else if self.consume_keyword(Keyword::Loop) {
            let body = self.parse_statement_list(&[Keyword::End])?;
            self.expect_loop_end(Keyword::Loop, label.as_deref())?;
            body
        } else {
            // T-SQL: WHILE cond statement
            vec![self.dispatch_statement()?]
        };

        Ok(WhileStatement {
            label,
            condition,
            body,
        })
    }

    pub(super) fn parse_loop_statement(
        &mut self,
        label: Option<String>,
    ) -> Result<LoopStatement, ParseError> {
        self.expect_keyword(Keyword::Loop)?;
        let body = self.parse_statement_list(&[Keyword::End])?;
        self.expect_loop_end(Keyword::Loop, label.as_deref())?;
        Ok(LoopStatement { label, body })
    }

    pub(super) fn parse_repeat_statement(
        &mut self,
        label: Option<String>,
    ) -> Result<RepeatStatement, ParseError> {
        self.expect_keyword(Keyword::Repeat)?;
        let body = self.parse_statement_list(&[Keyword::Until])?;
        self.expect_keyword(Keyword::Until)?;
        let until = self.parse_expression()?;
        self.expect_loop_end(Keyword::Repeat, label.as_deref())?;
        Ok(RepeatStatement { label, body, until })
    }

    pub(super) fn parse_for_statement(
        &mut self,
        label: Option<String>,
    ) -> Result<ForStatement, ParseError> {
        self.expect_keyword(Keyword::For)?;
        let variable = self.expect_identifier()?;
        self.expect_keyword(Keyword::In)?;
        let reverse = self.consume_keyword(Keyword::Reverse);

        let range = if self.check_keyword(Keyword::Select) || self.check_keyword(Keyword::With) {
            ForRange::Query(Box::new(self.parse_query()?))
        } else if self.check(&TokenKind::LeftParen) && self.peek_keyword(Keyword::Select) {
            self.advance();
            let query = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            ForRange::Query(Box::new(query))
        } else {
            let start = self.parse_expression()?;
            self.expect(&TokenKind::DotDot)?;
            let end = self.parse_expression()?;
            let step = if self.consume_keyword(Keyword::By) {
                Some(self.parse_expression()?)
            } else {
                None
            };
            ForRange::Numeric { start, end, step }
        };

        self.expect_keyword(Keyword::Loop)?;
        let body = self.parse_statement_list(&[Keyword::End])?;
        self.expect_loop_end(Keyword::Loop, label.as_deref())?;

        Ok(ForStatement {
            label,
            variable,
            reverse,
            range,
            body,
        })
    }

    /// Expects `END keyword [label]`; a trailing label must match the
    /// opening one.
    fn expect_loop_end(&mut self, keyword: Keyword, label: Option<&str>) -> Result<(), ParseError> {
        self.expect_keyword(Keyword::End)?;
        self.expect_keyword(keyword)?;
        let span = self.current.span;
        match (label, self.parse_end_label()) {
            (Some(label), Some(end_label)) if !label.eq_ignore_ascii_case(&end_label) => {
                Err(ParseError::structural(
                    format!("end label {end_label} does not match {label}"),
                    span,
                ))
            }
            _ => Ok(()),
        }
    }

    pub(super) fn parse_case_statement(&mut self) -> Result<CaseStatement, ParseError> {
        let span = self.current.span;
        self.expect_keyword(Keyword::Case)?;
        let input = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        let mut when_clauses = Vec::new();
        while self.consume_keyword(Keyword::When) {
            let condition = self.parse_expression()?;
            self.expect_keyword(Keyword::Then)?;
            let statements =
                self.parse_statement_list(&[Keyword::When, Keyword::Else, Keyword::End])?;
            when_clauses.push(CaseStatementWhen {
                condition,
                statements,
            });
        }
        if when_clauses.is_empty() {
            return Err(ParseError::structural(
                "CASE statement requires at least one WHEN clause",
                span,
            ));
        }

        let else_block = if self.consume_keyword(Keyword::Else) {
            Some(self.parse_statement_list(&[Keyword::End])?)
        } else {
            None
        };

        self.expect_keyword(Keyword::End)?;
        self.expect_keyword(Keyword::Case)?;

        Ok(CaseStatement {
            input,
            when_clauses,
            else_block,
        })
    }

    pub(super) fn parse_return_statement(&mut self) -> Result<ReturnStatement, ParseError> {
        self.expect_keyword(Keyword::Return)?;

        // PL/pgSQL: RETURN QUERY SELECT ... / RETURN NEXT value
        if self.check_keyword(Keyword::Query) && self.peek_keyword(Keyword::Select) {
            self.advance();
            let query = self.parse_subquery()?;
            return Ok(ReturnStatement {
                value: Some(Expr::Subquery(SubqueryExpression { query })),
            });
        }
        if self.check_keyword(Keyword::Next) && !self.check_peek(&TokenKind::Semicolon) {
            self.advance();
        }

        let value = if self.at_expression_start() {
            Some(self.parse_expression()?)
        } else {
            None
        };
        Ok(ReturnStatement { value })
    }

    /// Returns true if the current token can begin an expression.
    fn at_expression_start(&self) -> bool {
        match self.current.kind {
            TokenKind::Number
            | TokenKind::String
            | TokenKind::DollarQuote
            | TokenKind::LeftParen
            | TokenKind::Minus
            | TokenKind::Plus => true,
            TokenKind::Keyword(
                Keyword::Null
                | Keyword::True
                | Keyword::False
                | Keyword::Case
                | Keyword::Exists
                | Keyword::Not
                | Keyword::Cast,
            ) => true,
            TokenKind::Keyword(Keyword::Left | Keyword::Right | Keyword::If) => {
                self.check_peek(&TokenKind::LeftParen)
            }
            _ => self.at_identifier() && !self.at_batch_separator(),
        }
    }

    // ===================================================================
    // Assignment and session options
    // ===================================================================

    /// Parses SET: session options, `SET TRANSACTION ...`, or assignments.
    pub(super) fn parse_set_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Set)?;

        if self.consume_keyword(Keyword::Transaction) {
            let value = self.parse_option_words()?;
            return Ok(Statement::SetOption(SetOptionStatement {
                name: String::from("TRANSACTION"),
                value,
            }));
        }

        // SET NOCOUNT ON / SET search_path TO public
        if self.at_identifier()
            && !matches!(
                self.peek.kind,
                TokenKind::Assign | TokenKind::ColonAssign | TokenKind::Dot
            )
        {
            let name = self.take_literal().to_ascii_uppercase();
            self.consume_keyword(Keyword::To);
            let value = self.parse_option_words()?;
            return Ok(Statement::SetOption(SetOptionStatement { name, value }));
        }

        Ok(Statement::Assignment(AssignmentStatement {
            assignments: self.parse_assignment_list()?,
        }))
    }

    /// Parses an option value of one or more words, uppercased.
    fn parse_option_words(&mut self) -> Result<String, ParseError> {
        let mut words = vec![self.parse_option_value()?];
        while !self.at_terminator()
            && (self.at_identifier()
                || self.check_keyword(Keyword::On)
                || self.check(&TokenKind::Number)
                || self.check(&TokenKind::String))
        {
            words.push(self.parse_option_value()?);
        }
        Ok(words.join(" ").to_ascii_uppercase())
    }

    /// Parses `name := expr`.
    pub(super) fn parse_assignment_statement(&mut self) -> Result<Statement, ParseError> {
        Ok(Statement::Assignment(AssignmentStatement {
            assignments: self.parse_assignment_list()?,
        }))
    }

    // ===================================================================
    // Cursors
    // ===================================================================

    pub(super) fn parse_open_statement(&mut self) -> Result<OpenStatement, ParseError> {
        self.expect_keyword(Keyword::Open)?;
        let cursor = self.parse_qualified_identifier()?;
        let query = if self.consume_keyword(Keyword::For) {
            Some(Box::new(self.parse_query()?))
        } else {
            None
        };
        Ok(OpenStatement { cursor, query })
    }

    pub(super) fn parse_fetch_statement(&mut self) -> Result<FetchStatement, ParseError> {
        self.expect_keyword(Keyword::Fetch)?;

        let direction = match self.current.kind {
            TokenKind::Keyword(Keyword::Next) => Some(FetchDirection::Next),
            TokenKind::Keyword(Keyword::Prior) => Some(FetchDirection::Prior),
            TokenKind::Keyword(Keyword::First) => Some(FetchDirection::First),
            TokenKind::Keyword(Keyword::Last) => Some(FetchDirection::Last),
            TokenKind::Keyword(Keyword::Absolute) => {
                self.advance();
                Some(FetchDirection::Absolute(self.parse_primary()?))
            }
            TokenKind::Keyword(Keyword::Relative) => {
                self.advance();
                Some(FetchDirection::Relative(self.parse_primary()?))
            }
            _ => None,
        };
        if matches!(
            direction,
            Some(
                FetchDirection::Next
                    | FetchDirection::Prior
                    | FetchDirection::First
                    | FetchDirection::Last
            )
        ) {
            self.advance();
        }

        if !self.consume_keyword(Keyword::From) {
            self.consume_keyword(Keyword::In);
        }
        let cursor = self.parse_qualified_identifier()?;

        let mut into = Vec::new();
        if self.consume_keyword(Keyword::Into) {
            into.push(self.parse_qualified_identifier()?);
            while self.consume(&TokenKind::Comma) {
                into.push(self.parse_qualified_identifier()?);
            }
        }

        Ok(FetchStatement {
            direction,
            cursor,
            into,
        })
    }

    pub(super) fn parse_close_statement(&mut self) -> Result<CloseStatement, ParseError> {
        self.expect_keyword(Keyword::Close)?;
        Ok(CloseStatement {
            cursor: self.parse_qualified_identifier()?,
        })
    }

    pub(super) fn parse_deallocate_statement(
        &mut self,
    ) -> Result<DeallocateStatement, ParseError> {
        self.expect_keyword(Keyword::Deallocate)?;
        self.consume_word("PREPARE");
        Ok(DeallocateStatement {
            cursor: self.parse_qualified_identifier()?,
        })
    }

    // ===================================================================
    // Loop exits
    // ===================================================================

    /// Parses EXIT, LEAVE or BREAK.
    pub(super) fn parse_exit_statement(&mut self) -> Result<ExitStatement, ParseError> {
        let is_break = self.check_keyword(Keyword::Break);
        self.advance();
        let label = if is_break { None } else { self.parse_end_label() };
        let condition = if self.consume_keyword(Keyword::When) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        Ok(ExitStatement { label, condition })
    }

    /// Parses CONTINUE or ITERATE.
    pub(super) fn parse_continue_statement(&mut self) -> Result<ContinueStatement, ParseError> {
        self.advance();
        let label = self.parse_end_label();
        let condition = if self.consume_keyword(Keyword::When) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        Ok(ContinueStatement { label, condition })
    }

    // ===================================================================
    // Errors
    // ===================================================================

    /// Parses PL/pgSQL RAISE or T-SQL RAISERROR.
    pub(super) fn parse_raise_statement(&mut self) -> Result<RaiseStatement, ParseError> {
        if self.consume_keyword(Keyword::Raiserror) {
            return self.parse_raiserror();
        }
        self.expect_keyword(Keyword::Raise)?;

        let level = if matches!(
            self.current.kind,
            TokenKind::Identifier | TokenKind::Keyword(Keyword::Exception)
        ) {
            RaiseLevel::from_word(&self.current.literal)
        } else {
            None
        };
        if level.is_some() {
            self.advance();
        }

        let mut message = None;
        let mut arguments = Vec::new();
        let mut condition = None;
        if self.check(&TokenKind::String) {
            message = Some(Expr::string(self.take_literal()));
            while self.consume(&TokenKind::Comma) {
                arguments.push(self.parse_expression()?);
            }
        } else if self.consume_keyword(Keyword::Sqlstate) {
            condition = Some(format!("SQLSTATE '{}'", self.parse_sqlstate()?));
        } else if self.at_identifier() {
            condition = Some(self.expect_identifier()?);
        }

        let options = if self.consume_keyword(Keyword::Using) {
            self.parse_assignment_list()?
        } else {
            vec![]
        };

        Ok(RaiseStatement {
            raiserror: false,
            level,
            message,
            arguments,
            condition,
            options,
        })
    }

    /// Parses the part of `RAISERROR(msg, severity, state [, args]) [WITH opts]`
    /// after `RAISERROR`.
    fn parse_raiserror(&mut self) -> Result<RaiseStatement, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let message = self.parse_expression()?;
        let mut arguments = Vec::new();
        while self.consume(&TokenKind::Comma) {
            arguments.push(self.parse_expression()?);
        }
        self.expect(&TokenKind::RightParen)?;

        let mut options = Vec::new();
        if self.consume_keyword(Keyword::With) {
            loop {
                options.push(Assignment {
                    target: self.expect_identifier()?.to_ascii_uppercase(),
                    value: Expr::Literal(Literal::Boolean(true)),
                });
                if !self.consume(&TokenKind::Comma) {
                    break;
                }
            }
        }

        Ok(RaiseStatement {
            raiserror: true,
            level: None,
            message: Some(message),
            arguments,
            condition: None,
            options,
        })
    }

    /// Parses `THROW [number, message, state]`.
    pub(super) fn parse_throw_statement(&mut self) -> Result<ThrowStatement, ParseError> {
        self.expect_keyword(Keyword::Throw)?;
        if !self.at_expression_start() {
            return Ok(ThrowStatement {
                error_number: None,
                message: None,
                state: None,
            });
        }
        let error_number = self.parse_expression()?;
        self.expect(&TokenKind::Comma)?;
        let message = self.parse_expression()?;
        self.expect(&TokenKind::Comma)?;
        let state = self.parse_expression()?;
        Ok(ThrowStatement {
            error_number: Some(error_number),
            message: Some(message),
            state: Some(state),
        })
    }

    /// Parses SIGNAL or RESIGNAL.
    pub(super) fn parse_signal_statement(&mut self) -> Result<SignalStatement, ParseError> {
        let resignal = self.check_keyword(Keyword::Resignal);
        self.advance();

        let mut sqlstate = None;
        let mut condition_name = None;
        if self.consume_keyword(Keyword::Sqlstate) {
            sqlstate = Some(self.parse_sqlstate()?);
        } else if self.at_identifier() {
            condition_name = Some(self.expect_identifier()?);
        }

        let properties = if self.consume_keyword(Keyword::Set) {
            self.parse_assignment_list()?
        } else {
            vec![]
        };

        Ok(SignalStatement {
            resignal,
            sqlstate,
            condition_name,
            properties,
        })
    }

    // ===================================================================
    // Calls
    // ===================================================================

    /// Parses CALL, EXEC or EXECUTE.
    pub(super) fn parse_call_statement(&mut self) -> Result<CallStatement, ParseError> {
        let is_call = self.check_keyword(Keyword::Call);
        self.advance();

        // Dynamic SQL: EXEC ('...') / EXECUTE 'sql'
        if !is_call
            && (self.check(&TokenKind::String)
                || (self.check(&TokenKind::LeftParen) && !self.check_peek(&TokenKind::RightParen)))
        {
            let args = if self.consume(&TokenKind::LeftParen) {
                let args = self.parse_expression_list()?;
                self.expect(&TokenKind::RightParen)?;
                args
            } else {
                vec![self.parse_expression()?]
            };
            return Ok(CallStatement {
                name: ObjectName::new("EXECUTE"),
                args,
            });
        }

        // T-SQL: EXEC @rc = proc ...
        if self.current.literal.starts_with('@') && self.check_peek(&TokenKind::Assign) {
            self.advance();
            self.advance();
        }

        let name = self.parse_object_name()?;

        let args = if self.consume(&TokenKind::LeftParen) {
            if self.consume(&TokenKind::RightParen) {
                vec![]
            } else {
                let args = self.parse_expression_list()?;
                self.expect(&TokenKind::RightParen)?;
                args
            }
        } else if !is_call && self.at_expression_start() {
            // T-SQL: EXEC proc 1, @name = 'x', @out OUTPUT
            let mut args = Vec::new();
            loop {
                args.push(self.parse_expression()?);
                self.consume_word("OUTPUT");
                if !self.consume(&TokenKind::Comma) {
                    break;
                }
            }
            args
        } else {
            vec![]
        };

        Ok(CallStatement { name, args })
    }

    // ===================================================================
    // Labels and TRY/CATCH
    // ===================================================================

    /// Parses the statement after `label:` or `<<label>>`.
    pub(super) fn parse_labeled_statement(&mut self, label: String) -> Result<Statement, ParseError> {
        match self.current.kind {
            TokenKind::Keyword(Keyword::Begin | Keyword::Declare) => {
                Ok(Statement::Block(Box::new(self.parse_block(Some(label))?)))
            }
            TokenKind::Keyword(Keyword::Loop) => {
                Ok(Statement::Loop(self.parse_loop_statement(Some(label))?))
            }
            TokenKind::Keyword(Keyword::While) => Ok(Statement::While(Box::new(
                self.parse_while_statement(Some(label))?,
            ))),
            TokenKind::Keyword(Keyword::Repeat) => Ok(Statement::Repeat(Box::new(
                self.parse_repeat_statement(Some(label))?,
            ))),
            TokenKind::Keyword(Keyword::For) => Ok(Statement::For(Box::new(
                self.parse_for_statement(Some(label))?,
            ))),
            _ => Err(self.error_expected("BEGIN, LOOP, WHILE, REPEAT or FOR")),
        }
    }

    /// Parses `<<label>>`.
    pub(super) fn parse_angle_label(&mut self) -> Result<String, ParseError> {
        self.expect(&TokenKind::Lt)?;
        self.expect(&TokenKind::Lt)?;
        let label = self.expect_identifier()?;
        self.expect(&TokenKind::Gt)?;
        self.expect(&TokenKind::Gt)?;
        Ok(label)
    }

    /// Parses `BEGIN TRY ... END TRY BEGIN CATCH ... END CATCH`.
    pub(super) fn parse_try_statement(&mut self) -> Result<TryStatement, ParseError> {
        self.expect_keyword(Keyword::Begin)?;
        self.expect_keyword(Keyword::Try)?;
        let try_block = self.parse_statement_list(&[Keyword::End])?;
        self.expect_keyword(Keyword::End)?;
        self.expect_keyword(Keyword::Try)?;

        self.skip_semicolons();
        self.expect_keyword(Keyword::Begin)?;
        self.expect_keyword(Keyword::Catch)?;
        let body = self.parse_statement_list(&[Keyword::End])?;
        self.expect_keyword(Keyword::End)?;
        self.expect_keyword(Keyword::Catch)?;

        Ok(TryStatement {
            try_block,
            catch_block: CatchBlock { body },
        })
    }
}
