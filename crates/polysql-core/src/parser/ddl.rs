//! CREATE, DROP and ALTER TABLE.

use std::collections::BTreeMap;

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    AlterAction, AlterTableStatement, AutoIncrement, BlockStatement, ColumnDefinition,
    CreateIndexStatement, CreateTableStatement, CreateTriggerStatement, CreateViewStatement,
    DropStatement, Expr, ForeignKeyReference, ObjectType, ReferentialAction, Statement,
    TableConstraint, TableConstraintKind, TriggerBody, TriggerEvent, TriggerTiming,
};
use crate::dialect::Feature;
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses any CREATE statement.
    pub(super) fn parse_create_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Create)?;

        // OR REPLACE, or T-SQL OR ALTER
        let or_replace = if self.check_keyword(Keyword::Or)
            && (self.peek_keyword(Keyword::Replace) || self.peek_keyword(Keyword::Alter))
        {
            self.advance();
            self.advance();
            true
        } else {
            false
        };

        let temporary =
            self.consume_keyword(Keyword::Temporary) || self.consume_keyword(Keyword::Temp);
        let unique = self.consume_keyword(Keyword::Unique);
        let clustered = if self.consume_keyword(Keyword::Clustered) {
            Some(true)
        } else if self.consume_keyword(Keyword::Nonclustered) {
            Some(false)
        } else {
            None
        };

        match self.current.kind {
            TokenKind::Keyword(Keyword::Table) => Ok(Statement::CreateTable(Box::new(
                self.parse_create_table(temporary)?,
            ))),
            TokenKind::Keyword(Keyword::Index) => Ok(Statement::CreateIndex(Box::new(
                self.parse_create_index(unique, clustered)?,
            ))),
            TokenKind::Keyword(Keyword::View) => Ok(Statement::CreateView(Box::new(
                self.parse_create_view(or_replace, false)?,
            ))),
            TokenKind::Keyword(Keyword::Materialized) => {
                let span = self.current.span;
                self.require_feature(Feature::MaterializedView, span)?;
                self.advance();
                Ok(Statement::CreateView(Box::new(
                    self.parse_create_view(or_replace, true)?,
                )))
            }
            TokenKind::Keyword(Keyword::Procedure) => Ok(Statement::CreateProcedure(Box::new(
                self.parse_create_procedure(or_replace)?,
            ))),
            TokenKind::Keyword(Keyword::Function) => Ok(Statement::CreateFunction(Box::new(
                self.parse_create_function(or_replace)?,
            ))),
            TokenKind::Keyword(Keyword::Trigger) => Ok(Statement::CreateTrigger(Box::new(
                self.parse_create_trigger(or_replace)?,
            ))),
            _ if self.check_word("PROC") => Ok(Statement::CreateProcedure(Box::new(
                self.parse_create_procedure(or_replace)?,
            ))),
            _ => Err(self.error_expected("TABLE, INDEX, VIEW, PROCEDURE, FUNCTION or TRIGGER")),
        }
    }

    /// Parses `IF NOT EXISTS`, if present.
    fn parse_if_not_exists(&mut self) -> Result<bool, ParseError> {
        if self.consume_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Parses `IF EXISTS`, if present.
    fn parse_if_exists(&mut self) -> Result<bool, ParseError> {
        if self.consume_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Exists)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn parse_parenthesized_expression(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expression()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(expr)
    }

    /// Skips a balanced parenthesized group.
    pub(super) fn skip_parenthesized(&mut self) -> Result<(), ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut depth = 1usize;
        while depth > 0 {
            match self.current.kind {
                TokenKind::Eof => return Err(self.error_expected(")")),
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth -= 1,
                _ => {}
            }
            self.advance();
        }
        Ok(())
    }

    // ===================================================================
    // CREATE TABLE
    // ===================================================================

    fn parse_create_table(&mut self, temporary: bool) -> Result<CreateTableStatement, ParseError> {
        self.expect_keyword(Keyword::Table)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_object_name()?;

        if self.check_keyword(Keyword::As) {
            return Err(ParseError::unsupported(
                "CREATE TABLE ... AS SELECT",
                self.current.span,
            ));
        }

        self.expect(&TokenKind::LeftParen)?;
        let mut columns = Vec::new();
        let mut constraints = Vec::new();
        loop {
            if self.at_table_constraint() {
                constraints.push(self.parse_table_constraint()?);
            } else {
                columns.push(self.parse_column_definition()?);
            }
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RightParen)?;

        let options = self.parse_table_options()?;

        Ok(CreateTableStatement {
            if_not_exists,
            temporary,
            name,
            columns,
            constraints,
            options,
        })
    }

    fn at_table_constraint(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::Keyword(
                Keyword::Primary
                    | Keyword::Foreign
                    | Keyword::Unique
                    | Keyword::Constraint
                    | Keyword::Check
                    | Keyword::Index
            )
        )
    }

    fn parse_table_constraint(&mut self) -> Result<TableConstraint, ParseError> {
        let name = if self.consume_keyword(Keyword::Constraint) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let kind = match self.current.kind {
            TokenKind::Keyword(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                self.skip_clustering();
                TableConstraintKind::PrimaryKey(self.parse_parenthesized_identifiers()?)
            }
            TokenKind::Keyword(Keyword::Unique) => {
                self.advance();
                self.consume_keyword(Keyword::Key);
                self.skip_clustering();
                // MySQL: UNIQUE [KEY] name (cols)
                if self.at_identifier() {
                    self.advance();
                }
                TableConstraintKind::Unique(self.parse_parenthesized_identifiers()?)
            }
            TokenKind::Keyword(Keyword::Foreign) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                let columns = self.parse_parenthesized_identifiers()?;
                let references = self.parse_references()?;
                TableConstraintKind::ForeignKey {
                    columns,
                    references,
                }
            }
            TokenKind::Keyword(Keyword::Check) => {
                self.advance();
                TableConstraintKind::Check(self.parse_parenthesized_expression()?)
            }
            TokenKind::Keyword(Keyword::Index) => {
                self.advance();
                if self.at_identifier() {
                    self.advance();
                }
                TableConstraintKind::Index(self.parse_parenthesized_identifiers()?)
            }
            _ => return Err(self.error_expected("PRIMARY KEY, FOREIGN KEY, UNIQUE or CHECK")),
        };

        Ok(TableConstraint { name, kind })
    }

    /// Skips T-SQL `CLUSTERED` / `NONCLUSTERED` after a key.
    fn skip_clustering(&mut self) {
        if !self.consume_keyword(Keyword::Clustered) {
            self.consume_keyword(Keyword::Nonclustered);
        }
    }

    fn parse_column_definition(&mut self) -> Result<ColumnDefinition, ParseError> {
        let name = self.expect_identifier()?;
        let data_type = self.parse_data_type()?;
        let mut column = ColumnDefinition::new(name, data_type);

        loop {
            match self.current.kind {
                TokenKind::Keyword(Keyword::Constraint) => {
                    self.advance();
                    column.constraint_name = Some(self.expect_identifier()?);
                }
                TokenKind::Keyword(Keyword::Not) => {
                    self.advance();
                    self.expect_keyword(Keyword::Null)?;
                    column.nullable = Some(false);
                }
                TokenKind::Keyword(Keyword::Null) => {
                    self.advance();
                    column.nullable = Some(true);
                }
                TokenKind::Keyword(Keyword::Primary) => {
                    self.advance();
                    self.expect_keyword(Keyword::Key)?;
                    self.skip_clustering();
                    column.primary_key = true;
                }
                TokenKind::Keyword(Keyword::Unique) => {
                    self.advance();
                    self.consume_keyword(Keyword::Key);
                    column.unique = true;
                }
                TokenKind::Keyword(Keyword::AutoIncrement) => {
                    self.advance();
                    column.auto_increment = Some(AutoIncrement::AutoIncrement);
                }
                TokenKind::Keyword(Keyword::Autoincrement) => {
                    self.advance();
                    column.auto_increment = Some(AutoIncrement::Autoincrement);
                }
                TokenKind::Keyword(Keyword::Identity) => {
                    self.advance();
                    column.auto_increment = Some(self.parse_identity()?);
                }
                TokenKind::Keyword(Keyword::Generated) => {
                    self.advance();
                    let always = if self.consume_keyword(Keyword::Always) {
                        true
                    } else {
                        self.expect_keyword(Keyword::By)?;
                        self.expect_keyword(Keyword::Default)?;
                        false
                    };
                    self.expect_keyword(Keyword::As)?;
                    self.expect_keyword(Keyword::Identity)?;
                    if self.check(&TokenKind::LeftParen) {
                        self.skip_parenthesized()?;
                    }
                    column.auto_increment = Some(AutoIncrement::Generated { always });
                }
                TokenKind::Keyword(Keyword::Default) => {
                    self.advance();
                    column.default = Some(self.parse_expression()?);
                }
                TokenKind::Keyword(Keyword::References) => {
                    column.references = Some(self.parse_references()?);
                }
                TokenKind::Keyword(Keyword::Check) => {
                    self.advance();
                    column.check = Some(self.parse_parenthesized_expression()?);
                }
                TokenKind::Keyword(Keyword::Collate) => {
                    self.advance();
                    column.collation = Some(self.expect_identifier()?);
                }
                TokenKind::Keyword(Keyword::Comment) if self.check_peek(&TokenKind::String) => {
                    self.advance();
                    self.advance();
                }
                _ => return Ok(column),
            }
        }
    }

    /// Parses the part of `IDENTITY[(seed, increment)]` after `IDENTITY`.
    fn parse_identity(&mut self) -> Result<AutoIncrement, ParseError> {
        if !self.consume(&TokenKind::LeftParen) {
            return Ok(AutoIncrement::Identity {
                seed: None,
                increment: None,
            });
        }
        let seed = self.parse_integer()?;
        let increment = if self.consume(&TokenKind::Comma) {
            Some(self.parse_integer()?)
        } else {
            None
        };
        self.expect(&TokenKind::RightParen)?;
        Ok(AutoIncrement::Identity {
            seed: Some(seed),
            increment,
        })
    }

    fn parse_references(&mut self) -> Result<ForeignKeyReference, ParseError> {
        self.expect_keyword(Keyword::References)?;
        let table = self.parse_object_name()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![]
        };

        let mut reference = ForeignKeyReference {
            table,
            columns,
            on_delete: None,
            on_update: None,
        };
        while self.check_keyword(Keyword::On)
            && (self.peek_keyword(Keyword::Delete) || self.peek_keyword(Keyword::Update))
        {
            self.advance();
            if self.consume_keyword(Keyword::Delete) {
                reference.on_delete = Some(self.parse_referential_action()?);
            } else {
                self.expect_keyword(Keyword::Update)?;
                reference.on_update = Some(self.parse_referential_action()?);
            }
        }
        Ok(reference)
    }

    fn parse_referential_action(&mut self) -> Result<ReferentialAction, ParseError> {
        if self.consume_keyword(Keyword::Cascade) {
            Ok(ReferentialAction::Cascade)
        } else if self.consume_keyword(Keyword::Restrict) {
            Ok(ReferentialAction::Restrict)
        } else if self.consume_keyword(Keyword::Set) {
            if self.consume_keyword(Keyword::Null) {
                Ok(ReferentialAction::SetNull)
            } else {
                self.expect_keyword(Keyword::Default)?;
                Ok(ReferentialAction::SetDefault)
            }
        } else if self.consume_keyword(Keyword::No) {
            self.expect_keyword(Keyword::Action)?;
            Ok(ReferentialAction::NoAction)
        } else {
            Err(self.error_expected("CASCADE, RESTRICT, SET NULL, SET DEFAULT or NO ACTION"))
        }
    }

    /// Parses trailing options such as `ENGINE=InnoDB DEFAULT CHARSET=utf8`
    /// or T-SQL `ON [PRIMARY]`. A reserved word starts the next statement.
    fn parse_table_options(&mut self) -> Result<BTreeMap<String, String>, ParseError> {
        let mut options = BTreeMap::new();
        loop {
            if self.at_terminator() {
                return Ok(options);
            }
            if self.consume_keyword(Keyword::On) {
                options.insert(String::from("ON"), self.parse_option_value()?);
                continue;
            }
            self.consume_keyword(Keyword::Default);
            if !self.at_identifier() {
                return Ok(options);
            }
            let key = self.take_literal().to_ascii_uppercase();
            let value = if self.consume(&TokenKind::Assign) {
                self.parse_option_value()?
            } else if self.at_terminator() || self.check(&TokenKind::Comma) {
                String::from("TRUE")
            } else {
                self.parse_option_value()?
            };
            options.insert(key, value);
            self.consume(&TokenKind::Comma);
        }
    }

    /// Parses a bare option value: a word, string or number.
    pub(super) fn parse_option_value(&mut self) -> Result<String, ParseError> {
        match self.current.kind {
            TokenKind::Identifier
            | TokenKind::QuotedIdentifier
            | TokenKind::String
            | TokenKind::Number => Ok(self.take_literal()),
            TokenKind::Keyword(keyword) => {
                self.advance();
                Ok(keyword.as_str().to_string())
            }
            _ => Err(self.error_expected("option value")),
        }
    }

    // ===================================================================
    // CREATE INDEX
    // ===================================================================

    fn parse_create_index(
        &mut self,
        unique: bool,
        clustered: Option<bool>,
    ) -> Result<CreateIndexStatement, ParseError> {
        self.expect_keyword(Keyword::Index)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_qualified_identifier()?;
        self.expect_keyword(Keyword::On)?;
        let table = self.parse_object_name()?;

        let mut using = if self.consume_keyword(Keyword::Using) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        self.expect(&TokenKind::LeftParen)?;
        let columns = self.parse_order_by_list()?;
        self.expect(&TokenKind::RightParen)?;

        // MySQL puts the index method after the column list.
        if using.is_none() && self.consume_keyword(Keyword::Using) {
            using = Some(self.expect_identifier()?);
        }

        let include = if self.consume_keyword(Keyword::Include) {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![]
        };

        let where_clause = if self.consume_keyword(Keyword::Where) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(CreateIndexStatement {
            unique,
            clustered,
            if_not_exists,
            name,
            table,
            using,
            columns,
            include,
            where_clause,
        })
    }

    // ===================================================================
    // CREATE VIEW
    // ===================================================================

    fn parse_create_view(
        &mut self,
        or_replace: bool,
        materialized: bool,
    ) -> Result<CreateViewStatement, ParseError> {
        self.expect_keyword(Keyword::View)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_object_name()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![]
        };

        let mut options = BTreeMap::new();
        if self.consume_keyword(Keyword::With) {
            if self.consume(&TokenKind::LeftParen) {
                // PostgreSQL: WITH (name = value, ...)
                loop {
                    let key = self.expect_identifier()?.to_ascii_uppercase();
                    let value = if self.consume(&TokenKind::Assign) {
                        self.parse_option_value()?
                    } else {
                        String::from("TRUE")
                    };
                    options.insert(key, value);
                    if !self.consume(&TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(&TokenKind::RightParen)?;
            } else {
                // SQL Server: WITH SCHEMABINDING, ENCRYPTION
                loop {
                    options.insert(self.expect_identifier()?.to_ascii_uppercase(), String::from("TRUE"));
                    if !self.consume(&TokenKind::Comma) {
                        break;
                    }
                }
            }
        }

        self.expect_keyword(Keyword::As)?;
        let query = self.parse_query()?;

        let mut with_check_option = false;
        if self.consume_keyword(Keyword::With) {
            if self.consume_keyword(Keyword::Cascaded) {
                options.insert(String::from("CHECK_OPTION"), String::from("CASCADED"));
            } else if self.consume_keyword(Keyword::Local) {
                options.insert(String::from("CHECK_OPTION"), String::from("LOCAL"));
            }

            if self.consume_keyword(Keyword::Check) {
                self.expect_keyword(Keyword::Option)?;
                with_check_option = true;
            } else if self.consume_keyword(Keyword::No) {
                self.expect_keyword(Keyword::Data)?;
                options.insert(String::from("DATA"), String::from("FALSE"));
            } else if self.consume_keyword(Keyword::Data) {
                options.insert(String::from("DATA"), String::from("TRUE"));
            } else {
                return Err(self.error_expected("CHECK OPTION or DATA"));
            }
        }

        Ok(CreateViewStatement {
            or_replace,
            materialized,
            if_not_exists,
            name,
            columns,
            query: Box::new(query),
            with_check_option,
            options,
        })
    }

    // ===================================================================
    // CREATE TRIGGER
    // ===================================================================

    fn parse_create_trigger(
        &mut self,
        or_replace: bool,
    ) -> Result<CreateTriggerStatement, ParseError> {
        self.expect_keyword(Keyword::Trigger)?;
        let name = self.parse_object_name()?;

        // SQL Server: name ON table {FOR|AFTER|INSTEAD OF} events AS body
        if self.consume_keyword(Keyword::On) {
            let table = self.parse_object_name()?;
            let timing = match self.current.kind {
                TokenKind::Keyword(Keyword::For | Keyword::After) => {
                    self.advance();
                    TriggerTiming::After
                }
                TokenKind::Keyword(Keyword::Instead) => self.parse_instead_of()?,
                _ => return Err(self.error_expected("FOR, AFTER or INSTEAD OF")),
            };
            let events = self.parse_trigger_events()?;
            self.expect_keyword(Keyword::As)?;
            let body = self.parse_batch_trigger_body()?;
            return Ok(CreateTriggerStatement {
                or_replace,
                name,
                timing,
                events,
                table,
                for_each_row: false,
                when: None,
                body,
            });
        }

        let timing = match self.current.kind {
            TokenKind::Keyword(Keyword::Before) => {
                self.advance();
                TriggerTiming::Before
            }
            TokenKind::Keyword(Keyword::After) => {
                self.advance();
                TriggerTiming::After
            }
            TokenKind::Keyword(Keyword::Instead) => self.parse_instead_of()?,
            _ => return Err(self.error_expected("BEFORE, AFTER or INSTEAD OF")),
        };
        let events = self.parse_trigger_events()?;
        self.expect_keyword(Keyword::On)?;
        let table = self.parse_object_name()?;

        let mut for_each_row = false;
        if self.consume_keyword(Keyword::For) {
            self.consume_keyword(Keyword::Each);
            if self.consume_keyword(Keyword::Row) {
                for_each_row = true;
            } else {
                self.expect_keyword(Keyword::Statement)?;
            }
        }

        let when = if self.consume_keyword(Keyword::When) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        let body = self.parse_trigger_body()?;

        Ok(CreateTriggerStatement {
            or_replace,
            name,
            timing,
            events,
            table,
            for_each_row,
            when,
            body,
        })
    }

    fn parse_instead_of(&mut self) -> Result<TriggerTiming, ParseError> {
        let span = self.current.span;
        self.require_feature(Feature::InsteadOf, span)?;
        self.expect_keyword(Keyword::Instead)?;
        self.expect_keyword(Keyword::Of)?;
        Ok(TriggerTiming::InsteadOf)
    }

    /// Parses events separated by `OR` or `,`.
    fn parse_trigger_events(&mut self) -> Result<Vec<TriggerEvent>, ParseError> {
        let mut events = Vec::new();
        loop {
            let event = match self.current.kind {
                TokenKind::Keyword(Keyword::Insert) => {
                    self.advance();
                    TriggerEvent::Insert
                }
                TokenKind::Keyword(Keyword::Delete) => {
                    self.advance();
                    TriggerEvent::Delete
                }
                TokenKind::Keyword(Keyword::Update) => {
                    self.advance();
                    let mut columns = Vec::new();
                    if self.consume_keyword(Keyword::Of) {
                        columns.push(self.expect_identifier()?);
                        while self.check(&TokenKind::Comma) && Self::is_identifier(&self.peek) {
                            self.advance();
                            columns.push(self.expect_identifier()?);
                        }
                    }
                    TriggerEvent::Update(columns)
                }
                _ => return Err(self.error_expected("INSERT, UPDATE or DELETE")),
            };
            events.push(event);
            if !(self.consume_keyword(Keyword::Or) || self.consume(&TokenKind::Comma)) {
                return Ok(events);
            }
        }
    }

    fn parse_trigger_body(&mut self) -> Result<TriggerBody, ParseError> {
        if self.consume_keyword(Keyword::Execute) {
            if !self.consume_keyword(Keyword::Function) {
                self.expect_keyword(Keyword::Procedure)?;
            }
            let name = self.parse_qualified_identifier()?;
            self.expect(&TokenKind::LeftParen)?;
            let args = if self.check(&TokenKind::RightParen) {
                vec![]
            } else {
                self.parse_expression_list()?
            };
            self.expect(&TokenKind::RightParen)?;
            return Ok(TriggerBody::ExecuteFunction { name, args });
        }

        if self.check_keyword(Keyword::Begin) {
            let block = self.in_routine_body(|parser| parser.parse_block(None))?;
            return Ok(TriggerBody::Block(block));
        }

        let statement = self.in_routine_body(Self::dispatch_statement)?;
        Ok(TriggerBody::Statement(Box::new(statement)))
    }

    /// Parses a T-SQL trigger body: a `BEGIN ... END` block, or every
    /// statement up to the end of the batch.
    fn parse_batch_trigger_body(&mut self) -> Result<TriggerBody, ParseError> {
        if self.check_keyword(Keyword::Begin) && !self.peek_keyword(Keyword::Try) {
            let block = self.in_routine_body(|parser| parser.parse_block(None))?;
            return Ok(TriggerBody::Block(block));
        }
        let statements = self.in_routine_body(|parser| parser.parse_statement_list(&[]))?;
        Ok(TriggerBody::Block(BlockStatement {
            statements,
            ..BlockStatement::default()
        }))
    }

    // ===================================================================
    // DROP
    // ===================================================================

    pub(super) fn parse_drop_statement(&mut self) -> Result<DropStatement, ParseError> {
        self.expect_keyword(Keyword::Drop)?;

        let span = self.current.span;
        let object_type = match self.current.kind {
            TokenKind::Keyword(Keyword::Table) => ObjectType::Table,
            TokenKind::Keyword(Keyword::Database) => ObjectType::Database,
            TokenKind::Keyword(Keyword::Index) => ObjectType::Index,
            TokenKind::Keyword(Keyword::View) => ObjectType::View,
            TokenKind::Keyword(Keyword::Trigger) => ObjectType::Trigger,
            TokenKind::Keyword(Keyword::Procedure) => ObjectType::Procedure,
            TokenKind::Keyword(Keyword::Function) => ObjectType::Function,
            TokenKind::Keyword(Keyword::Schema) => ObjectType::Schema,
            TokenKind::Keyword(Keyword::Materialized) => {
                self.require_feature(Feature::MaterializedView, span)?;
                self.advance();
                if !self.check_keyword(Keyword::View) {
                    return Err(self.error_expected("VIEW"));
                }
                ObjectType::MaterializedView
            }
            _ if self.check_word("PROC") => ObjectType::Procedure,
            _ => return Err(self.error_expected("object type")),
        };
        self.advance();

        let if_exists = self.parse_if_exists()?;

        let mut names = Vec::new();
        loop {
            names.push(self.parse_object_name()?);
            // PostgreSQL: DROP FUNCTION f(INT, TEXT)
            if self.check(&TokenKind::LeftParen) {
                self.skip_parenthesized()?;
            }
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }

        let on_table = if matches!(object_type, ObjectType::Index | ObjectType::Trigger)
            && self.consume_keyword(Keyword::On)
        {
            Some(self.parse_object_name()?)
        } else {
            None
        };

        let cascade = self.consume_keyword(Keyword::Cascade);
        let restrict = !cascade && self.consume_keyword(Keyword::Restrict);

        Ok(DropStatement {
            object_type,
            if_exists,
            names,
            on_table,
            cascade,
            restrict,
        })
    }

    // ===================================================================
    // ALTER TABLE
    // ===================================================================

    pub(super) fn parse_alter_table_statement(
        &mut self,
    ) -> Result<AlterTableStatement, ParseError> {
        self.expect_keyword(Keyword::Alter)?;
        self.expect_keyword(Keyword::Table)?;
        let name = self.parse_object_name()?;

        let action = match self.current.kind {
            TokenKind::Keyword(Keyword::Add) => {
                self.advance();
                if self.at_table_constraint() {
                    AlterAction::AddConstraint(self.parse_table_constraint()?)
                } else {
                    self.consume_keyword(Keyword::Column);
                    AlterAction::AddColumn(self.parse_column_definition()?)
                }
            }
            TokenKind::Keyword(Keyword::Drop) => {
                self.advance();
                if self.consume_keyword(Keyword::Constraint) {
                    AlterAction::DropConstraint(self.expect_identifier()?)
                } else {
                    self.consume_keyword(Keyword::Column);
                    let if_exists = self.parse_if_exists()?;
                    AlterAction::DropColumn {
                        name: self.expect_identifier()?,
                        if_exists,
                    }
                }
            }
            TokenKind::Keyword(Keyword::Modify) => {
                self.advance();
                self.consume_keyword(Keyword::Column);
                AlterAction::ModifyColumn(self.parse_column_definition()?)
            }
            TokenKind::Keyword(Keyword::Change) => {
                self.advance();
                self.consume_keyword(Keyword::Column);
                let old_name = self.expect_identifier()?;
                AlterAction::ChangeColumn {
                    old_name,
                    column: self.parse_column_definition()?,
                }
            }
            TokenKind::Keyword(Keyword::Alter) => {
                self.advance();
                self.consume_keyword(Keyword::Column);
                let name = self.expect_identifier()?;
                if self.consume_keyword(Keyword::Set) {
                    self.expect_keyword(Keyword::Data)?;
                }
                self.consume_keyword(Keyword::Type);
                let data_type = self.parse_data_type()?;
                // T-SQL restates nullability after the type.
                if self.consume_keyword(Keyword::Not) {
                    self.expect_keyword(Keyword::Null)?;
                } else {
                    self.consume_keyword(Keyword::Null);
                }
                AlterAction::AlterColumnType { name, data_type }
            }
            TokenKind::Keyword(Keyword::Rename) => {
                self.advance();
                if self.consume_keyword(Keyword::Column) {
                    let from = self.expect_identifier()?;
                    self.expect_keyword(Keyword::To)?;
                    AlterAction::RenameColumn {
                        from,
                        to: self.expect_identifier()?,
                    }
                } else {
                    if !self.consume_keyword(Keyword::To) {
                        self.consume_keyword(Keyword::As);
                    }
                    AlterAction::RenameTable(self.parse_object_name()?)
                }
            }
            _ => return Err(self.error_expected("ADD, DROP, MODIFY, CHANGE, ALTER or RENAME")),
        };

        Ok(AlterTableStatement { name, action })
    }
}
