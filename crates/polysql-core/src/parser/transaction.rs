//! Transaction control: BEGIN, START TRANSACTION, COMMIT, ROLLBACK and
//! savepoints.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    BeginTransactionStatement, CommitStatement, ReleaseSavepointStatement, RollbackStatement,
    SavepointStatement, Statement,
};
use crate::dialect::DialectKind;
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses a statement starting with `BEGIN`.
    ///
    /// `BEGIN` opens a transaction at the top level of MySQL, PostgreSQL
    /// and SQLite scripts. Inside a routine body, and anywhere in T-SQL,
    /// it opens a block unless a transaction word follows.
    pub(super) fn parse_begin_statement(&mut self) -> Result<Statement, ParseError> {
        if self.peek_keyword(Keyword::Try) {
            return Ok(Statement::Try(Box::new(self.parse_try_statement()?)));
        }

        let transaction_follows = matches!(
            self.peek.kind,
            TokenKind::Keyword(
                Keyword::Work
                    | Keyword::Transaction
                    | Keyword::Tran
                    | Keyword::Deferred
                    | Keyword::Immediate
                    | Keyword::Exclusive
            ) | TokenKind::Semicolon
                | TokenKind::Eof
        ) || self.is_batch_separator(&self.peek);

        if !transaction_follows
            && (self.routine_depth > 0 || self.dialect == DialectKind::SqlServer)
        {
            return Ok(Statement::Block(Box::new(self.parse_block(None)?)));
        }

        Ok(Statement::BeginTransaction(self.parse_begin_transaction()?))
    }

    fn parse_begin_transaction(&mut self) -> Result<BeginTransactionStatement, ParseError> {
        self.expect_keyword(Keyword::Begin)?;
        let mut statement = BeginTransactionStatement::default();

        // SQLite: BEGIN DEFERRED|IMMEDIATE|EXCLUSIVE [TRANSACTION]
        if matches!(
            self.current.kind,
            TokenKind::Keyword(Keyword::Deferred | Keyword::Immediate | Keyword::Exclusive)
        ) {
            statement.modes.push(self.parse_option_value()?);
        }

        if !self.consume_keyword(Keyword::Work) && !self.consume_keyword(Keyword::Transaction) {
            self.consume_keyword(Keyword::Tran);
        }

        if self.dialect == DialectKind::SqlServer {
            statement.name = self.parse_transaction_name();
        } else {
            statement.modes.extend(self.parse_transaction_modes()?);
        }

        Ok(statement)
    }

    /// Parses `START TRANSACTION [mode [, mode]...]`.
    pub(super) fn parse_start_transaction(
        &mut self,
    ) -> Result<BeginTransactionStatement, ParseError> {
        self.expect_keyword(Keyword::Start)?;
        self.expect_keyword(Keyword::Transaction)?;
        Ok(BeginTransactionStatement {
            use_start: true,
            modes: self.parse_transaction_modes()?,
            name: None,
        })
    }

    /// Parses comma-separated modes such as `ISOLATION LEVEL SERIALIZABLE,
    /// READ ONLY`, each uppercased.
    fn parse_transaction_modes(&mut self) -> Result<Vec<String>, ParseError> {
        let mut modes = Vec::new();
        while !self.at_terminator() {
            let mut words = Vec::new();
            while !self.at_terminator() && !self.check(&TokenKind::Comma) {
                words.push(self.parse_option_value()?);
            }
            if words.is_empty() {
                return Err(self.error_expected("transaction mode"));
            }
            modes.push(words.join(" ").to_ascii_uppercase());
            self.consume(&TokenKind::Comma);
        }
        Ok(modes)
    }

    /// Parses an optional T-SQL transaction or savepoint name.
    fn parse_transaction_name(&mut self) -> Option<String> {
        let is_name = (self.at_identifier() || self.check(&TokenKind::String))
            && !self.at_batch_separator()
            && !self.check_keyword(Keyword::To);
        is_name.then(|| self.take_literal())
    }

    /// Consumes `WORK`, `TRANSACTION` or `TRAN`; returns true for `WORK`.
    fn consume_transaction_word(&mut self) -> bool {
        if self.consume_keyword(Keyword::Work) {
            return true;
        }
        if !self.consume_keyword(Keyword::Transaction) {
            self.consume_keyword(Keyword::Tran);
        }
        false
    }

    /// Skips PostgreSQL `AND [NO] CHAIN`.
    fn skip_chain(&mut self) -> Result<(), ParseError> {
        if self.consume_keyword(Keyword::And) {
            self.consume_keyword(Keyword::No);
            self.expect_word("CHAIN")?;
        }
        Ok(())
    }

    pub(super) fn parse_commit_statement(&mut self) -> Result<CommitStatement, ParseError> {
        self.expect_keyword(Keyword::Commit)?;
        let work = self.consume_transaction_word();
        let name = self.parse_transaction_name();
        self.skip_chain()?;
        Ok(CommitStatement { work, name })
    }

    pub(super) fn parse_rollback_statement(&mut self) -> Result<RollbackStatement, ParseError> {
        self.expect_keyword(Keyword::Rollback)?;
        let work = self.consume_transaction_word();
        let name = self.parse_transaction_name();
        let to_savepoint = if self.consume_keyword(Keyword::To) {
            self.consume_keyword(Keyword::Savepoint);
            Some(self.expect_identifier()?)
        } else {
            None
        };
        self.skip_chain()?;
        Ok(RollbackStatement {
            work,
            name,
            to_savepoint,
        })
    }

    /// Parses `SAVEPOINT name` or `SAVE TRAN[SACTION] name`.
    pub(super) fn parse_savepoint_statement(&mut self) -> Result<SavepointStatement, ParseError> {
        if self.consume_keyword(Keyword::Save) {
            if !self.consume_keyword(Keyword::Transaction) {
                self.expect_keyword(Keyword::Tran)?;
            }
        } else {
            self.expect_keyword(Keyword::Savepoint)?;
        }
        Ok(SavepointStatement {
            name: self.expect_identifier()?,
        })
    }

    pub(super) fn parse_release_statement(
        &mut self,
    ) -> Result<ReleaseSavepointStatement, ParseError> {
        self.expect_keyword(Keyword::Release)?;
        self.consume_keyword(Keyword::Savepoint);
        Ok(ReleaseSavepointStatement {
            name: self.expect_identifier()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::Statement;
    use crate::dialect::DialectKind;
    use crate::parser::Parser;

    fn parse_in(sql: &str, dialect: DialectKind) -> Statement {
        Parser::with_dialect(sql, dialect).parse_statement().unwrap()
    }

    #[test]
    fn test_tsql_named_transaction() {
        let Statement::BeginTransaction(begin) =
            parse_in("BEGIN TRAN transfer", DialectKind::SqlServer)
        else {
            panic!("Expected BEGIN TRANSACTION");
        };
        assert_eq!(begin.name.as_deref(), Some("transfer"));
        assert!(!begin.use_start);
    }

    #[test]
    fn test_sqlite_begin_immediate() {
        let Statement::BeginTransaction(begin) =
            parse_in("BEGIN IMMEDIATE TRANSACTION", DialectKind::Sqlite)
        else {
            panic!("Expected BEGIN TRANSACTION");
        };
        assert_eq!(begin.modes, vec!["IMMEDIATE"]);
    }

    #[test]
    fn test_start_transaction_modes() {
        let Statement::BeginTransaction(begin) = parse_in(
            "START TRANSACTION ISOLATION LEVEL SERIALIZABLE, READ ONLY",
            DialectKind::PostgreSql,
        ) else {
            panic!("Expected START TRANSACTION");
        };
        assert!(begin.use_start);
        assert_eq!(begin.modes, vec!["ISOLATION LEVEL SERIALIZABLE", "READ ONLY"]);
    }

    #[test]
    fn test_bare_begin_depends_on_dialect() {
        assert!(matches!(
            parse_in("BEGIN; SELECT 1", DialectKind::MySql),
            Statement::BeginTransaction(_)
        ));
        assert!(matches!(
            parse_in("BEGIN SELECT 1; END", DialectKind::SqlServer),
            Statement::Block(_)
        ));
    }

    #[test]
    fn test_rollback_to_savepoint() {
        let Statement::Rollback(rollback) =
            parse_in("ROLLBACK WORK TO SAVEPOINT before_update", DialectKind::PostgreSql)
        else {
            panic!("Expected ROLLBACK");
        };
        assert!(rollback.work);
        assert_eq!(rollback.to_savepoint.as_deref(), Some("before_update"));
        assert_eq!(rollback.to_string(), "ROLLBACK WORK TO SAVEPOINT before_update");
    }

    #[test]
    fn test_save_tran() {
        let Statement::Savepoint(savepoint) =
            parse_in("SAVE TRANSACTION checkpoint_1", DialectKind::SqlServer)
        else {
            panic!("Expected SAVEPOINT");
        };
        assert_eq!(savepoint.name, "checkpoint_1");
    }

    #[test]
    fn test_commit_and_chain() {
        let Statement::Commit(commit) = parse_in("COMMIT AND NO CHAIN", DialectKind::PostgreSql)
        else {
            panic!("Expected COMMIT");
        };
        assert!(!commit.work);
        assert!(commit.name.is_none());
    }
}
