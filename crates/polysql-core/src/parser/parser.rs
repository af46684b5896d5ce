//! SQL Parser implementation.

use std::mem;
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use super::error::ParseError;
use super::metrics::ParseMetrics;
use crate::ast::{ObjectName, Statement};
use crate::dialect::{Dialect, DialectKind, Feature};
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};

/// Options fixed when a parser is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserOptions {
    /// Dialect used for lexing and for feature gating.
    pub dialect: DialectKind,
    /// No token is consumed after this instant.
    pub deadline: Option<Instant>,
}

impl ParserOptions {
    /// Creates options for the default dialect with no deadline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the dialect.
    #[must_use]
    pub const fn with_dialect(mut self, dialect: DialectKind) -> Self {
        self.dialect = dialect;
        self
    }

    /// Sets the deadline to `timeout` from now.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    /// Sets an absolute deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// SQL Parser.
///
/// One parser owns one source string. [`Parser::parse_statement`] returns the
/// next statement; every error it returns is also kept in [`Parser::errors`],
/// and the parser skips past the next `;` so the caller may keep going.
#[derive(Debug)]
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    pub(super) current: Token,
    pub(super) peek: Token,
    pub(super) previous: Token,
    pub(super) dialect: DialectKind,
    deadline: Option<Instant>,
    cancelled: bool,
    errors: Vec<ParseError>,
    /// Errors from a quoted routine body beyond the one it returned.
    deferred_errors: Vec<ParseError>,
    /// Statement lists record an error and resume at the next `;`.
    recover_in_lists: bool,
    tokens_processed: usize,
    eof_counted: bool,
    elapsed: Duration,
    /// Nesting depth of routine bodies; a bare `BEGIN` opens a block inside one.
    pub(super) routine_depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the default (SQL Server) dialect.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParserOptions::default())
    }

    /// Creates a new parser for the given dialect.
    #[must_use]
    pub fn with_dialect(input: &'a str, dialect: DialectKind) -> Self {
        Self::with_options(input, ParserOptions::new().with_dialect(dialect))
    }

    /// Creates a new parser with explicit options.
    #[must_use]
    pub fn with_options(input: &'a str, options: ParserOptions) -> Self {
        let mut lexer = Lexer::with_dialect(input, options.dialect);
        let current = lexer.next_token();
        let peek = lexer.next_token();
        let mut parser = Self {
            lexer,
            current,
            peek,
            previous: Token::new(TokenKind::Eof, "", Span::default()),
            dialect: options.dialect,
            deadline: options.deadline,
            cancelled: false,
            errors: Vec::new(),
            deferred_errors: Vec::new(),
            recover_in_lists: false,
            tokens_processed: 0,
            eof_counted: false,
            elapsed: Duration::ZERO,
            routine_depth: 0,
        };
        parser.count_current();
        parser
    }

    /// Creates a parser for a routine body nested in another source.
    pub(super) fn nested(input: &'a str, dialect: DialectKind, deadline: Option<Instant>) -> Self {
        let mut parser = Self::with_options(input, ParserOptions { dialect, deadline });
        parser.routine_depth = 1;
        parser.recover_in_lists = true;
        parser
    }

    /// Returns the active dialect.
    #[must_use]
    pub const fn dialect(&self) -> DialectKind {
        self.dialect
    }

    /// Switches dialect for the tokens not yet read.
    ///
    /// The two lookahead tokens were already lexed and keep their kinds.
    pub fn set_dialect(&mut self, dialect: DialectKind) {
        trace!(from = %self.dialect, to = %dialect, "switching dialect");
        self.dialect = dialect;
        self.lexer.set_dialect(dialect);
    }

    /// Parses a single SQL statement, consuming trailing semicolons.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid SQL statement. The
    /// error is also appended to [`Parser::errors`].
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let started = Instant::now();
        self.deferred_errors.clear();
        self.skip_separators();
        let result = self.dispatch_statement();
        match &result {
            Ok(statement) => {
                debug!(
                    statement = statement.type_tag(),
                    dialect = %self.dialect,
                    end_line = self.previous.span.line,
                    "parsed statement"
                );
                self.skip_semicolons();
            }
            Err(error) => {
                self.record_error(error);
                if !self.cancelled {
                    self.synchronize();
                }
            }
        }
        self.elapsed += started.elapsed();
        result
    }

    /// Parses every statement up to the end of input.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub fn parse_statements(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = Vec::new();
        for statement in self.by_ref() {
            statements.push(statement?);
        }
        Ok(statements)
    }

    /// Returns every error recorded so far.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Returns the recorded errors as display strings.
    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Returns timing and throughput counters.
    #[must_use]
    pub fn metrics(&self) -> ParseMetrics {
        ParseMetrics::new(self.elapsed, self.tokens_processed, self.errors.len())
    }

    /// Returns true once the input is exhausted or the deadline has expired.
    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.current.is_eof()
    }

    /// Returns true if the deadline expired.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    // ===================================================================
    // Statement dispatch
    // ===================================================================

    /// Parses one statement without recording errors or recovering.
    ///
    /// Nested productions (routine bodies, IF branches) use this directly.
    pub(super) fn dispatch_statement(&mut self) -> Result<Statement, ParseError> {
        match self.current.kind {
            TokenKind::Keyword(keyword) if keyword.is_reserved() => {
                self.parse_keyword_statement(keyword)
            }
            TokenKind::Identifier | TokenKind::QuotedIdentifier | TokenKind::Keyword(_)
                if self.check_peek(&TokenKind::Colon) =>
            {
                let label = self.expect_identifier()?;
                self.advance();
                self.parse_labeled_statement(label)
            }
            TokenKind::Identifier | TokenKind::Keyword(_)
                if self.check_peek(&TokenKind::ColonAssign) =>
            {
                self.parse_assignment_statement()
            }
            TokenKind::Lt if self.check_peek(&TokenKind::Lt) => {
                let label = self.parse_angle_label()?;
                self.parse_labeled_statement(label)
            }
            _ => Err(self.error_expected("statement")),
        }
    }

    fn parse_keyword_statement(&mut self, keyword: Keyword) -> Result<Statement, ParseError> {
        match keyword {
            Keyword::Select => self.parse_query_statement(),
            Keyword::With => self.parse_with_statement(),
            Keyword::Insert => Ok(Statement::Insert(Box::new(self.parse_insert_statement()?))),
            Keyword::Update => Ok(Statement::Update(Box::new(self.parse_update_statement()?))),
            Keyword::Delete => Ok(Statement::Delete(Box::new(self.parse_delete_statement()?))),
            Keyword::Create => self.parse_create_statement(),
            Keyword::Drop => Ok(Statement::Drop(Box::new(self.parse_drop_statement()?))),
            Keyword::Alter => Ok(Statement::AlterTable(Box::new(
                self.parse_alter_table_statement()?,
            ))),
            Keyword::Begin => self.parse_begin_statement(),
            Keyword::Start => Ok(Statement::BeginTransaction(
                self.parse_start_transaction()?,
            )),
            Keyword::Commit => Ok(Statement::Commit(self.parse_commit_statement()?)),
            Keyword::Rollback => Ok(Statement::Rollback(self.parse_rollback_statement()?)),
            Keyword::Savepoint | Keyword::Save => {
                Ok(Statement::Savepoint(self.parse_savepoint_statement()?))
            }
            Keyword::Release => Ok(Statement::ReleaseSavepoint(
                self.parse_release_statement()?,
            )),
            Keyword::Explain => Ok(Statement::Explain(Box::new(
                self.parse_explain_statement()?,
            ))),
            Keyword::Declare => self.parse_declare_statement(),
            Keyword::If => Ok(Statement::If(Box::new(self.parse_if_statement()?))),
            Keyword::While => Ok(Statement::While(Box::new(self.parse_while_statement(None)?))),
            Keyword::Loop => Ok(Statement::Loop(self.parse_loop_statement(None)?)),
            Keyword::Repeat => Ok(Statement::Repeat(Box::new(
                self.parse_repeat_statement(None)?,
            ))),
            Keyword::For => Ok(Statement::For(Box::new(self.parse_for_statement(None)?))),
            Keyword::Case => Ok(Statement::Case(Box::new(self.parse_case_statement()?))),
            Keyword::Return => Ok(Statement::Return(self.parse_return_statement()?)),
            Keyword::Set => self.parse_set_statement(),
            Keyword::Open => Ok(Statement::Open(self.parse_open_statement()?)),
            Keyword::Fetch => Ok(Statement::Fetch(Box::new(self.parse_fetch_statement()?))),
            Keyword::Close => Ok(Statement::Close(self.parse_close_statement()?)),
            Keyword::Deallocate => Ok(Statement::Deallocate(self.parse_deallocate_statement()?)),
            Keyword::Exit | Keyword::Leave | Keyword::Break => {
                Ok(Statement::Exit(self.parse_exit_statement()?))
            }
            Keyword::Continue | Keyword::Iterate => {
                Ok(Statement::Continue(self.parse_continue_statement()?))
            }
            Keyword::Raise | Keyword::Raiserror => {
                Ok(Statement::Raise(Box::new(self.parse_raise_statement()?)))
            }
            Keyword::Throw => Ok(Statement::Throw(Box::new(self.parse_throw_statement()?))),
            Keyword::Signal | Keyword::Resignal => {
                Ok(Statement::Signal(Box::new(self.parse_signal_statement()?)))
            }
            Keyword::Call | Keyword::Exec | Keyword::Execute => {
                Ok(Statement::Call(self.parse_call_statement()?))
            }
            _ => Err(self.error_expected("statement")),
        }
    }

    /// Parses statements until one of `terminators` (or the end of the
    /// batch) is reached. Semicolons between statements are consumed.
    pub(super) fn parse_statement_list(
        &mut self,
        terminators: &[Keyword],
    ) -> Result<Vec<Statement>, ParseError> {
        let mut statements = Vec::new();
        loop {
            self.skip_semicolons();
            if self.is_at_end()
                || self.at_batch_separator()
                || terminators.iter().any(|kw| self.check_keyword(*kw))
            {
                return Ok(statements);
            }
            match self.dispatch_statement() {
                Ok(statement) => statements.push(statement),
                Err(error) if self.recover_in_lists && !self.cancelled => {
                    self.record_error(&error);
                    self.synchronize();
                }
                Err(error) => return Err(error),
            }
        }
    }

    // ===================================================================
    // Errors and recovery
    // ===================================================================

    fn record_error(&mut self, error: &ParseError) {
        // Cancellation is recorded once, when the deadline is first seen.
        if error.is_cancelled() {
            return;
        }
        debug!(
            kind = error.kind.as_str(),
            line = error.span.line,
            column = error.span.column,
            "{}",
            error.message
        );
        self.errors.push(error.clone());
        self.errors.append(&mut self.deferred_errors);
    }

    /// Queues errors to be recorded right after the next recorded error.
    pub(super) fn defer_errors(&mut self, errors: impl IntoIterator<Item = ParseError>) {
        self.deferred_errors.extend(errors);
    }

    /// Skips to just past the next `;` (or batch separator).
    fn synchronize(&mut self) {
        while !self.is_at_end()
            && !self.check(&TokenKind::Semicolon)
            && !self.at_batch_separator()
        {
            self.advance();
        }
        self.skip_separators();
    }

    /// Stops the parser after the deadline has passed.
    pub(super) fn cancel(&mut self) {
        if self.cancelled {
            return;
        }
        let span = self.current.span;
        warn!(
            line = span.line,
            column = span.column,
            "parse deadline expired"
        );
        self.cancelled = true;
        self.errors.push(ParseError::cancelled(span));
        self.current = Token::new(TokenKind::Eof, "", span);
        self.peek = self.current.clone();
    }

    /// Builds the error for a mismatch at the current token.
    pub(super) fn error_expected(&self, expected: &str) -> ParseError {
        if self.cancelled {
            ParseError::cancelled(self.current.span)
        } else {
            ParseError::unexpected(expected, &self.current)
        }
    }

    pub(super) fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    // ===================================================================
    // Token cursor
    // ===================================================================

    /// Advances to the next token, consulting the deadline first.
    pub(super) fn advance(&mut self) {
        if self.cancelled {
            return;
        }
        if self
            .deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
        {
            self.cancel();
            return;
        }
        let next = self.lexer.next_token();
        let current = mem::replace(&mut self.peek, next);
        self.previous = mem::replace(&mut self.current, current);
        self.count_current();
    }

    fn count_current(&mut self) {
        if self.current.is_eof() {
            if self.eof_counted {
                return;
            }
            self.eof_counted = true;
        }
        self.tokens_processed += 1;
    }

    /// Returns the rules of the active dialect.
    pub(super) fn rules(&self) -> &'static dyn Dialect {
        self.dialect.dialect()
    }

    /// Fails unless the active dialect accepts `feature`.
    pub(super) fn require_feature(&self, feature: Feature, span: Span) -> Result<(), ParseError> {
        if self.rules().supports_feature(feature) {
            Ok(())
        } else {
            Err(ParseError::feature_not_supported(feature, self.dialect, span))
        }
    }

    /// Checks if the current token is of the given kind.
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        self.current.kind == *kind
    }

    /// Checks if the lookahead token is of the given kind.
    pub(super) fn check_peek(&self, kind: &TokenKind) -> bool {
        self.peek.kind == *kind
    }

    /// Checks if the current token is the given keyword.
    pub(super) fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(&self.current.kind, TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Checks if the lookahead token is the given keyword.
    pub(super) fn peek_keyword(&self, keyword: Keyword) -> bool {
        matches!(&self.peek.kind, TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Checks if the current token is the bare word `word` (a non-keyword
    /// such as `MAX` or `OUTPUT`), ignoring case.
    pub(super) fn check_word(&self, word: &str) -> bool {
        self.current.kind == TokenKind::Identifier && self.current.literal.eq_ignore_ascii_case(word)
    }

    /// Consumes the current token if it is of the given kind.
    pub(super) fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is the given keyword.
    pub(super) fn consume_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is the bare word `word`.
    pub(super) fn consume_word(&mut self, word: &str) -> bool {
        if self.check_word(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects the current token to be the given kind.
    pub(super) fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.consume(kind) {
            Ok(())
        } else {
            Err(self.error_expected(kind.describe()))
        }
    }

    /// Expects the current token to be the given keyword.
    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.consume_keyword(keyword) {
            Ok(())
        } else {
            Err(self.error_expected(keyword.as_str()))
        }
    }

    /// Expects the bare word `word`.
    pub(super) fn expect_word(&mut self, word: &str) -> Result<(), ParseError> {
        if self.consume_word(word) {
            Ok(())
        } else {
            Err(self.error_expected(word))
        }
    }

    /// Returns true if `token` can name an object: a bare or quoted
    /// identifier, or a keyword that is not reserved.
    pub(super) const fn is_identifier(token: &Token) -> bool {
        match token.kind {
            TokenKind::Identifier | TokenKind::QuotedIdentifier => true,
            TokenKind::Keyword(kw) => !kw.is_reserved(),
            _ => false,
        }
    }

    pub(super) const fn at_identifier(&self) -> bool {
        Self::is_identifier(&self.current)
    }

    /// Expects and returns an identifier.
    pub(super) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if self.at_identifier() {
            Ok(self.take_literal())
        } else {
            Err(self.error_expected("identifier"))
        }
    }

    /// Returns the current literal and advances.
    pub(super) fn take_literal(&mut self) -> String {
        let literal = self.current.literal.clone();
        self.advance();
        literal
    }

    /// Returns true if `token` is the dialect's batch separator (`GO`).
    pub(super) fn is_batch_separator(&self, token: &Token) -> bool {
        token.kind == TokenKind::Identifier
            && self
                .rules()
                .batch_separator()
                .is_some_and(|separator| token.literal.eq_ignore_ascii_case(separator))
    }

    pub(super) fn at_batch_separator(&self) -> bool {
        self.is_batch_separator(&self.current)
    }

    /// Returns true at `;`, the end of input or a batch separator.
    pub(super) fn at_terminator(&self) -> bool {
        self.check(&TokenKind::Semicolon) || self.is_at_end() || self.at_batch_separator()
    }

    pub(super) fn skip_semicolons(&mut self) {
        while self.consume(&TokenKind::Semicolon) {}
    }

    fn skip_separators(&mut self) {
        while self.check(&TokenKind::Semicolon) || self.at_batch_separator() {
            if self.cancelled {
                return;
            }
            self.advance();
        }
    }

    // ===================================================================
    // Shared list helpers
    // ===================================================================

    /// Parses a possibly qualified name; all but the last part form the schema.
    pub(super) fn parse_object_name(&mut self) -> Result<ObjectName, ParseError> {
        let mut parts = vec![self.expect_identifier()?];
        while self.check(&TokenKind::Dot) && Self::is_identifier(&self.peek) {
            self.advance();
            parts.push(self.expect_identifier()?);
        }
        let name = parts.pop().unwrap_or_default();
        let schema = (!parts.is_empty()).then(|| parts.join("."));
        Ok(ObjectName { schema, name })
    }

    /// Parses `a, b, c`.
    pub(super) fn parse_identifier_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut identifiers = vec![self.expect_identifier()?];
        while self.consume(&TokenKind::Comma) {
            identifiers.push(self.expect_identifier()?);
        }
        Ok(identifiers)
    }

    /// Parses `(a, b, c)`.
    pub(super) fn parse_parenthesized_identifiers(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let identifiers = self.parse_identifier_list()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(identifiers)
    }

    /// Parses a possibly qualified variable or column name into one string.
    pub(super) fn parse_qualified_identifier(&mut self) -> Result<String, ParseError> {
        let mut name = self.expect_identifier()?;
        while self.consume(&TokenKind::Dot) {
            name.push('.');
            name.push_str(&self.expect_identifier()?);
        }
        Ok(name)
    }

    /// Parses an optional label after `END`, `END LOOP` and similar.
    pub(super) fn parse_end_label(&mut self) -> Option<String> {
        let is_label = matches!(
            self.current.kind,
            TokenKind::Identifier | TokenKind::QuotedIdentifier
        ) && !self.at_batch_separator()
            && !self.check_peek(&TokenKind::Colon)
            && !self.check_peek(&TokenKind::ColonAssign);
        is_label.then(|| self.take_literal())
    }
}

impl Iterator for Parser<'_> {
    type Item = Result<Statement, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_separators();
        if self.is_at_end() {
            return None;
        }
        Some(self.parse_statement())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParseErrorKind;

    #[test]
    fn test_default_options() {
        let options = ParserOptions::default();
        assert_eq!(options.dialect, DialectKind::SqlServer);
        assert!(options.deadline.is_none());
        let options = ParserOptions::new()
            .with_dialect(DialectKind::Sqlite)
            .with_timeout(Duration::from_secs(5));
        assert_eq!(options.dialect, DialectKind::Sqlite);
        assert!(options.deadline.is_some());
    }

    #[test]
    fn test_tokens_processed_counts_eof_once() {
        let sql = "SELECT id FROM users WHERE id = 1;";
        let expected = Lexer::new(sql).tokenize().len();
        let mut parser = Parser::new(sql);
        let statements = parser.parse_statements().unwrap();
        assert_eq!(statements.len(), 1);
        assert_eq!(parser.metrics().tokens_processed, expected);
        assert_eq!(parser.metrics().error_count, 0);
    }

    #[test]
    fn test_recovers_after_error() {
        let mut parser = Parser::new("SELECT FROM; SELECT 2;");
        assert!(parser.parse_statement().is_err());
        let statement = parser.parse_statement().unwrap();
        assert_eq!(statement.to_string(), "SELECT 2");
        assert!(parser.is_at_end());
        assert_eq!(parser.errors().len(), 1);
        assert_eq!(parser.errors()[0].kind, ParseErrorKind::Syntax);
    }

    #[test]
    fn test_iterator_yields_each_statement() {
        let parser = Parser::new("SELECT 1; GO\nSELECT 2 ;; SELECT 3");
        let results: Vec<_> = parser.collect();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(Result::is_ok));
    }

    #[test]
    fn test_expired_deadline_cancels() {
        let options = ParserOptions::new().with_deadline(Instant::now());
        let mut parser = Parser::with_options("SELECT a FROM t", options);
        let error = parser.parse_statement().unwrap_err();
        assert!(error.is_cancelled());
        assert!(parser.is_cancelled());
        assert!(parser.is_at_end());
        assert_eq!(parser.errors().len(), 1);
        assert_eq!(parser.error_messages()[0], "parsing cancelled at line 1, column 1");
        assert!(parser.next().is_none());
    }

    #[test]
    fn test_empty_input() {
        let mut parser = Parser::new("  -- nothing here\n");
        assert!(parser.is_at_end());
        assert_eq!(parser.parse_statements().unwrap(), vec![]);
        assert_eq!(parser.metrics().tokens_processed, 1);
    }

    #[test]
    fn test_unknown_statement() {
        let mut parser = Parser::new("FROBNICATE x");
        let error = parser.parse_statement().unwrap_err();
        assert_eq!(error.message, "expected statement, got identifier \"FROBNICATE\"");
        assert_eq!(parser.error_messages().len(), 1);
    }

    #[test]
    fn test_set_dialect() {
        let mut parser = Parser::new("SELECT 1; SELECT 2; SELECT `x` FROM t");
        assert!(parser.parse_statement().is_ok());
        parser.set_dialect(DialectKind::MySql);
        assert_eq!(parser.dialect(), DialectKind::MySql);
        assert!(parser.parse_statement().is_ok());
        assert!(parser.parse_statement().is_ok());
    }
}
