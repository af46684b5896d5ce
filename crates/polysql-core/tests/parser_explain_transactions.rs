//! Tests for EXPLAIN and transaction control statements.

mod common;
use common::*;

use polysql_core::ast::Statement;
use polysql_core::{DialectKind, ParseErrorKind};

// ============================================================================
// EXPLAIN
// ============================================================================

#[test]
fn explain_postgres_option_list() {
    let sql = "EXPLAIN (ANALYZE, FORMAT JSON) SELECT 1";
    let Statement::Explain(explain) = parse_with(sql, DialectKind::PostgreSql) else {
        panic!("Expected EXPLAIN statement");
    };
    assert!(explain.analyze);
    assert!(!explain.verbose);
    assert_eq!(explain.format.as_deref(), Some("JSON"));
    assert!(matches!(*explain.statement, Statement::Select(_)));
    assert_eq!(explain.to_string(), "EXPLAIN ANALYZE FORMAT JSON SELECT 1");
    assert_eq!(
        tags(sql, DialectKind::PostgreSql),
        vec!["ExplainStatement", "SelectStatement", "Literal"]
    );
}

#[test]
fn explain_postgres_bare_keywords() {
    let Statement::Explain(explain) = parse_with(
        "EXPLAIN ANALYZE VERBOSE UPDATE t SET a = 1",
        DialectKind::PostgreSql,
    ) else {
        panic!("Expected EXPLAIN statement");
    };
    assert!(explain.analyze);
    assert!(explain.verbose);
    assert!(explain.options.is_empty());
    assert!(matches!(*explain.statement, Statement::Update(_)));
}

#[test]
fn explain_mysql_extended() {
    let Statement::Explain(explain) = parse_with(
        "EXPLAIN EXTENDED SELECT a FROM t WHERE b > 2",
        DialectKind::MySql,
    ) else {
        panic!("Expected EXPLAIN statement");
    };
    assert!(explain.extended);
    assert!(explain.format.is_none());
}

#[test]
fn explain_wraps_with_query() {
    let Statement::Explain(explain) = parse_with(
        "EXPLAIN QUERY PLAN WITH x AS (SELECT 1 AS n) SELECT n FROM x",
        DialectKind::Sqlite,
    ) else {
        panic!("Expected EXPLAIN statement");
    };
    assert!(explain.query_plan);
    assert!(matches!(*explain.statement, Statement::With(_)));
}

#[test]
fn explain_requires_a_statement() {
    let error = parse_err_with("EXPLAIN (ANALYZE)", DialectKind::PostgreSql);
    assert_eq!(error.kind, ParseErrorKind::Syntax);
    assert!(error.message.starts_with("expected statement"));
}

// ============================================================================
// Transactions
// ============================================================================

#[test]
fn transaction_script_with_savepoints() {
    let statements = parse_all(
        "BEGIN;
         INSERT INTO accounts (id, balance) VALUES (1, 100);
         SAVEPOINT before_debit;
         UPDATE accounts SET balance = balance - 10 WHERE id = 1;
         ROLLBACK TO before_debit;
         RELEASE SAVEPOINT before_debit;
         COMMIT;",
        DialectKind::PostgreSql,
    );
    let tags: Vec<_> = statements.iter().map(Statement::type_tag).collect();
    assert_eq!(
        tags,
        vec![
            "BeginTransactionStatement",
            "InsertStatement",
            "SavepointStatement",
            "UpdateStatement",
            "RollbackStatement",
            "ReleaseSavepointStatement",
            "CommitStatement"
        ]
    );

    let Statement::Rollback(rollback) = &statements[4] else {
        panic!("Expected ROLLBACK statement");
    };
    assert_eq!(rollback.to_savepoint.as_deref(), Some("before_debit"));
    assert_eq!(rollback.to_string(), "ROLLBACK TO SAVEPOINT before_debit");
}

#[test]
fn transaction_modes_are_uppercased() {
    let Statement::BeginTransaction(begin) = parse_with(
        "BEGIN TRANSACTION isolation level serializable, read only",
        DialectKind::PostgreSql,
    ) else {
        panic!("Expected BEGIN statement");
    };
    assert!(!begin.use_start);
    assert_eq!(begin.modes, vec!["ISOLATION LEVEL SERIALIZABLE", "READ ONLY"]);
    assert_eq!(
        begin.to_string(),
        "BEGIN TRANSACTION ISOLATION LEVEL SERIALIZABLE, READ ONLY"
    );
}

#[test]
fn tsql_named_transaction_batch() {
    let statements = parse_all(
        "BEGIN TRAN transfer;
         UPDATE accounts SET balance = balance - 10 WHERE id = 1;
         SAVE TRAN halfway;
         ROLLBACK TRAN halfway;
         COMMIT TRANSACTION transfer;",
        DialectKind::SqlServer,
    );
    assert_eq!(statements.len(), 5);

    let Statement::BeginTransaction(begin) = &statements[0] else {
        panic!("Expected BEGIN TRAN statement");
    };
    assert_eq!(begin.name.as_deref(), Some("transfer"));

    let Statement::Rollback(rollback) = &statements[3] else {
        panic!("Expected ROLLBACK statement");
    };
    assert_eq!(rollback.name.as_deref(), Some("halfway"));
    assert!(rollback.to_savepoint.is_none());

    let Statement::Commit(commit) = &statements[4] else {
        panic!("Expected COMMIT statement");
    };
    assert_eq!(commit.name.as_deref(), Some("transfer"));
}

#[test]
fn bare_begin_inside_tsql_is_a_block() {
    let statements = parse_all(
        "BEGIN TRANSACTION\nBEGIN\n  UPDATE t SET a = 1\nEND\nCOMMIT",
        DialectKind::SqlServer,
    );
    let tags: Vec<_> = statements.iter().map(Statement::type_tag).collect();
    assert_eq!(
        tags,
        vec!["BeginTransactionStatement", "BlockStatement", "CommitStatement"]
    );
}

#[test]
fn mysql_start_transaction() {
    let Statement::BeginTransaction(begin) = parse_with(
        "START TRANSACTION WITH CONSISTENT SNAPSHOT, READ WRITE",
        DialectKind::MySql,
    ) else {
        panic!("Expected START TRANSACTION statement");
    };
    assert!(begin.use_start);
    assert_eq!(begin.modes, vec!["WITH CONSISTENT SNAPSHOT", "READ WRITE"]);
}

#[test]
fn sqlite_begin_exclusive() {
    let Statement::BeginTransaction(begin) =
        parse_with("BEGIN EXCLUSIVE TRANSACTION", DialectKind::Sqlite)
    else {
        panic!("Expected BEGIN statement");
    };
    assert_eq!(begin.modes, vec!["EXCLUSIVE"]);
}

#[test]
fn savepoint_requires_a_name() {
    let error = parse_err_with("SAVEPOINT;", DialectKind::Sqlite);
    assert_eq!(error.kind, ParseErrorKind::Syntax);
}
