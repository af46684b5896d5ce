//! Integration tests for CREATE PROCEDURE and CREATE FUNCTION.

mod common;
use common::*;

use polysql_core::ast::{
    DataType, Declaration, Expr, HandlerCondition, ParameterMode, Statement, Volatility,
};
use polysql_core::{DialectKind, ParseErrorKind};

// ============================================================================
// SQL Server
// ============================================================================

#[test]
fn test_tsql_scalar_function_with_block() {
    let Statement::CreateFunction(function) = parse(
        "CREATE FUNCTION dbo.fn_tax(@amount DECIMAL(10, 2)) RETURNS DECIMAL(10, 2) \
         WITH SCHEMABINDING AS
         BEGIN
             DECLARE @rate DECIMAL(4, 2) = 0.08;
             RETURN @amount * @rate;
         END",
    ) else {
        panic!("Expected CREATE FUNCTION statement");
    };
    assert_eq!(function.name.schema.as_deref(), Some("dbo"));
    assert_eq!(function.parameters[0].name.as_deref(), Some("@amount"));
    assert_eq!(function.return_type.to_string(), "DECIMAL(10, 2)");

    let [Declaration::Variable(rate)] = function.body.declarations.as_slice() else {
        panic!("Expected one variable declaration");
    };
    assert_eq!(rate.names, vec!["@rate"]);
    assert!(rate.default.is_some());

    let [Statement::Return(ret)] = function.body.statements.as_slice() else {
        panic!("Expected RETURN statement");
    };
    assert!(matches!(ret.value, Some(Expr::Binary(_))));
}

#[test]
fn test_tsql_inline_table_function() {
    let Statement::CreateFunction(function) = parse(
        "CREATE FUNCTION dbo.fn_orders(@uid INT) RETURNS TABLE AS \
         RETURN (SELECT id FROM orders WHERE user_id = @uid)",
    ) else {
        panic!("Expected CREATE FUNCTION statement");
    };
    assert_eq!(function.return_type.name, "TABLE");
    assert_eq!(function.body.statements.len(), 1);
}

#[test]
fn test_tsql_table_variable_result() {
    let Statement::CreateFunction(function) = parse(
        "CREATE FUNCTION dbo.fn_ids() RETURNS @result TABLE (id INT) AS
         BEGIN
             INSERT INTO @result VALUES (1);
             RETURN;
         END",
    ) else {
        panic!("Expected CREATE FUNCTION statement");
    };
    assert_eq!(function.return_type.name, "TABLE");
    assert!(function.parameters.is_empty());
    let Statement::Return(ret) = &function.body.statements[1] else {
        panic!("Expected RETURN statement");
    };
    assert!(ret.value.is_none());
}

#[test]
fn test_tsql_procedure_body_ends_at_batch_separator() {
    let statements = parse_all(
        "CREATE PROC usp_touch WITH RECOMPILE AS
         UPDATE t SET touched = 1;
         SELECT COUNT(*) FROM t
         GO
         EXEC usp_touch",
        DialectKind::SqlServer,
    );
    assert_eq!(statements.len(), 2);
    let Statement::CreateProcedure(procedure) = &statements[0] else {
        panic!("Expected CREATE PROCEDURE statement");
    };
    assert_eq!(procedure.name.name, "usp_touch");
    assert!(procedure.parameters.is_empty());
    assert_eq!(procedure.body.statements.len(), 2);
    assert!(matches!(statements[1], Statement::Call(_)));
}

// ============================================================================
// MySQL
// ============================================================================

#[test]
fn test_mysql_function_single_statement_body() {
    let Statement::CreateFunction(function) = parse_with(
        "CREATE FUNCTION hello(s CHAR(20)) RETURNS CHAR(50) DETERMINISTIC COMMENT 'greets' \
         RETURN CONCAT('Hello, ', s, '!')",
        DialectKind::MySql,
    ) else {
        panic!("Expected CREATE FUNCTION statement");
    };
    assert_eq!(function.options.deterministic, Some(true));
    assert_eq!(function.options.comment.as_deref(), Some("greets"));
    let [Statement::Return(ret)] = function.body.statements.as_slice() else {
        panic!("Expected RETURN statement");
    };
    assert!(matches!(ret.value, Some(Expr::Function(_))));
}

#[test]
fn test_mysql_procedure_with_handler_and_nested_block() {
    let Statement::CreateProcedure(procedure) = parse_with(
        "CREATE PROCEDURE drain(INOUT remaining INT)
         BEGIN
             DECLARE finished INT DEFAULT 0;
             DECLARE CONTINUE HANDLER FOR NOT FOUND SET finished = 1;
             BEGIN
                 SELECT remaining;
             END;
         END",
        DialectKind::MySql,
    ) else {
        panic!("Expected CREATE PROCEDURE statement");
    };
    assert_eq!(procedure.parameters[0].mode, Some(ParameterMode::InOut));
    assert_eq!(procedure.parameters[0].to_string(), "INOUT remaining INT");

    assert_eq!(procedure.body.declarations.len(), 2);
    let Declaration::Handler(handler) = &procedure.body.declarations[1] else {
        panic!("Expected handler declaration");
    };
    assert_eq!(handler.conditions, vec![HandlerCondition::NotFound]);

    let [Statement::Block(inner)] = procedure.body.statements.as_slice() else {
        panic!("Expected nested block");
    };
    assert_eq!(inner.statements.len(), 1);
}

#[test]
fn test_mysql_rejects_variadic() {
    let error = parse_err_with(
        "CREATE FUNCTION f(VARIADIC p INT) RETURNS INT RETURN 1",
        DialectKind::MySql,
    );
    assert_eq!(error.kind, ParseErrorKind::Structural);
    assert_eq!(error.message, "feature VARIADIC not supported in dialect mysql");
}

// ============================================================================
// PostgreSQL
// ============================================================================

#[test]
fn test_plpgsql_exception_section() {
    let Statement::CreateFunction(function) = parse_with(
        "CREATE FUNCTION safe_div(a NUMERIC, b NUMERIC) RETURNS NUMERIC AS $$
         BEGIN
             RETURN a / b;
         EXCEPTION
             WHEN division_by_zero OR numeric_value_out_of_range THEN
                 RETURN NULL;
             WHEN OTHERS THEN
                 RAISE;
         END
         $$ LANGUAGE plpgsql STABLE",
        DialectKind::PostgreSql,
    ) else {
        panic!("Expected CREATE FUNCTION statement");
    };
    assert_eq!(function.options.volatility, Some(Volatility::Stable));
    assert_eq!(function.body.statements.len(), 1);

    let exception = function.body.exception.as_ref().unwrap();
    assert_eq!(exception.handlers.len(), 2);
    assert_eq!(
        exception.handlers[0].conditions,
        vec!["division_by_zero", "numeric_value_out_of_range"]
    );
    assert!(!exception.handlers[0].is_catch_all());
    assert!(exception.handlers[1].is_catch_all());
}

#[test]
fn test_sql_function_in_string_body() {
    let Statement::CreateFunction(function) = parse_with(
        "CREATE FUNCTION add(a INT, b INT) RETURNS INT AS 'SELECT a + b' LANGUAGE sql IMMUTABLE",
        DialectKind::PostgreSql,
    ) else {
        panic!("Expected CREATE FUNCTION statement");
    };
    assert_eq!(function.options.language.as_deref(), Some("SQL"));
    assert!(!function.options.is_plpgsql());
    assert_eq!(function.options.volatility, Some(Volatility::Immutable));
    let [Statement::Select(_)] = function.body.statements.as_slice() else {
        panic!("Expected a single SELECT in the body");
    };
}

#[test]
fn test_variadic_parameter() {
    let Statement::CreateFunction(function) = parse_with(
        "CREATE FUNCTION concat_all(VARIADIC parts TEXT) RETURNS TEXT AS $$ SELECT 'x' $$ LANGUAGE sql",
        DialectKind::PostgreSql,
    ) else {
        panic!("Expected CREATE FUNCTION statement");
    };
    assert!(function.parameters[0].variadic);
    assert_eq!(function.parameters[0].name.as_deref(), Some("parts"));
}

#[test]
fn test_variadic_array_parameter() {
    let Statement::CreateFunction(function) = parse_with(
        "CREATE FUNCTION sum_all(VARIADIC xs INT[]) RETURNS INT[][2] AS $$ SELECT 1 $$ LANGUAGE sql",
        DialectKind::PostgreSql,
    ) else {
        panic!("Expected CREATE FUNCTION statement");
    };
    let parameter = &function.parameters[0];
    assert!(parameter.variadic);
    assert_eq!(parameter.data_type, DataType::new("INT").with_array_dimension(None));
    assert_eq!(parameter.data_type.to_string(), "INT[]");
    assert!(!parameter.data_type.is_numeric());
    assert_eq!(function.return_type.array_dimensions, vec![None, Some(2)]);
    assert_eq!(function.return_type.to_string(), "INT[][2]");
}

#[test]
fn test_array_type_outside_postgres() {
    let error = parse_err_with("CREATE TABLE t (tags TEXT[])", DialectKind::MySql);
    assert_eq!(error.kind, ParseErrorKind::Syntax);
}

#[test]
fn test_unnamed_parameters() {
    let Statement::CreateFunction(function) = parse_with(
        "CREATE FUNCTION pair(INT, TEXT) RETURNS INT AS $$ SELECT 1 $$ LANGUAGE sql",
        DialectKind::PostgreSql,
    ) else {
        panic!("Expected CREATE FUNCTION statement");
    };
    assert_eq!(function.parameters.len(), 2);
    assert!(function.parameters.iter().all(|p| p.name.is_none()));
}

#[test]
fn test_trailing_text_in_dollar_body() {
    let error = parse_err_with(
        "CREATE FUNCTION f() RETURNS INT AS $$ BEGIN RETURN 1; END; SELECT 2 $$ LANGUAGE plpgsql",
        DialectKind::PostgreSql,
    );
    assert_eq!(error.kind, ParseErrorKind::Syntax);
    assert!(error.message.starts_with("expected end of routine body"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unclosed_parameter_list() {
    let error = parse_err_with("CREATE PROCEDURE p(IN a INT BEGIN END", DialectKind::MySql);
    assert_eq!(error.kind, ParseErrorKind::Syntax);
}
