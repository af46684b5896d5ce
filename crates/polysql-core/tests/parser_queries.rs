//! Tests for SELECT, set operations, WITH and the DML statements across
//! dialects.

mod common;
use common::*;

use polysql_core::ast::{
    BinaryOperator, BoundType, Expr, FrameDirection, FrameType, InValues, InsertSource, JoinType,
    Literal, NullOrdering, OrderDirection, SetOperator, Statement,
};
use polysql_core::{DialectKind, ParseErrorKind};

// ============================================================================
// SELECT basics
// ============================================================================

#[test]
fn select_columns_from_where() {
    let s = parse_select("SELECT id, name FROM users WHERE id = 1");
    assert_eq!(s.columns, vec![Expr::column("id"), Expr::column("name")]);
    assert_eq!(s.from.len(), 1);
    assert_eq!(s.from[0].name, "users");
    assert!(s.from[0].alias.is_none());

    let Some(Expr::Binary(condition)) = &s.where_clause else {
        panic!("Expected binary WHERE condition");
    };
    assert_eq!(condition.left, Expr::column("id"));
    assert_eq!(condition.op, BinaryOperator::Eq);
    assert_eq!(condition.right, Expr::integer(1));
}

#[test]
fn select_without_from() {
    let s = parse_select("SELECT 1.5, 'it''s', NULL, TRUE");
    assert_eq!(
        s.columns,
        vec![
            Expr::Literal(Literal::Float(1.5)),
            Expr::string("it's"),
            Expr::Literal(Literal::Null),
            Expr::Literal(Literal::Boolean(true)),
        ]
    );
    assert!(s.from.is_empty());
}

#[test]
fn select_distinct_group_having_order() {
    let s = parse_select_with(
        "SELECT DISTINCT dept, COUNT(*) AS n FROM emp GROUP BY dept HAVING COUNT(*) > 2 \
         ORDER BY n DESC NULLS LAST",
        DialectKind::PostgreSql,
    );
    assert!(s.distinct);
    assert_eq!(s.group_by, vec![Expr::column("dept")]);
    assert!(s.having.is_some());
    assert_eq!(s.order_by.len(), 1);
    assert_eq!(s.order_by[0].direction, OrderDirection::Desc);
    assert_eq!(s.order_by[0].nulls, Some(NullOrdering::Last));
    assert!(matches!(&s.columns[1], Expr::Aliased(aliased) if aliased.alias == "n"));
}

#[test]
fn keyword_case_does_not_change_shape() {
    let lower = tags(
        "select u.id from users u where u.id in (1, 2) order by u.id",
        DialectKind::MySql,
    );
    let upper = tags(
        "SELECT u.id FROM users u WHERE u.id IN (1, 2) ORDER BY u.id",
        DialectKind::MySql,
    );
    assert_eq!(lower, upper);
    assert_eq!(lower[0], "SelectStatement");
}

// ============================================================================
// Windows and CASE
// ============================================================================

#[test]
fn window_function_with_frame() {
    let s = parse_select(
        "SELECT COUNT(*) OVER (PARTITION BY dept ORDER BY salary \
         ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW) AS c FROM emp",
    );
    let Expr::Aliased(aliased) = &s.columns[0] else {
        panic!("Expected aliased column");
    };
    assert_eq!(aliased.alias, "c");
    let Expr::Window(window) = aliased.expr.as_ref() else {
        panic!("Expected window function");
    };
    assert_eq!(window.function.name, "COUNT");
    assert_eq!(window.over.partition_by, vec![Expr::column("dept")]);
    assert_eq!(window.over.order_by[0].expr, Expr::column("salary"));
    assert_eq!(window.over.order_by[0].direction, OrderDirection::Asc);

    let Some(frame) = &window.over.frame else {
        panic!("Expected window frame");
    };
    assert_eq!(frame.frame_type, FrameType::Rows);
    assert_eq!(frame.start.bound_type, BoundType::Unbounded);
    assert_eq!(frame.start.direction, Some(FrameDirection::Preceding));
    assert_eq!(
        frame.end.as_ref().map(|end| end.bound_type),
        Some(BoundType::Current)
    );
}

#[test]
fn plain_function_has_no_window() {
    let s = parse_select("SELECT UPPER(name) FROM users");
    assert!(matches!(&s.columns[0], Expr::Function(f) if f.name == "UPPER" && f.args.len() == 1));
}

#[test]
fn searched_case_expression() {
    let s = parse_select("SELECT CASE WHEN a > 1 THEN 'big' ELSE 'small' END AS size FROM t");
    let Expr::Aliased(aliased) = &s.columns[0] else {
        panic!("Expected aliased column");
    };
    let Expr::Case(case) = aliased.expr.as_ref() else {
        panic!("Expected CASE expression");
    };
    assert!(case.input.is_none());
    assert_eq!(case.when_clauses.len(), 1);
    assert!(case.else_result.is_some());
}

#[test]
fn case_expression_without_when() {
    let err = parse_err("SELECT CASE x END");
    assert_eq!(err.kind, ParseErrorKind::Structural);
    assert!(err.message.contains("at least one WHEN"));
}

// ============================================================================
// IN, EXISTS and subqueries
// ============================================================================

#[test]
fn in_list_and_subquery() {
    let s = parse_select("SELECT * FROM t WHERE id NOT IN (1, 2, 3)");
    let Some(Expr::In(in_expr)) = &s.where_clause else {
        panic!("Expected IN expression");
    };
    assert!(in_expr.not);
    assert!(matches!(&in_expr.values, InValues::List(values) if values.len() == 3));

    let s = parse_select("SELECT * FROM t WHERE id IN (SELECT user_id FROM orders)");
    let Some(Expr::In(in_expr)) = &s.where_clause else {
        panic!("Expected IN expression");
    };
    assert!(matches!(&in_expr.values, InValues::Subquery(_)));
}

#[test]
fn exists_subquery() {
    let s = parse_select(
        "SELECT name FROM users u WHERE EXISTS (SELECT 1 FROM orders o WHERE o.user_id = u.id)",
    );
    assert!(matches!(&s.where_clause, Some(Expr::Exists(exists)) if !exists.not));
}

#[test]
fn derived_table_takes_alias_as_name() {
    let s = parse_select("SELECT d.x FROM (SELECT 1 AS x) AS d");
    let table = &s.from[0];
    assert!(table.is_derived());
    assert_eq!(table.name, "d");
    assert_eq!(table.alias.as_deref(), Some("d"));
}

#[test]
fn scalar_subquery_with_union() {
    let s = parse_select("SELECT (SELECT 1 UNION SELECT 2) AS n");
    let Expr::Aliased(aliased) = &s.columns[0] else {
        panic!("Expected aliased column");
    };
    let Expr::Subquery(subquery) = aliased.expr.as_ref() else {
        panic!("Expected scalar subquery");
    };
    let Statement::SetOperation(union) = subquery.query.as_ref() else {
        panic!("Expected set operation inside the subquery");
    };
    assert_eq!(union.op, SetOperator::Union);
    assert_eq!(subquery.to_string(), "(SELECT 1 UNION SELECT 2)");
}

#[test]
fn in_and_exists_subqueries_with_union() {
    let s = parse_select(
        "SELECT * FROM t WHERE id IN (SELECT a FROM x UNION ALL SELECT b FROM y) \
         AND EXISTS (SELECT 1 FROM x INTERSECT SELECT 1 FROM y)",
    );
    let Some(Expr::Binary(condition)) = &s.where_clause else {
        panic!("Expected AND condition");
    };
    let Expr::In(in_expr) = &condition.left else {
        panic!("Expected IN expression");
    };
    let InValues::Subquery(subquery) = &in_expr.values else {
        panic!("Expected IN subquery");
    };
    assert!(matches!(subquery.query.as_ref(), Statement::SetOperation(op) if op.all));
    let Expr::Exists(exists) = &condition.right else {
        panic!("Expected EXISTS expression");
    };
    assert!(matches!(
        exists.subquery.query.as_ref(),
        Statement::SetOperation(op) if op.op == SetOperator::Intersect
    ));
}

#[test]
fn derived_table_with_union() {
    let sql = "SELECT d.x FROM (SELECT 1 AS x UNION SELECT 2 AS x) AS d";
    let s = parse_select(sql);
    let table = &s.from[0];
    assert_eq!(table.name, "d");
    assert!(matches!(table.subquery.as_deref(), Some(Statement::SetOperation(_))));
    assert_eq!(
        tags(sql, DialectKind::SqlServer)[..4],
        ["SelectStatement", "ColumnReference", "TableReference", "SetOperation"]
    );
}

#[test]
fn derived_table_without_alias() {
    let err = parse_err("SELECT * FROM (SELECT 1)");
    assert_eq!(err.kind, ParseErrorKind::Structural);
    assert_eq!(err.message, "derived table requires an alias");
}

// ============================================================================
// Joins
// ============================================================================

#[test]
fn join_chain() {
    let s = parse_select(
        "SELECT * FROM a INNER JOIN b ON a.id = b.id LEFT JOIN c USING (id) CROSS JOIN d",
    );
    let types: Vec<_> = s.joins.iter().map(|join| join.join_type).collect();
    assert_eq!(types, vec![JoinType::Inner, JoinType::Left, JoinType::Cross]);
    assert!(s.joins[0].condition.is_some());
    assert_eq!(s.joins[1].using, vec!["id"]);
    assert!(s.joins[2].condition.is_none());
}

#[test]
fn join_requires_condition() {
    let err = parse_err("SELECT * FROM a JOIN b WHERE a.id = 1");
    assert_eq!(err.kind, ParseErrorKind::Syntax);
    assert!(err.message.starts_with("expected ON or USING"));
}

// ============================================================================
// Dialect-specific SELECT forms
// ============================================================================

#[test]
fn sqlserver_brackets_and_hints() {
    let s = parse_select("SELECT [order id] FROM [dbo].[orders] o WITH (nolock)");
    assert_eq!(s.columns, vec![Expr::column("order id")]);
    let table = &s.from[0];
    assert_eq!(table.schema.as_deref(), Some("dbo"));
    assert_eq!(table.name, "orders");
    assert_eq!(table.alias.as_deref(), Some("o"));
    assert_eq!(table.hints, vec!["NOLOCK"]);
}

#[test]
fn sqlserver_select_into_temp_table() {
    let s = parse_select("SELECT id INTO #staging FROM users");
    assert_eq!(s.into, vec!["#staging"]);
}

#[test]
fn sqlserver_offset_fetch() {
    let s = parse_select("SELECT a FROM t ORDER BY a OFFSET 10 ROWS FETCH NEXT 5 ROWS ONLY");
    assert_eq!(s.offset, Some(Expr::integer(10)));
    assert_eq!(s.fetch, Some(Expr::integer(5)));
}

#[test]
fn mysql_backticks_and_limit() {
    let s = parse_select_with(
        "SELECT `name` FROM `users` LIMIT 10 OFFSET 20",
        DialectKind::MySql,
    );
    assert_eq!(s.columns, vec![Expr::column("name")]);
    assert_eq!(s.limit, Some(Expr::integer(10)));
    assert_eq!(s.offset, Some(Expr::integer(20)));
}

#[test]
fn top_is_a_column_name_outside_sqlserver() {
    let s = parse_select_with("SELECT top FROM rankings", DialectKind::Sqlite);
    assert_eq!(s.columns, vec![Expr::column("top")]);
    assert!(s.top.is_none());
}

// ============================================================================
// Set operations and WITH
// ============================================================================

#[test]
fn set_operations_fold_left() {
    let Statement::SetOperation(outer) =
        parse("SELECT a FROM x UNION SELECT a FROM y EXCEPT SELECT a FROM z")
    else {
        panic!("Expected set operation");
    };
    assert_eq!(outer.op, SetOperator::Except);
    let Statement::SetOperation(inner) = outer.left.as_ref() else {
        panic!("Expected nested set operation on the left");
    };
    assert_eq!(inner.op, SetOperator::Union);
    assert!(!inner.all);
    assert!(matches!(outer.right.as_ref(), Statement::Select(_)));
}

#[test]
fn recursive_cte() {
    let Statement::With(with) = parse_with(
        "WITH RECURSIVE t(n) AS (SELECT 1 UNION ALL SELECT n+1 FROM t WHERE n < 5) SELECT * FROM t",
        DialectKind::PostgreSql,
    ) else {
        panic!("Expected WITH statement");
    };
    assert!(with.recursive);
    assert_eq!(with.ctes.len(), 1);
    assert_eq!(with.ctes[0].name, "t");
    assert_eq!(with.ctes[0].columns, vec!["n"]);
    let Statement::SetOperation(body) = with.ctes[0].query.as_ref() else {
        panic!("Expected set operation in CTE body");
    };
    assert_eq!(body.op, SetOperator::Union);
    assert!(body.all);

    let Statement::Select(main) = with.query.as_ref() else {
        panic!("Expected SELECT as the main query");
    };
    assert!(matches!(&main.columns[0], Expr::Star(star) if star.table.is_none()));
    assert_eq!(main.from[0].name, "t");
}

#[test]
fn with_requires_query() {
    let err = parse_err("WITH t AS (SELECT 1) DELETE FROM t");
    assert_eq!(err.kind, ParseErrorKind::Structural);
    assert_eq!(err.message, "WITH must be followed by a query");
}

// ============================================================================
// DML
// ============================================================================

#[test]
fn insert_multiple_rows() {
    let Statement::Insert(insert) =
        parse("INSERT INTO users (id, name) VALUES (1, 'a'), (2, 'b')")
    else {
        panic!("Expected INSERT");
    };
    assert_eq!(insert.table.name, "users");
    assert_eq!(insert.columns, vec!["id", "name"]);
    assert!(matches!(&insert.source, InsertSource::Values(rows) if rows.len() == 2));
}

#[test]
fn insert_from_query_and_defaults() {
    let Statement::Insert(insert) = parse_with(
        "INSERT INTO archive SELECT * FROM users WHERE active = FALSE",
        DialectKind::PostgreSql,
    ) else {
        panic!("Expected INSERT");
    };
    assert!(matches!(&insert.source, InsertSource::Query(query) if matches!(**query, Statement::Select(_))));

    let Statement::Insert(insert) = parse("INSERT INTO audit DEFAULT VALUES") else {
        panic!("Expected INSERT");
    };
    assert_eq!(insert.source, InsertSource::DefaultValues);
}

#[test]
fn update_with_from() {
    let Statement::Update(update) = parse(
        "UPDATE o SET o.total = s.total, o.status = 'done' FROM orders o, summary s \
         WHERE s.id = o.id",
    ) else {
        panic!("Expected UPDATE");
    };
    assert_eq!(update.assignments.len(), 2);
    assert_eq!(update.assignments[0].target, "o.total");
    assert_eq!(update.from.len(), 2);
    assert!(update.where_clause.is_some());
}

#[test]
fn delete_where() {
    let Statement::Delete(delete) = parse_with("DELETE FROM logs WHERE age > 30", DialectKind::Sqlite)
    else {
        panic!("Expected DELETE");
    };
    assert_eq!(delete.table.name, "logs");
    assert!(delete.where_clause.is_some());
}
