//! Tests for how the active dialect changes lexing and feature gating.

mod common;
use common::*;

use polysql_core::ast::{Expr, Literal, Statement};
use polysql_core::{DialectKind, Feature, ParseErrorKind, Parser};

// ============================================================================
// Feature gating
// ============================================================================

/// A statement that exercises each gated feature in a dialect-neutral way.
const GATED: [(Feature, &str); 3] = [
    (
        Feature::MaterializedView,
        "CREATE MATERIALIZED VIEW mv AS SELECT a FROM t",
    ),
    (
        Feature::Variadic,
        "CREATE FUNCTION f(VARIADIC p INT) RETURNS INT RETURN 1",
    ),
    (
        Feature::Plpgsql,
        "CREATE FUNCTION f() RETURNS INT LANGUAGE plpgsql RETURN 1",
    ),
];

#[test]
fn gated_features_follow_dialect_support() {
    for (feature, sql) in GATED {
        for dialect in DialectKind::ALL {
            let supported = dialect.dialect().supports_feature(feature);
            let result = Parser::with_dialect(sql, dialect).parse_statement();
            if supported {
                assert!(result.is_ok(), "{feature} should parse in {dialect}: {result:?}");
            } else {
                let error = result.unwrap_err();
                assert_eq!(error.kind, ParseErrorKind::Structural);
                assert_eq!(
                    error.message,
                    format!("feature {feature} not supported in dialect {dialect}")
                );
            }
        }
    }
}

#[test]
fn gating_error_points_at_the_feature() {
    let error = parse_err("CREATE\n  MATERIALIZED VIEW mv AS SELECT 1");
    assert_eq!(error.span.line, 2);
    assert_eq!(error.span.column, 3);
}

#[test]
fn limit_parses_in_every_dialect() {
    for dialect in DialectKind::ALL {
        let s = parse_select_with("SELECT a FROM t LIMIT 10 OFFSET 5", dialect);
        assert_eq!(s.limit, Some(Expr::integer(10)), "{dialect}");
        assert_eq!(s.offset, Some(Expr::integer(5)), "{dialect}");
    }
}

#[test]
fn limit_in_default_dialect() {
    let s = parse_select("SELECT TOP 3 a FROM t ORDER BY a LIMIT 2");
    assert!(s.top.is_some());
    assert_eq!(s.limit, Some(Expr::integer(2)));
}

#[test]
fn top_is_a_clause_only_in_sqlserver() {
    let s = parse_select("SELECT TOP (10) PERCENT name FROM t");
    let top = s.top.as_ref().unwrap();
    assert!(top.percent);
    assert_eq!(s.columns, vec![Expr::column("name")]);

    for dialect in [DialectKind::MySql, DialectKind::PostgreSql, DialectKind::Sqlite] {
        let s = parse_select_with("SELECT top FROM t", dialect);
        assert!(s.top.is_none());
        assert_eq!(s.columns, vec![Expr::column("top")]);
    }
}

#[test]
fn auto_increment_spellings_are_not_gated() {
    for dialect in DialectKind::ALL {
        for sql in [
            "CREATE TABLE t (id INT AUTO_INCREMENT)",
            "CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT)",
            "CREATE TABLE t (id INT IDENTITY(1, 1))",
        ] {
            assert!(
                Parser::with_dialect(sql, dialect).parse_statement().is_ok(),
                "{sql} in {dialect}"
            );
        }
    }
}

// ============================================================================
// Quoting
// ============================================================================

#[test]
fn double_quotes_are_strings_in_mysql() {
    let s = parse_select_with("SELECT \"done\" FROM t", DialectKind::MySql);
    assert_eq!(s.columns, vec![Expr::string("done")]);

    let s = parse_select_with("SELECT \"done\" FROM t", DialectKind::PostgreSql);
    assert_eq!(s.columns, vec![Expr::column("done")]);
}

#[test]
fn sqlite_accepts_every_identifier_quote() {
    let s = parse_select_with("SELECT \"a\", `b`, [c] FROM t", DialectKind::Sqlite);
    assert_eq!(
        s.columns,
        vec![Expr::column("a"), Expr::column("b"), Expr::column("c")]
    );
}

#[test]
fn national_strings_in_sqlserver() {
    let s = parse_select("SELECT N'größe'");
    assert_eq!(s.columns, vec![Expr::string("größe")]);
}

#[test]
fn dollar_quoted_string_literal() {
    let s = parse_select_with("SELECT $q$it's$q$", DialectKind::PostgreSql);
    assert_eq!(
        s.columns,
        vec![Expr::Literal(Literal::String(String::from("it's")))]
    );
}

#[test]
fn hash_comments_only_in_mysql() {
    let statements = parse_all("SELECT 1 # trailing note\n; SELECT 2", DialectKind::MySql);
    assert_eq!(statements.len(), 2);

    let mut parser = Parser::with_dialect("SELECT 1 # note", DialectKind::PostgreSql);
    let results: Vec<_> = parser.by_ref().collect();
    assert!(results.iter().any(Result::is_err));
}

// ============================================================================
// Variables and separators
// ============================================================================

#[test]
fn prefixed_variables() {
    let s = parse_select("SELECT @total FROM t WHERE id = @id");
    assert_eq!(s.columns, vec![Expr::column("@total")]);

    let s = parse_select_with("SELECT a FROM t WHERE id = $id", DialectKind::Sqlite);
    let Some(Expr::Binary(condition)) = &s.where_clause else {
        panic!("Expected binary WHERE condition");
    };
    assert_eq!(condition.right, Expr::column("$id"));

    let s = parse_select_with("SELECT a FROM t WHERE id = $1", DialectKind::PostgreSql);
    assert!(s.where_clause.is_some());
}

#[test]
fn go_separates_sqlserver_batches() {
    let statements = parse_all(
        "CREATE TABLE t (id INT)\nGO\nINSERT INTO t VALUES (1)\ngo\nSELECT id FROM t",
        DialectKind::SqlServer,
    );
    let tags: Vec<_> = statements.iter().map(Statement::type_tag).collect();
    assert_eq!(
        tags,
        vec!["CreateTableStatement", "InsertStatement", "SelectStatement"]
    );
}

#[test]
fn switching_dialect_mid_script() {
    let mut parser = Parser::new(
        "SELECT TOP 1 a FROM t;\nSELECT 1;\nCREATE MATERIALIZED VIEW mv AS SELECT a FROM t;",
    );
    assert!(parser.parse_statement().is_ok());
    parser.set_dialect(DialectKind::PostgreSql);
    assert!(parser.parse_statement().is_ok());
    let Statement::CreateView(view) = parser.parse_statement().unwrap() else {
        panic!("Expected CREATE VIEW statement");
    };
    assert!(view.materialized);
}

#[test]
fn dialect_names_parse() {
    for (name, kind) in [
        ("sqlserver", DialectKind::SqlServer),
        ("mysql", DialectKind::MySql),
        ("postgresql", DialectKind::PostgreSql),
        ("sqlite", DialectKind::Sqlite),
    ] {
        assert_eq!(name.parse::<DialectKind>(), Ok(kind));
        assert_eq!(kind.as_str(), name);
    }
    assert!("db2".parse::<DialectKind>().is_err());
}

// ============================================================================
// Keyword case
// ============================================================================

/// The same script with keywords in lower case and in upper case. Names,
/// function names and literals are spelled identically in both.
const LOWER_SCRIPT: &str = "\
select distinct a, count(*) as n from t where b in (1, 2) and c is not null \
group by a having count(*) > 1 order by a desc;
select case when a is null then 0 else a end from t \
where exists (select 1 from u union all select 2);
insert into t (a, b) values (1, 'x'), (2, 'y');
update t set a = 2 where a = 1;
delete from t where a between 1 and 3;
create table u (id int primary key, name varchar(10) not null);
create index ix on u (name desc);
drop table if exists u;";

const UPPER_SCRIPT: &str = "\
SELECT DISTINCT a, count(*) AS n FROM t WHERE b IN (1, 2) AND c IS NOT NULL \
GROUP BY a HAVING count(*) > 1 ORDER BY a DESC;
SELECT CASE WHEN a IS NULL THEN 0 ELSE a END FROM t \
WHERE EXISTS (SELECT 1 FROM u UNION ALL SELECT 2);
INSERT INTO t (a, b) VALUES (1, 'x'), (2, 'y');
UPDATE t SET a = 2 WHERE a = 1;
DELETE FROM t WHERE a BETWEEN 1 AND 3;
CREATE TABLE u (id INT PRIMARY KEY, name VARCHAR(10) NOT NULL);
CREATE INDEX ix ON u (name DESC);
DROP TABLE IF EXISTS u;";

#[test]
fn keyword_case_yields_identical_trees() {
    for dialect in DialectKind::ALL {
        let lower = parse_all(LOWER_SCRIPT, dialect);
        let upper = parse_all(UPPER_SCRIPT, dialect);
        assert_eq!(lower.len(), 8, "statement count in {dialect}");
        assert_eq!(lower, upper, "trees differ in {dialect}");
    }
}

#[test]
fn mixed_case_keywords_match_upper_case() {
    for dialect in DialectKind::ALL {
        let mixed = parse_all("SeLeCt a FrOm t WhErE a Is NoT nUlL oRdEr By a", dialect);
        let upper = parse_all("SELECT a FROM t WHERE a IS NOT NULL ORDER BY a", dialect);
        assert_eq!(mixed, upper, "trees differ in {dialect}");
    }
}
