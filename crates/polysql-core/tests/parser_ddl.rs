//! Integration tests for CREATE, DROP and ALTER statements.

mod common;
use common::*;

use polysql_core::ast::{
    AlterAction, AutoIncrement, ObjectType, OrderDirection, ReferentialAction, Statement,
    TableConstraintKind, TriggerBody, TriggerEvent, TriggerTiming,
};
use polysql_core::{DialectKind, ParseErrorKind};

// ============================================================================
// CREATE TABLE
// ============================================================================

#[test]
fn test_create_table_with_column_constraints() {
    let Statement::CreateTable(table) = parse_with(
        "CREATE TABLE u (id INT PRIMARY KEY AUTO_INCREMENT, name VARCHAR(64) NOT NULL, \
         dept_id INT REFERENCES dept(id) ON DELETE CASCADE)",
        DialectKind::MySql,
    ) else {
        panic!("Expected CREATE TABLE statement");
    };

    assert_eq!(table.name.name, "u");
    assert_eq!(table.columns.len(), 3);

    let id = &table.columns[0];
    assert!(id.primary_key);
    assert_eq!(id.auto_increment, Some(AutoIncrement::AutoIncrement));

    let name = &table.columns[1];
    assert_eq!(name.data_type.to_string(), "VARCHAR(64)");
    assert_eq!(name.nullable, Some(false));

    let references = table.columns[2].references.as_ref().unwrap();
    assert_eq!(references.table.name, "dept");
    assert_eq!(references.columns, vec!["id"]);
    assert_eq!(references.on_delete, Some(ReferentialAction::Cascade));
    assert_eq!(references.on_update, None);
}

#[test]
fn test_create_table_with_table_constraints() {
    let Statement::CreateTable(table) = parse_with(
        "CREATE TABLE IF NOT EXISTS order_items (
            order_id INTEGER NOT NULL,
            line_no INTEGER NOT NULL,
            price DECIMAL(10, 2) DEFAULT 0 CHECK (price >= 0),
            CONSTRAINT pk_items PRIMARY KEY (order_id, line_no),
            FOREIGN KEY (order_id) REFERENCES orders (id) ON UPDATE RESTRICT,
            UNIQUE (order_id, price)
        )",
        DialectKind::PostgreSql,
    ) else {
        panic!("Expected CREATE TABLE statement");
    };

    assert!(table.if_not_exists);
    assert_eq!(table.columns.len(), 3);
    assert!(table.columns[2].default.is_some());
    assert!(table.columns[2].check.is_some());
    assert_eq!(table.constraints.len(), 3);

    assert_eq!(table.constraints[0].name.as_deref(), Some("pk_items"));
    let TableConstraintKind::PrimaryKey(columns) = &table.constraints[0].kind else {
        panic!("Expected PRIMARY KEY constraint");
    };
    assert_eq!(columns, &vec!["order_id", "line_no"]);

    let TableConstraintKind::ForeignKey {
        columns,
        references,
    } = &table.constraints[1].kind
    else {
        panic!("Expected FOREIGN KEY constraint");
    };
    assert_eq!(columns, &vec!["order_id"]);
    assert_eq!(references.on_update, Some(ReferentialAction::Restrict));

    assert!(matches!(
        table.constraints[2].kind,
        TableConstraintKind::Unique(_)
    ));
}

#[test]
fn test_create_table_auto_increment_spellings() {
    let Statement::CreateTable(table) = parse_with(
        "CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT)",
        DialectKind::Sqlite,
    ) else {
        panic!("Expected CREATE TABLE statement");
    };
    assert_eq!(
        table.columns[0].auto_increment,
        Some(AutoIncrement::Autoincrement)
    );

    let Statement::CreateTable(table) = parse_with(
        "CREATE TABLE t (id BIGINT GENERATED ALWAYS AS IDENTITY)",
        DialectKind::PostgreSql,
    ) else {
        panic!("Expected CREATE TABLE statement");
    };
    assert_eq!(
        table.columns[0].auto_increment,
        Some(AutoIncrement::Generated { always: true })
    );
}

#[test]
fn test_create_temporary_table() {
    let Statement::CreateTable(table) = parse_with(
        "CREATE TEMPORARY TABLE scratch (k TEXT COLLATE nocase)",
        DialectKind::Sqlite,
    ) else {
        panic!("Expected CREATE TABLE statement");
    };
    assert!(table.temporary);
    assert_eq!(table.columns[0].collation.as_deref(), Some("nocase"));
}

#[test]
fn test_create_table_requires_columns() {
    let error = parse_err("CREATE TABLE t");
    assert_eq!(error.kind, ParseErrorKind::Syntax);
}

// ============================================================================
// CREATE INDEX
// ============================================================================

#[test]
fn test_create_index_with_include_and_filter() {
    let Statement::CreateIndex(index) = parse(
        "CREATE UNIQUE NONCLUSTERED INDEX ix_orders_customer ON dbo.orders (customer_id, placed_at DESC) \
         INCLUDE (total) WHERE status = 'open'",
    ) else {
        panic!("Expected CREATE INDEX statement");
    };
    assert!(index.unique);
    assert_eq!(index.clustered, Some(false));
    assert_eq!(index.name, "ix_orders_customer");
    assert_eq!(index.table.schema.as_deref(), Some("dbo"));
    assert_eq!(index.columns.len(), 2);
    assert_eq!(index.columns[1].direction, OrderDirection::Desc);
    assert_eq!(index.include, vec!["total"]);
    assert!(index.where_clause.is_some());
}

#[test]
fn test_create_index_using_method() {
    let Statement::CreateIndex(index) = parse_with(
        "CREATE INDEX IF NOT EXISTS idx_doc ON docs USING gin (body)",
        DialectKind::PostgreSql,
    ) else {
        panic!("Expected CREATE INDEX statement");
    };
    assert!(index.if_not_exists);
    assert_eq!(index.using.as_deref(), Some("gin"));

    let Statement::CreateIndex(index) = parse_with(
        "CREATE INDEX idx_name ON users (name) USING BTREE",
        DialectKind::MySql,
    ) else {
        panic!("Expected CREATE INDEX statement");
    };
    assert_eq!(index.using.as_deref(), Some("BTREE"));
}

// ============================================================================
// CREATE VIEW
// ============================================================================

#[test]
fn test_create_view_with_check_option() {
    let Statement::CreateView(view) = parse_with(
        "CREATE OR REPLACE VIEW active_users (id, name) AS \
         SELECT id, name FROM users WHERE active = 1 WITH CASCADED CHECK OPTION",
        DialectKind::MySql,
    ) else {
        panic!("Expected CREATE VIEW statement");
    };
    assert!(view.or_replace);
    assert!(!view.materialized);
    assert_eq!(view.columns, vec!["id", "name"]);
    assert!(view.with_check_option);
    assert_eq!(
        view.options.get("CHECK_OPTION").map(String::as_str),
        Some("CASCADED")
    );
}

#[test]
fn test_create_view_with_schemabinding() {
    let Statement::CreateView(view) = parse(
        "CREATE OR ALTER VIEW dbo.v WITH SCHEMABINDING AS SELECT id FROM dbo.t",
    ) else {
        panic!("Expected CREATE VIEW statement");
    };
    assert!(view.or_replace);
    assert_eq!(
        view.options.get("SCHEMABINDING").map(String::as_str),
        Some("TRUE")
    );
}

#[test]
fn test_materialized_view_only_in_postgres() {
    let Statement::CreateView(view) = parse_with(
        "CREATE MATERIALIZED VIEW totals AS SELECT dept, SUM(pay) FROM staff GROUP BY dept WITH NO DATA",
        DialectKind::PostgreSql,
    ) else {
        panic!("Expected CREATE VIEW statement");
    };
    assert!(view.materialized);
    assert_eq!(view.options.get("DATA").map(String::as_str), Some("FALSE"));

    for dialect in [DialectKind::SqlServer, DialectKind::MySql, DialectKind::Sqlite] {
        let error = parse_err_with(
            "CREATE MATERIALIZED VIEW totals AS SELECT 1",
            dialect,
        );
        assert_eq!(error.kind, ParseErrorKind::Structural);
        assert_eq!(
            error.message,
            format!("feature MATERIALIZED VIEW not supported in dialect {dialect}")
        );
    }
}

#[test]
fn test_create_view_display_keeps_clauses() {
    let sql = "CREATE MATERIALIZED VIEW IF NOT EXISTS mv (a) AS SELECT 1 WITH NO DATA";
    let statement = parse_with(sql, DialectKind::PostgreSql);
    assert_eq!(statement.to_string(), sql);

    let sql = "CREATE VIEW v WITH (security_barrier, fillfactor = 70) AS SELECT a FROM t";
    let statement = parse_with(sql, DialectKind::PostgreSql);
    let rendered = statement.to_string();
    assert_eq!(
        rendered,
        "CREATE VIEW v WITH (FILLFACTOR=70, SECURITY_BARRIER) AS SELECT a FROM t"
    );
    assert_eq!(parse_with(&rendered, DialectKind::PostgreSql), statement);

    let sql = "CREATE VIEW v AS SELECT a FROM t WITH LOCAL CHECK OPTION";
    assert_eq!(parse_with(sql, DialectKind::MySql).to_string(), sql);
}

// ============================================================================
// CREATE TRIGGER
// ============================================================================

#[test]
fn test_tsql_trigger_with_block() {
    let Statement::CreateTrigger(trigger) = parse(
        "CREATE TRIGGER trg_audit ON dbo.orders AFTER INSERT, UPDATE AS
         BEGIN
             SET NOCOUNT ON;
             INSERT INTO audit (id) SELECT id FROM inserted;
         END",
    ) else {
        panic!("Expected CREATE TRIGGER statement");
    };
    assert_eq!(trigger.timing, TriggerTiming::After);
    assert_eq!(
        trigger.events,
        vec![TriggerEvent::Insert, TriggerEvent::Update(vec![])]
    );
    assert!(!trigger.for_each_row);
    let TriggerBody::Block(block) = &trigger.body else {
        panic!("Expected block body");
    };
    assert_eq!(block.statements.len(), 2);
}

#[test]
fn test_tsql_trigger_body_runs_to_batch_end() {
    let statements = parse_all(
        "CREATE TRIGGER trg_purge ON items FOR DELETE AS
         DELETE FROM audit WHERE item_id = 1;
         UPDATE totals SET n = n - 1
         GO
         SELECT 1",
        DialectKind::SqlServer,
    );
    assert_eq!(statements.len(), 2);
    let Statement::CreateTrigger(trigger) = &statements[0] else {
        panic!("Expected CREATE TRIGGER statement");
    };
    let TriggerBody::Block(block) = &trigger.body else {
        panic!("Expected block body");
    };
    assert_eq!(block.statements.len(), 2);
    assert!(matches!(statements[1], Statement::Select(_)));
}

#[test]
fn test_postgres_trigger_executes_function() {
    let Statement::CreateTrigger(trigger) = parse_with(
        "CREATE TRIGGER trg_price BEFORE UPDATE OF price, qty ON items \
         FOR EACH ROW WHEN (price > 0) EXECUTE FUNCTION log_change('items')",
        DialectKind::PostgreSql,
    ) else {
        panic!("Expected CREATE TRIGGER statement");
    };
    assert_eq!(trigger.timing, TriggerTiming::Before);
    assert_eq!(
        trigger.events,
        vec![TriggerEvent::Update(vec![
            String::from("price"),
            String::from("qty")
        ])]
    );
    assert!(trigger.for_each_row);
    assert!(trigger.when.is_some());
    let TriggerBody::ExecuteFunction { name, args } = &trigger.body else {
        panic!("Expected EXECUTE FUNCTION body");
    };
    assert_eq!(name, "log_change");
    assert_eq!(args.len(), 1);
}

#[test]
fn test_sqlite_trigger_block() {
    let Statement::CreateTrigger(trigger) = parse_with(
        "CREATE TRIGGER trg_count AFTER INSERT ON t FOR EACH ROW BEGIN UPDATE c SET n = n + 1; END",
        DialectKind::Sqlite,
    ) else {
        panic!("Expected CREATE TRIGGER statement");
    };
    assert_eq!(trigger.events, vec![TriggerEvent::Insert]);
    assert!(matches!(trigger.body, TriggerBody::Block(_)));
}

#[test]
fn test_instead_of_trigger_gating() {
    let Statement::CreateTrigger(trigger) = parse_with(
        "CREATE TRIGGER trg_v INSTEAD OF DELETE ON v BEGIN DELETE FROM t; END",
        DialectKind::Sqlite,
    ) else {
        panic!("Expected CREATE TRIGGER statement");
    };
    assert_eq!(trigger.timing, TriggerTiming::InsteadOf);

    let error = parse_err_with(
        "CREATE TRIGGER trg_v INSTEAD OF DELETE ON v FOR EACH ROW DELETE FROM t",
        DialectKind::MySql,
    );
    assert_eq!(
        error.message,
        "feature INSTEAD OF not supported in dialect mysql"
    );
}

// ============================================================================
// DROP
// ============================================================================

#[test]
fn test_drop_several_tables() {
    let Statement::Drop(drop) = parse_with(
        "DROP TABLE IF EXISTS a, s.b CASCADE",
        DialectKind::PostgreSql,
    ) else {
        panic!("Expected DROP statement");
    };
    assert_eq!(drop.object_type, ObjectType::Table);
    assert!(drop.if_exists);
    assert_eq!(drop.names.len(), 2);
    assert!(drop.cascade);
    assert!(!drop.restrict);
    assert_eq!(drop.to_string(), "DROP TABLE IF EXISTS a, s.b CASCADE");
}

#[test]
fn test_drop_function_with_signature() {
    let Statement::Drop(drop) = parse_with(
        "DROP FUNCTION add_tax(NUMERIC, INT) RESTRICT",
        DialectKind::PostgreSql,
    ) else {
        panic!("Expected DROP statement");
    };
    assert_eq!(drop.object_type, ObjectType::Function);
    assert_eq!(drop.names[0].name, "add_tax");
    assert!(drop.restrict);
}

#[test]
fn test_drop_proc_shorthand() {
    let Statement::Drop(drop) = parse("DROP PROC dbo.usp_cleanup") else {
        panic!("Expected DROP statement");
    };
    assert_eq!(drop.object_type, ObjectType::Procedure);
    assert_eq!(drop.names[0].schema.as_deref(), Some("dbo"));
}

#[test]
fn test_drop_materialized_view_gating() {
    let Statement::Drop(drop) = parse_with("DROP MATERIALIZED VIEW totals", DialectKind::PostgreSql)
    else {
        panic!("Expected DROP statement");
    };
    assert_eq!(drop.object_type, ObjectType::MaterializedView);

    let error = parse_err_with("DROP MATERIALIZED VIEW totals", DialectKind::Sqlite);
    assert!(error.message.starts_with("feature MATERIALIZED VIEW"));
}

#[test]
fn test_drop_unknown_object_type() {
    let error = parse_err("DROP SEQUENCE s");
    assert_eq!(error.kind, ParseErrorKind::Syntax);
    assert!(error.message.starts_with("expected object type"));
}

// ============================================================================
// ALTER TABLE
// ============================================================================

#[test]
fn test_alter_table_add_column() {
    let Statement::AlterTable(alter) = parse_with(
        "ALTER TABLE users ADD COLUMN email VARCHAR(255) UNIQUE",
        DialectKind::PostgreSql,
    ) else {
        panic!("Expected ALTER TABLE statement");
    };
    let AlterAction::AddColumn(column) = &alter.action else {
        panic!("Expected ADD COLUMN");
    };
    assert_eq!(column.name, "email");
    assert!(column.unique);
}

#[test]
fn test_alter_table_add_constraint() {
    let Statement::AlterTable(alter) = parse(
        "ALTER TABLE orders ADD CONSTRAINT fk_user FOREIGN KEY (user_id) REFERENCES users (id)",
    ) else {
        panic!("Expected ALTER TABLE statement");
    };
    let AlterAction::AddConstraint(constraint) = &alter.action else {
        panic!("Expected ADD CONSTRAINT");
    };
    assert_eq!(constraint.name.as_deref(), Some("fk_user"));
}

#[test]
fn test_alter_table_drop_forms() {
    let Statement::AlterTable(alter) =
        parse_with("ALTER TABLE t DROP COLUMN IF EXISTS legacy", DialectKind::PostgreSql)
    else {
        panic!("Expected ALTER TABLE statement");
    };
    assert_eq!(
        alter.action,
        AlterAction::DropColumn {
            name: String::from("legacy"),
            if_exists: true
        }
    );

    let Statement::AlterTable(alter) = parse("ALTER TABLE t DROP CONSTRAINT ck_positive") else {
        panic!("Expected ALTER TABLE statement");
    };
    assert_eq!(
        alter.action,
        AlterAction::DropConstraint(String::from("ck_positive"))
    );
}

#[test]
fn test_alter_table_mysql_modify_and_change() {
    let Statement::AlterTable(alter) = parse_with(
        "ALTER TABLE t MODIFY COLUMN name VARCHAR(100) NOT NULL",
        DialectKind::MySql,
    ) else {
        panic!("Expected ALTER TABLE statement");
    };
    assert!(matches!(alter.action, AlterAction::ModifyColumn(_)));

    let Statement::AlterTable(alter) = parse_with(
        "ALTER TABLE t CHANGE name full_name VARCHAR(200)",
        DialectKind::MySql,
    ) else {
        panic!("Expected ALTER TABLE statement");
    };
    let AlterAction::ChangeColumn { old_name, column } = &alter.action else {
        panic!("Expected CHANGE COLUMN");
    };
    assert_eq!(old_name, "name");
    assert_eq!(column.name, "full_name");
}

#[test]
fn test_alter_table_renames() {
    let Statement::AlterTable(alter) =
        parse_with("ALTER TABLE t RENAME COLUMN a TO b", DialectKind::Sqlite)
    else {
        panic!("Expected ALTER TABLE statement");
    };
    assert_eq!(
        alter.action,
        AlterAction::RenameColumn {
            from: String::from("a"),
            to: String::from("b")
        }
    );

    let Statement::AlterTable(alter) =
        parse_with("ALTER TABLE t RENAME TO t_old", DialectKind::Sqlite)
    else {
        panic!("Expected ALTER TABLE statement");
    };
    let AlterAction::RenameTable(name) = &alter.action else {
        panic!("Expected RENAME TO");
    };
    assert_eq!(name.name, "t_old");
}

#[test]
fn test_alter_table_unknown_action() {
    let error = parse_err("ALTER TABLE t TRUNCATE");
    assert!(error
        .message
        .starts_with("expected ADD, DROP, MODIFY, CHANGE, ALTER or RENAME"));
}
