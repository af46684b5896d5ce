//! Pre-order traversal over statements, expressions and table references.
//!
//! Implement [`Visitor`] and drive it with [`walk_statement`]:
//!
//! ```
//! use polysql_core::ast::visit::{walk_statement, Visitor};
//! use polysql_core::ast::TableReference;
//! use polysql_core::{parse_sql, DialectKind};
//!
//! struct Tables(Vec<String>);
//!
//! impl Visitor for Tables {
//!     fn visit_table(&mut self, table: &TableReference) {
//!         self.0.push(table.visible_name().to_string());
//!     }
//! }
//!
//! let statements = parse_sql("SELECT * FROM a JOIN b ON a.id = b.id", DialectKind::MySql).unwrap();
//! let mut tables = Tables(Vec::new());
//! walk_statement(&mut tables, &statements[0]);
//! assert_eq!(tables.0, ["a", "b"]);
//! ```

use super::{
    AlterAction, BlockStatement, ColumnDefinition, Declaration, Expr, FetchDirection, ForRange,
    InValues, InsertSource, OverClause, SelectStatement, Statement, TableConstraintKind,
    TableReference, TriggerBody,
};

/// Callbacks invoked during a walk. Every hook defaults to doing nothing.
pub trait Visitor {
    /// Called for every statement, including nested ones.
    fn visit_statement(&mut self, _statement: &Statement) {}

    /// Called for every expression, including nested ones.
    fn visit_expr(&mut self, _expr: &Expr) {}

    /// Called for every table reference in FROM, JOIN, UPDATE and DELETE.
    fn visit_table(&mut self, _table: &TableReference) {}
}

/// Walks a statement and all of its children in pre-order.
#[allow(clippy::too_many_lines)]
pub fn walk_statement<V: Visitor + ?Sized>(visitor: &mut V, statement: &Statement) {
    visitor.visit_statement(statement);
    match statement {
        Statement::Select(select) => walk_select(visitor, select),
        Statement::Insert(insert) => match &insert.source {
            InsertSource::Values(rows) => {
                for value in rows.iter().flatten() {
                    walk_expr(visitor, value);
                }
            }
            InsertSource::Query(query) => walk_statement(visitor, query),
            InsertSource::DefaultValues => {}
        },
        Statement::Update(update) => {
            walk_table(visitor, &update.table);
            for assignment in &update.assignments {
                walk_expr(visitor, &assignment.value);
            }
            for table in &update.from {
                walk_table(visitor, table);
            }
            walk_opt_expr(visitor, update.where_clause.as_ref());
        }
        Statement::Delete(delete) => {
            walk_table(visitor, &delete.table);
            walk_opt_expr(visitor, delete.where_clause.as_ref());
        }
        Statement::With(with) => {
            for cte in &with.ctes {
                walk_statement(visitor, &cte.query);
            }
            walk_statement(visitor, &with.query);
        }
        Statement::SetOperation(operation) => {
            walk_statement(visitor, &operation.left);
            walk_statement(visitor, &operation.right);
        }
        Statement::CreateTable(create) => {
            for column in &create.columns {
                walk_column(visitor, column);
            }
            for constraint in &create.constraints {
                if let TableConstraintKind::Check(expr) = &constraint.kind {
                    walk_expr(visitor, expr);
                }
            }
        }
        Statement::CreateIndex(create) => {
            for item in &create.columns {
                walk_expr(visitor, &item.expr);
            }
            walk_opt_expr(visitor, create.where_clause.as_ref());
        }
        Statement::CreateView(create) => walk_statement(visitor, &create.query),
        Statement::CreateProcedure(create) => {
            for parameter in &create.parameters {
                walk_opt_expr(visitor, parameter.default.as_ref());
            }
            walk_block(visitor, &create.body);
        }
        Statement::CreateFunction(create) => {
            for parameter in &create.parameters {
                walk_opt_expr(visitor, parameter.default.as_ref());
            }
            walk_block(visitor, &create.body);
        }
        Statement::CreateTrigger(create) => {
            walk_opt_expr(visitor, create.when.as_ref());
            match &create.body {
                TriggerBody::Block(block) => walk_block(visitor, block),
                TriggerBody::Statement(statement) => walk_statement(visitor, statement),
                TriggerBody::ExecuteFunction { args, .. } => walk_exprs(visitor, args),
            }
        }
        Statement::AlterTable(alter) => match &alter.action {
            AlterAction::AddColumn(column)
            | AlterAction::ModifyColumn(column)
            | AlterAction::ChangeColumn { column, .. } => walk_column(visitor, column),
            AlterAction::AddConstraint(constraint) => {
                if let TableConstraintKind::Check(expr) = &constraint.kind {
                    walk_expr(visitor, expr);
                }
            }
            AlterAction::DropColumn { .. }
            | AlterAction::DropConstraint(_)
            | AlterAction::AlterColumnType { .. }
            | AlterAction::RenameTable(_)
            | AlterAction::RenameColumn { .. } => {}
        },
        Statement::Declare(declaration) => walk_declaration(visitor, declaration),
        Statement::Block(block) => walk_block(visitor, block),
        Statement::If(statement) => {
            walk_expr(visitor, &statement.condition);
            walk_statements(visitor, &statement.then_block);
            for else_if in &statement.else_ifs {
                walk_expr(visitor, &else_if.condition);
                walk_statements(visitor, &else_if.statements);
            }
            if let Some(else_block) = &statement.else_block {
                walk_statements(visitor, else_block);
            }
        }
        Statement::While(statement) => {
            walk_expr(visitor, &statement.condition);
            walk_statements(visitor, &statement.body);
        }
        Statement::Loop(statement) => walk_statements(visitor, &statement.body),
        Statement::For(statement) => {
            match &statement.range {
                ForRange::Numeric { start, end, step } => {
                    walk_expr(visitor, start);
                    walk_expr(visitor, end);
                    walk_opt_expr(visitor, step.as_ref());
                }
                ForRange::Query(query) => walk_statement(visitor, query),
            }
            walk_statements(visitor, &statement.body);
        }
        Statement::Repeat(statement) => {
            walk_statements(visitor, &statement.body);
            walk_expr(visitor, &statement.until);
        }
        Statement::Case(statement) => {
            walk_opt_expr(visitor, statement.input.as_ref());
            for clause in &statement.when_clauses {
                walk_expr(visitor, &clause.condition);
                walk_statements(visitor, &clause.statements);
            }
            if let Some(else_block) = &statement.else_block {
                walk_statements(visitor, else_block);
            }
        }
        Statement::Return(statement) => walk_opt_expr(visitor, statement.value.as_ref()),
        Statement::Assignment(statement) => {
            for assignment in &statement.assignments {
                walk_expr(visitor, &assignment.value);
            }
        }
        Statement::Open(statement) => {
            if let Some(query) = &statement.query {
                walk_statement(visitor, query);
            }
        }
        Statement::Fetch(statement) => match &statement.direction {
            Some(FetchDirection::Absolute(n) | FetchDirection::Relative(n)) => {
                walk_expr(visitor, n);
            }
            _ => {}
        },
        Statement::Exit(statement) => walk_opt_expr(visitor, statement.condition.as_ref()),
        Statement::Continue(statement) => walk_opt_expr(visitor, statement.condition.as_ref()),
        Statement::Try(statement) => {
            walk_statements(visitor, &statement.try_block);
            walk_statements(visitor, &statement.catch_block.body);
        }
        Statement::Raise(statement) => {
            walk_opt_expr(visitor, statement.message.as_ref());
            walk_exprs(visitor, &statement.arguments);
            for option in &statement.options {
                walk_expr(visitor, &option.value);
            }
        }
        Statement::Throw(statement) => {
            walk_opt_expr(visitor, statement.error_number.as_ref());
            walk_opt_expr(visitor, statement.message.as_ref());
            walk_opt_expr(visitor, statement.state.as_ref());
        }
        Statement::Signal(statement) => {
            for property in &statement.properties {
                walk_expr(visitor, &property.value);
            }
        }
        Statement::Call(statement) => walk_exprs(visitor, &statement.args),
        Statement::Explain(explain) => walk_statement(visitor, &explain.statement),
        Statement::Drop(_)
        | Statement::SetOption(_)
        | Statement::Close(_)
        | Statement::Deallocate(_)
        | Statement::BeginTransaction(_)
        | Statement::Commit(_)
        | Statement::Rollback(_)
        | Statement::Savepoint(_)
        | Statement::ReleaseSavepoint(_) => {}
    }
}

/// Walks an expression and all of its children in pre-order.
pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expr) {
    visitor.visit_expr(expr);
    match expr {
        Expr::Literal(_) | Expr::Column(_) | Expr::Star(_) => {}
        Expr::Binary(binary) => {
            walk_expr(visitor, &binary.left);
            walk_expr(visitor, &binary.right);
        }
        Expr::Unary(unary) => walk_expr(visitor, &unary.operand),
        Expr::Function(function) => walk_exprs(visitor, &function.args),
        Expr::Window(window) => {
            walk_exprs(visitor, &window.function.args);
            walk_over(visitor, &window.over);
        }
        Expr::Aliased(aliased) => walk_expr(visitor, &aliased.expr),
        Expr::In(in_expr) => {
            walk_expr(visitor, &in_expr.expr);
            match &in_expr.values {
                InValues::List(values) => walk_exprs(visitor, values),
                InValues::Subquery(subquery) => walk_statement(visitor, &subquery.query),
            }
        }
        Expr::Exists(exists) => walk_statement(visitor, &exists.subquery.query),
        Expr::Subquery(subquery) => walk_statement(visitor, &subquery.query),
        Expr::Case(case) => {
            if let Some(input) = &case.input {
                walk_expr(visitor, input);
            }
            for clause in &case.when_clauses {
                walk_expr(visitor, &clause.condition);
                walk_expr(visitor, &clause.result);
            }
            if let Some(else_result) = &case.else_result {
                walk_expr(visitor, else_result);
            }
        }
        Expr::Between(between) => {
            walk_expr(visitor, &between.expr);
            walk_expr(visitor, &between.low);
            walk_expr(visitor, &between.high);
        }
        Expr::Cast(cast) => walk_expr(visitor, &cast.expr),
    }
}

/// Returns the pre-order sequence of statement and expression tags, with
/// table references reported as `TableReference`.
#[must_use]
pub fn type_tags(statement: &Statement) -> Vec<&'static str> {
    struct Tags(Vec<&'static str>);

    impl Visitor for Tags {
        fn visit_statement(&mut self, statement: &Statement) {
            self.0.push(statement.type_tag());
        }

        fn visit_expr(&mut self, expr: &Expr) {
            self.0.push(expr.type_tag());
        }

        fn visit_table(&mut self, _table: &TableReference) {
            self.0.push("TableReference");
        }
    }

    let mut tags = Tags(Vec::new());
    walk_statement(&mut tags, statement);
    tags.0
}

fn walk_select<V: Visitor + ?Sized>(visitor: &mut V, select: &SelectStatement) {
    if let Some(top) = &select.top {
        walk_expr(visitor, &top.quantity);
    }
    walk_exprs(visitor, &select.columns);
    for table in &select.from {
        walk_table(visitor, table);
    }
    for join in &select.joins {
        walk_table(visitor, &join.table);
        walk_opt_expr(visitor, join.condition.as_ref());
    }
    walk_opt_expr(visitor, select.where_clause.as_ref());
    walk_exprs(visitor, &select.group_by);
    walk_opt_expr(visitor, select.having.as_ref());
    for item in &select.order_by {
        walk_expr(visitor, &item.expr);
    }
    walk_opt_expr(visitor, select.limit.as_ref());
    walk_opt_expr(visitor, select.offset.as_ref());
    walk_opt_expr(visitor, select.fetch.as_ref());
}

fn walk_table<V: Visitor + ?Sized>(visitor: &mut V, table: &TableReference) {
    visitor.visit_table(table);
    if let Some(subquery) = &table.subquery {
        walk_statement(visitor, subquery);
    }
}

fn walk_over<V: Visitor + ?Sized>(visitor: &mut V, over: &OverClause) {
    walk_exprs(visitor, &over.partition_by);
    for item in &over.order_by {
        walk_expr(visitor, &item.expr);
    }
    if let Some(frame) = &over.frame {
        for bound in std::iter::once(&frame.start).chain(frame.end.as_ref()) {
            if let Some(offset) = &bound.offset {
                walk_expr(visitor, offset);
            }
        }
    }
}

fn walk_block<V: Visitor + ?Sized>(visitor: &mut V, block: &BlockStatement) {
    for declaration in &block.declarations {
        walk_declaration(visitor, declaration);
    }
    walk_statements(visitor, &block.statements);
    if let Some(exception) = &block.exception {
        for handler in &exception.handlers {
            walk_statements(visitor, &handler.statements);
        }
    }
}

fn walk_declaration<V: Visitor + ?Sized>(visitor: &mut V, declaration: &Declaration) {
    match declaration {
        Declaration::Variable(variable) => walk_opt_expr(visitor, variable.default.as_ref()),
        Declaration::Cursor(cursor) => walk_statement(visitor, &cursor.query),
        Declaration::Handler(handler) => walk_statement(visitor, &handler.body),
    }
}

fn walk_column<V: Visitor + ?Sized>(visitor: &mut V, column: &ColumnDefinition) {
    walk_opt_expr(visitor, column.default.as_ref());
    walk_opt_expr(visitor, column.check.as_ref());
}

fn walk_statements<V: Visitor + ?Sized>(visitor: &mut V, statements: &[Statement]) {
    for statement in statements {
        walk_statement(visitor, statement);
    }
}

fn walk_exprs<V: Visitor + ?Sized>(visitor: &mut V, exprs: &[Expr]) {
    for expr in exprs {
        walk_expr(visitor, expr);
    }
}

fn walk_opt_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: Option<&Expr>) {
    if let Some(expr) = expr {
        walk_expr(visitor, expr);
    }
}
