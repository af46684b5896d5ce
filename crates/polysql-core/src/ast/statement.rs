//! The closed set of SQL statements.

use std::fmt;

use super::ddl::{
    AlterTableStatement, CreateIndexStatement, CreateTableStatement, CreateTriggerStatement,
    CreateViewStatement, DropStatement,
};
use super::explain::ExplainStatement;
use super::procedural::{
    AssignmentStatement, BlockStatement, CallStatement, CaseStatement, CloseStatement,
    ContinueStatement, DeallocateStatement, Declaration, ExitStatement, FetchStatement,
    ForStatement, IfStatement, LoopStatement, OpenStatement, RaiseStatement, RepeatStatement,
    ReturnStatement, SetOptionStatement, SignalStatement, ThrowStatement, TryStatement,
    WhileStatement,
};
use super::query::{
    DeleteStatement, InsertStatement, SelectStatement, SetOperation, UpdateStatement,
    WithStatement,
};
use super::routine::{CreateFunctionStatement, CreateProcedureStatement};
use super::transaction::{
    BeginTransactionStatement, CommitStatement, ReleaseSavepointStatement, RollbackStatement,
    SavepointStatement,
};

/// An SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// SELECT statement.
    Select(Box<SelectStatement>),
    /// INSERT statement.
    Insert(Box<InsertStatement>),
    /// UPDATE statement.
    Update(Box<UpdateStatement>),
    /// DELETE statement.
    Delete(Box<DeleteStatement>),
    /// WITH statement.
    With(Box<WithStatement>),
    /// UNION/INTERSECT/EXCEPT.
    SetOperation(SetOperation),
    /// CREATE TABLE.
    CreateTable(Box<CreateTableStatement>),
    /// CREATE INDEX.
    CreateIndex(Box<CreateIndexStatement>),
    /// CREATE [MATERIALIZED] VIEW.
    CreateView(Box<CreateViewStatement>),
    /// CREATE PROCEDURE.
    CreateProcedure(Box<CreateProcedureStatement>),
    /// CREATE FUNCTION.
    CreateFunction(Box<CreateFunctionStatement>),
    /// CREATE TRIGGER.
    CreateTrigger(Box<CreateTriggerStatement>),
    /// DROP.
    Drop(Box<DropStatement>),
    /// ALTER TABLE.
    AlterTable(Box<AlterTableStatement>),
    /// A DECLARE item.
    Declare(Box<Declaration>),
    /// `[label:] BEGIN ... END`.
    Block(Box<BlockStatement>),
    If(Box<IfStatement>),
    While(Box<WhileStatement>),
    Loop(LoopStatement),
    For(Box<ForStatement>),
    Repeat(Box<RepeatStatement>),
    Case(Box<CaseStatement>),
    Return(ReturnStatement),
    Assignment(AssignmentStatement),
    SetOption(SetOptionStatement),
    Open(OpenStatement),
    Fetch(Box<FetchStatement>),
    Close(CloseStatement),
    Deallocate(DeallocateStatement),
    Exit(ExitStatement),
    Continue(ContinueStatement),
    Try(Box<TryStatement>),
    Raise(Box<RaiseStatement>),
    Throw(Box<ThrowStatement>),
    Signal(Box<SignalStatement>),
    Call(CallStatement),
    BeginTransaction(BeginTransactionStatement),
    Commit(CommitStatement),
    Rollback(RollbackStatement),
    Savepoint(SavepointStatement),
    ReleaseSavepoint(ReleaseSavepointStatement),
    /// EXPLAIN.
    Explain(Box<ExplainStatement>),
}

impl Statement {
    /// Returns the stable node tag of the statement variant.
    ///
    /// A `Declare` statement reports the tag of the declaration it holds.
    #[must_use]
    pub const fn type_tag(&self) -> &'static str {
        match self {
            Self::Select(_) => "SelectStatement",
            Self::Insert(_) => "InsertStatement",
            Self::Update(_) => "UpdateStatement",
            Self::Delete(_) => "DeleteStatement",
            Self::With(_) => "WithStatement",
            Self::SetOperation(_) => "SetOperation",
            Self::CreateTable(_) => "CreateTableStatement",
            Self::CreateIndex(_) => "CreateIndexStatement",
            Self::CreateView(_) => "CreateViewStatement",
            Self::CreateProcedure(_) => "CreateProcedureStatement",
            Self::CreateFunction(_) => "CreateFunctionStatement",
            Self::CreateTrigger(_) => "CreateTriggerStatement",
            Self::Drop(_) => "DropStatement",
            Self::AlterTable(_) => "AlterTableStatement",
            Self::Declare(declaration) => declaration.type_tag(),
            Self::Block(_) => "BlockStatement",
            Self::If(_) => "IfStatement",
            Self::While(_) => "WhileStatement",
            Self::Loop(_) => "LoopStatement",
            Self::For(_) => "ForStatement",
            Self::Repeat(_) => "RepeatStatement",
            Self::Case(_) => "CaseStatement",
            Self::Return(_) => "ReturnStatement",
            Self::Assignment(_) => "AssignmentStatement",
            Self::SetOption(_) => "SetOptionStatement",
            Self::Open(_) => "OpenStatement",
            Self::Fetch(_) => "FetchStatement",
            Self::Close(_) => "CloseStatement",
            Self::Deallocate(_) => "DeallocateStatement",
            Self::Exit(_) => "ExitStatement",
            Self::Continue(_) => "ContinueStatement",
            Self::Try(_) => "TryStatement",
            Self::Raise(_) => "RaiseStatement",
            Self::Throw(_) => "ThrowStatement",
            Self::Signal(_) => "SignalStatement",
            Self::Call(_) => "CallStatement",
            Self::BeginTransaction(_) => "BeginTransactionStatement",
            Self::Commit(_) => "CommitStatement",
            Self::Rollback(_) => "RollbackStatement",
            Self::Savepoint(_) => "SavepointStatement",
            Self::ReleaseSavepoint(_) => "ReleaseSavepointStatement",
            Self::Explain(_) => "ExplainStatement",
        }
    }

    /// Returns true for statements that produce rows: SELECT, set
    /// operations and WITH.
    #[must_use]
    pub const fn is_query(&self) -> bool {
        matches!(self, Self::Select(_) | Self::SetOperation(_) | Self::With(_))
    }

    /// Returns the SELECT statement, if this is one.
    #[must_use]
    pub fn as_select(&self) -> Option<&SelectStatement> {
        match self {
            Self::Select(select) => Some(select),
            _ => None,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(node) => write!(f, "{node}"),
            Self::Insert(node) => write!(f, "{node}"),
            Self::Update(node) => write!(f, "{node}"),
            Self::Delete(node) => write!(f, "{node}"),
            Self::With(node) => write!(f, "{node}"),
            Self::SetOperation(node) => write!(f, "{node}"),
            Self::CreateTable(node) => write!(f, "{node}"),
            Self::CreateIndex(node) => write!(f, "{node}"),
            Self::CreateView(node) => write!(f, "{node}"),
            Self::CreateProcedure(node) => write!(f, "{node}"),
            Self::CreateFunction(node) => write!(f, "{node}"),
            Self::CreateTrigger(node) => write!(f, "{node}"),
            Self::Drop(node) => write!(f, "{node}"),
            Self::AlterTable(node) => write!(f, "{node}"),
            Self::Declare(node) => write!(f, "{node}"),
            Self::Block(node) => write!(f, "{node}"),
            Self::If(node) => write!(f, "{node}"),
            Self::While(node) => write!(f, "{node}"),
            Self::Loop(node) => write!(f, "{node}"),
            Self::For(node) => write!(f, "{node}"),
            Self::Repeat(node) => write!(f, "{node}"),
            Self::Case(node) => write!(f, "{node}"),
            Self::Return(node) => write!(f, "{node}"),
            Self::Assignment(node) => write!(f, "{node}"),
            Self::SetOption(node) => write!(f, "{node}"),
            Self::Open(node) => write!(f, "{node}"),
            Self::Fetch(node) => write!(f, "{node}"),
            Self::Close(node) => write!(f, "{node}"),
            Self::Deallocate(node) => write!(f, "{node}"),
            Self::Exit(node) => write!(f, "{node}"),
            Self::Continue(node) => write!(f, "{node}"),
            Self::Try(node) => write!(f, "{node}"),
            Self::Raise(node) => write!(f, "{node}"),
            Self::Throw(node) => write!(f, "{node}"),
            Self::Signal(node) => write!(f, "{node}"),
            Self::Call(node) => write!(f, "{node}"),
            Self::BeginTransaction(node) => write!(f, "{node}"),
            Self::Commit(node) => write!(f, "{node}"),
            Self::Rollback(node) => write!(f, "{node}"),
            Self::Savepoint(node) => write!(f, "{node}"),
            Self::ReleaseSavepoint(node) => write!(f, "{node}"),
            Self::Explain(node) => write!(f, "{node}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, TableReference, VariableDeclaration};
    use crate::ast::DataType;

    #[test]
    fn test_select_summary() {
        let select = SelectStatement {
            columns: vec![Expr::column("id")],
            from: vec![TableReference::table("users")],
            ..SelectStatement::default()
        };
        let statement = Statement::Select(Box::new(select));
        assert_eq!(statement.type_tag(), "SelectStatement");
        assert_eq!(statement.to_string(), "SELECT id FROM users");
        assert!(statement.is_query());
    }

    #[test]
    fn test_declare_reports_inner_tag() {
        let statement = Statement::Declare(Box::new(Declaration::Variable(
            VariableDeclaration {
                names: vec![String::from("total")],
                data_type: DataType::new("int"),
                default: None,
                constant: false,
                not_null: false,
            },
        )));
        assert_eq!(statement.type_tag(), "VariableDeclaration");
        assert_eq!(statement.to_string(), "DECLARE total INT");
    }

    #[test]
    fn test_transaction_summaries() {
        let commit = Statement::Commit(CommitStatement {
            work: true,
            name: None,
        });
        assert_eq!(commit.to_string(), "COMMIT WORK");
        assert!(!commit.is_query());

        let rollback = Statement::Rollback(RollbackStatement {
            to_savepoint: Some(String::from("sp1")),
            ..RollbackStatement::default()
        });
        assert_eq!(rollback.to_string(), "ROLLBACK TO SAVEPOINT sp1");
    }
}
