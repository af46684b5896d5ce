//! Abstract Syntax Tree (AST) types for SQL statements.
//!
//! Statements and expressions are closed sum types. Every node owns its
//! children, and every node reports a stable type tag through [`Node`].

mod ddl;
mod explain;
mod expression;
mod procedural;
mod query;
mod routine;
mod statement;
mod transaction;
mod types;
pub mod visit;

use std::fmt;

pub use ddl::{
    AlterAction, AlterTableStatement, AutoIncrement, ColumnDefinition, CreateIndexStatement,
    CreateTableStatement, CreateTriggerStatement, CreateViewStatement, DropStatement,
    ForeignKeyReference, ObjectType, ReferentialAction, TableConstraint, TableConstraintKind,
    TriggerBody, TriggerEvent, TriggerTiming,
};
pub use explain::ExplainStatement;
pub use expression::{
    AliasedExpression, BetweenExpression, BinaryExpression, BinaryOperator, BoundType,
    CaseExpression, CastExpression, ColumnReference, ExistsExpression, Expr, FrameBound,
    FrameDirection, FrameType, FunctionCall, InExpression, InValues, Literal, OverClause,
    StarExpression, SubqueryExpression, UnaryExpression, UnaryOperator, WhenClause, WindowFrame,
    WindowFunction,
};
pub use procedural::{
    AssignmentStatement, BlockStatement, CallStatement, CaseStatement, CaseStatementWhen,
    CatchBlock, CloseStatement, ContinueStatement, CursorDeclaration, DeallocateStatement,
    Declaration, ElseIf, ExceptionBlock, ExitStatement, FetchDirection, FetchStatement, ForRange,
    ForStatement, HandlerAction, HandlerCondition, HandlerDeclaration, IfStatement, LoopStatement,
    OpenStatement, RaiseLevel, RaiseStatement, RepeatStatement, ReturnStatement,
    SetOptionStatement, SignalStatement, ThrowStatement, TryStatement, VariableDeclaration,
    WhenExceptionClause, WhileStatement,
};
pub use query::{
    Assignment, CommonTableExpression, DeleteStatement, InsertSource, InsertStatement,
    JoinClause, JoinType, NullOrdering, ObjectName, OrderBy, OrderDirection, SelectStatement,
    SetOperation, SetOperator, TableReference, Top, UpdateStatement, WithStatement,
};
pub use routine::{
    CreateFunctionStatement, CreateProcedureStatement, DataAccess, Parameter, ParameterMode,
    RoutineOptions, SecurityMode, Volatility,
};
pub use statement::Statement;
pub use transaction::{
    BeginTransactionStatement, CommitStatement, ReleaseSavepointStatement, RollbackStatement,
    SavepointStatement,
};
pub use types::{DataType, TypeModifier};

/// Capabilities shared by every AST node.
pub trait Node: fmt::Display {
    /// Returns the stable type tag of the node (e.g., `SelectStatement`).
    fn type_tag(&self) -> &'static str;

    /// Returns a human-readable one-line summary of the node.
    ///
    /// The summary reads like SQL but is not guaranteed to re-parse.
    fn summary(&self) -> String {
        self.to_string()
    }
}

impl Node for Statement {
    fn type_tag(&self) -> &'static str {
        Self::type_tag(self)
    }
}

impl Node for Expr {
    fn type_tag(&self) -> &'static str {
        Self::type_tag(self)
    }
}

impl Node for Declaration {
    fn type_tag(&self) -> &'static str {
        Self::type_tag(self)
    }
}

macro_rules! impl_node {
    ($($node:ident),* $(,)?) => {
        $(
            impl Node for $node {
                fn type_tag(&self) -> &'static str {
                    stringify!($node)
                }
            }
        )*
    };
}

impl_node!(
    SelectStatement,
    InsertStatement,
    UpdateStatement,
    DeleteStatement,
    WithStatement,
    SetOperation,
    CommonTableExpression,
    TableReference,
    JoinClause,
    OrderBy,
    CreateTableStatement,
    CreateIndexStatement,
    CreateViewStatement,
    CreateTriggerStatement,
    CreateProcedureStatement,
    CreateFunctionStatement,
    DropStatement,
    AlterTableStatement,
    ColumnDefinition,
    TableConstraint,
    ForeignKeyReference,
    BlockStatement,
    ExceptionBlock,
    WhenExceptionClause,
    VariableDeclaration,
    CursorDeclaration,
    HandlerDeclaration,
    IfStatement,
    WhileStatement,
    LoopStatement,
    ForStatement,
    RepeatStatement,
    CaseStatement,
    ReturnStatement,
    AssignmentStatement,
    SetOptionStatement,
    OpenStatement,
    FetchStatement,
    CloseStatement,
    DeallocateStatement,
    ExitStatement,
    ContinueStatement,
    TryStatement,
    RaiseStatement,
    ThrowStatement,
    SignalStatement,
    CallStatement,
    BeginTransactionStatement,
    CommitStatement,
    RollbackStatement,
    SavepointStatement,
    ReleaseSavepointStatement,
    ExplainStatement,
    Literal,
    ColumnReference,
    StarExpression,
    BinaryExpression,
    UnaryExpression,
    FunctionCall,
    WindowFunction,
    OverClause,
    WindowFrame,
    FrameBound,
    AliasedExpression,
    InExpression,
    ExistsExpression,
    SubqueryExpression,
    CaseExpression,
    BetweenExpression,
    CastExpression,
    DataType,
);

/// Displays a slice with a separator between items.
pub(crate) struct DisplaySeparated<'a, T> {
    slice: &'a [T],
    sep: &'static str,
}

impl<T: fmt::Display> fmt::Display for DisplaySeparated<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut delim = "";
        for item in self.slice {
            f.write_str(delim)?;
            delim = self.sep;
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

pub(crate) const fn display_comma_separated<T>(slice: &[T]) -> DisplaySeparated<'_, T> {
    DisplaySeparated { slice, sep: ", " }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_nodes_report_their_name() {
        let column = ColumnReference {
            table: Some(String::from("u")),
            column: String::from("id"),
        };
        assert_eq!(Node::type_tag(&column), "ColumnReference");
        assert_eq!(column.summary(), "u.id");
        assert_eq!(Node::type_tag(&TableReference::table("users")), "TableReference");
    }

    #[test]
    fn test_enum_nodes_delegate() {
        let expr = Expr::integer(1);
        assert_eq!(Node::type_tag(&expr), "Literal");
        assert_eq!(expr.summary(), "1");
    }

    #[test]
    fn test_display_comma_separated() {
        let items = [1, 2, 3];
        assert_eq!(display_comma_separated(&items).to_string(), "1, 2, 3");
        let empty: [i32; 0] = [];
        assert_eq!(display_comma_separated(&empty).to_string(), "");
    }
}
