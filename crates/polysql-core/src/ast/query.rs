//! Query AST types: SELECT, INSERT, UPDATE, DELETE, WITH and set operations.

use std::fmt;

use super::display_comma_separated;
use super::expression::Expr;
use super::statement::Statement;

/// A possibly schema-qualified object name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectName {
    /// Schema (or `database.schema`) qualifier.
    pub schema: Option<String>,
    /// Object name.
    pub name: String,
}

impl ObjectName {
    /// Creates an unqualified name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Null ordering for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOrdering {
    /// NULLs come first.
    First,
    /// NULLs come last.
    Last,
}

impl NullOrdering {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// An ORDER BY clause entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    /// The expression to order by.
    pub expr: Expr,
    /// The direction (ASC or DESC).
    pub direction: OrderDirection,
    /// Null ordering (optional).
    pub nulls: Option<NullOrdering>,
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.expr, self.direction.as_str())?;
        if let Some(nulls) = self.nulls {
            write!(f, " {}", nulls.as_str())?;
        }
        Ok(())
    }
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinType {
    /// INNER JOIN (also a bare JOIN).
    #[default]
    Inner,
    /// LEFT OUTER JOIN.
    Left,
    /// RIGHT OUTER JOIN.
    Right,
    /// FULL OUTER JOIN.
    Full,
    /// CROSS JOIN.
    Cross,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

/// A table in a FROM clause, DML target or join.
///
/// For a derived table `subquery` is set and `name` repeats the alias.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableReference {
    /// Schema name (optional).
    pub schema: Option<String>,
    /// Table name.
    pub name: String,
    /// Alias.
    pub alias: Option<String>,
    /// Derived-table query: a `SelectStatement` or a `SetOperation`.
    pub subquery: Option<Box<Statement>>,
    /// SQL Server table hints (e.g., `NOLOCK`).
    pub hints: Vec<String>,
}

impl TableReference {
    /// Creates a simple table reference.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns true if this is a derived table.
    #[must_use]
    pub const fn is_derived(&self) -> bool {
        self.subquery.is_some()
    }

    /// Returns the name other clauses use to refer to this table.
    #[must_use]
    pub fn visible_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

impl fmt::Display for TableReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(subquery) = &self.subquery {
            write!(f, "({subquery})")?;
        } else {
            if let Some(schema) = &self.schema {
                write!(f, "{schema}.")?;
            }
            f.write_str(&self.name)?;
        }
        if let Some(alias) = &self.alias {
            write!(f, " AS {alias}")?;
        }
        if !self.hints.is_empty() {
            write!(f, " WITH ({})", self.hints.join(", "))?;
        }
        Ok(())
    }
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JoinClause {
    /// The type of join.
    pub join_type: JoinType,
    /// The table to join.
    pub table: TableReference,
    /// The ON condition.
    pub condition: Option<Expr>,
    /// USING columns (alternative to ON).
    pub using: Vec<String>,
}

impl fmt::Display for JoinClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.join_type.as_str(), self.table)?;
        if let Some(condition) = &self.condition {
            write!(f, " ON {condition}")?;
        }
        if !self.using.is_empty() {
            write!(f, " USING ({})", self.using.join(", "))?;
        }
        Ok(())
    }
}

/// SQL Server `TOP n [PERCENT] [WITH TIES]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Top {
    /// Row count or percentage.
    pub quantity: Expr,
    /// PERCENT was given.
    pub percent: bool,
    /// WITH TIES was given.
    pub with_ties: bool,
}

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectStatement {
    /// Whether to select DISTINCT values.
    pub distinct: bool,
    /// TOP clause.
    pub top: Option<Top>,
    /// The select list: columns, stars, expressions and aliased expressions.
    pub columns: Vec<Expr>,
    /// `INTO` targets (variables or a new table).
    pub into: Vec<String>,
    /// Comma-separated FROM items.
    pub from: Vec<TableReference>,
    /// Joins following the FROM items.
    pub joins: Vec<JoinClause>,
    /// The WHERE clause.
    pub where_clause: Option<Expr>,
    /// GROUP BY expressions.
    pub group_by: Vec<Expr>,
    /// HAVING clause.
    pub having: Option<Expr>,
    /// ORDER BY clauses.
    pub order_by: Vec<OrderBy>,
    /// LIMIT clause.
    pub limit: Option<Expr>,
    /// OFFSET clause.
    pub offset: Option<Expr>,
    /// `FETCH FIRST|NEXT n ROWS ONLY`.
    pub fetch: Option<Expr>,
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        if let Some(top) = &self.top {
            write!(f, "TOP {} ", top.quantity)?;
            if top.percent {
                f.write_str("PERCENT ")?;
            }
            if top.with_ties {
                f.write_str("WITH TIES ")?;
            }
        }
        write!(f, "{}", display_comma_separated(&self.columns))?;
        if !self.into.is_empty() {
            write!(f, " INTO {}", self.into.join(", "))?;
        }
        if !self.from.is_empty() {
            write!(f, " FROM {}", display_comma_separated(&self.from))?;
        }
        for join in &self.joins {
            write!(f, " {join}")?;
        }
        if let Some(where_clause) = &self.where_clause {
            write!(f, " WHERE {where_clause}")?;
        }
        if !self.group_by.is_empty() {
            write!(f, " GROUP BY {}", display_comma_separated(&self.group_by))?;
        }
        if let Some(having) = &self.having {
            write!(f, " HAVING {having}")?;
        }
        if !self.order_by.is_empty() {
            write!(f, " ORDER BY {}", display_comma_separated(&self.order_by))?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        if let Some(offset) = &self.offset {
            write!(f, " OFFSET {offset}")?;
        }
        if let Some(fetch) = &self.fetch {
            write!(f, " FETCH NEXT {fetch} ROWS ONLY")?;
        }
        Ok(())
    }
}

/// Source of rows for INSERT.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    /// `VALUES (...), (...)`
    Values(Vec<Vec<Expr>>),
    /// `SELECT ...` (or any query statement).
    Query(Box<Statement>),
    /// `DEFAULT VALUES`
    DefaultValues,
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    /// Target table.
    pub table: ObjectName,
    /// Column list (empty means all columns).
    pub columns: Vec<String>,
    /// Rows to insert.
    pub source: InsertSource,
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INSERT INTO {}", self.table)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", self.columns.join(", "))?;
        }
        match &self.source {
            InsertSource::Values(rows) => {
                f.write_str(" VALUES ")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "({})", display_comma_separated(row))?;
                }
                Ok(())
            }
            InsertSource::Query(query) => write!(f, " {query}"),
            InsertSource::DefaultValues => f.write_str(" DEFAULT VALUES"),
        }
    }
}

/// `target = value`, used by UPDATE and procedural SET.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Column or variable, possibly qualified.
    pub target: String,
    /// The assigned value.
    pub value: Expr,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.target, self.value)
    }
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    /// Target table.
    pub table: TableReference,
    /// SET assignments.
    pub assignments: Vec<Assignment>,
    /// `FROM` tables (SQL Server and PostgreSQL).
    pub from: Vec<TableReference>,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
}

impl fmt::Display for UpdateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UPDATE {} SET {}",
            self.table,
            display_comma_separated(&self.assignments)
        )?;
        if !self.from.is_empty() {
            write!(f, " FROM {}", display_comma_separated(&self.from))?;
        }
        if let Some(where_clause) = &self.where_clause {
            write!(f, " WHERE {where_clause}")?;
        }
        Ok(())
    }
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    /// Target table.
    pub table: TableReference,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
}

impl fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", self.table)?;
        if let Some(where_clause) = &self.where_clause {
            write!(f, " WHERE {where_clause}")?;
        }
        Ok(())
    }
}

/// One `name [(columns)] AS (query)` entry of a WITH clause.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonTableExpression {
    /// CTE name.
    pub name: String,
    /// Column list override.
    pub columns: Vec<String>,
    /// The CTE body: a SELECT or a set operation.
    pub query: Box<Statement>,
}

impl fmt::Display for CommonTableExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.columns.is_empty() {
            write!(f, "({})", self.columns.join(", "))?;
        }
        write!(f, " AS ({})", self.query)
    }
}

/// `WITH [RECURSIVE] cte, ... query`.
#[derive(Debug, Clone, PartialEq)]
pub struct WithStatement {
    /// RECURSIVE was given.
    pub recursive: bool,
    /// The CTEs; never empty.
    pub ctes: Vec<CommonTableExpression>,
    /// The main query: a SELECT, set operation or nested WITH.
    pub query: Box<Statement>,
}

impl fmt::Display for WithStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WITH ")?;
        if self.recursive {
            f.write_str("RECURSIVE ")?;
        }
        write!(f, "{} {}", display_comma_separated(&self.ctes), self.query)
    }
}

/// Set operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    Union,
    Intersect,
    Except,
}

impl SetOperator {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

/// `left UNION|INTERSECT|EXCEPT [ALL] right`, folded left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct SetOperation {
    /// Left operand.
    pub left: Box<Statement>,
    /// Operator.
    pub op: SetOperator,
    /// ALL was given.
    pub all: bool,
    /// Right operand.
    pub right: Box<Statement>,
}

impl fmt::Display for SetOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}{} {}",
            self.left,
            self.op.as_str(),
            if self.all { " ALL" } else { "" },
            self.right
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_display() {
        let select = SelectStatement {
            columns: vec![Expr::column("id"), Expr::column("name")],
            from: vec![TableReference::table("users")],
            ..SelectStatement::default()
        };
        assert_eq!(select.to_string(), "SELECT id, name FROM users");
    }

    #[test]
    fn test_table_reference_visible_name() {
        let mut table = TableReference::table("users");
        assert_eq!(table.visible_name(), "users");
        table.alias = Some(String::from("u"));
        assert_eq!(table.visible_name(), "u");
        assert_eq!(table.to_string(), "users AS u");
        assert!(!table.is_derived());
    }

    #[test]
    fn test_join_display() {
        let join = JoinClause {
            join_type: JoinType::Left,
            table: TableReference::table("orders"),
            condition: Some(Expr::column("x")),
            using: vec![],
        };
        assert_eq!(join.to_string(), "LEFT JOIN orders ON x");
    }
}
