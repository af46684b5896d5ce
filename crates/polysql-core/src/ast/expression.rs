//! Expression AST types.

use std::fmt;

use super::display_comma_separated;
use super::query::OrderBy;
use super::statement::Statement;
use super::types::DataType;

/// A literal value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Literal {
    /// NULL literal.
    #[default]
    Null,
    /// Integer literal.
    Integer(i64),
    /// Float literal.
    Float(f64),
    /// String literal, with quotes removed and doubled quotes collapsed.
    String(String),
    /// Boolean literal.
    Boolean(bool),
}

impl Literal {
    /// Types a numeric literal from its source text.
    ///
    /// Text containing `.` or an exponent becomes a float. Integers that do
    /// not fit in an `i64` also become floats. Returns `None` if the text is
    /// not a number at all.
    #[must_use]
    pub fn from_numeric(text: &str) -> Option<Self> {
        if text.contains(['.', 'e', 'E']) {
            return text.parse::<f64>().ok().map(Self::Float);
        }
        match text.parse::<i64>() {
            Ok(value) => Some(Self::Integer(value)),
            Err(_) => text.parse::<f64>().ok().map(Self::Float),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "'{}'", value.replace('\'', "''")),
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
        }
    }
}

/// Binary operators.
///
/// The infix loop treats all of these with the same precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BinaryOperator {
    // Comparison
    #[default]
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,

    // Logical
    And,
    Or,

    // Arithmetic
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,

    // String
    Concat,
    Like,
    NotLike,

    // Null tests
    Is,
    IsNot,
}

impl BinaryOperator {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Concat => "||",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// Logical NOT.
    Not,
    /// Negation (-).
    Minus,
    /// Unary plus (+).
    Plus,
}

impl UnaryOperator {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Not => "NOT",
            Self::Minus => "-",
            Self::Plus => "+",
        }
    }
}

/// A possibly qualified column reference (e.g., `u.id`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnReference {
    /// Table name or alias, including any schema prefix.
    pub table: Option<String>,
    /// Column name.
    pub column: String,
}

impl fmt::Display for ColumnReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => write!(f, "{table}.{}", self.column),
            None => f.write_str(&self.column),
        }
    }
}

/// `*` or `table.*`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StarExpression {
    /// Table qualifier.
    pub table: Option<String>,
}

impl fmt::Display for StarExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => write!(f, "{table}.*"),
            None => f.write_str("*"),
        }
    }
}

/// A binary expression.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BinaryExpression {
    /// Left operand.
    pub left: Expr,
    /// Operator.
    pub op: BinaryOperator,
    /// Right operand.
    pub right: Expr,
}

impl fmt::Display for BinaryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.left, self.op)?;
        if matches!(self.right, Expr::Binary(_)) {
            write!(f, "({})", self.right)
        } else {
            write!(f, "{}", self.right)
        }
    }
}

/// A unary expression.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    /// Operator.
    pub op: UnaryOperator,
    /// Operand.
    pub operand: Box<Expr>,
}

impl fmt::Display for UnaryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op {
            UnaryOperator::Not => write!(f, "NOT {}", self.operand),
            op => write!(f, "{}{}", op.as_str(), self.operand),
        }
    }
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FunctionCall {
    /// The function name, possibly qualified.
    pub name: String,
    /// The arguments.
    pub args: Vec<Expr>,
    /// Whether DISTINCT was specified.
    pub distinct: bool,
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        write!(f, "{})", display_comma_separated(&self.args))
    }
}

/// ROWS or RANGE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    Rows,
    Range,
}

impl FrameType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rows => "ROWS",
            Self::Range => "RANGE",
        }
    }
}

/// The kind of a frame bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundType {
    /// `UNBOUNDED PRECEDING|FOLLOWING`
    Unbounded,
    /// `CURRENT ROW`
    Current,
    /// `<expr> PRECEDING|FOLLOWING`
    Expression,
}

/// PRECEDING or FOLLOWING.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDirection {
    Preceding,
    Following,
}

impl FrameDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Preceding => "PRECEDING",
            Self::Following => "FOLLOWING",
        }
    }
}

/// One end of a window frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBound {
    /// Kind of bound.
    pub bound_type: BoundType,
    /// Direction; `None` only for `CURRENT ROW`.
    pub direction: Option<FrameDirection>,
    /// Offset for expression bounds.
    pub offset: Option<Box<Expr>>,
}

impl fmt::Display for FrameBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bound_type {
            BoundType::Current => return f.write_str("CURRENT ROW"),
            BoundType::Unbounded => f.write_str("UNBOUNDED")?,
            BoundType::Expression => {
                if let Some(offset) = &self.offset {
                    write!(f, "{offset}")?;
                }
            }
        }
        match self.direction {
            Some(direction) => write!(f, " {}", direction.as_str()),
            None => Ok(()),
        }
    }
}

/// A window frame (`ROWS BETWEEN ... AND ...`).
#[derive(Debug, Clone, PartialEq)]
pub struct WindowFrame {
    /// ROWS or RANGE.
    pub frame_type: FrameType,
    /// Start bound.
    pub start: FrameBound,
    /// End bound, present for `BETWEEN` frames.
    pub end: Option<FrameBound>,
}

impl fmt::Display for WindowFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.end {
            Some(end) => write!(
                f,
                "{} BETWEEN {} AND {end}",
                self.frame_type.as_str(),
                self.start
            ),
            None => write!(f, "{} {}", self.frame_type.as_str(), self.start),
        }
    }
}

/// The `OVER (...)` clause of a window function.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverClause {
    /// PARTITION BY expressions.
    pub partition_by: Vec<Expr>,
    /// ORDER BY items.
    pub order_by: Vec<OrderBy>,
    /// Window frame clause.
    pub frame: Option<WindowFrame>,
}

impl fmt::Display for OverClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.partition_by.is_empty() {
            parts.push(format!(
                "PARTITION BY {}",
                display_comma_separated(&self.partition_by)
            ));
        }
        if !self.order_by.is_empty() {
            parts.push(format!("ORDER BY {}", display_comma_separated(&self.order_by)));
        }
        if let Some(frame) = &self.frame {
            parts.push(frame.to_string());
        }
        write!(f, "OVER ({})", parts.join(" "))
    }
}

/// A function call with an `OVER` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowFunction {
    /// The wrapped call.
    pub function: FunctionCall,
    /// The window.
    pub over: OverClause,
}

impl fmt::Display for WindowFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.function, self.over)
    }
}

/// `expr [AS] alias`.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasedExpression {
    /// The expression.
    pub expr: Box<Expr>,
    /// The alias.
    pub alias: String,
}

impl fmt::Display for AliasedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} AS {}", self.expr, self.alias)
    }
}

/// A parenthesized query used as an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct SubqueryExpression {
    /// A `SelectStatement` or a `SetOperation` over selects.
    pub query: Box<Statement>,
}

impl fmt::Display for SubqueryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.query)
    }
}

/// The right-hand side of `IN`.
#[derive(Debug, Clone, PartialEq)]
pub enum InValues {
    /// `IN (a, b, c)`
    List(Vec<Expr>),
    /// `IN (SELECT ...)`
    Subquery(SubqueryExpression),
}

/// `expr [NOT] IN (...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct InExpression {
    /// The tested expression.
    pub expr: Box<Expr>,
    /// Whether this is NOT IN.
    pub not: bool,
    /// The value list or subquery.
    pub values: InValues,
}

impl fmt::Display for InExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}IN ", self.expr, if self.not { "NOT " } else { "" })?;
        match &self.values {
            InValues::List(values) => write!(f, "({})", display_comma_separated(values)),
            InValues::Subquery(subquery) => write!(f, "{subquery}"),
        }
    }
}

/// `[NOT] EXISTS (subquery)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExistsExpression {
    /// Whether this is NOT EXISTS.
    pub not: bool,
    /// The subquery.
    pub subquery: SubqueryExpression,
}

impl fmt::Display for ExistsExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.not {
            f.write_str("NOT ")?;
        }
        write!(f, "EXISTS {}", self.subquery)
    }
}

/// One `WHEN ... THEN ...` arm of a CASE expression.
#[derive(Debug, Clone, PartialEq)]
pub struct WhenClause {
    /// The condition (or comparison value for simple CASE).
    pub condition: Expr,
    /// The result.
    pub result: Expr,
}

/// A CASE expression, simple or searched.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpression {
    /// Input of a simple CASE.
    pub input: Option<Box<Expr>>,
    /// WHEN arms; never empty.
    pub when_clauses: Vec<WhenClause>,
    /// ELSE result.
    pub else_result: Option<Box<Expr>>,
}

impl fmt::Display for CaseExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CASE")?;
        if let Some(input) = &self.input {
            write!(f, " {input}")?;
        }
        for clause in &self.when_clauses {
            write!(f, " WHEN {} THEN {}", clause.condition, clause.result)?;
        }
        if let Some(else_result) = &self.else_result {
            write!(f, " ELSE {else_result}")?;
        }
        f.write_str(" END")
    }
}

/// `expr [NOT] BETWEEN low AND high`.
#[derive(Debug, Clone, PartialEq)]
pub struct BetweenExpression {
    /// The tested expression.
    pub expr: Box<Expr>,
    /// Whether this is NOT BETWEEN.
    pub not: bool,
    /// Lower bound.
    pub low: Box<Expr>,
    /// Upper bound.
    pub high: Box<Expr>,
}

impl fmt::Display for BetweenExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}BETWEEN {} AND {}",
            self.expr,
            if self.not { "NOT " } else { "" },
            self.low,
            self.high
        )
    }
}

/// `CAST(expr AS type)` or `expr::type`.
#[derive(Debug, Clone, PartialEq)]
pub struct CastExpression {
    /// Expression to cast.
    pub expr: Box<Expr>,
    /// Target type.
    pub data_type: DataType,
}

impl fmt::Display for CastExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CAST({} AS {})", self.expr, self.data_type)
    }
}

/// An SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal(Literal),
    /// A column reference.
    Column(Box<ColumnReference>),
    /// `*` or `t.*`.
    Star(StarExpression),
    /// A binary expression.
    Binary(Box<BinaryExpression>),
    /// A unary expression.
    Unary(UnaryExpression),
    /// A function call without a window.
    Function(FunctionCall),
    /// A window function.
    Window(Box<WindowFunction>),
    /// An expression with an alias.
    Aliased(AliasedExpression),
    /// IN expression.
    In(InExpression),
    /// EXISTS expression.
    Exists(ExistsExpression),
    /// A scalar subquery.
    Subquery(SubqueryExpression),
    /// CASE expression.
    Case(CaseExpression),
    /// BETWEEN expression.
    Between(BetweenExpression),
    /// CAST expression.
    Cast(CastExpression),
}

impl Default for Expr {
    fn default() -> Self {
        Self::Literal(Literal::Null)
    }
}

impl Expr {
    /// Creates a column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(Box::new(ColumnReference {
            table: None,
            column: name.into(),
        }))
    }

    /// Creates an integer literal.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::Literal(Literal::Integer(value))
    }

    /// Creates a string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    /// Returns the stable node tag of the expression variant.
    #[must_use]
    pub const fn type_tag(&self) -> &'static str {
        match self {
            Self::Literal(_) => "Literal",
            Self::Column(_) => "ColumnReference",
            Self::Star(_) => "StarExpression",
            Self::Binary(_) => "BinaryExpression",
            Self::Unary(_) => "UnaryExpression",
            Self::Function(_) => "FunctionCall",
            Self::Window(_) => "WindowFunction",
            Self::Aliased(_) => "AliasedExpression",
            Self::In(_) => "InExpression",
            Self::Exists(_) => "ExistsExpression",
            Self::Subquery(_) => "SubqueryExpression",
            Self::Case(_) => "CaseExpression",
            Self::Between(_) => "BetweenExpression",
            Self::Cast(_) => "CastExpression",
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(node) => write!(f, "{node}"),
            Self::Column(node) => write!(f, "{node}"),
            Self::Star(node) => write!(f, "{node}"),
            Self::Binary(node) => write!(f, "{node}"),
            Self::Unary(node) => write!(f, "{node}"),
            Self::Function(node) => write!(f, "{node}"),
            Self::Window(node) => write!(f, "{node}"),
            Self::Aliased(node) => write!(f, "{node}"),
            Self::In(node) => write!(f, "{node}"),
            Self::Exists(node) => write!(f, "{node}"),
            Self::Subquery(node) => write!(f, "{node}"),
            Self::Case(node) => write!(f, "{node}"),
            Self::Between(node) => write!(f, "{node}"),
            Self::Cast(node) => write!(f, "{node}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_literal_typing() {
        assert_eq!(Literal::from_numeric("42"), Some(Literal::Integer(42)));
        assert_eq!(Literal::from_numeric("3.5"), Some(Literal::Float(3.5)));
        assert_eq!(Literal::from_numeric(".5"), Some(Literal::Float(0.5)));
        assert_eq!(Literal::from_numeric("1e3"), Some(Literal::Float(1000.0)));
        assert!(matches!(
            Literal::from_numeric("99999999999999999999"),
            Some(Literal::Float(_))
        ));
        assert_eq!(Literal::from_numeric("abc"), None);
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::String(String::from("it's")).to_string(), "'it''s'");
        assert_eq!(Literal::Null.to_string(), "NULL");
        assert_eq!(Literal::Boolean(true).to_string(), "TRUE");
    }

    #[test]
    fn test_binary_display_groups_right_operand() {
        let inner = Expr::Binary(Box::new(BinaryExpression {
            left: Expr::column("b"),
            op: BinaryOperator::Plus,
            right: Expr::integer(1),
        }));
        let outer = Expr::Binary(Box::new(BinaryExpression {
            left: Expr::column("a"),
            op: BinaryOperator::Eq,
            right: inner,
        }));
        assert_eq!(outer.to_string(), "a = (b + 1)");
    }

    #[test]
    fn test_expr_tags() {
        assert_eq!(Expr::column("x").type_tag(), "ColumnReference");
        assert_eq!(Expr::default().type_tag(), "Literal");
        assert_eq!(
            Expr::Star(StarExpression::default()).type_tag(),
            "StarExpression"
        );
    }

    #[test]
    fn test_window_display() {
        let window = WindowFunction {
            function: FunctionCall {
                name: String::from("ROW_NUMBER"),
                args: vec![],
                distinct: false,
            },
            over: OverClause {
                partition_by: vec![Expr::column("dept")],
                order_by: vec![],
                frame: Some(WindowFrame {
                    frame_type: FrameType::Rows,
                    start: FrameBound {
                        bound_type: BoundType::Unbounded,
                        direction: Some(FrameDirection::Preceding),
                        offset: None,
                    },
                    end: Some(FrameBound {
                        bound_type: BoundType::Current,
                        direction: None,
                        offset: None,
                    }),
                }),
            },
        };
        assert_eq!(
            window.to_string(),
            "ROW_NUMBER() OVER (PARTITION BY dept ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)"
        );
    }
}
