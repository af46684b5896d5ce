//! Procedural AST types: blocks, declarations, control flow, cursors and
//! error handling.

use std::fmt;

use super::display_comma_separated;
use super::expression::Expr;
use super::query::{Assignment, ObjectName};
use super::statement::Statement;
use super::types::DataType;

/// Writes `stmt; stmt;` with a leading space before each statement.
fn write_statements(f: &mut fmt::Formatter<'_>, statements: &[Statement]) -> fmt::Result {
    for statement in statements {
        write!(f, " {statement};")?;
    }
    Ok(())
}

fn write_label(f: &mut fmt::Formatter<'_>, label: Option<&String>) -> fmt::Result {
    match label {
        Some(label) => write!(f, "{label}: "),
        None => Ok(()),
    }
}

/// `[label:] [DECLARE ...] BEGIN ... [EXCEPTION ...] END [label]`.
///
/// Also the body of routines and block triggers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStatement {
    /// Leading label.
    pub label: Option<String>,
    /// Declarations, in source order.
    pub declarations: Vec<Declaration>,
    /// Body statements.
    pub statements: Vec<Statement>,
    /// PL/pgSQL exception section.
    pub exception: Option<ExceptionBlock>,
    /// Label repeated after END.
    pub end_label: Option<String>,
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_label(f, self.label.as_ref())?;
        f.write_str("BEGIN")?;
        for declaration in &self.declarations {
            write!(f, " {declaration};")?;
        }
        write_statements(f, &self.statements)?;
        if let Some(exception) = &self.exception {
            write!(f, " {exception}")?;
        }
        f.write_str(" END")?;
        if let Some(label) = &self.end_label {
            write!(f, " {label}")?;
        }
        Ok(())
    }
}

/// `EXCEPTION WHEN ... THEN ...`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExceptionBlock {
    /// Handlers, in order.
    pub handlers: Vec<WhenExceptionClause>,
}

impl fmt::Display for ExceptionBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EXCEPTION")?;
        for handler in &self.handlers {
            write!(f, " {handler}")?;
        }
        Ok(())
    }
}

/// One `WHEN cond [OR cond] THEN statements` handler.
#[derive(Debug, Clone, PartialEq)]
pub struct WhenExceptionClause {
    /// Condition names, uppercased for keywords (`OTHERS`, `SQLEXCEPTION`)
    /// and kept as written otherwise.
    pub conditions: Vec<String>,
    /// Handler statements.
    pub statements: Vec<Statement>,
}

impl WhenExceptionClause {
    /// Returns true if the handler catches every error.
    #[must_use]
    pub fn is_catch_all(&self) -> bool {
        self.conditions
            .iter()
            .any(|c| c.eq_ignore_ascii_case("OTHERS") || c.eq_ignore_ascii_case("SQLEXCEPTION"))
    }
}

impl fmt::Display for WhenExceptionClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WHEN {} THEN", self.conditions.join(" OR "))?;
        write_statements(f, &self.statements)
    }
}

/// A `DECLARE` item.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// Variable.
    Variable(VariableDeclaration),
    /// Cursor.
    Cursor(CursorDeclaration),
    /// Condition handler.
    Handler(HandlerDeclaration),
}

impl Declaration {
    /// Returns the stable node tag of the declaration.
    #[must_use]
    pub const fn type_tag(&self) -> &'static str {
        match self {
            Self::Variable(_) => "VariableDeclaration",
            Self::Cursor(_) => "CursorDeclaration",
            Self::Handler(_) => "HandlerDeclaration",
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(node) => write!(f, "{node}"),
            Self::Cursor(node) => write!(f, "{node}"),
            Self::Handler(node) => write!(f, "{node}"),
        }
    }
}

/// `DECLARE name[, name] [CONSTANT] type [NOT NULL] [DEFAULT expr]`.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    /// Declared names (MySQL allows several).
    pub names: Vec<String>,
    /// Type.
    pub data_type: DataType,
    /// Initial value.
    pub default: Option<Expr>,
    /// PL/pgSQL CONSTANT.
    pub constant: bool,
    /// PL/pgSQL NOT NULL.
    pub not_null: bool,
}

impl fmt::Display for VariableDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DECLARE {}", self.names.join(", "))?;
        if self.constant {
            f.write_str(" CONSTANT")?;
        }
        write!(f, " {}", self.data_type)?;
        if self.not_null {
            f.write_str(" NOT NULL")?;
        }
        if let Some(default) = &self.default {
            write!(f, " DEFAULT {default}")?;
        }
        Ok(())
    }
}

/// `DECLARE name CURSOR [options] FOR query`.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorDeclaration {
    /// Cursor name.
    pub name: String,
    /// T-SQL cursor options (e.g., `LOCAL`, `FAST_FORWARD`), uppercased.
    pub options: Vec<String>,
    /// The cursor query.
    pub query: Box<Statement>,
}

impl fmt::Display for CursorDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DECLARE {} CURSOR", self.name)?;
        for option in &self.options {
            write!(f, " {option}")?;
        }
        write!(f, " FOR {}", self.query)
    }
}

/// Handler action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerAction {
    Continue,
    Exit,
    Undo,
}

impl HandlerAction {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Continue => "CONTINUE",
            Self::Exit => "EXIT",
            Self::Undo => "UNDO",
        }
    }
}

/// A condition a handler reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerCondition {
    SqlException,
    SqlWarning,
    NotFound,
    /// `SQLSTATE [VALUE] 'code'`
    SqlState(String),
    /// A vendor error number.
    ErrorCode(i64),
    /// A declared condition name.
    Named(String),
}

impl fmt::Display for HandlerCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SqlException => f.write_str("SQLEXCEPTION"),
            Self::SqlWarning => f.write_str("SQLWARNING"),
            Self::NotFound => f.write_str("NOT FOUND"),
            Self::SqlState(code) => write!(f, "SQLSTATE '{code}'"),
            Self::ErrorCode(code) => write!(f, "{code}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// `DECLARE action HANDLER FOR conditions statement`.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerDeclaration {
    /// Action.
    pub action: HandlerAction,
    /// Conditions; never empty.
    pub conditions: Vec<HandlerCondition>,
    /// Handler body: a single statement or a block.
    pub body: Box<Statement>,
}

impl fmt::Display for HandlerDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DECLARE {} HANDLER FOR {} {}",
            self.action.as_str(),
            display_comma_separated(&self.conditions),
            self.body
        )
    }
}

/// An `ELSEIF`/`ELSIF` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct ElseIf {
    /// Condition.
    pub condition: Expr,
    /// Statements.
    pub statements: Vec<Statement>,
}

/// `IF cond THEN ... [ELSEIF ...] [ELSE ...] END IF`, or T-SQL
/// `IF cond stmt [ELSE stmt]`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    /// Condition.
    pub condition: Expr,
    /// THEN statements.
    pub then_block: Vec<Statement>,
    /// ELSEIF arms.
    pub else_ifs: Vec<ElseIf>,
    /// ELSE statements.
    pub else_block: Option<Vec<Statement>>,
}

impl fmt::Display for IfStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IF {} THEN", self.condition)?;
        write_statements(f, &self.then_block)?;
        for else_if in &self.else_ifs {
            write!(f, " ELSEIF {} THEN", else_if.condition)?;
            write_statements(f, &else_if.statements)?;
        }
        if let Some(else_block) = &self.else_block {
            f.write_str(" ELSE")?;
            write_statements(f, else_block)?;
        }
        f.write_str(" END IF")
    }
}

/// `WHILE cond DO ... END WHILE` and its vendor variants.
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    /// Label.
    pub label: Option<String>,
    /// Loop condition.
    pub condition: Expr,
    /// Body.
    pub body: Vec<Statement>,
}

impl fmt::Display for WhileStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_label(f, self.label.as_ref())?;
        write!(f, "WHILE {} DO", self.condition)?;
        write_statements(f, &self.body)?;
        f.write_str(" END WHILE")
    }
}

/// `LOOP ... END LOOP`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopStatement {
    /// Label.
    pub label: Option<String>,
    /// Body.
    pub body: Vec<Statement>,
}

impl fmt::Display for LoopStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_label(f, self.label.as_ref())?;
        f.write_str("LOOP")?;
        write_statements(f, &self.body)?;
        f.write_str(" END LOOP")
    }
}

/// What a FOR loop iterates over.
#[derive(Debug, Clone, PartialEq)]
pub enum ForRange {
    /// `start .. end [BY step]`
    Numeric {
        /// First value.
        start: Expr,
        /// Last value.
        end: Expr,
        /// Step.
        step: Option<Expr>,
    },
    /// `IN SELECT ...`
    Query(Box<Statement>),
}

/// `FOR var IN [REVERSE] range LOOP ... END LOOP`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    /// Label.
    pub label: Option<String>,
    /// Loop variable.
    pub variable: String,
    /// REVERSE.
    pub reverse: bool,
    /// Range or query.
    pub range: ForRange,
    /// Body.
    pub body: Vec<Statement>,
}

impl fmt::Display for ForStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_label(f, self.label.as_ref())?;
        write!(f, "FOR {} IN ", self.variable)?;
        if self.reverse {
            f.write_str("REVERSE ")?;
        }
        match &self.range {
            ForRange::Numeric { start, end, step } => {
                write!(f, "{start} .. {end}")?;
                if let Some(step) = step {
                    write!(f, " BY {step}")?;
                }
            }
            ForRange::Query(query) => write!(f, "{query}")?,
        }
        f.write_str(" LOOP")?;
        write_statements(f, &self.body)?;
        f.write_str(" END LOOP")
    }
}

/// `REPEAT ... UNTIL cond END REPEAT`.
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatStatement {
    /// Label.
    pub label: Option<String>,
    /// Body.
    pub body: Vec<Statement>,
    /// Exit condition.
    pub until: Expr,
}

impl fmt::Display for RepeatStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_label(f, self.label.as_ref())?;
        f.write_str("REPEAT")?;
        write_statements(f, &self.body)?;
        write!(f, " UNTIL {} END REPEAT", self.until)
    }
}

/// One arm of a procedural CASE.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseStatementWhen {
    /// Condition, or comparison value for a simple CASE.
    pub condition: Expr,
    /// Statements.
    pub statements: Vec<Statement>,
}

/// Procedural `CASE [input] WHEN ... THEN stmts ... [ELSE stmts] END CASE`.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseStatement {
    /// Input of a simple CASE.
    pub input: Option<Expr>,
    /// Arms; never empty.
    pub when_clauses: Vec<CaseStatementWhen>,
    /// ELSE statements.
    pub else_block: Option<Vec<Statement>>,
}

impl fmt::Display for CaseStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CASE")?;
        if let Some(input) = &self.input {
            write!(f, " {input}")?;
        }
        for clause in &self.when_clauses {
            write!(f, " WHEN {} THEN", clause.condition)?;
            write_statements(f, &clause.statements)?;
        }
        if let Some(else_block) = &self.else_block {
            f.write_str(" ELSE")?;
            write_statements(f, else_block)?;
        }
        f.write_str(" END CASE")
    }
}

/// `RETURN [expr]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    /// Returned value.
    pub value: Option<Expr>,
}

impl fmt::Display for ReturnStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "RETURN {value}"),
            None => f.write_str("RETURN"),
        }
    }
}

/// `SET a = 1[, b = 2]` or `a := 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStatement {
    /// Assignments; never empty.
    pub assignments: Vec<Assignment>,
}

impl fmt::Display for AssignmentStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SET {}", display_comma_separated(&self.assignments))
    }
}

/// A session option such as `SET NOCOUNT ON`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetOptionStatement {
    /// Option name, uppercased (e.g., `NOCOUNT`, `TRANSACTION ISOLATION LEVEL`).
    pub name: String,
    /// Option value as written.
    pub value: String,
}

impl fmt::Display for SetOptionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SET {} {}", self.name, self.value)
    }
}

/// `OPEN cursor [FOR query]`.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenStatement {
    /// Cursor name.
    pub cursor: String,
    /// PL/pgSQL `OPEN c FOR query`.
    pub query: Option<Box<Statement>>,
}

impl fmt::Display for OpenStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OPEN {}", self.cursor)?;
        if let Some(query) = &self.query {
            write!(f, " FOR {query}")?;
        }
        Ok(())
    }
}

/// FETCH direction.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchDirection {
    Next,
    Prior,
    First,
    Last,
    Absolute(Expr),
    Relative(Expr),
}

impl fmt::Display for FetchDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next => f.write_str("NEXT"),
            Self::Prior => f.write_str("PRIOR"),
            Self::First => f.write_str("FIRST"),
            Self::Last => f.write_str("LAST"),
            Self::Absolute(n) => write!(f, "ABSOLUTE {n}"),
            Self::Relative(n) => write!(f, "RELATIVE {n}"),
        }
    }
}

/// `FETCH [direction] [FROM|IN] cursor [INTO targets]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchStatement {
    /// Direction.
    pub direction: Option<FetchDirection>,
    /// Cursor name.
    pub cursor: String,
    /// INTO targets.
    pub into: Vec<String>,
}

impl fmt::Display for FetchStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FETCH ")?;
        if let Some(direction) = &self.direction {
            write!(f, "{direction} FROM ")?;
        }
        f.write_str(&self.cursor)?;
        if !self.into.is_empty() {
            write!(f, " INTO {}", self.into.join(", "))?;
        }
        Ok(())
    }
}

/// `CLOSE cursor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseStatement {
    /// Cursor name.
    pub cursor: String,
}

impl fmt::Display for CloseStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CLOSE {}", self.cursor)
    }
}

/// `DEALLOCATE cursor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeallocateStatement {
    /// Cursor name.
    pub cursor: String,
}

impl fmt::Display for DeallocateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DEALLOCATE {}", self.cursor)
    }
}

/// `EXIT|LEAVE|BREAK [label] [WHEN cond]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExitStatement {
    /// Target label.
    pub label: Option<String>,
    /// WHEN condition.
    pub condition: Option<Expr>,
}

impl fmt::Display for ExitStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EXIT")?;
        if let Some(label) = &self.label {
            write!(f, " {label}")?;
        }
        if let Some(condition) = &self.condition {
            write!(f, " WHEN {condition}")?;
        }
        Ok(())
    }
}

/// `CONTINUE|ITERATE [label] [WHEN cond]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinueStatement {
    /// Target label.
    pub label: Option<String>,
    /// WHEN condition.
    pub condition: Option<Expr>,
}

impl fmt::Display for ContinueStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CONTINUE")?;
        if let Some(label) = &self.label {
            write!(f, " {label}")?;
        }
        if let Some(condition) = &self.condition {
            write!(f, " WHEN {condition}")?;
        }
        Ok(())
    }
}

/// The `BEGIN CATCH ... END CATCH` half of a TRY statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatchBlock {
    /// Statements.
    pub body: Vec<Statement>,
}

/// `BEGIN TRY ... END TRY BEGIN CATCH ... END CATCH`.
#[derive(Debug, Clone, PartialEq)]
pub struct TryStatement {
    /// Protected statements.
    pub try_block: Vec<Statement>,
    /// Handler.
    pub catch_block: CatchBlock,
}

impl fmt::Display for TryStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BEGIN TRY")?;
        write_statements(f, &self.try_block)?;
        f.write_str(" END TRY BEGIN CATCH")?;
        write_statements(f, &self.catch_block.body)?;
        f.write_str(" END CATCH")
    }
}

/// PL/pgSQL RAISE levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaiseLevel {
    Debug,
    Log,
    Info,
    Notice,
    Warning,
    Exception,
}

impl RaiseLevel {
    /// Parses a level word, ignoring case.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_uppercase().as_str() {
            "DEBUG" => Some(Self::Debug),
            "LOG" => Some(Self::Log),
            "INFO" => Some(Self::Info),
            "NOTICE" => Some(Self::Notice),
            "WARNING" => Some(Self::Warning),
            "EXCEPTION" => Some(Self::Exception),
            _ => None,
        }
    }

    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Log => "LOG",
            Self::Info => "INFO",
            Self::Notice => "NOTICE",
            Self::Warning => "WARNING",
            Self::Exception => "EXCEPTION",
        }
    }
}

/// `RAISE [level] ['format' [, args]] [USING opt = expr]` or T-SQL
/// `RAISERROR(message, severity, state)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RaiseStatement {
    /// Written as RAISERROR.
    pub raiserror: bool,
    /// Level.
    pub level: Option<RaiseLevel>,
    /// Message or format string.
    pub message: Option<Expr>,
    /// Format arguments (RAISERROR: severity, state, ...).
    pub arguments: Vec<Expr>,
    /// Condition name or `SQLSTATE 'code'`.
    pub condition: Option<String>,
    /// `USING` options.
    pub options: Vec<Assignment>,
}

impl fmt::Display for RaiseStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.raiserror {
            f.write_str("RAISERROR(")?;
            if let Some(message) = &self.message {
                write!(f, "{message}")?;
            }
            for argument in &self.arguments {
                write!(f, ", {argument}")?;
            }
            return f.write_str(")");
        }
        f.write_str("RAISE")?;
        if let Some(level) = self.level {
            write!(f, " {}", level.as_str())?;
        }
        if let Some(condition) = &self.condition {
            write!(f, " {condition}")?;
        }
        if let Some(message) = &self.message {
            write!(f, " {message}")?;
        }
        for argument in &self.arguments {
            write!(f, ", {argument}")?;
        }
        if !self.options.is_empty() {
            write!(f, " USING {}", display_comma_separated(&self.options))?;
        }
        Ok(())
    }
}

/// T-SQL `THROW [number, message, state]`.
///
/// A bare `THROW` rethrows the current error and has no fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ThrowStatement {
    /// Error number.
    pub error_number: Option<Expr>,
    /// Message.
    pub message: Option<Expr>,
    /// State.
    pub state: Option<Expr>,
}

impl fmt::Display for ThrowStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("THROW")?;
        if let (Some(number), Some(message), Some(state)) =
            (&self.error_number, &self.message, &self.state)
        {
            write!(f, " {number}, {message}, {state}")?;
        }
        Ok(())
    }
}

/// `SIGNAL|RESIGNAL [SQLSTATE [VALUE] 'code' | condition] [SET prop = expr, ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalStatement {
    /// Written as RESIGNAL.
    pub resignal: bool,
    /// SQLSTATE code.
    pub sqlstate: Option<String>,
    /// Condition name.
    pub condition_name: Option<String>,
    /// Signal information items (e.g., `MESSAGE_TEXT`).
    pub properties: Vec<Assignment>,
}

impl fmt::Display for SignalStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.resignal { "RESIGNAL" } else { "SIGNAL" })?;
        if let Some(sqlstate) = &self.sqlstate {
            write!(f, " SQLSTATE '{sqlstate}'")?;
        }
        if let Some(name) = &self.condition_name {
            write!(f, " {name}")?;
        }
        if !self.properties.is_empty() {
            write!(f, " SET {}", display_comma_separated(&self.properties))?;
        }
        Ok(())
    }
}

/// `CALL name(args)` or `EXEC name args`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallStatement {
    /// Procedure name.
    pub name: ObjectName,
    /// Arguments.
    pub args: Vec<Expr>,
}

impl fmt::Display for CallStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CALL {}({})", self.name, display_comma_separated(&self.args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raise_level_from_word() {
        assert_eq!(RaiseLevel::from_word("notice"), Some(RaiseLevel::Notice));
        assert_eq!(RaiseLevel::from_word("EXCEPTION"), Some(RaiseLevel::Exception));
        assert_eq!(RaiseLevel::from_word("loud"), None);
    }

    #[test]
    fn test_catch_all_handler() {
        let clause = WhenExceptionClause {
            conditions: vec![String::from("division_by_zero"), String::from("OTHERS")],
            statements: vec![],
        };
        assert!(clause.is_catch_all());
    }

    #[test]
    fn test_throw_display() {
        let rethrow = ThrowStatement {
            error_number: None,
            message: None,
            state: None,
        };
        assert_eq!(rethrow.to_string(), "THROW");
        let throw = ThrowStatement {
            error_number: Some(Expr::integer(50001)),
            message: Some(Expr::string("bad")),
            state: Some(Expr::integer(1)),
        };
        assert_eq!(throw.to_string(), "THROW 50001, 'bad', 1");
    }

    #[test]
    fn test_block_display() {
        let block = BlockStatement {
            label: Some(String::from("outer")),
            statements: vec![Statement::Return(ReturnStatement {
                value: Some(Expr::integer(1)),
            })],
            end_label: Some(String::from("outer")),
            ..BlockStatement::default()
        };
        assert_eq!(block.to_string(), "outer: BEGIN RETURN 1; END outer");
    }
}
