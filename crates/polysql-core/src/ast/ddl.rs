//! DDL AST types: CREATE TABLE/INDEX/VIEW/TRIGGER, DROP and ALTER TABLE.

use std::collections::BTreeMap;
use std::fmt;

use super::display_comma_separated;
use super::expression::Expr;
use super::procedural::BlockStatement;
use super::query::{ObjectName, OrderBy};
use super::statement::Statement;
use super::types::DataType;

/// Referential actions for `ON DELETE` / `ON UPDATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferentialAction {
    Cascade,
    Restrict,
    SetNull,
    SetDefault,
    NoAction,
}

impl ReferentialAction {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::NoAction => "NO ACTION",
        }
    }
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `REFERENCES table [(columns)] [ON DELETE ...] [ON UPDATE ...]` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyReference {
    /// Referenced table.
    pub table: ObjectName,
    /// Referenced columns.
    pub columns: Vec<String>,
    /// ON DELETE action.
    pub on_delete: Option<ReferentialAction>,
    /// ON UPDATE action.
    pub on_update: Option<ReferentialAction>,
}

impl fmt::Display for ForeignKeyReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REFERENCES {}", self.table)?;
        if !self.columns.is_empty() {
            write!(f, "({})", self.columns.join(", "))?;
        }
        if let Some(action) = self.on_delete {
            write!(f, " ON DELETE {action}")?;
        }
        if let Some(action) = self.on_update {
            write!(f, " ON UPDATE {action}")?;
        }
        Ok(())
    }
}

/// The vendor spelling of an auto-generated key column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoIncrement {
    /// MySQL `AUTO_INCREMENT`.
    AutoIncrement,
    /// SQLite `AUTOINCREMENT`.
    Autoincrement,
    /// SQL Server `IDENTITY[(seed, increment)]`.
    Identity {
        /// Seed value.
        seed: Option<i64>,
        /// Increment.
        increment: Option<i64>,
    },
    /// PostgreSQL `GENERATED {ALWAYS|BY DEFAULT} AS IDENTITY`.
    Generated {
        /// ALWAYS rather than BY DEFAULT.
        always: bool,
    },
}

impl fmt::Display for AutoIncrement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AutoIncrement => f.write_str("AUTO_INCREMENT"),
            Self::Autoincrement => f.write_str("AUTOINCREMENT"),
            Self::Identity {
                seed: Some(seed),
                increment,
            } => write!(f, "IDENTITY({seed}, {})", increment.unwrap_or(1)),
            Self::Identity { .. } => f.write_str("IDENTITY"),
            Self::Generated { always: true } => f.write_str("GENERATED ALWAYS AS IDENTITY"),
            Self::Generated { always: false } => {
                f.write_str("GENERATED BY DEFAULT AS IDENTITY")
            }
        }
    }
}

/// A column definition for CREATE TABLE and ALTER TABLE.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    /// Column name.
    pub name: String,
    /// Data type.
    pub data_type: DataType,
    /// `Some(false)` for NOT NULL, `Some(true)` for an explicit NULL.
    pub nullable: Option<bool>,
    /// PRIMARY KEY.
    pub primary_key: bool,
    /// UNIQUE.
    pub unique: bool,
    /// Auto-increment spelling, if any.
    pub auto_increment: Option<AutoIncrement>,
    /// DEFAULT value.
    pub default: Option<Expr>,
    /// Inline foreign key.
    pub references: Option<ForeignKeyReference>,
    /// Inline CHECK.
    pub check: Option<Expr>,
    /// COLLATE name.
    pub collation: Option<String>,
    /// `CONSTRAINT name` preceding a column constraint.
    pub constraint_name: Option<String>,
}

impl ColumnDefinition {
    /// Creates a column with no constraints.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: None,
            primary_key: false,
            unique: false,
            auto_increment: None,
            default: None,
            references: None,
            check: None,
            collation: None,
            constraint_name: None,
        }
    }
}

impl fmt::Display for ColumnDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)?;
        if let Some(name) = &self.constraint_name {
            write!(f, " CONSTRAINT {name}")?;
        }
        match self.nullable {
            Some(false) => f.write_str(" NOT NULL")?,
            Some(true) => f.write_str(" NULL")?,
            None => {}
        }
        if self.primary_key {
            f.write_str(" PRIMARY KEY")?;
        }
        if self.unique {
            f.write_str(" UNIQUE")?;
        }
        if let Some(auto) = &self.auto_increment {
            write!(f, " {auto}")?;
        }
        if let Some(default) = &self.default {
            write!(f, " DEFAULT {default}")?;
        }
        if let Some(check) = &self.check {
            write!(f, " CHECK ({check})")?;
        }
        if let Some(collation) = &self.collation {
            write!(f, " COLLATE {collation}")?;
        }
        if let Some(references) = &self.references {
            write!(f, " {references}")?;
        }
        Ok(())
    }
}

/// The body of a table-level constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum TableConstraintKind {
    /// `PRIMARY KEY (cols)`
    PrimaryKey(Vec<String>),
    /// `UNIQUE [KEY|INDEX] [name] (cols)`
    Unique(Vec<String>),
    /// `FOREIGN KEY (cols) REFERENCES ...`
    ForeignKey {
        /// Referencing columns.
        columns: Vec<String>,
        /// The reference.
        references: ForeignKeyReference,
    },
    /// `CHECK (expr)`
    Check(Expr),
    /// MySQL `INDEX|KEY name (cols)`
    Index(Vec<String>),
}

/// A table-level constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct TableConstraint {
    /// Constraint or index name.
    pub name: Option<String>,
    /// Constraint body.
    pub kind: TableConstraintKind,
}

impl fmt::Display for TableConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "CONSTRAINT {name} ")?;
        }
        match &self.kind {
            TableConstraintKind::PrimaryKey(columns) => {
                write!(f, "PRIMARY KEY ({})", columns.join(", "))
            }
            TableConstraintKind::Unique(columns) => write!(f, "UNIQUE ({})", columns.join(", ")),
            TableConstraintKind::ForeignKey {
                columns,
                references,
            } => write!(f, "FOREIGN KEY ({}) {references}", columns.join(", ")),
            TableConstraintKind::Check(expr) => write!(f, "CHECK ({expr})"),
            TableConstraintKind::Index(columns) => write!(f, "INDEX ({})", columns.join(", ")),
        }
    }
}

/// CREATE TABLE.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStatement {
    /// IF NOT EXISTS.
    pub if_not_exists: bool,
    /// TEMPORARY / TEMP.
    pub temporary: bool,
    /// Table name.
    pub name: ObjectName,
    /// Column definitions, in order.
    pub columns: Vec<ColumnDefinition>,
    /// Table-level constraints, in order.
    pub constraints: Vec<TableConstraint>,
    /// Trailing table options (e.g., `ENGINE` -> `InnoDB`), keyed in uppercase.
    pub options: BTreeMap<String, String>,
}

impl fmt::Display for CreateTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.temporary {
            f.write_str("TEMPORARY ")?;
        }
        f.write_str("TABLE ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        let mut items: Vec<String> = self.columns.iter().map(ToString::to_string).collect();
        items.extend(self.constraints.iter().map(ToString::to_string));
        write!(f, "{} ({})", self.name, items.join(", "))?;
        for (key, value) in &self.options {
            write!(f, " {key}={value}")?;
        }
        Ok(())
    }
}

/// CREATE INDEX.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndexStatement {
    /// UNIQUE.
    pub unique: bool,
    /// SQL Server CLUSTERED (`Some(true)`) or NONCLUSTERED (`Some(false)`).
    pub clustered: Option<bool>,
    /// IF NOT EXISTS.
    pub if_not_exists: bool,
    /// Index name.
    pub name: String,
    /// Indexed table.
    pub table: ObjectName,
    /// Index method (`USING btree`).
    pub using: Option<String>,
    /// Indexed expressions with direction.
    pub columns: Vec<OrderBy>,
    /// `INCLUDE (cols)`.
    pub include: Vec<String>,
    /// Partial index predicate.
    pub where_clause: Option<Expr>,
}

impl fmt::Display for CreateIndexStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.unique {
            f.write_str("UNIQUE ")?;
        }
        write!(
            f,
            "INDEX {} ON {} ({})",
            self.name,
            self.table,
            display_comma_separated(&self.columns)
        )?;
        if !self.include.is_empty() {
            write!(f, " INCLUDE ({})", self.include.join(", "))?;
        }
        if let Some(where_clause) = &self.where_clause {
            write!(f, " WHERE {where_clause}")?;
        }
        Ok(())
    }
}

/// CREATE [MATERIALIZED] VIEW.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateViewStatement {
    /// OR REPLACE (or T-SQL OR ALTER).
    pub or_replace: bool,
    /// MATERIALIZED.
    pub materialized: bool,
    /// IF NOT EXISTS.
    pub if_not_exists: bool,
    /// View name.
    pub name: ObjectName,
    /// Column name override.
    pub columns: Vec<String>,
    /// The view query: a SELECT, set operation or WITH.
    pub query: Box<Statement>,
    /// WITH [CASCADED|LOCAL] CHECK OPTION.
    pub with_check_option: bool,
    /// View options, keyed in uppercase.
    pub options: BTreeMap<String, String>,
}

impl fmt::Display for CreateViewStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.or_replace {
            f.write_str("OR REPLACE ")?;
        }
        if self.materialized {
            f.write_str("MATERIALIZED ")?;
        }
        f.write_str("VIEW ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(f, "{}", self.name)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", self.columns.join(", "))?;
        }
        let storage: Vec<String> = self
            .options
            .iter()
            .filter(|(key, _)| match key.as_str() {
                "CHECK_OPTION" => !self.with_check_option,
                "DATA" => false,
                _ => true,
            })
            .map(|(key, value)| {
                if value == "TRUE" {
                    key.clone()
                } else {
                    format!("{key}={value}")
                }
            })
            .collect();
        if !storage.is_empty() {
            write!(f, " WITH ({})", storage.join(", "))?;
        }
        write!(f, " AS {}", self.query)?;
        if self.with_check_option {
            f.write_str(" WITH ")?;
            if let Some(level) = self.options.get("CHECK_OPTION") {
                write!(f, "{level} ")?;
            }
            f.write_str("CHECK OPTION")?;
        }
        match self.options.get("DATA").map(String::as_str) {
            Some("FALSE") => f.write_str(" WITH NO DATA")?,
            Some(_) => f.write_str(" WITH DATA")?,
            None => {}
        }
        Ok(())
    }
}

/// When a trigger fires relative to the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerTiming {
    Before,
    After,
    InsteadOf,
}

impl TriggerTiming {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "BEFORE",
            Self::After => "AFTER",
            Self::InsteadOf => "INSTEAD OF",
        }
    }
}

/// The DML event a trigger listens to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    Insert,
    /// UPDATE, optionally restricted with `OF columns`.
    Update(Vec<String>),
    Delete,
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => f.write_str("INSERT"),
            Self::Update(columns) if columns.is_empty() => f.write_str("UPDATE"),
            Self::Update(columns) => write!(f, "UPDATE OF {}", columns.join(", ")),
            Self::Delete => f.write_str("DELETE"),
        }
    }
}

/// What a trigger runs.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerBody {
    /// `BEGIN ... END`
    Block(BlockStatement),
    /// A single statement.
    Statement(Box<Statement>),
    /// `EXECUTE FUNCTION|PROCEDURE name(args)`
    ExecuteFunction {
        /// Function name.
        name: String,
        /// Arguments.
        args: Vec<Expr>,
    },
}

/// CREATE TRIGGER.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTriggerStatement {
    /// OR REPLACE (or T-SQL OR ALTER).
    pub or_replace: bool,
    /// Trigger name.
    pub name: ObjectName,
    /// Timing.
    pub timing: TriggerTiming,
    /// Events; never empty.
    pub events: Vec<TriggerEvent>,
    /// The table (or view) the trigger is attached to.
    pub table: ObjectName,
    /// FOR EACH ROW rather than FOR EACH STATEMENT.
    pub for_each_row: bool,
    /// WHEN condition.
    pub when: Option<Expr>,
    /// The trigger action.
    pub body: TriggerBody,
}

impl fmt::Display for CreateTriggerStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let events: Vec<String> = self.events.iter().map(ToString::to_string).collect();
        write!(
            f,
            "CREATE TRIGGER {} {} {} ON {}",
            self.name,
            self.timing.as_str(),
            events.join(" OR "),
            self.table
        )?;
        if self.for_each_row {
            f.write_str(" FOR EACH ROW")?;
        }
        if let Some(when) = &self.when {
            write!(f, " WHEN ({when})")?;
        }
        match &self.body {
            TriggerBody::Block(block) => write!(f, " {block}"),
            TriggerBody::Statement(statement) => write!(f, " {statement}"),
            TriggerBody::ExecuteFunction { name, args } => {
                write!(f, " EXECUTE FUNCTION {name}({})", display_comma_separated(args))
            }
        }
    }
}

/// Object kinds that DROP accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Table,
    Database,
    Index,
    View,
    MaterializedView,
    Trigger,
    Procedure,
    Function,
    Schema,
}

impl ObjectType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::Database => "DATABASE",
            Self::Index => "INDEX",
            Self::View => "VIEW",
            Self::MaterializedView => "MATERIALIZED VIEW",
            Self::Trigger => "TRIGGER",
            Self::Procedure => "PROCEDURE",
            Self::Function => "FUNCTION",
            Self::Schema => "SCHEMA",
        }
    }
}

/// DROP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropStatement {
    /// Kind of object.
    pub object_type: ObjectType,
    /// IF EXISTS.
    pub if_exists: bool,
    /// Dropped objects.
    pub names: Vec<ObjectName>,
    /// MySQL `DROP INDEX i ON t`.
    pub on_table: Option<ObjectName>,
    /// CASCADE.
    pub cascade: bool,
    /// RESTRICT.
    pub restrict: bool,
}

impl fmt::Display for DropStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DROP {} ", self.object_type.as_str())?;
        if self.if_exists {
            f.write_str("IF EXISTS ")?;
        }
        write!(f, "{}", display_comma_separated(&self.names))?;
        if let Some(table) = &self.on_table {
            write!(f, " ON {table}")?;
        }
        if self.cascade {
            f.write_str(" CASCADE")?;
        }
        if self.restrict {
            f.write_str(" RESTRICT")?;
        }
        Ok(())
    }
}

/// The single action of an ALTER TABLE.
#[derive(Debug, Clone, PartialEq)]
pub enum AlterAction {
    /// `ADD [COLUMN] def`
    AddColumn(ColumnDefinition),
    /// `ADD constraint`
    AddConstraint(TableConstraint),
    /// `DROP [COLUMN] [IF EXISTS] name`
    DropColumn {
        /// Column name.
        name: String,
        /// IF EXISTS.
        if_exists: bool,
    },
    /// `DROP CONSTRAINT name`
    DropConstraint(String),
    /// MySQL `MODIFY [COLUMN] def`
    ModifyColumn(ColumnDefinition),
    /// MySQL `CHANGE [COLUMN] old def`
    ChangeColumn {
        /// Current column name.
        old_name: String,
        /// New definition.
        column: ColumnDefinition,
    },
    /// `ALTER COLUMN name [SET DATA] TYPE type` (or T-SQL `ALTER COLUMN name type`)
    AlterColumnType {
        /// Column name.
        name: String,
        /// New type.
        data_type: DataType,
    },
    /// `RENAME TO name`
    RenameTable(ObjectName),
    /// `RENAME COLUMN a TO b`
    RenameColumn {
        /// Current name.
        from: String,
        /// New name.
        to: String,
    },
}

impl fmt::Display for AlterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddColumn(column) => write!(f, "ADD COLUMN {column}"),
            Self::AddConstraint(constraint) => write!(f, "ADD {constraint}"),
            Self::DropColumn { name, if_exists } => write!(
                f,
                "DROP COLUMN {}{name}",
                if *if_exists { "IF EXISTS " } else { "" }
            ),
            Self::DropConstraint(name) => write!(f, "DROP CONSTRAINT {name}"),
            Self::ModifyColumn(column) => write!(f, "MODIFY COLUMN {column}"),
            Self::ChangeColumn { old_name, column } => {
                write!(f, "CHANGE COLUMN {old_name} {column}")
            }
            Self::AlterColumnType { name, data_type } => {
                write!(f, "ALTER COLUMN {name} TYPE {data_type}")
            }
            Self::RenameTable(name) => write!(f, "RENAME TO {name}"),
            Self::RenameColumn { from, to } => write!(f, "RENAME COLUMN {from} TO {to}"),
        }
    }
}

/// ALTER TABLE.
#[derive(Debug, Clone, PartialEq)]
pub struct AlterTableStatement {
    /// Table name.
    pub name: ObjectName,
    /// The action.
    pub action: AlterAction,
}

impl fmt::Display for AlterTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ALTER TABLE {} {}", self.name, self.action)
    }
}
