//! Stored routine AST types: CREATE PROCEDURE and CREATE FUNCTION.

use std::fmt;

use super::display_comma_separated;
use super::expression::Expr;
use super::procedural::BlockStatement;
use super::query::ObjectName;
use super::types::DataType;

/// Parameter direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterMode {
    In,
    Out,
    InOut,
}

impl ParameterMode {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
            Self::InOut => "INOUT",
        }
    }
}

/// A routine parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Direction; T-SQL `OUTPUT` maps to `Out`.
    pub mode: Option<ParameterMode>,
    /// PostgreSQL VARIADIC.
    pub variadic: bool,
    /// Name; PostgreSQL allows unnamed parameters.
    pub name: Option<String>,
    /// Type.
    pub data_type: DataType,
    /// `DEFAULT expr` or `= expr`.
    pub default: Option<Expr>,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(mode) = self.mode {
            write!(f, "{} ", mode.as_str())?;
        }
        if self.variadic {
            f.write_str("VARIADIC ")?;
        }
        if let Some(name) = &self.name {
            write!(f, "{name} ")?;
        }
        write!(f, "{}", self.data_type)?;
        if let Some(default) = &self.default {
            write!(f, " DEFAULT {default}")?;
        }
        Ok(())
    }
}

/// `SECURITY DEFINER|INVOKER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityMode {
    Definer,
    Invoker,
}

/// MySQL SQL data access characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataAccess {
    ContainsSql,
    NoSql,
    ReadsSqlData,
    ModifiesSqlData,
}

impl DataAccess {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ContainsSql => "CONTAINS SQL",
            Self::NoSql => "NO SQL",
            Self::ReadsSqlData => "READS SQL DATA",
            Self::ModifiesSqlData => "MODIFIES SQL DATA",
        }
    }
}

/// PostgreSQL function volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Volatility {
    Immutable,
    Stable,
    Volatile,
}

/// Order-insensitive routine characteristics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoutineOptions {
    /// `LANGUAGE name`, uppercased.
    pub language: Option<String>,
    /// Security context.
    pub security: Option<SecurityMode>,
    /// `DETERMINISTIC` (`Some(true)`) or `NOT DETERMINISTIC` (`Some(false)`).
    pub deterministic: Option<bool>,
    /// Data access.
    pub data_access: Option<DataAccess>,
    /// `COMMENT 'text'`.
    pub comment: Option<String>,
    /// Volatility.
    pub volatility: Option<Volatility>,
}

impl RoutineOptions {
    /// Returns true if the routine is written in PL/pgSQL.
    #[must_use]
    pub fn is_plpgsql(&self) -> bool {
        self.language.as_deref() == Some("PLPGSQL")
    }
}

impl fmt::Display for RoutineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(language) = &self.language {
            write!(f, " LANGUAGE {language}")?;
        }
        match self.security {
            Some(SecurityMode::Definer) => f.write_str(" SECURITY DEFINER")?,
            Some(SecurityMode::Invoker) => f.write_str(" SECURITY INVOKER")?,
            None => {}
        }
        match self.deterministic {
            Some(true) => f.write_str(" DETERMINISTIC")?,
            Some(false) => f.write_str(" NOT DETERMINISTIC")?,
            None => {}
        }
        if let Some(access) = self.data_access {
            write!(f, " {}", access.as_str())?;
        }
        match self.volatility {
            Some(Volatility::Immutable) => f.write_str(" IMMUTABLE")?,
            Some(Volatility::Stable) => f.write_str(" STABLE")?,
            Some(Volatility::Volatile) => f.write_str(" VOLATILE")?,
            None => {}
        }
        if let Some(comment) = &self.comment {
            write!(f, " COMMENT '{comment}'")?;
        }
        Ok(())
    }
}

/// CREATE PROCEDURE.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProcedureStatement {
    /// OR REPLACE (or T-SQL OR ALTER).
    pub or_replace: bool,
    /// Procedure name.
    pub name: ObjectName,
    /// Parameters.
    pub parameters: Vec<Parameter>,
    /// Characteristics.
    pub options: RoutineOptions,
    /// Body.
    pub body: BlockStatement,
}

impl fmt::Display for CreateProcedureStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE PROCEDURE {}({}){} {}",
            self.name,
            display_comma_separated(&self.parameters),
            self.options,
            self.body
        )
    }
}

/// CREATE FUNCTION.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateFunctionStatement {
    /// OR REPLACE (or T-SQL OR ALTER).
    pub or_replace: bool,
    /// Function name.
    pub name: ObjectName,
    /// Parameters.
    pub parameters: Vec<Parameter>,
    /// `RETURNS type`.
    pub return_type: DataType,
    /// Characteristics.
    pub options: RoutineOptions,
    /// Body.
    pub body: BlockStatement,
}

impl fmt::Display for CreateFunctionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE FUNCTION {}({}) RETURNS {}{} {}",
            self.name,
            display_comma_separated(&self.parameters),
            self.return_type,
            self.options,
            self.body
        )
    }
}
