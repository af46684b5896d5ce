//! Transaction control AST types.

use std::fmt;

/// `BEGIN [WORK|TRANSACTION|TRAN] [name]` or `START TRANSACTION [modes]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BeginTransactionStatement {
    /// Written as START TRANSACTION.
    pub use_start: bool,
    /// Transaction modes, uppercased (e.g., `READ ONLY`, `IMMEDIATE`).
    pub modes: Vec<String>,
    /// T-SQL transaction name.
    pub name: Option<String>,
}

impl fmt::Display for BeginTransactionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.use_start {
            "START TRANSACTION"
        } else {
            "BEGIN TRANSACTION"
        })?;
        if let Some(name) = &self.name {
            write!(f, " {name}")?;
        }
        if !self.modes.is_empty() {
            write!(f, " {}", self.modes.join(", "))?;
        }
        Ok(())
    }
}

/// `COMMIT [WORK|TRANSACTION] [name]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitStatement {
    /// WORK was given.
    pub work: bool,
    /// T-SQL transaction name.
    pub name: Option<String>,
}

impl fmt::Display for CommitStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("COMMIT")?;
        if self.work {
            f.write_str(" WORK")?;
        }
        if let Some(name) = &self.name {
            write!(f, " {name}")?;
        }
        Ok(())
    }
}

/// `ROLLBACK [WORK] [TO [SAVEPOINT] name]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RollbackStatement {
    /// WORK was given.
    pub work: bool,
    /// T-SQL transaction or savepoint name.
    pub name: Option<String>,
    /// Savepoint to roll back to.
    pub to_savepoint: Option<String>,
}

impl fmt::Display for RollbackStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ROLLBACK")?;
        if self.work {
            f.write_str(" WORK")?;
        }
        if let Some(name) = &self.name {
            write!(f, " {name}")?;
        }
        if let Some(savepoint) = &self.to_savepoint {
            write!(f, " TO SAVEPOINT {savepoint}")?;
        }
        Ok(())
    }
}

/// `SAVEPOINT name` or T-SQL `SAVE TRAN name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavepointStatement {
    /// Savepoint name.
    pub name: String,
}

impl fmt::Display for SavepointStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SAVEPOINT {}", self.name)
    }
}

/// `RELEASE [SAVEPOINT] name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSavepointStatement {
    /// Savepoint name.
    pub name: String,
}

impl fmt::Display for ReleaseSavepointStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RELEASE SAVEPOINT {}", self.name)
    }
}
