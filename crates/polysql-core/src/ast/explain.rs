//! EXPLAIN AST type.

use std::collections::BTreeMap;
use std::fmt;

use super::statement::Statement;

/// `EXPLAIN [ANALYZE] [VERBOSE] [EXTENDED] [FORMAT name] [(options)] [QUERY PLAN] statement`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplainStatement {
    /// ANALYZE, either as a keyword or a true-valued option.
    pub analyze: bool,
    /// VERBOSE.
    pub verbose: bool,
    /// MySQL EXTENDED.
    pub extended: bool,
    /// Output format, uppercased (e.g., `JSON`).
    pub format: Option<String>,
    /// Parenthesized options keyed by uppercased name. Flags hold `TRUE`.
    pub options: BTreeMap<String, String>,
    /// SQLite `QUERY PLAN`.
    pub query_plan: bool,
    /// The explained statement.
    pub statement: Box<Statement>,
}

impl fmt::Display for ExplainStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EXPLAIN")?;
        if self.query_plan {
            f.write_str(" QUERY PLAN")?;
        }
        if self.analyze {
            f.write_str(" ANALYZE")?;
        }
        if self.verbose {
            f.write_str(" VERBOSE")?;
        }
        if self.extended {
            f.write_str(" EXTENDED")?;
        }
        if let Some(format) = &self.format {
            write!(f, " FORMAT {format}")?;
        }
        write!(f, " {}", self.statement)
    }
}
