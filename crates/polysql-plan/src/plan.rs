//! The plan document and its decoders.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use polysql_core::DialectKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::PlanError;
use crate::node::{NodeType, PlanNode, PreOrder};

/// A vendor EXPLAIN output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanFormat {
    /// The common JSON tree.
    Json,
    /// SQL Server showplan XML.
    Xml,
    /// SQLite `EXPLAIN QUERY PLAN` text.
    Text,
}

impl PlanFormat {
    /// Returns the format the dialect's EXPLAIN emits natively.
    #[must_use]
    pub const fn native(dialect: DialectKind) -> Self {
        match dialect {
            DialectKind::SqlServer => Self::Xml,
            DialectKind::Sqlite => Self::Text,
            DialectKind::MySql | DialectKind::PostgreSql => Self::Json,
        }
    }

    /// Returns the lowercase format name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for PlanFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanFormat {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            "text" => Ok(Self::Text),
            _ => Err(PlanError::UnknownFormat(s.to_string())),
        }
    }
}

/// An execution plan for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    /// The explained query text.
    pub query: String,
    /// Dialect of the server that produced the plan.
    pub dialect: DialectKind,
    pub root_node: PlanNode,
    /// Estimated cost of the whole plan.
    pub total_cost: f64,
    pub estimated_rows: u64,
    /// Rows produced, when the plan was executed (ANALYZE).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_rows: Option<u64>,
    /// Execution time in milliseconds, when the plan was executed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<f64>,
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Vendor statistics (buffers, I/O counters).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<BTreeMap<String, Value>>,
}

impl ExecutionPlan {
    /// Creates a plan with no runtime figures.
    #[must_use]
    pub fn new(query: impl Into<String>, dialect: DialectKind, root_node: PlanNode) -> Self {
        let total_cost = root_node.cost.unwrap_or_default();
        let estimated_rows = root_node.rows.unwrap_or_default();
        Self {
            query: query.into(),
            dialect,
            root_node,
            total_cost,
            estimated_rows,
            actual_rows: None,
            execution_time: None,
            warnings: Vec::new(),
            statistics: None,
        }
    }

    /// Decodes the common JSON tree.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::Json` if the document does not have the plan shape.
    pub fn from_json(input: &str) -> Result<Self, PlanError> {
        let plan: Self = serde_json::from_str(input)?;
        debug!(
            dialect = %plan.dialect,
            nodes = plan.root_node.len(),
            "decoded plan"
        );
        Ok(plan)
    }

    /// Encodes the plan as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::Json` if a value cannot be encoded (e.g., a
    /// non-finite cost).
    pub fn to_json(&self) -> Result<String, PlanError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decodes `input` written in `format`.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::Unsupported` for XML and text plans, and
    /// `PlanError::Json` for malformed JSON.
    pub fn decode(input: &str, format: PlanFormat) -> Result<Self, PlanError> {
        match format {
            PlanFormat::Json => Self::from_json(input),
            PlanFormat::Xml => Err(PlanError::Unsupported("SQL Server XML")),
            PlanFormat::Text => Err(PlanError::Unsupported("SQLite text")),
        }
    }

    /// Iterates over every node in pre-order.
    #[must_use]
    pub fn nodes(&self) -> PreOrder<'_> {
        self.root_node.iter()
    }

    /// Returns every node of the given type, in pre-order.
    #[must_use]
    pub fn find_nodes(&self, node_type: NodeType) -> Vec<&PlanNode> {
        self.nodes()
            .filter(|node| node.node_type == node_type)
            .collect()
    }

    /// Returns the scans that read whole tables.
    #[must_use]
    pub fn full_scans(&self) -> Vec<&PlanNode> {
        self.nodes()
            .filter(|node| node.node_type.is_full_scan())
            .collect()
    }
}
