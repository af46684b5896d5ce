//! # polysql-plan
//!
//! The execution-plan tree that EXPLAIN output decoders share.
//!
//! Every vendor plan is normalized into an [`ExecutionPlan`] whose nodes
//! carry a closed [`NodeType`]. The common JSON shape is decoded with
//! serde; SQL Server XML and SQLite text plans are reserved formats.
//!
//! ```rust
//! use polysql_plan::{ExecutionPlan, NodeType};
//!
//! let plan = ExecutionPlan::from_json(r#"{
//!     "query": "SELECT * FROM users",
//!     "dialect": "postgresql",
//!     "root_node": { "node_type": "SEQ_SCAN", "operation": "Seq Scan", "table": "users" },
//!     "total_cost": 35.5,
//!     "estimated_rows": 2550
//! }"#).unwrap();
//!
//! assert_eq!(plan.find_nodes(NodeType::SeqScan).len(), 1);
//! ```

mod error;
mod node;
mod plan;

pub use error::PlanError;
pub use node::{NodeType, PlanNode, PreOrder};
pub use plan::{ExecutionPlan, PlanFormat};
