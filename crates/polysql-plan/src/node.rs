//! Plan tree nodes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The kind of work a plan node performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    // Scans
    SeqScan,
    IndexScan,
    IndexOnlyScan,
    BitmapScan,
    TableScan,
    FullTableScan,
    RangeScan,
    ClusteredIndexScan,
    NonclusteredIndexScan,
    // Joins
    NestedLoop,
    HashJoin,
    MergeJoin,
    // Aggregation
    Aggregate,
    GroupBy,
    HashAggregate,
    // Sorting
    Sort,
    Quicksort,
    // Other
    Filter,
    Limit,
    Union,
    Intersect,
    Except,
    Subquery,
    Materialize,
    Cte,
}

impl NodeType {
    /// Returns the wire name (e.g., `SEQ_SCAN`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SeqScan => "SEQ_SCAN",
            Self::IndexScan => "INDEX_SCAN",
            Self::IndexOnlyScan => "INDEX_ONLY_SCAN",
            Self::BitmapScan => "BITMAP_SCAN",
            Self::TableScan => "TABLE_SCAN",
            Self::FullTableScan => "FULL_TABLE_SCAN",
            Self::RangeScan => "RANGE_SCAN",
            Self::ClusteredIndexScan => "CLUSTERED_INDEX_SCAN",
            Self::NonclusteredIndexScan => "NONCLUSTERED_INDEX_SCAN",
            Self::NestedLoop => "NESTED_LOOP",
            Self::HashJoin => "HASH_JOIN",
            Self::MergeJoin => "MERGE_JOIN",
            Self::Aggregate => "AGGREGATE",
            Self::GroupBy => "GROUP_BY",
            Self::HashAggregate => "HASH_AGGREGATE",
            Self::Sort => "SORT",
            Self::Quicksort => "QUICKSORT",
            Self::Filter => "FILTER",
            Self::Limit => "LIMIT",
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
            Self::Subquery => "SUBQUERY",
            Self::Materialize => "MATERIALIZE",
            Self::Cte => "CTE",
        }
    }

    /// Returns true for table and index access nodes.
    #[must_use]
    pub const fn is_scan(&self) -> bool {
        matches!(
            self,
            Self::SeqScan
                | Self::IndexScan
                | Self::IndexOnlyScan
                | Self::BitmapScan
                | Self::TableScan
                | Self::FullTableScan
                | Self::RangeScan
                | Self::ClusteredIndexScan
                | Self::NonclusteredIndexScan
        )
    }

    /// Returns true for join nodes.
    #[must_use]
    pub const fn is_join(&self) -> bool {
        matches!(self, Self::NestedLoop | Self::HashJoin | Self::MergeJoin)
    }

    /// Returns true for scans that read every row of a table.
    #[must_use]
    pub const fn is_full_scan(&self) -> bool {
        matches!(self, Self::SeqScan | Self::TableScan | Self::FullTableScan)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One operator in a plan tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanNode {
    /// Normalized operator kind.
    pub node_type: NodeType,
    /// Vendor operator name as reported (e.g., `Seq Scan`).
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    /// Filter or join condition text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// Estimated rows produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u64>,
    #[serde(default)]
    pub children: Vec<PlanNode>,
    /// Vendor-specific properties.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl PlanNode {
    /// Creates a leaf node.
    #[must_use]
    pub fn new(node_type: NodeType, operation: impl Into<String>) -> Self {
        Self {
            node_type,
            operation: operation.into(),
            table: None,
            index: None,
            condition: None,
            cost: None,
            rows: None,
            children: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Sets the table.
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Adds a child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Iterates over this node and its descendants in pre-order.
    #[must_use]
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Returns the number of nodes in this subtree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Always false; a subtree contains at least its root.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl<'a> IntoIterator for &'a PlanNode {
    type Item = &'a PlanNode;
    type IntoIter = PreOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over a plan tree.
#[derive(Debug)]
pub struct PreOrder<'a> {
    stack: Vec<&'a PlanNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a PlanNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_wire_names() {
        let json = serde_json::to_string(&NodeType::NonclusteredIndexScan).unwrap();
        assert_eq!(json, "\"NONCLUSTERED_INDEX_SCAN\"");
        let parsed: NodeType = serde_json::from_str("\"CTE\"").unwrap();
        assert_eq!(parsed, NodeType::Cte);
        assert_eq!(NodeType::HashAggregate.to_string(), "HASH_AGGREGATE");
    }

    #[test]
    fn test_classification() {
        assert!(NodeType::BitmapScan.is_scan());
        assert!(!NodeType::BitmapScan.is_full_scan());
        assert!(NodeType::SeqScan.is_full_scan());
        assert!(NodeType::MergeJoin.is_join());
        assert!(!NodeType::Sort.is_scan());
    }

    #[test]
    fn test_pre_order() {
        let tree = PlanNode::new(NodeType::HashJoin, "Hash Join")
            .with_child(PlanNode::new(NodeType::SeqScan, "Seq Scan").with_table("orders"))
            .with_child(
                PlanNode::new(NodeType::Sort, "Sort")
                    .with_child(PlanNode::new(NodeType::IndexScan, "Index Scan")),
            );
        let order: Vec<_> = tree.iter().map(|node| node.node_type).collect();
        assert_eq!(
            order,
            vec![
                NodeType::HashJoin,
                NodeType::SeqScan,
                NodeType::Sort,
                NodeType::IndexScan
            ]
        );
        assert_eq!(tree.len(), 4);
    }
}
