//! Tests for decoding and encoding the common plan JSON tree.

use polysql_core::DialectKind;
use polysql_plan::{ExecutionPlan, NodeType, PlanError, PlanFormat};

const JOIN_PLAN: &str = r#"{
    "query": "SELECT o.id, c.name FROM orders o JOIN customers c ON o.customer_id = c.id ORDER BY c.name",
    "dialect": "postgresql",
    "root_node": {
        "node_type": "SORT",
        "operation": "Sort",
        "cost": 412.8,
        "rows": 1200,
        "extra": { "sort_key": ["c.name"] },
        "children": [
            {
                "node_type": "HASH_JOIN",
                "operation": "Hash Join",
                "condition": "(o.customer_id = c.id)",
                "children": [
                    { "node_type": "SEQ_SCAN", "operation": "Seq Scan", "table": "orders", "rows": 1200 },
                    { "node_type": "INDEX_SCAN", "operation": "Index Scan", "table": "customers", "index": "customers_pkey" }
                ]
            }
        ]
    },
    "total_cost": 412.8,
    "estimated_rows": 1200,
    "actual_rows": 1187,
    "execution_time": 3.42,
    "warnings": ["sequential scan on orders"],
    "statistics": { "shared_hit_blocks": 96 }
}"#;

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_decode_join_plan() {
    let plan = ExecutionPlan::from_json(JOIN_PLAN).unwrap();
    assert_eq!(plan.dialect, DialectKind::PostgreSql);
    assert_eq!(plan.estimated_rows, 1200);
    assert_eq!(plan.actual_rows, Some(1187));
    assert_eq!(plan.warnings.len(), 1);
    assert_eq!(plan.root_node.node_type, NodeType::Sort);
    assert!(plan.root_node.extra.contains_key("sort_key"));

    let order: Vec<_> = plan.nodes().map(|node| node.node_type).collect();
    assert_eq!(
        order,
        vec![
            NodeType::Sort,
            NodeType::HashJoin,
            NodeType::SeqScan,
            NodeType::IndexScan
        ]
    );
}

#[test]
fn test_find_nodes() {
    let plan = ExecutionPlan::from_json(JOIN_PLAN).unwrap();
    let scans = plan.find_nodes(NodeType::IndexScan);
    assert_eq!(scans.len(), 1);
    assert_eq!(scans[0].index.as_deref(), Some("customers_pkey"));

    let full_scans = plan.full_scans();
    assert_eq!(full_scans.len(), 1);
    assert_eq!(full_scans[0].table.as_deref(), Some("orders"));

    assert!(plan.find_nodes(NodeType::MergeJoin).is_empty());
}

#[test]
fn test_minimal_plan_defaults() {
    let plan = ExecutionPlan::from_json(
        r#"{
            "query": "SELECT 1",
            "dialect": "mysql",
            "root_node": { "node_type": "FILTER", "operation": "No tables used" },
            "total_cost": 0.0,
            "estimated_rows": 1
        }"#,
    )
    .unwrap();
    assert!(plan.warnings.is_empty());
    assert!(plan.statistics.is_none());
    assert!(plan.root_node.children.is_empty());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unknown_node_type() {
    let error = ExecutionPlan::from_json(
        r#"{
            "query": "SELECT 1",
            "dialect": "mysql",
            "root_node": { "node_type": "TELEPORT", "operation": "?" },
            "total_cost": 0.0,
            "estimated_rows": 1
        }"#,
    )
    .unwrap_err();
    assert!(matches!(error, PlanError::Json(_)));
}

#[test]
fn test_decode_dispatches_on_format() {
    assert!(ExecutionPlan::decode(JOIN_PLAN, PlanFormat::Json).is_ok());
    let Err(PlanError::Unsupported(what)) = ExecutionPlan::decode("SCAN orders", PlanFormat::Text)
    else {
        panic!("Expected unsupported format");
    };
    assert_eq!(what, "SQLite text");
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn test_json_round_trip() {
    let plan = ExecutionPlan::from_json(JOIN_PLAN).unwrap();
    let encoded = plan.to_json().unwrap();
    assert!(encoded.contains("\"HASH_JOIN\""));
    assert!(!encoded.contains("\"index\": null"));
    let decoded = ExecutionPlan::from_json(&encoded).unwrap();
    assert_eq!(decoded, plan);
}
