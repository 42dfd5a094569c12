use super::*;
use chrono::TimeZone;

#[test]
fn decodes_registry_node_with_millis_timestamp() {
    let node: NodeRecord = serde_json::from_value(serde_json::json!({
        "id": "fuddle-1a2b3c4d",
        "service": "orders",
        "locality": "us-east-1-a",
        "created": 1_680_000_000_000_i64,
        "revision": "v0.3.1",
        "metadata": { "addr.rpc": "10.0.0.1:5000" }
    }))
    .expect("node");

    assert_eq!(node.id, NodeId::Text("fuddle-1a2b3c4d".into()));
    assert_eq!(node.service, "orders");
    assert_eq!(
        node.created,
        Some(Utc.timestamp_millis_opt(1_680_000_000_000).unwrap())
    );
    assert_eq!(node.revision.as_deref(), Some("v0.3.1"));
    assert_eq!(
        node.metadata.get("addr.rpc").map(String::as_str),
        Some("10.0.0.1:5000")
    );
}

#[test]
fn decodes_rfc3339_timestamp_and_numeric_id() {
    let node: NodeRecord = serde_json::from_value(serde_json::json!({
        "id": 7,
        "created": "2024-03-01T12:30:00Z"
    }))
    .expect("node");

    assert_eq!(node.id, NodeId::Numeric(7));
    assert_eq!(
        node.created,
        Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap())
    );
}

#[test]
fn omitted_fields_decode_as_empty() {
    let node: NodeRecord =
        serde_json::from_value(serde_json::json!({ "id": "a", "revision": null })).expect("node");

    assert_eq!(node, NodeRecord::new("a"));
}

#[test]
fn rejects_unparseable_timestamp() {
    let result = serde_json::from_value::<NodeRecord>(serde_json::json!({
        "id": "a",
        "created": "yesterday"
    }));
    assert!(result.is_err());
}

#[test]
fn numeric_ids_order_numerically_and_before_text() {
    let mut ids = vec![
        NodeId::from("b"),
        NodeId::from(10_i64),
        NodeId::from("a"),
        NodeId::from(2_i64),
    ];
    ids.sort();
    assert_eq!(
        ids,
        vec![
            NodeId::from(2_i64),
            NodeId::from(10_i64),
            NodeId::from("a"),
            NodeId::from("b"),
        ]
    );
}

#[test]
fn serializes_created_as_millis() {
    let mut node = NodeRecord::new("a");
    node.created = Some(Utc.timestamp_millis_opt(12_345).unwrap());

    let value = serde_json::to_value(&node).expect("json");
    assert_eq!(value["created"], serde_json::json!(12_345));
    assert!(value.get("revision").is_none());
}

#[test]
fn decodes_ids_outside_i64_and_fractional_ids() {
    let mut nodes: Vec<NodeRecord> = serde_json::from_value(serde_json::json!([
        { "id": 18_446_744_073_709_551_615_u64 },
        { "id": 1.5 },
        { "id": 1 },
        { "id": "node-a" }
    ]))
    .expect("nodes");
    nodes.sort_by(|a, b| a.id.cmp(&b.id));

    let ids: Vec<_> = nodes.iter().map(|n| n.id.to_string()).collect();
    assert_eq!(ids, vec!["1", "1.5", "18446744073709551615", "node-a"]);
    assert_eq!(nodes[2].id, NodeId::Unsigned(u64::MAX));
}

#[test]
fn large_ids_order_after_every_i64() {
    assert!(NodeId::from(i64::MAX) < NodeId::Unsigned(i64::MAX as u64 + 1));
    assert!(NodeId::from(-1_i64) < NodeId::Fractional(-0.5));
    assert!(NodeId::Fractional(2.0) != NodeId::from(2_i64));
}
