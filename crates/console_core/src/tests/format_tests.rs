use super::*;
use chrono::TimeZone;

fn node(id: impl Into<shared::domain::NodeId>, service: &str) -> NodeRecord {
    let mut node = NodeRecord::new(id);
    node.service = service.to_string();
    node
}

#[test]
fn sorts_ascending_by_id() {
    let mut nodes = vec![node(2_i64, "b"), node(1_i64, "a"), node(3_i64, "c")];
    sort_nodes(&mut nodes);
    let services: Vec<_> = nodes.iter().map(|n| n.service.as_str()).collect();
    assert_eq!(services, vec!["a", "b", "c"]);
}

#[test]
fn equal_ids_keep_input_order() {
    let mut nodes = vec![
        node("node-b", "first-b"),
        node("node-a", "first-a"),
        node("node-b", "second-b"),
        node("node-a", "second-a"),
        node("node-b", "third-b"),
    ];
    sort_nodes(&mut nodes);
    let services: Vec<_> = nodes.iter().map(|n| n.service.as_str()).collect();
    assert_eq!(
        services,
        vec!["first-a", "second-a", "first-b", "second-b", "third-b"]
    );
}

#[test]
fn sorted_output_is_non_decreasing() {
    let ids = ["m", "b", "z", "b", "a", "q", "m", "c"];
    let mut nodes: Vec<_> = ids.iter().map(|id| node(*id, "")).collect();
    sort_nodes(&mut nodes);
    assert!(nodes
        .windows(2)
        .all(|pair| compare_nodes(&pair[0], &pair[1]) != Ordering::Greater));
}

#[test]
fn revision_of_ten_chars_is_unchanged() {
    assert_eq!(
        truncate_revision(Some("abcdefghij")).as_deref(),
        Some("abcdefghij")
    );
}

#[test]
fn revision_of_eleven_chars_is_truncated() {
    assert_eq!(
        truncate_revision(Some("abcdefghijk")).as_deref(),
        Some("abcdefghij...")
    );
}

#[test]
fn short_and_absent_revisions_pass_through() {
    assert_eq!(truncate_revision(Some("short")).as_deref(), Some("short"));
    assert_eq!(truncate_revision(Some("")).as_deref(), Some(""));
    assert_eq!(truncate_revision(None), None);
}

#[test]
fn truncation_is_idempotent() {
    for revision in ["", "short", "abcdefghij", "abcdefghijk", "0123456789abcdef0123"] {
        let once = truncate_revision(Some(revision));
        let twice = truncate_revision(once.as_deref());
        assert_eq!(once, twice, "revision {revision:?}");
    }
}

#[test]
fn truncation_counts_characters_not_bytes() {
    assert_eq!(
        truncate_revision(Some("ééééééééééé")).as_deref(),
        Some("éééééééééé...")
    );
    assert_eq!(
        truncate_revision(Some("éééééééééé")).as_deref(),
        Some("éééééééééé")
    );
}

#[test]
fn formats_created_in_utc() {
    let created = Utc.with_ymd_and_hms(2023, 4, 5, 6, 7, 8).unwrap();
    assert_eq!(
        format_created(Some(&created), DisplayZone::Utc),
        "2023-04-05 06:07:08"
    );
}

#[test]
fn formats_created_in_local_zone() {
    let created = Utc.with_ymd_and_hms(2023, 4, 5, 6, 7, 8).unwrap();
    let expected = created
        .with_timezone(&Local)
        .format(CREATED_FORMAT)
        .to_string();
    assert_eq!(format_created(Some(&created), DisplayZone::Local), expected);
}

#[test]
fn absent_created_formats_empty() {
    assert_eq!(format_created(None, DisplayZone::Utc), "");
}
