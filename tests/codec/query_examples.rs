//! Worked query examples over flattened documents

use crate::test_utils::*;
use serde_json::json;
use simdb_meta::{evaluate, filter_records, parse, parse_all, Document, FlatEntry, Node};
use uuid::Uuid;

fn holds(constraint: &str, entries: &[FlatEntry]) -> bool {
    evaluate(&parse(constraint).unwrap(), entries).unwrap()
}

#[test]
fn test_contains_on_nested_field() {
    let entries = entries_of(json!({"workflow": {"name": "Test-Run"}}));
    assert!(holds("workflow.name=in:test", &entries));
}

#[test]
fn test_numeric_ordering() {
    let entries = entries_of(json!({"pulse": 1500}));
    assert!(holds("pulse=gt:1000", &entries));
    assert!(!holds("pulse=lt:1000", &entries));
}

#[test]
fn test_field_inside_list_elements() {
    let entries = entries_of(json!({"codes": [{"commit": "abc"}, {"commit": "def"}]}));
    assert!(holds("commit=eq:def", &entries));
}

#[test]
fn test_exist_on_absent_field() {
    let entries = entries_of(json!({"workflow": {"name": "x"}}));
    assert!(!holds("sequence=exist:", &entries));
    assert!(holds("workflow=exist:", &entries));
}

#[test]
fn test_sibling_repeated_keys() {
    let d = Document::new()
        .with("tag", Node::leaf("alpha"))
        .with("tag", Node::leaf("beta"));
    let entries = simdb_meta::flatten(&d).unwrap();
    assert!(holds("tag=eq:alpha", &entries));
    assert!(holds("tag=eq:beta", &entries));
}

#[test]
fn test_uuid_query() {
    let id = Uuid::new_v4();
    let entries = entries_of(json!({
        "parent": {"_type": "uuid.UUID", "hex": id.simple().to_string()}
    }));
    assert!(holds(&format!("parent={}", id), &entries));
    assert!(holds(&format!("parent={}", id.simple()), &entries));
}

#[test]
fn test_filter_catalogue() {
    init_tracing();
    let catalogue: Vec<(Uuid, Vec<FlatEntry>)> = vec![
        json!({"workflow": {"name": "Test-Run"}, "pulse": 1500, "codes": [{"name": "solver"}]}),
        json!({"workflow": {"name": "production"}, "pulse": 1600, "codes": [{"name": "solver"}]}),
        json!({"workflow": {"name": "unit-test"}, "pulse": 900}),
        json!({"workflow": {"name": "test-long"}, "pulse": 30000, "codes": [{"name": "post"}]}),
    ]
    .into_iter()
    .map(|raw| (Uuid::new_v4(), entries_of(raw)))
    .collect();

    let query = parse_all(["workflow.name=in:test", "pulse=gt:1000", "codes.name=exist:"]).unwrap();
    let ids = filter_records(
        &query,
        catalogue.iter().map(|(id, entries)| (*id, entries.as_slice())),
    )
    .unwrap();
    assert_eq!(ids, vec![catalogue[0].0, catalogue[3].0]);
}
