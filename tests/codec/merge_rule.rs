//! Repeated-key merge rule
//!
//! Metadata loaders concatenate sections, so one mapping may hold the same
//! key several times. Flattening turns the occurrences into a list.

use crate::test_utils::*;
use serde_json::json;
use simdb_meta::{flatten, merge_repeated_keys, unflatten, Document, Error, Mapping, Node};

#[test]
fn test_sections_merge_into_lists() {
    init_tracing();
    let mut manifest = doc(json!({"tag": "baseline", "workflow": {"name": "Test-Run"}}));
    manifest.merge(doc(json!({"tag": "reference"})));
    manifest.merge(doc(json!({"tag": "nightly"})));

    let entries = flatten(&manifest).unwrap();
    assert_eq!(
        encoded_paths(&entries),
        vec!["tag#1", "tag#2", "tag#3", "workflow.name"]
    );

    let rebuilt = unflatten(&entries).unwrap();
    assert_eq!(
        rebuilt.to_json(),
        json!({
            "tag": ["baseline", "reference", "nightly"],
            "workflow": {"name": "Test-Run"}
        })
    );
}

#[test]
fn test_repeated_mappings_merge() {
    let mut manifest = doc(json!({"code": {"name": "solver"}}));
    manifest.merge(doc(json!({"code": {"name": "post"}})));
    let entries = flatten(&manifest).unwrap();
    assert_eq!(encoded_paths(&entries), vec!["code#1.name", "code#2.name"]);
}

#[test]
fn test_merge_is_idempotent() {
    let d = Document::new()
        .with("k", Node::leaf(1))
        .with("k", Node::leaf(2));
    let once = merge_repeated_keys(&d).unwrap();
    let twice = merge_repeated_keys(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_incompatible_occurrences() {
    let leaf_then_mapping = Document::new()
        .with("k", Node::leaf("x"))
        .with("k", Mapping::new().with("a", Node::leaf(1)));
    let string_then_float = Document::new()
        .with("k", Node::leaf("x"))
        .with("k", Node::leaf(1.5));

    for d in [leaf_then_mapping, string_then_float] {
        assert!(matches!(flatten(&d), Err(Error::AmbiguousPath { .. })));
    }
}
