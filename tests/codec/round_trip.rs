//! Round-trip laws
//!
//! - unflatten(flatten(d)) == d
//! - flatten is idempotent through unflatten
//! - encoded paths in one flatten output are unique

use crate::test_utils::*;
use proptest::prelude::*;
use serde_json::json;
use simdb_meta::{flatten, unflatten, Document};
use std::collections::HashSet;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_unflatten_inverts_flatten(d in arb_document()) {
        let entries = flatten(&d).unwrap();
        prop_assert_eq!(unflatten(&entries).unwrap(), d);
    }

    #[test]
    fn prop_flatten_idempotent(d in arb_document()) {
        let once = flatten(&d).unwrap();
        let twice = flatten(&unflatten(&once).unwrap()).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_paths_unique(d in arb_document()) {
        let entries = flatten(&d).unwrap();
        let unique: HashSet<String> = entries.iter().map(|e| e.path.encode()).collect();
        prop_assert_eq!(unique.len(), entries.len());
    }

    #[test]
    fn prop_json_form_is_stable(d in arb_document()) {
        let json = d.to_json();
        let back = Document::from_json(json.clone()).unwrap();
        prop_assert_eq!(back.to_json(), json);
    }
}

#[test]
fn test_round_trip_manifest_document() {
    init_tracing();
    let d = doc(json!({
        "description": "Baseline scenario",
        "workflow": {"name": "Test-Run", "git": "abc123", "step": 3},
        "codes": [
            {"name": "solver", "version": "1.2.0", "commit": "abc"},
            {"name": "post", "version": "0.9", "commit": "def"}
        ],
        "tags": ["baseline", "reference"],
        "pulse": 1500,
        "ratio": 0.75,
        "converged": true,
        "notes": null,
        "parent": {"_type": "uuid.UUID", "hex": "0123456789abcdef0123456789abcdef"}
    }));
    let entries = flatten(&d).unwrap();
    assert_eq!(
        encoded_paths(&entries),
        vec![
            "description",
            "workflow.name",
            "workflow.git",
            "workflow.step",
            "codes#1.name",
            "codes#1.version",
            "codes#1.commit",
            "codes#2.name",
            "codes#2.version",
            "codes#2.commit",
            "tags#1",
            "tags#2",
            "pulse",
            "ratio",
            "converged",
            "notes",
            "parent",
        ]
    );
    assert_eq!(unflatten(&entries).unwrap(), d);
}

#[test]
fn test_round_trip_mixed_list() {
    let d = doc(json!({"items": [1, {"a": "x"}, null, "s"]}));
    assert_eq!(unflatten(&flatten(&d).unwrap()).unwrap(), d);
}
