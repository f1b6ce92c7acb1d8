//! Every error kind surfaces where expected

use crate::test_utils::*;
use serde_json::json;
use simdb_meta::{
    evaluate, flatten, flatten_with, parse, unflatten, unflatten_rows, CodecLimits, Document,
    EmptyCollectionPolicy, Error, FlatEntry, MetaConfig, StoredRow, ValueKind,
};
use uuid::Uuid;

#[test]
fn test_malformed_constraint_reports_input() {
    let err = parse("badconstraint").unwrap_err();
    assert_eq!(err.kind(), "malformed_constraint");
    assert!(err.to_string().contains("badconstraint"));
}

#[test]
fn test_type_mismatch_on_ordering() {
    let entries = entries_of(json!({"pulse": 1500, "name": "x"}));
    let err = evaluate(&parse("pulse=gt:notanumber").unwrap(), &entries).unwrap_err();
    assert_eq!(err.kind(), "type_mismatch");

    let err = evaluate(&parse("name=lt:3").unwrap(), &entries).unwrap_err();
    assert_eq!(err.kind(), "type_mismatch");
}

#[test]
fn test_unrepresentable_documents() {
    for raw in [
        json!({"grid": [[1, 2]]}),
        json!({"empty": {}}),
        json!({"empty": []}),
        json!({"": 1}),
    ] {
        let err = flatten(&doc(raw.clone())).unwrap_err();
        assert_eq!(err.kind(), "unrepresentable_document", "{}", raw);
    }

    let err = Document::from_json(json!({"a": {"_type": "numpy.ndarray", "dtype": "float64", "bytes": ""}}))
        .unwrap_err();
    assert_eq!(err.kind(), "unrepresentable_document");
    assert_eq!(Document::from_json(json!([1])).unwrap_err().kind(), "unrepresentable_document");
}

#[test]
fn test_skip_policy_loses_only_empty_collections() {
    let config = MetaConfig {
        empty_collections: EmptyCollectionPolicy::Skip,
        ..MetaConfig::default()
    };
    let entries = flatten_with(&doc(json!({"a": {}, "b": {"c": []}, "d": 1})), &config).unwrap();
    assert_eq!(encoded_paths(&entries), vec!["d"]);
}

#[test]
fn test_ambiguous_entries() {
    let entries = [
        FlatEntry::new("run".parse().unwrap(), 1i64),
        FlatEntry::new("run.id".parse().unwrap(), 2i64),
    ];
    assert_eq!(unflatten(&entries).unwrap_err().kind(), "ambiguous_path");
}

#[test]
fn test_limit_exceeded() {
    let config = MetaConfig {
        limits: CodecLimits::with_small_limits(),
        ..MetaConfig::default()
    };
    let deep = doc(json!({"a": {"b": {"c": {"d": {"e": {"f": 1}}}}}}));
    assert_eq!(flatten_with(&deep, &config).unwrap_err().kind(), "limit_exceeded");
}

#[test]
fn test_bad_rows() {
    let row = StoredRow {
        record_id: Uuid::new_v4(),
        path: "a#0".into(),
        kind: ValueKind::Integer,
        value: "1".into(),
    };
    assert!(matches!(unflatten_rows(&[row]), Err(Error::PathParse(_))));
}
