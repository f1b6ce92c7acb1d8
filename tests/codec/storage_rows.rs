//! Flat entries through storage rows and back

use crate::test_utils::*;
use proptest::prelude::*;
use simdb_meta::{flatten, unflatten_rows, FlatEntry, StoredRow};
use uuid::Uuid;

proptest! {
    #[test]
    fn prop_rows_rebuild_document(d in arb_document()) {
        let id = Uuid::new_v4();
        let rows: Vec<StoredRow> = flatten(&d).unwrap().iter().map(|e| e.to_row(id)).collect();
        prop_assert!(rows.iter().all(|r| r.record_id == id));
        prop_assert_eq!(unflatten_rows(&rows).unwrap(), d);
    }

    #[test]
    fn prop_row_preserves_entry(d in arb_document()) {
        for entry in flatten(&d).unwrap() {
            let row = entry.to_row(Uuid::nil());
            prop_assert_eq!(FlatEntry::from_row(&row).unwrap(), entry);
        }
    }
}

#[test]
fn test_rows_serialize_as_json() {
    let entries = entries_of(serde_json::json!({"pulse": 1500, "ratio": 0.1}));
    let rows: Vec<StoredRow> = entries.iter().map(|e| e.to_row(Uuid::nil())).collect();
    let json = serde_json::to_value(&rows).unwrap();
    assert_eq!(json[0]["kind"], "integer");
    assert_eq!(json[1]["value"], "0.1");
    let back: Vec<StoredRow> = serde_json::from_value(json).unwrap();
    assert_eq!(back, rows);
}
