//! Shared helpers and proptest strategies for the codec suite

#![allow(dead_code)]

use proptest::prelude::*;
use simdb_meta::{flatten, Document, FlatEntry, Mapping, Node, Value};
use std::sync::Once;
use uuid::Uuid;

static INIT_TRACING: Once = Once::new();

/// Route codec logs to the test harness output
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Build a document from JSON, panicking on rejection
pub fn doc(raw: serde_json::Value) -> Document {
    Document::from_json(raw).expect("document should be representable")
}

/// Flatten JSON straight to entries
pub fn entries_of(raw: serde_json::Value) -> Vec<FlatEntry> {
    flatten(&doc(raw)).expect("document should flatten")
}

/// Encoded paths of a flattened document
pub fn encoded_paths(entries: &[FlatEntry]) -> Vec<String> {
    entries.iter().map(|e| e.path.encode()).collect()
}

// ============================================================================
// Strategies
// ============================================================================

/// Keys drawn from an alphabet that includes the path metacharacters
pub fn arb_key() -> impl Strategy<Value = String> {
    "[a-c.#\\\\_]{1,5}"
}

/// Any leaf value except NaN
pub fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        ".{0,8}".prop_map(Value::String),
        any::<i64>().prop_map(Value::Integer),
        any::<f64>()
            .prop_filter("NaN never equals itself", |f| !f.is_nan())
            .prop_map(Value::Float),
        any::<bool>().prop_map(Value::Boolean),
        any::<u128>().prop_map(|n| Value::Uuid(Uuid::from_u128(n))),
        Just(Value::Missing),
    ]
}

/// Nodes without empty collections and without lists directly in lists
pub fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = arb_value().prop_map(Node::Leaf);
    leaf.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::btree_map(arb_key(), inner.clone(), 1..4)
                .prop_map(|m| Node::Mapping(m.into_iter().collect::<Mapping>())),
            prop::collection::vec(
                inner.prop_filter("no list in list", |n| !matches!(n, Node::Sequence(_))),
                1..4
            )
            .prop_map(Node::Sequence),
        ]
    })
}

/// Documents the codec round-trips exactly
pub fn arb_document() -> impl Strategy<Value = Document> {
    prop::collection::btree_map(arb_key(), arb_node(), 0..5)
        .prop_map(|m| Document::from_mapping(m.into_iter().collect()))
}
