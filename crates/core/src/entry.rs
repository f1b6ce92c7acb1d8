//! Flat entries and their storage rows
//!
//! A [`FlatEntry`] is one `(path, value)` pair produced by flattening. The
//! storage layer persists it as a [`StoredRow`]: the encoded path plus the
//! value's kind tag and text form. Conversion in both directions is lossless.

use crate::error::Result;
use crate::path::Path;
use crate::value::{Value, ValueKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One leaf of a flattened document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatEntry {
    /// Location of the leaf
    pub path: Path,
    /// Leaf value
    pub value: Value,
}

impl FlatEntry {
    /// Create a new entry
    pub fn new(path: Path, value: impl Into<Value>) -> Self {
        FlatEntry {
            path,
            value: value.into(),
        }
    }

    /// Build the storage row for this entry
    pub fn to_row(&self, record_id: Uuid) -> StoredRow {
        StoredRow {
            record_id,
            path: self.path.encode(),
            kind: self.value.kind(),
            value: self.value.to_text(),
        }
    }

    /// Rebuild an entry from its storage row
    pub fn from_row(row: &StoredRow) -> Result<FlatEntry> {
        let path = Path::decode(&row.path)?;
        let value = Value::from_text(row.kind, &row.value)?;
        Ok(FlatEntry { path, value })
    }
}

impl fmt::Display for FlatEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.path, self.value)
    }
}

/// Persisted form of a [`FlatEntry`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRow {
    /// Owning simulation record
    pub record_id: Uuid,
    /// Encoded path
    pub path: String,
    /// Type tag of the value
    pub kind: ValueKind,
    /// Text form of the value (empty for `Missing`)
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, value: impl Into<Value>) -> FlatEntry {
        FlatEntry::new(path.parse().unwrap(), value)
    }

    #[test]
    fn test_to_row_encodes_path_and_kind() {
        let id = Uuid::new_v4();
        let row = entry("codes#2.commit", "def").to_row(id);
        assert_eq!(row.record_id, id);
        assert_eq!(row.path, "codes#2.commit");
        assert_eq!(row.kind, ValueKind::String);
        assert_eq!(row.value, "def");
    }

    #[test]
    fn test_row_round_trip_every_kind() {
        let id = Uuid::new_v4();
        let entries = vec![
            entry("s", "Test-Run"),
            entry("empty", ""),
            entry("i", 1500i64),
            entry("f", 0.1f64),
            entry("b", true),
            entry("u", Uuid::new_v4()),
            entry("m", ()),
            entry("numeric\\.string", "1500"),
        ];
        for e in entries {
            let back = FlatEntry::from_row(&e.to_row(id)).unwrap();
            assert_eq!(back, e);
        }
    }

    #[test]
    fn test_from_row_rejects_bad_path() {
        let row = StoredRow {
            record_id: Uuid::new_v4(),
            path: "a..b".into(),
            kind: ValueKind::String,
            value: "x".into(),
        };
        assert!(FlatEntry::from_row(&row).is_err());
    }

    #[test]
    fn test_from_row_rejects_bad_value() {
        let row = StoredRow {
            record_id: Uuid::new_v4(),
            path: "pulse".into(),
            kind: ValueKind::Integer,
            value: "abc".into(),
        };
        assert!(FlatEntry::from_row(&row).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(entry("workflow.name", "x").to_string(), "workflow.name=x");
        assert_eq!(entry("a", ()).to_string(), "a=null");
    }
}
