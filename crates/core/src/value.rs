//! Leaf value model for flattened metadata
//!
//! This module defines:
//! - Value: closed tagged variant for every leaf a metadata document can hold
//! - ValueKind: the bare type tag, used by storage rows
//!
//! ## Type Rules
//!
//! - Six types only: String, Integer, Float, Boolean, Uuid, Missing
//! - No implicit coercion: a numeric-looking string stays a `String`
//! - `Integer(1) != Float(1.0)`; comparing different variants is a type error
//! - `Missing` compared with anything is "absent": never equal, never ordered,
//!   never an error
//! - Float uses IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Marker key used by producers to tag non-JSON types inside JSON objects
pub const TYPE_MARKER_KEY: &str = "_type";

/// Marker value identifying a tagged UUID object (`{"_type": "uuid.UUID", "hex": ...}`)
pub const UUID_MARKER: &str = "uuid.UUID";

/// Marker value identifying a tagged numeric array object
pub const NDARRAY_MARKER: &str = "numpy.ndarray";

/// A single leaf value of a metadata document
///
/// Classification happens once, at the document boundary (see [`Value::classify`]);
/// everything downstream matches on the variant instead of re-deriving types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// UTF-8 string (the empty string is a valid value)
    String(String),
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// Boolean flag
    Boolean(bool),
    /// UUID, only produced when the source explicitly tagged it
    Uuid(Uuid),
    /// Null or absent leaf
    Missing,
}

// Custom PartialEq implementation for IEEE-754 float semantics
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Uuid(a), Value::Uuid(b)) => a == b,
            (Value::Missing, Value::Missing) => true,
            _ => false,
        }
    }
}

/// Type tag of a [`Value`], persisted alongside the value text in storage rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// `Value::String`
    String,
    /// `Value::Integer`
    Integer,
    /// `Value::Float`
    Float,
    /// `Value::Boolean`
    Boolean,
    /// `Value::Uuid`
    Uuid,
    /// `Value::Missing`
    Missing,
}

impl ValueKind {
    /// Stable lowercase name of the kind
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
            ValueKind::Uuid => "uuid",
            ValueKind::Missing => "missing",
        }
    }

    /// All kinds, in declaration order
    pub fn all() -> [ValueKind; 6] {
        [
            ValueKind::String,
            ValueKind::Integer,
            ValueKind::Float,
            ValueKind::Boolean,
            ValueKind::Uuid,
            ValueKind::Missing,
        ]
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ValueKind::all()
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::type_mismatch(s, "unknown value kind"))
    }
}

impl Value {
    /// Classify a dynamically typed leaf decoded from the source format
    ///
    /// Returns `None` for containers (arrays and untagged objects), which are
    /// not leaves. Classification follows the origin type only:
    ///
    /// - `null` -> `Missing`
    /// - booleans -> `Boolean`
    /// - integers -> `Integer` (unsigned values beyond `i64` become `Float`)
    /// - other numbers -> `Float`
    /// - strings -> `String`, never coerced
    /// - `{"_type": "uuid.UUID", "hex": ...}` -> `Uuid`
    pub fn classify(raw: &serde_json::Value) -> Option<Value> {
        match raw {
            serde_json::Value::Null => Some(Value::Missing),
            serde_json::Value::Bool(b) => Some(Value::Boolean(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Value::Integer(i))
                } else {
                    n.as_f64().map(Value::Float)
                }
            }
            serde_json::Value::String(s) => Some(Value::String(s.clone())),
            serde_json::Value::Array(_) => None,
            serde_json::Value::Object(obj) => {
                if obj.get(TYPE_MARKER_KEY).and_then(|t| t.as_str()) != Some(UUID_MARKER) {
                    return None;
                }
                obj.get("hex")
                    .and_then(|hex| hex.as_str())
                    .and_then(|hex| Uuid::parse_str(hex).ok())
                    .map(Value::Uuid)
            }
        }
    }

    /// Get the type tag
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Uuid(_) => ValueKind::Uuid,
            Value::Missing => ValueKind::Missing,
        }
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "String",
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Boolean(_) => "Boolean",
            Value::Uuid(_) => "Uuid",
            Value::Missing => "Missing",
        }
    }

    /// Check if this is the absent value
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Check if this is an Integer or a Float
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as i64 if this is an Integer value
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get a numeric view of Integer and Float values
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as bool if this is a Boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the UUID if this is a Uuid value
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Value::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Canonical string form used by string comparisons
    ///
    /// Floats use the shortest representation that parses back to the same
    /// number (`1500.0`, `0.1`, `1e300`); UUIDs use the lowercase hyphenated
    /// form. `Missing` has no string form.
    pub fn canonical_string(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Float(f) => Some(format!("{:?}", f)),
            Value::Boolean(b) => Some(b.to_string()),
            Value::Uuid(u) => Some(u.hyphenated().to_string()),
            Value::Missing => None,
        }
    }

    /// Compare two values of the same variant
    ///
    /// Returns `Ok(None)` when either side is `Missing` (absent) or when two
    /// floats are unordered (NaN). Comparing two different non-missing
    /// variants is a `TypeMismatch`.
    pub fn try_cmp(&self, other: &Value) -> Result<Option<Ordering>> {
        match (self, other) {
            (Value::Missing, _) | (_, Value::Missing) => Ok(None),
            (Value::String(a), Value::String(b)) => Ok(Some(a.cmp(b))),
            (Value::Integer(a), Value::Integer(b)) => Ok(Some(a.cmp(b))),
            (Value::Float(a), Value::Float(b)) => Ok(a.partial_cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => Ok(Some(a.cmp(b))),
            (Value::Uuid(a), Value::Uuid(b)) => Ok(Some(a.cmp(b))),
            (a, b) => Err(Error::type_mismatch(
                a.type_name(),
                format!("cannot compare {} with {}", a.type_name(), b.type_name()),
            )),
        }
    }

    /// Convert to JSON, tagging UUIDs with the producer's marker object
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Integer(i) => serde_json::Value::Number((*i).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Uuid(u) => serde_json::json!({
                TYPE_MARKER_KEY: UUID_MARKER,
                "hex": u.simple().to_string(),
            }),
            Value::Missing => serde_json::Value::Null,
        }
    }

    /// Text persisted in the value column of a storage row
    pub fn to_text(&self) -> String {
        self.canonical_string().unwrap_or_default()
    }

    /// Rebuild a value from its storage kind and text
    pub fn from_text(kind: ValueKind, text: &str) -> Result<Value> {
        let bad = |detail: &str| Error::type_mismatch(text, format!("{} ({})", detail, kind));
        match kind {
            ValueKind::String => Ok(Value::String(text.to_string())),
            ValueKind::Integer => text
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| bad("not an integer")),
            ValueKind::Float => text
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| bad("not a float")),
            ValueKind::Boolean => match text {
                "true" => Ok(Value::Boolean(true)),
                "false" => Ok(Value::Boolean(false)),
                _ => Err(bad("not a boolean")),
            },
            ValueKind::Uuid => Uuid::parse_str(text)
                .map(Value::Uuid)
                .map_err(|_| bad("not a uuid")),
            ValueKind::Missing => Ok(Value::Missing),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.canonical_string() {
            Some(s) => f.write_str(&s),
            None => f.write_str("null"),
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Value::Uuid(u)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Missing
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Missing)
    }
}
