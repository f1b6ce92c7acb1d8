//! Nested metadata documents
//!
//! This module defines the in-memory shape handed to the codec by document
//! sources (manifest loaders, REST deserializers):
//! - Document: the root mapping of one record's metadata
//! - Mapping: ordered string-keyed entries; the same key may appear twice
//! - Node: a mapping, a sequence or a leaf [`Value`]
//!
//! Mappings keep insertion order and tolerate repeated keys because that is
//! what a loader produces when it concatenates several metadata blocks. The
//! flatten pre-pass ([`crate::flatten::merge_repeated_keys`]) turns repeated
//! keys into lists.

use crate::error::{Error, Result};
use crate::value::{Value, NDARRAY_MARKER, TYPE_MARKER_KEY, UUID_MARKER};
use std::ops::{Deref, DerefMut};

/// One node of a nested document
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// String-keyed mapping
    Mapping(Mapping),
    /// Ordered sequence
    Sequence(Vec<Node>),
    /// Scalar leaf
    Leaf(Value),
}

impl Node {
    /// Create a leaf node
    pub fn leaf(value: impl Into<Value>) -> Self {
        Node::Leaf(value.into())
    }

    /// Create a sequence node
    pub fn sequence(items: impl IntoIterator<Item = Node>) -> Self {
        Node::Sequence(items.into_iter().collect())
    }

    /// Create an empty mapping node
    pub fn empty_mapping() -> Self {
        Node::Mapping(Mapping::new())
    }

    /// Human readable shape name, used in error messages
    pub fn shape_name(&self) -> &'static str {
        match self {
            Node::Mapping(_) => "mapping",
            Node::Sequence(_) => "sequence",
            Node::Leaf(_) => "leaf",
        }
    }

    /// Check if this is an empty mapping or an empty sequence
    pub fn is_empty_collection(&self) -> bool {
        match self {
            Node::Mapping(m) => m.is_empty(),
            Node::Sequence(s) => s.is_empty(),
            Node::Leaf(_) => false,
        }
    }

    /// Get the mapping if this is a Mapping node
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Get the items if this is a Sequence node
    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value if this is a Leaf node
    pub fn as_leaf(&self) -> Option<&Value> {
        match self {
            Node::Leaf(v) => Some(v),
            _ => None,
        }
    }

    /// Build a node from JSON, classifying leaves
    ///
    /// `at` is the dotted location used in error messages.
    pub fn from_json(raw: serde_json::Value, at: &str) -> Result<Node> {
        match raw {
            serde_json::Value::Array(items) => {
                let mut nodes = Vec::with_capacity(items.len());
                for (i, item) in items.into_iter().enumerate() {
                    nodes.push(Node::from_json(item, &format!("{}#{}", at, i + 1))?);
                }
                Ok(Node::Sequence(nodes))
            }
            serde_json::Value::Object(obj) => {
                if let Some(marker) = obj.get(TYPE_MARKER_KEY).and_then(|t| t.as_str()) {
                    let raw = serde_json::Value::Object(obj.clone());
                    return match marker {
                        UUID_MARKER => Value::classify(&raw).map(Node::Leaf).ok_or_else(|| {
                            Error::unrepresentable(at, "tagged uuid with invalid hex")
                        }),
                        NDARRAY_MARKER => Err(Error::unrepresentable(
                            at,
                            "tagged numeric array cannot be stored as flat metadata",
                        )),
                        other => Err(Error::unrepresentable(
                            at,
                            format!("unknown tagged type '{}'", other),
                        )),
                    };
                }
                let mut mapping = Mapping::new();
                for (key, value) in obj {
                    let child_at = if at.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", at, key)
                    };
                    let node = Node::from_json(value, &child_at)?;
                    mapping.insert(key, node);
                }
                Ok(Node::Mapping(mapping))
            }
            scalar => Value::classify(&scalar)
                .map(Node::Leaf)
                .ok_or_else(|| Error::unrepresentable(at, "unclassifiable leaf")),
        }
    }

    /// Convert to JSON (UUID leaves become tagged marker objects)
    ///
    /// A mapping with repeated keys keeps the last value for each key.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Node::Mapping(m) => m.to_json(),
            Node::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(Node::to_json).collect())
            }
            Node::Leaf(v) => v.to_json(),
        }
    }
}

impl From<Value> for Node {
    fn from(v: Value) -> Self {
        Node::Leaf(v)
    }
}

impl From<Mapping> for Node {
    fn from(m: Mapping) -> Self {
        Node::Mapping(m)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Sequence(items)
    }
}

/// Ordered string-keyed mapping that tolerates repeated keys
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping {
    entries: Vec<(String, Node)>,
}

impl Mapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Mapping {
            entries: Vec::new(),
        }
    }

    /// Append an entry (builder pattern)
    pub fn with(mut self, key: impl Into<String>, node: impl Into<Node>) -> Self {
        self.insert(key, node);
        self
    }

    /// Append an entry, keeping any earlier entry with the same key
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<Node>) {
        self.entries.push((key.into(), node.into()));
    }

    /// Replace the first entry with this key, or append a new one
    pub fn set(&mut self, key: impl Into<String>, node: impl Into<Node>) {
        let key = key.into();
        let node = node.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = node,
            None => self.entries.push((key, node)),
        }
    }

    /// First node stored under `key`
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, n)| n)
    }

    /// Mutable access to the first node stored under `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, n)| n)
    }

    /// Position of the first entry with this key
    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Mutable access to the node at a position
    pub fn node_at_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.entries.get_mut(index).map(|(_, n)| n)
    }

    /// Number of entries (repeated keys counted separately)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the mapping has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), n))
    }

    /// Keys in insertion order (repeated keys appear repeatedly)
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Check if any key appears more than once
    pub fn has_repeated_keys(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .any(|(i, (k, _))| self.entries[..i].iter().any(|(prev, _)| prev == k))
    }

    /// Append every entry of `other`, keeping repeated keys
    pub fn extend(&mut self, other: Mapping) {
        self.entries.extend(other.entries);
    }

    /// Convert to a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        for (k, n) in &self.entries {
            obj.insert(k.clone(), n.to_json());
        }
        serde_json::Value::Object(obj)
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Node);
    type IntoIter = std::vec::IntoIter<(String, Node)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, Node)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        Mapping {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Root of one record's nested metadata
///
/// Newtype around [`Mapping`] providing direct access via Deref/DerefMut plus
/// document-level construction helpers.
///
/// # Examples
///
/// ```
/// use simdb_meta_core::{Document, Node};
///
/// let doc = Document::new()
///     .with("pulse", Node::leaf(1500))
///     .with("workflow", simdb_meta_core::Mapping::new().with("name", Node::leaf("Test-Run")));
/// assert_eq!(doc.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document(Mapping);

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Document(Mapping::new())
    }

    /// Wrap an existing mapping
    pub fn from_mapping(mapping: Mapping) -> Self {
        Document(mapping)
    }

    /// Append an entry (builder pattern)
    pub fn with(mut self, key: impl Into<String>, node: impl Into<Node>) -> Self {
        self.0.insert(key, node);
        self
    }

    /// Get the root mapping
    pub fn root(&self) -> &Mapping {
        &self.0
    }

    /// Unwrap the root mapping
    pub fn into_root(self) -> Mapping {
        self.0
    }

    /// Build a document from JSON
    ///
    /// The root must be an object. Tagged UUID objects become `Uuid` leaves;
    /// tagged numeric arrays and unknown tags are unrepresentable.
    pub fn from_json(raw: serde_json::Value) -> Result<Document> {
        if !raw.is_object() {
            return Err(Error::unrepresentable("", "document root must be a mapping"));
        }
        match Node::from_json(raw, "")? {
            Node::Mapping(m) => Ok(Document(m)),
            other => Err(Error::unrepresentable(
                "",
                format!("document root must be a mapping, found {}", other.shape_name()),
            )),
        }
    }

    /// Convert to JSON
    pub fn to_json(&self) -> serde_json::Value {
        self.0.to_json()
    }

    /// Append another metadata section
    ///
    /// Keys already present are kept twice; flattening merges them into a list.
    pub fn merge(&mut self, other: Document) {
        self.0.extend(other.0);
    }
}

impl Deref for Document {
    type Target = Mapping;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Document {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Mapping> for Document {
    fn from(m: Mapping) -> Self {
        Document(m)
    }
}
