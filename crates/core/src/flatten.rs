//! Nested document -> flat entries
//!
//! Flattening runs in two passes:
//!
//! 1. [`merge_repeated_keys`] normalises every mapping that holds the same key
//!    more than once, turning the occurrences into a list.
//! 2. The normalised tree is walked in document order, emitting one
//!    [`FlatEntry`] per leaf.
//!
//! | Node | Emits |
//! |------|-------|
//! | mapping under `p` | children under `p.k` |
//! | sequence under key `k` | element `i` under `k#i` (1-based) |
//! | leaf under `p` | `(p, value)` |
//!
//! A sequence directly inside a sequence and an empty key have no encoding and
//! are rejected. Empty collections follow [`EmptyCollectionPolicy`].

use crate::config::{EmptyCollectionPolicy, MetaConfig};
use crate::document::{Document, Mapping, Node};
use crate::entry::FlatEntry;
use crate::error::{Error, Result};
use crate::path::{Path, PathSegment};
use tracing::debug;

/// Flatten a document with the default configuration
///
/// # Examples
///
/// ```
/// use simdb_meta_core::{flatten, Document, Mapping, Node};
///
/// let doc = Document::new()
///     .with("workflow", Mapping::new().with("name", Node::leaf("Test-Run")))
///     .with("codes", Node::sequence(vec![Node::leaf("a"), Node::leaf("b")]));
///
/// let paths: Vec<String> = flatten(&doc).unwrap().iter().map(|e| e.path.encode()).collect();
/// assert_eq!(paths, vec!["workflow.name", "codes#1", "codes#2"]);
/// ```
pub fn flatten(doc: &Document) -> Result<Vec<FlatEntry>> {
    flatten_with(doc, &MetaConfig::default())
}

/// Flatten a document under an explicit configuration
pub fn flatten_with(doc: &Document, config: &MetaConfig) -> Result<Vec<FlatEntry>> {
    if doc.is_empty() {
        return Ok(Vec::new());
    }

    let normalized = merge_repeated_keys(doc)?;
    let mut flattener = Flattener {
        config,
        entries: Vec::new(),
    };
    let mut path = Path::root();
    flattener.mapping(normalized.root(), &mut path, 1)?;

    debug!(entries = flattener.entries.len(), "flattened document");
    Ok(flattener.entries)
}

// ============================================================================
// Merge pre-pass
// ============================================================================

/// Turn repeated mapping keys into lists, recursively
///
/// The first occurrence keeps its position. A second occurrence turns the
/// value into a two-element list (or is appended when the first occurrence
/// already is a list); later occurrences append.
///
/// # Errors
///
/// `AmbiguousPath` when the occurrences cannot share a list: a leaf meeting a
/// mapping, a later occurrence that is itself a list, or two present leaves of
/// different types.
pub fn merge_repeated_keys(doc: &Document) -> Result<Document> {
    let mut path = Path::root();
    merge_mapping(doc.root(), &mut path).map(Document::from_mapping)
}

fn merge_mapping(mapping: &Mapping, path: &mut Path) -> Result<Mapping> {
    let mut merged = Mapping::new();
    for (key, node) in mapping.iter() {
        path.push(PathSegment::key(key));
        let node = merge_node(node, path)?;
        match merged.position(key) {
            None => merged.insert(key, node),
            Some(pos) => {
                debug!(path = %path, "merging repeated key");
                if let Some(acc) = merged.node_at_mut(pos) {
                    append_occurrence(acc, node, path)?;
                }
            }
        }
        path.pop();
    }
    Ok(merged)
}

fn merge_node(node: &Node, path: &mut Path) -> Result<Node> {
    match node {
        Node::Mapping(m) => merge_mapping(m, path).map(Node::Mapping),
        Node::Sequence(items) => items
            .iter()
            .map(|item| merge_node(item, path))
            .collect::<Result<Vec<_>>>()
            .map(Node::Sequence),
        Node::Leaf(v) => Ok(Node::Leaf(v.clone())),
    }
}

fn append_occurrence(acc: &mut Node, next: Node, path: &Path) -> Result<()> {
    if matches!(next, Node::Sequence(_)) {
        return Err(Error::ambiguous(
            path.encode(),
            "a repeated key cannot contribute a list",
        ));
    }
    match acc {
        Node::Sequence(items) => {
            for item in items.iter() {
                check_compatible(item, &next, path)?;
            }
            items.push(next);
        }
        _ => {
            check_compatible(acc, &next, path)?;
            let first = std::mem::replace(acc, Node::Sequence(Vec::new()));
            *acc = Node::Sequence(vec![first, next]);
        }
    }
    Ok(())
}

fn check_compatible(a: &Node, b: &Node, path: &Path) -> Result<()> {
    match (a, b) {
        (Node::Mapping(_), Node::Mapping(_)) => Ok(()),
        (Node::Leaf(x), Node::Leaf(y)) => {
            if x.is_missing() || y.is_missing() || x.kind() == y.kind() {
                Ok(())
            } else {
                Err(Error::ambiguous(
                    path.encode(),
                    format!("cannot merge {} with {}", x.type_name(), y.type_name()),
                ))
            }
        }
        (a, b) => Err(Error::ambiguous(
            path.encode(),
            format!("cannot merge {} with {}", a.shape_name(), b.shape_name()),
        )),
    }
}

// ============================================================================
// Emission
// ============================================================================

struct Flattener<'a> {
    config: &'a MetaConfig,
    entries: Vec<FlatEntry>,
}

impl Flattener<'_> {
    fn mapping(&mut self, mapping: &Mapping, path: &mut Path, depth: usize) -> Result<()> {
        self.config.limits.check_depth(depth)?;
        for (key, node) in mapping.iter() {
            if key.is_empty() {
                return Err(Error::unrepresentable(path.encode(), "empty key"));
            }
            path.push(PathSegment::key(key));
            self.node(node, path, depth)?;
            path.pop();
        }
        Ok(())
    }

    fn node(&mut self, node: &Node, path: &mut Path, depth: usize) -> Result<()> {
        match node {
            Node::Leaf(value) => {
                let limits = &self.config.limits;
                limits.check_path_len(path.len())?;
                self.entries.push(FlatEntry::new(path.clone(), value.clone()));
                limits.check_entry_count(self.entries.len())?;
                Ok(())
            }
            Node::Mapping(m) if m.is_empty() => self.empty_collection("mapping", path),
            Node::Mapping(m) => self.mapping(m, path, depth + 1),
            Node::Sequence(items) if items.is_empty() => self.empty_collection("list", path),
            Node::Sequence(items) => self.sequence(items, path, depth + 1),
        }
    }

    fn sequence(&mut self, items: &[Node], path: &mut Path, depth: usize) -> Result<()> {
        self.config.limits.check_depth(depth)?;
        self.config.limits.check_sequence_len(items.len())?;

        let Some(owner) = path.pop() else {
            return Err(Error::unrepresentable("", "list without an owning key"));
        };
        for (i, item) in items.iter().enumerate() {
            path.push(owner.with_index(i + 1));
            if matches!(item, Node::Sequence(_)) {
                return Err(Error::unrepresentable(
                    path.encode(),
                    "list nested directly in a list",
                ));
            }
            self.node(item, path, depth)?;
            path.pop();
        }
        path.push(owner);
        Ok(())
    }

    fn empty_collection(&mut self, shape: &str, path: &Path) -> Result<()> {
        match self.config.empty_collections {
            EmptyCollectionPolicy::Reject => Err(Error::unrepresentable(
                path.encode(),
                format!("empty {} has no flat form", shape),
            )),
            EmptyCollectionPolicy::Skip => {
                debug!(path = %path, shape, "skipping empty collection");
                Ok(())
            }
        }
    }
}
