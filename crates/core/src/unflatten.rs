//! Flat entries -> nested document
//!
//! Entries are applied in the order given. Each path is walked from the root,
//! creating mappings for plain segments and lists for indexed segments. Lists
//! grow on demand; unfilled slots hold empty-mapping placeholders until a
//! later entry fills them.

use crate::document::{Document, Mapping, Node};
use crate::entry::{FlatEntry, StoredRow};
use crate::error::{Error, Result};
use crate::limits::CodecLimits;
use crate::path::{Path, PathParseError, PathSegment};
use crate::value::Value;
use tracing::{debug, warn};

/// Rebuild a document with the default limits
pub fn unflatten(entries: &[FlatEntry]) -> Result<Document> {
    unflatten_with(entries, &CodecLimits::default())
}

/// Decode storage rows and rebuild a document with the default limits
pub fn unflatten_rows(rows: &[StoredRow]) -> Result<Document> {
    let entries = rows
        .iter()
        .map(FlatEntry::from_row)
        .collect::<Result<Vec<_>>>()?;
    unflatten(&entries)
}

/// Rebuild a document under explicit limits
///
/// # Errors
///
/// `AmbiguousPath` when two entries disagree about the shape at some prefix
/// (one descends through a leaf, or a key is a list for one entry and a
/// mapping for another).
pub fn unflatten_with(entries: &[FlatEntry], limits: &CodecLimits) -> Result<Document> {
    limits.check_entry_count(entries.len())?;

    let mut root = Mapping::new();
    for entry in entries {
        if entry.path.is_empty() {
            return Err(Error::ambiguous("", "entry without a path"));
        }
        limits.check_path_len(entry.path.len())?;
        let mut walker = Walker {
            full: &entry.path,
            limits,
            depth: 0,
        };
        walker.insert(&mut root, entry.path.segments(), entry.value.clone())?;
    }

    debug!(entries = entries.len(), "unflattened entries");
    Ok(Document::from_mapping(root))
}

struct Walker<'a> {
    full: &'a Path,
    limits: &'a CodecLimits,
    depth: usize,
}

impl Walker<'_> {
    /// Encoded prefix of the full path ending at segment `depth`
    fn prefix(&self) -> String {
        Path::from_segments(self.full.segments()[..self.depth].to_vec()).encode()
    }

    fn insert(&mut self, mapping: &mut Mapping, segments: &[PathSegment], value: Value) -> Result<()> {
        let Some((segment, rest)) = segments.split_first() else {
            return Ok(());
        };
        self.depth += 1;
        let key = segment.name();

        match segment.index() {
            None if rest.is_empty() => match mapping.get_mut(key) {
                None => {
                    mapping.insert(key, Node::Leaf(value));
                    Ok(())
                }
                Some(slot) => self.assign(slot, value),
            },
            None => {
                if mapping.get(key).is_none() {
                    mapping.insert(key, Node::empty_mapping());
                }
                match mapping.get_mut(key) {
                    Some(Node::Mapping(child)) => self.insert(child, rest, value),
                    Some(other) => Err(self.conflict("mapping", other)),
                    None => Ok(()),
                }
            }
            Some(0) => Err(PathParseError::ZeroIndex(self.depth - 1).into()),
            Some(index) => {
                self.limits.check_sequence_len(index)?;
                if mapping.get(key).is_none() {
                    mapping.insert(key, Node::Sequence(Vec::new()));
                }
                let items = match mapping.get_mut(key) {
                    Some(Node::Sequence(items)) => items,
                    Some(other) => return Err(self.conflict("list", other)),
                    None => return Ok(()),
                };
                if items.len() < index {
                    items.resize(index, Node::empty_mapping());
                }
                let slot = &mut items[index - 1];
                if rest.is_empty() {
                    return self.assign(slot, value);
                }
                match slot {
                    Node::Mapping(child) => self.insert(child, rest, value),
                    other => Err(self.conflict("mapping", other)),
                }
            }
        }
    }

    /// Store a leaf into an existing slot
    fn assign(&self, slot: &mut Node, value: Value) -> Result<()> {
        match slot {
            Node::Leaf(old) => {
                warn!(path = %self.full, previous = %old, "duplicate entry overwrites earlier value");
                *old = value;
                Ok(())
            }
            // list placeholder not yet filled
            Node::Mapping(m) if m.is_empty() => {
                *slot = Node::Leaf(value);
                Ok(())
            }
            other => Err(self.conflict("leaf", other)),
        }
    }

    fn conflict(&self, wanted: &str, found: &Node) -> Error {
        Error::ambiguous(
            self.prefix(),
            format!(
                "entry '{}' needs a {} here but an earlier entry made a {}",
                self.full,
                wanted,
                found.shape_name()
            ),
        )
    }
}
