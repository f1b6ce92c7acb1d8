//! Core types and codec for simulation metadata
//!
//! This crate defines the foundational types used throughout the workspace:
//! - Value: closed leaf value enum (String, Integer, Float, Boolean, Uuid, Missing)
//! - Path: structured flat path with a bijective text encoding
//! - Document: nested metadata (ordered mappings, sequences, leaves)
//! - FlatEntry / StoredRow: flattened leaves and their persisted form
//! - flatten / unflatten: the lossless codec between the two shapes
//! - CodecLimits / MetaConfig / Codec: limits and the `simdb-meta.toml` config
//! - Error: error type shared by the codec, query and validation crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod document;
pub mod entry;
pub mod error;
pub mod flatten;
pub mod limits;
pub mod path;
pub mod unflatten;
pub mod value;

pub use config::{Codec, EmptyCollectionPolicy, MetaConfig, CONFIG_FILE_NAME};
pub use document::{Document, Mapping, Node};
pub use entry::{FlatEntry, StoredRow};
pub use error::{Error, Result};
pub use flatten::{flatten, flatten_with, merge_repeated_keys};
pub use limits::{CodecLimits, LimitError};
pub use path::{Path, PathParseError, PathSegment};
pub use unflatten::{unflatten, unflatten_rows, unflatten_with};
pub use value::{Value, ValueKind};
