//! simdb-meta - Metadata codec and constraint queries for simulation records
//!
//! Simulation metadata arrives as nested documents but is stored as flat
//! `(path, value)` rows. This crate provides the lossless codec between the
//! two shapes, a typed query engine over the flat form, and the statistical
//! acceptance tests used to validate simulation outputs.
//!
//! # Quick Start
//!
//! ```
//! use simdb_meta::{flatten, parse_all, Document};
//! use serde_json::json;
//!
//! let doc = Document::from_json(json!({
//!     "workflow": {"name": "Test-Run"},
//!     "pulse": 1500
//! }))?;
//! let entries = flatten(&doc)?;
//!
//! let query = parse_all(["workflow.name=in:test", "pulse=gt:1000"])?;
//! assert!(query.matches(&entries)?);
//! # Ok::<(), simdb_meta::Error>(())
//! ```
//!
//! # Architecture
//!
//! | Crate | Contents |
//! |-------|----------|
//! | `simdb-meta-core` | values, paths, documents, flatten/unflatten, config |
//! | `simdb-meta-query` | constraint parser, evaluator, record filtering |
//! | `simdb-meta-validation` | parameters, acceptance, calibration, reports |

pub use simdb_meta_core::*;
pub use simdb_meta_query::{
    evaluate, filter_records, matching_entries, parse, parse_all, Modifier, PredicateDescriptor,
    Query,
};
pub use simdb_meta_validation::{
    accepts, accepts_series, calibrate, calibrate_all, decode_series, encode_series, Bounds,
    Observation, ParameterSet, Statistics, TestOutcome, TestReport, ValidationParameters,
    ValidationTest,
};

/// Query crate, for items not re-exported at the root
pub use simdb_meta_query as query;

/// Validation crate, for items not re-exported at the root
pub use simdb_meta_validation as validation;
