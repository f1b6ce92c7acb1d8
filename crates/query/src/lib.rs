//! Constraint queries over flattened simulation metadata
//!
//! - constraint: `field=[modifier:]operand` text -> [`PredicateDescriptor`]
//! - evaluator: one predicate against one record's [`FlatEntry`] list
//! - query: AND-composition ([`Query`]) and [`filter_records`]
//!
//! [`FlatEntry`]: simdb_meta_core::FlatEntry

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constraint;
pub mod evaluator;
pub mod query;

pub use constraint::{parse, Modifier, PredicateDescriptor};
pub use evaluator::{evaluate, matching_entries};
pub use query::{filter_records, parse_all, Query};
