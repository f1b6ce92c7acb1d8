//! Codec Integration Test Suite
//!
//! End-to-end guarantees of the metadata codec and the query layer on top.
//!
//! ## Modules
//!
//! - **round_trip**: flatten/unflatten laws (property-based)
//! - **path_invariants**: path encoding bijection
//! - **merge_rule**: repeated-key normalisation
//! - **query_examples**: worked constraint examples over flattened documents
//! - **error_scenarios**: every error kind surfaces where expected
//! - **config_file**: `simdb-meta.toml` loading and the bound `Codec`
//! - **storage_rows**: flat entries through storage rows and back
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test codec
//! ```

mod config_file;
mod error_scenarios;
mod merge_rule;
mod path_invariants;
mod query_examples;
mod round_trip;
mod storage_rows;
mod test_utils;
