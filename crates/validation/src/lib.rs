//! Validation of simulation outputs against calibrated thresholds
//!
//! - params: [`ValidationParameters`] records and the [`ParameterSet`] index
//! - stats: series reduction and missing-value sentinels
//! - acceptance: per-observation tests ([`accepts`], [`accepts_series`])
//! - calibrate: deriving parameters from a reference run
//! - series: decoding tagged numeric arrays
//! - report: [`TestReport`] aggregation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod acceptance;
pub mod calibrate;
pub mod params;
pub mod report;
pub mod series;
pub mod stats;

pub use acceptance::{accepts, accepts_series, Observation, TestOutcome};
pub use calibrate::{calibrate, calibrate_all};
pub use params::{Bounds, ParameterKey, ParameterSet, ValidationParameters, ValidationTest};
pub use report::TestReport;
pub use series::{decode_series, encode_series, is_tagged_series, Dtype};
pub use stats::{
    is_missing_sample, is_missing_value, Statistics, FLOAT_MISSING_VALUE, INT_MISSING_VALUE,
};
