//! Validation parameters
//!
//! One [`ValidationParameters`] record holds the acceptance thresholds for a
//! single output path of a (device, scenario) pair. Records are produced by
//! calibration and only read afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Closed interval `[low, high]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower bound (inclusive)
    pub low: f64,
    /// Upper bound (inclusive)
    pub high: f64,
}

impl Bounds {
    /// Create bounds
    pub fn new(low: f64, high: f64) -> Self {
        Bounds { low, high }
    }

    /// Bounds admitting exactly one value
    pub fn degenerate(value: f64) -> Self {
        Bounds {
            low: value,
            high: value,
        }
    }

    /// Check if `x` lies in the closed interval (NaN never does)
    pub fn contains(&self, x: f64) -> bool {
        self.low <= x && x <= self.high
    }
}

impl From<(f64, f64)> for Bounds {
    fn from((low, high): (f64, f64)) -> Self {
        Bounds { low, high }
    }
}

/// Named acceptance test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationTest {
    /// Value (or series maximum) within `range`
    Range,
    /// Value (or series mean) within `mean`
    Mean,
    /// Value (or series median) within `median`
    Median,
    /// Series standard deviation within `stdev`
    Stdev,
    /// Value present, unless the path is optional
    Mandatory,
}

impl ValidationTest {
    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            ValidationTest::Range => "range",
            ValidationTest::Mean => "mean",
            ValidationTest::Median => "median",
            ValidationTest::Stdev => "stdev",
            ValidationTest::Mandatory => "mandatory",
        }
    }

    /// Resolve a test name, accepting the `max` and `not_missing` aliases
    pub fn from_name(name: &str) -> Option<ValidationTest> {
        match name {
            "range" | "max" => Some(ValidationTest::Range),
            "mean" => Some(ValidationTest::Mean),
            "median" => Some(ValidationTest::Median),
            "stdev" => Some(ValidationTest::Stdev),
            "mandatory" | "not_missing" => Some(ValidationTest::Mandatory),
            _ => None,
        }
    }
}

impl fmt::Display for ValidationTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Acceptance thresholds for one output path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationParameters {
    /// Record identifier
    pub uuid: Uuid,
    /// Device the thresholds apply to
    pub device: String,
    /// Scenario the thresholds apply to
    pub scenario: String,
    /// Output path the thresholds apply to
    pub path: String,
    /// Whether a missing value fails the `mandatory` test
    pub mandatory: bool,
    /// Bounds for the value, or the series maximum
    pub range: Bounds,
    /// Bounds for the value, or the series mean
    pub mean: Bounds,
    /// Bounds for the value, or the series median
    pub median: Bounds,
    /// Bounds for the series standard deviation
    pub stdev: Bounds,
    /// Tests to run, by name; unknown names always fail
    pub mandatory_tests: Vec<String>,
}

impl ValidationParameters {
    /// Create parameters with zero bounds and no tests
    pub fn new(
        device: impl Into<String>,
        scenario: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        ValidationParameters {
            uuid: Uuid::new_v4(),
            device: device.into(),
            scenario: scenario.into(),
            path: path.into(),
            mandatory: false,
            range: Bounds::default(),
            mean: Bounds::default(),
            median: Bounds::default(),
            stdev: Bounds::default(),
            mandatory_tests: Vec::new(),
        }
    }

    /// Set the tests to run (builder pattern)
    pub fn with_tests<I, S>(mut self, tests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mandatory_tests = tests.into_iter().map(Into::into).collect();
        self
    }

    /// Set the mandatory flag (builder pattern)
    pub fn with_mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = mandatory;
        self
    }

    /// Bounds checked by a test, if it has any
    pub fn bounds_for(&self, test: ValidationTest) -> Option<Bounds> {
        match test {
            ValidationTest::Range => Some(self.range),
            ValidationTest::Mean => Some(self.mean),
            ValidationTest::Median => Some(self.median),
            ValidationTest::Stdev => Some(self.stdev),
            ValidationTest::Mandatory => None,
        }
    }

    /// Test list in its persisted comma-separated form
    pub fn tests_text(&self) -> String {
        self.mandatory_tests.join(",")
    }

    /// Parse the persisted comma-separated test list
    pub fn parse_tests_text(text: &str) -> Vec<String> {
        text.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Lookup key of a parameters record
pub type ParameterKey = (String, String, String);

/// Parameters indexed by (device, scenario, path)
///
/// At most one record per key; inserting again replaces it.
#[derive(Debug, Clone, Default)]
pub struct ParameterSet {
    by_key: HashMap<ParameterKey, ValidationParameters>,
}

impl ParameterSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the one it replaced
    pub fn insert(&mut self, params: ValidationParameters) -> Option<ValidationParameters> {
        let key = (
            params.device.clone(),
            params.scenario.clone(),
            params.path.clone(),
        );
        self.by_key.insert(key, params)
    }

    /// Look up the record for a path
    pub fn get(&self, device: &str, scenario: &str, path: &str) -> Option<&ValidationParameters> {
        self.by_key
            .get(&(device.to_string(), scenario.to_string(), path.to_string()))
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Iterate records in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &ValidationParameters> {
        self.by_key.values()
    }
}

impl FromIterator<ValidationParameters> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = ValidationParameters>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        for params in iter {
            set.insert(params);
        }
        set
    }
}
