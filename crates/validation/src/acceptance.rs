//! Statistical acceptance tests
//!
//! Each test named in [`ValidationParameters::mandatory_tests`] yields a
//! pass/fail result for one observation:
//!
//! | Observation | range | mean | median | stdev | mandatory |
//! |-------------|-------|------|--------|-------|-----------|
//! | numeric scalar | in `range` | in `mean` | in `median` | pass | pass |
//! | other present scalar | pass | pass | pass | pass | pass |
//! | missing scalar | fail | fail | fail | pass | `!params.mandatory` |
//! | non-empty series | max in `range` | mean in `mean` | median in `median` | stdev in `stdev` | no missing element, or `!params.mandatory` |
//! | empty series | fail | fail | fail | fail | `!params.mandatory` |
//!
//! Unknown test names fail.

use crate::params::{ValidationParameters, ValidationTest};
use crate::stats::{is_missing_sample, is_missing_value, Statistics};
use serde::{Deserialize, Serialize};
use simdb_meta_core::Value;
use tracing::trace;

/// Result of applying one parameters record to one observation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TestOutcome {
    /// True iff no listed test failed
    pub passed: bool,
    /// Names of the failed tests, as listed in the parameters
    pub failed_tests: Vec<String>,
    /// Number of tests run
    pub tests_run: usize,
}

/// A value to validate: a scalar leaf or a reduced numeric series
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    /// Scalar leaf
    Scalar(Value),
    /// Numeric series
    Series(Vec<f64>),
}

impl Observation {
    /// Apply a parameters record
    pub fn check(&self, params: &ValidationParameters) -> TestOutcome {
        match self {
            Observation::Scalar(value) => accepts(value, params),
            Observation::Series(series) => accepts_series(series, params),
        }
    }
}

impl From<Value> for Observation {
    fn from(value: Value) -> Self {
        Observation::Scalar(value)
    }
}

impl From<Vec<f64>> for Observation {
    fn from(series: Vec<f64>) -> Self {
        Observation::Series(series)
    }
}

/// Per-test results before the listed tests are consulted
#[derive(Debug, Clone, Copy, Default)]
struct Checks {
    range: bool,
    mean: bool,
    median: bool,
    stdev: bool,
    mandatory: bool,
}

impl Checks {
    fn all_statistics(passing: bool, mandatory: bool) -> Self {
        Checks {
            range: passing,
            mean: passing,
            median: passing,
            stdev: passing,
            mandatory,
        }
    }

    fn get(&self, test: ValidationTest) -> bool {
        match test {
            ValidationTest::Range => self.range,
            ValidationTest::Mean => self.mean,
            ValidationTest::Median => self.median,
            ValidationTest::Stdev => self.stdev,
            ValidationTest::Mandatory => self.mandatory,
        }
    }

    fn outcome(&self, params: &ValidationParameters) -> TestOutcome {
        let failed_tests: Vec<String> = params
            .mandatory_tests
            .iter()
            .filter(|name| !ValidationTest::from_name(name).is_some_and(|t| self.get(t)))
            .cloned()
            .collect();
        trace!(path = %params.path, failed = failed_tests.len(), "applied validation tests");
        TestOutcome {
            passed: failed_tests.is_empty(),
            failed_tests,
            tests_run: params.mandatory_tests.len(),
        }
    }
}

/// Apply a parameters record to a scalar value
pub fn accepts(value: &Value, params: &ValidationParameters) -> TestOutcome {
    let checks = if is_missing_value(value) {
        // a scalar has no spread to test
        Checks {
            stdev: true,
            ..Checks::all_statistics(false, !params.mandatory)
        }
    } else {
        match value.as_f64() {
            Some(x) => Checks {
                range: params.range.contains(x),
                mean: params.mean.contains(x),
                median: params.median.contains(x),
                stdev: true,
                mandatory: true,
            },
            None => Checks::all_statistics(true, true),
        }
    };
    checks.outcome(params)
}

/// Apply a parameters record to a numeric series
pub fn accepts_series(series: &[f64], params: &ValidationParameters) -> TestOutcome {
    let checks = match Statistics::from_series(series) {
        None => Checks::all_statistics(false, !params.mandatory),
        Some(stats) => {
            let complete = !series.iter().copied().any(is_missing_sample);
            Checks {
                range: params.range.contains(stats.max),
                mean: params.mean.contains(stats.mean),
                median: params.median.contains(stats.median),
                stdev: params.stdev.contains(stats.stdev),
                mandatory: complete || !params.mandatory,
            }
        }
    };
    checks.outcome(params)
}
