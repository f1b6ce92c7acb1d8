//! Calibration: deriving parameters from a reference observation
//!
//! Calibration records degenerate bounds `(v, v)` around the reference run so
//! that later runs are accepted only when they reproduce it. The bounds are
//! meant to be widened by hand afterwards.

use crate::acceptance::Observation;
use crate::params::{Bounds, ParameterSet, ValidationParameters, ValidationTest};
use crate::stats::{is_missing_sample, is_missing_value, Statistics};
use tracing::debug;

/// Derive parameters for one path from a reference observation
pub fn calibrate(
    device: &str,
    scenario: &str,
    path: &str,
    observation: &Observation,
) -> ValidationParameters {
    use ValidationTest::*;

    let mut params = ValidationParameters::new(device, scenario, path);
    match observation {
        Observation::Scalar(value) if is_missing_value(value) => {
            params.mandatory = false;
            params.mandatory_tests = test_names(&[Mandatory]);
        }
        Observation::Scalar(value) => match value.as_f64() {
            Some(x) => {
                params.mandatory = true;
                params.range = Bounds::degenerate(x);
                params.mean = Bounds::degenerate(x);
                params.median = Bounds::degenerate(x);
                params.mandatory_tests = test_names(&[Range, Mean, Median, Mandatory]);
            }
            None => {
                params.mandatory = true;
                params.mandatory_tests = test_names(&[Mandatory]);
            }
        },
        Observation::Series(series) => match Statistics::from_series(series) {
            Some(stats) => {
                params.mandatory = !series.iter().copied().any(is_missing_sample);
                params.range = Bounds::degenerate(stats.max);
                params.mean = Bounds::degenerate(stats.mean);
                params.median = Bounds::degenerate(stats.median);
                params.stdev = Bounds::degenerate(stats.stdev);
                params.mandatory_tests = test_names(&[Range, Mean, Median, Stdev, Mandatory]);
            }
            None => {
                params.mandatory = false;
                params.mandatory_tests = test_names(&[Mandatory]);
            }
        },
    }

    debug!(device, scenario, path, tests = %params.tests_text(), "calibrated validation parameters");
    params
}

/// Calibrate every observation of a reference run into a parameter set
pub fn calibrate_all<'a, I>(device: &str, scenario: &str, observations: I) -> ParameterSet
where
    I: IntoIterator<Item = (&'a str, &'a Observation)>,
{
    observations
        .into_iter()
        .map(|(path, observation)| calibrate(device, scenario, path, observation))
        .collect()
}

fn test_names(tests: &[ValidationTest]) -> Vec<String> {
    tests.iter().map(|t| t.name().to_string()).collect()
}
