//! Calibrate-then-validate workflow
//!
//! A reference run is calibrated into parameters, the parameters persisted
//! (tests as comma-separated text), and later runs checked against them.

use proptest::prelude::*;
use simdb_meta_core::Value;
use simdb_meta_validation::{
    accepts_series, calibrate, decode_series, encode_series, Observation, ParameterSet,
    Statistics, TestReport, ValidationParameters,
};

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_parameters_survive_text_persistence() {
    let params = calibrate(
        "iter",
        "baseline",
        "/equilibrium/ip",
        &Observation::Scalar(Value::Float(-1.5e7)),
    );
    let stored = params.tests_text();
    let mut restored = params.clone();
    restored.mandatory_tests = ValidationParameters::parse_tests_text(&stored);
    assert_eq!(restored, params);
}

// ============================================================================
// Tagged Arrays
// ============================================================================

#[test]
fn test_tagged_array_feeds_series_acceptance() {
    let reference = vec![1.0, 2.0, 3.0, 4.0];
    let raw = encode_series(&reference);
    let series = decode_series(&raw).unwrap();

    let params = calibrate("d", "s", "/profiles_1d/q", &Observation::Series(series.clone()));
    assert!(accepts_series(&series, &params).passed);

    let drifted: Vec<f64> = series.iter().map(|x| x * 1.01).collect();
    assert!(!accepts_series(&drifted, &params).passed);
}

// ============================================================================
// Full Run
// ============================================================================

#[test]
fn test_report_for_drifted_run() {
    let reference: Vec<(&str, Observation)> = vec![
        ("/ip", Observation::Scalar(Value::Float(1.0))),
        ("/b0", Observation::Scalar(Value::Float(5.3))),
        ("/q", Observation::Series(vec![1.0, 2.0, 3.0])),
    ];
    let set: ParameterSet = reference
        .iter()
        .map(|(path, obs)| calibrate("d", "s", path, obs))
        .collect();

    let run: Vec<(&str, Observation)> = vec![
        ("/ip", Observation::Scalar(Value::Float(1.0))),
        ("/b0", Observation::Scalar(Value::Float(5.4))),
        ("/q", Observation::Series(vec![])),
    ];
    let report = TestReport::run(&set, "d", "s", run.iter().map(|(p, o)| (*p, o)));

    assert!(!report.is_success());
    assert!(report.failures_for("/ip").is_empty());
    assert_eq!(
        report.failures_for("/b0"),
        &[
            "range validation failed".to_string(),
            "mean validation failed".to_string(),
            "median validation failed".to_string(),
        ]
    );
    // calibrated mandatory, now empty
    assert!(report
        .failures_for("/q")
        .contains(&"mandatory validation failed".to_string()));
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_statistics_are_ordered(series in prop::collection::vec(-1e6f64..1e6, 1..64)) {
        let stats = Statistics::from_series(&series).unwrap();
        prop_assert!(stats.min <= stats.median && stats.median <= stats.max);
        prop_assert!(stats.min <= stats.mean + 1e-6 && stats.mean <= stats.max + 1e-6);
        prop_assert!(stats.stdev >= 0.0);
    }

    #[test]
    fn prop_reference_passes_own_calibration(series in prop::collection::vec(-1e6f64..1e6, 0..64)) {
        let obs = Observation::Series(series);
        let params = calibrate("d", "s", "/p", &obs);
        prop_assert!(obs.check(&params).passed);
    }

    #[test]
    fn prop_float64_payload_round_trips(series in prop::collection::vec(any::<f64>().prop_filter("finite", |x| x.is_finite()), 0..32)) {
        prop_assert_eq!(decode_series(&encode_series(&series)).unwrap(), series);
    }
}
