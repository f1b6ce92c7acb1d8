//! Series reduction and missing-value sentinels

use serde::{Deserialize, Serialize};
use simdb_meta_core::Value;

/// Float written by producers in place of an absent measurement
pub const FLOAT_MISSING_VALUE: f64 = -9.0e40;

/// Integer written by producers in place of an absent measurement
pub const INT_MISSING_VALUE: i64 = -999_999_999;

/// Check if a scalar leaf counts as missing
///
/// `Missing`, the empty string and the two numeric sentinels are missing.
pub fn is_missing_value(value: &Value) -> bool {
    match value {
        Value::Missing => true,
        Value::String(s) => s.is_empty(),
        Value::Integer(i) => *i == INT_MISSING_VALUE,
        Value::Float(f) => is_missing_sample(*f),
        Value::Boolean(_) | Value::Uuid(_) => false,
    }
}

/// Check if a series element counts as missing
pub fn is_missing_sample(x: f64) -> bool {
    x == FLOAT_MISSING_VALUE || x == INT_MISSING_VALUE as f64
}

/// Summary statistics of a numeric series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of samples
    pub count: usize,
    /// Largest sample
    pub max: f64,
    /// Smallest sample
    pub min: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Median (mean of the two middle samples for even counts)
    pub median: f64,
    /// Population standard deviation
    pub stdev: f64,
}

impl Statistics {
    /// Reduce a series; `None` when it is empty
    pub fn from_series(series: &[f64]) -> Option<Statistics> {
        if series.is_empty() {
            return None;
        }
        let count = series.len();
        let n = count as f64;

        let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = series.iter().copied().fold(f64::INFINITY, f64::min);
        let mean = series.iter().sum::<f64>() / n;
        let variance = series.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        let mut sorted = series.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Some(Statistics {
            count,
            max,
            min,
            mean,
            median,
            stdev: variance.sqrt(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_series() {
        assert!(Statistics::from_series(&[]).is_none());
    }

    #[test]
    fn test_single_sample() {
        let s = Statistics::from_series(&[4.0]).unwrap();
        assert_eq!(s.max, 4.0);
        assert_eq!(s.min, 4.0);
        assert_eq!(s.mean, 4.0);
        assert_eq!(s.median, 4.0);
        assert_eq!(s.stdev, 0.0);
    }

    #[test]
    fn test_population_stdev() {
        let s = Statistics::from_series(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(s.mean, 5.0);
        assert_eq!(s.stdev, 2.0);
        assert_eq!(s.median, 4.5);
        assert_eq!(s.max, 9.0);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.count, 8);
    }

    #[test]
    fn test_odd_median_unsorted_input() {
        let s = Statistics::from_series(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(s.median, 2.0);
    }

    #[test]
    fn test_missing_sentinels() {
        assert!(is_missing_value(&Value::Missing));
        assert!(is_missing_value(&Value::String(String::new())));
        assert!(is_missing_value(&Value::Float(FLOAT_MISSING_VALUE)));
        assert!(is_missing_value(&Value::Integer(INT_MISSING_VALUE)));
        assert!(!is_missing_value(&Value::Integer(0)));
        assert!(!is_missing_value(&Value::Boolean(false)));
        assert!(is_missing_sample(-9.0e40));
        assert!(!is_missing_sample(0.0));
    }
}
