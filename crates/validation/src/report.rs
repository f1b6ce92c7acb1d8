//! Aggregated validation results for a run

use crate::acceptance::{Observation, TestOutcome};
use crate::params::{ParameterSet, ValidationParameters};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Test counts and failure messages, grouped by path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestReport {
    /// Number of tests run
    pub tests_run: usize,
    /// Failure messages (`"<test> validation failed"`) per path
    pub failures: BTreeMap<String, Vec<String>>,
}

impl TestReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one outcome into the report
    pub fn record(&mut self, path: &str, outcome: &TestOutcome) {
        self.tests_run += outcome.tests_run;
        if outcome.failed_tests.is_empty() {
            return;
        }
        self.failures.entry(path.to_string()).or_default().extend(
            outcome
                .failed_tests
                .iter()
                .map(|test| format!("{} validation failed", test)),
        );
    }

    /// Check one observation and record the outcome
    pub fn check(
        &mut self,
        path: &str,
        observation: &Observation,
        params: &ValidationParameters,
    ) -> TestOutcome {
        let outcome = observation.check(params);
        self.record(path, &outcome);
        outcome
    }

    /// Check every observation that has parameters in `set`
    ///
    /// Paths without parameters are skipped.
    pub fn run<'a, I>(set: &ParameterSet, device: &str, scenario: &str, observations: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a Observation)>,
    {
        let mut report = TestReport::new();
        let mut skipped = 0usize;
        for (path, observation) in observations {
            match set.get(device, scenario, path) {
                Some(params) => {
                    report.check(path, observation, params);
                }
                None => skipped += 1,
            }
        }
        debug!(
            device,
            scenario,
            tests_run = report.tests_run,
            failed_paths = report.failures.len(),
            skipped,
            "validation run complete"
        );
        report
    }

    /// True when no test failed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of failure messages across all paths
    pub fn failure_count(&self) -> usize {
        self.failures.values().map(Vec::len).sum()
    }

    /// Failure messages for one path
    pub fn failures_for(&self, path: &str) -> &[String] {
        self.failures.get(path).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl fmt::Display for TestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            return write!(f, "Success ({} tests run)", self.tests_run);
        }
        writeln!(
            f,
            "Failures: {} ({} tests run)",
            self.failures.len(),
            self.tests_run
        )?;
        for (path, messages) in &self.failures {
            writeln!(f, "Path: {}", path)?;
            for message in messages {
                writeln!(f, "  {}", message)?;
            }
        }
        Ok(())
    }
}
