//! Reports produced by running check suites.

use crate::Expectation;
use serde::Serialize;

/// Outcome of running a suite.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    /// Suite name
    pub suite: String,

    /// Whether every check met its expectation
    pub passed: bool,

    /// Per-check results in execution order
    pub results: Vec<CheckResult>,

    /// Run statistics
    pub stats: SuiteStats,
}

/// Result of a single check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// Rule name
    pub rule: String,

    /// Value under test, rendered as JSON
    pub value: serde_json::Value,

    /// Failure message, `None` if the rule passed
    pub message: Option<String>,

    /// Expected outcome
    pub expect: Expectation,

    /// Whether the outcome met the expectation
    pub met: bool,
}

/// Statistics about a suite run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SuiteStats {
    /// Number of checks run
    pub checks_run: usize,

    /// Number of checks whose rule reported a violation
    pub violations: usize,

    /// Number of checks that missed their expectation
    pub unmet: usize,

    /// Run duration in milliseconds
    pub duration_ms: u64,
}

impl SuiteReport {
    /// Creates an empty, passing report.
    pub fn new(suite: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            passed: true,
            results: Vec::new(),
            stats: SuiteStats::default(),
        }
    }

    /// Records a check result and updates the statistics.
    pub fn push(&mut self, result: CheckResult) {
        self.stats.checks_run += 1;
        if result.message.is_some() {
            self.stats.violations += 1;
        }
        if !result.met {
            self.stats.unmet += 1;
            self.passed = false;
        }
        self.results.push(result);
    }

    /// Iterates over the checks that missed their expectation.
    pub fn unmet(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.met)
    }
}
