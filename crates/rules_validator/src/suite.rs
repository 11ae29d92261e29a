//! Runs check suites against a registry.

use crate::ValidatorRegistry;
use rules_core::{CheckResult, Suite, SuiteReport, UnknownRule};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that prevent a suite from running.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// A check names a rule that is not registered
    #[error("Check #{index}: {source}")]
    UnknownRule {
        index: usize,
        #[source]
        source: UnknownRule,
    },

    /// A check carries a pattern that does not compile
    #[error("Check #{index} ({rule}): invalid pattern: {error}")]
    InvalidPattern {
        index: usize,
        rule: String,
        error: String,
    },
}

/// Evaluates every check of a suite and collects the outcomes.
///
/// # Example
///
/// ```rust
/// use rules_core::{Check, Expectation, Suite};
/// use rules_validator::{SuiteRunner, registry};
///
/// let suite = Suite {
///     name: "smoke".to_string(),
///     description: None,
///     checks: vec![
///         Check::new("isEmail", "ada@example.com").expect(Expectation::Pass),
///         Check::new("min", 3).arg(5).expect(Expectation::Fail),
///     ],
/// };
///
/// let report = SuiteRunner::new(registry()).run(&suite).unwrap();
/// assert!(report.passed);
/// assert_eq!(report.stats.violations, 1);
/// ```
pub struct SuiteRunner<'a> {
    registry: &'a ValidatorRegistry,
}

impl<'a> SuiteRunner<'a> {
    /// Creates a runner over a registry.
    pub fn new(registry: &'a ValidatorRegistry) -> Self {
        Self { registry }
    }

    /// Runs a suite.
    ///
    /// All checks are resolved before any of them runs, so a misconfigured
    /// suite fails without partial results.
    pub fn run(&self, suite: &Suite) -> Result<SuiteReport, SuiteError> {
        let start = Instant::now();

        let mut prepared = Vec::with_capacity(suite.checks.len());
        for (index, check) in suite.checks.iter().enumerate() {
            let validator = self.registry.get(&check.rule).ok_or_else(|| {
                SuiteError::UnknownRule {
                    index,
                    source: UnknownRule(check.rule.clone()),
                }
            })?;
            let args = check
                .rule_args()
                .map_err(|e| SuiteError::InvalidPattern {
                    index,
                    rule: check.rule.clone(),
                    error: e.to_string(),
                })?;
            prepared.push((check, validator, args));
        }

        info!("Running suite '{}' ({} checks)", suite.name, prepared.len());

        let mut report = SuiteReport::new(&suite.name);
        for (check, validator, args) in prepared {
            let value = check.value();
            let outcome = validator.validate(&value, &args);
            let met = check.expect.is_met_by(outcome.as_ref());
            debug!(
                rule = %check.rule,
                %value,
                passed = outcome.is_none(),
                met,
                "Check evaluated"
            );
            report.push(CheckResult {
                rule: check.rule.clone(),
                value: value.to_json(),
                message: outcome.map(|v| v.message()),
                expect: check.expect,
                met,
            });
        }

        report.stats.duration_ms = start.elapsed().as_millis() as u64;
        Ok(report)
    }
}
