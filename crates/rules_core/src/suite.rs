//! Check suites.
//!
//! A suite is a named list of checks, each invoking one rule against a value,
//! optionally asserting whether the rule should pass or fail. Suites are the
//! configuration documents consumed by the parser and the CLI.

use crate::{RuleArg, Value, Violation};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

/// A named list of checks.
///
/// # Example
///
/// ```rust
/// use rules_core::{Check, Expectation, Suite};
///
/// let suite = Suite {
///     name: "signup".to_string(),
///     description: None,
///     checks: vec![Check::new("isEmail", "ada@example.com").expect(Expectation::Pass)],
/// };
/// assert_eq!(suite.checks.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suite {
    /// Suite name
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,

    /// Checks in execution order
    #[serde(default)]
    pub checks: Vec<Check>,
}

/// One rule invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Check {
    /// Rule name in the registry
    pub rule: String,

    /// Value under test; absent means undefined, `null` means null
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<serde_json::Value>,

    /// Plain rule arguments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<serde_json::Value>,

    /// Regular expression appended after `args`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Expected outcome
    #[serde(default)]
    pub expect: Expectation,

    /// Optional description shown in reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl Check {
    /// Creates a check of `rule` against a JSON-compatible value.
    pub fn new(rule: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            rule: rule.into(),
            value: Some(value.into()),
            args: Vec::new(),
            pattern: None,
            expect: Expectation::Any,
            description: None,
        }
    }

    /// Appends a plain argument.
    pub fn arg(mut self, arg: impl Into<serde_json::Value>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Sets the pattern argument.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets the expected outcome.
    pub fn expect(mut self, expect: Expectation) -> Self {
        self.expect = expect;
        self
    }

    /// Returns the value under test.
    pub fn value(&self) -> Value {
        self.value.clone().map_or(Value::Undefined, Value::from)
    }

    /// Builds the rule arguments, compiling the pattern if one is set.
    pub fn rule_args(&self) -> Result<Vec<RuleArg>, regex::Error> {
        let mut args: Vec<RuleArg> = self
            .args
            .iter()
            .cloned()
            .map(|json| RuleArg::Value(Value::from(json)))
            .collect();
        if let Some(pattern) = &self.pattern {
            args.push(RuleArg::Pattern(Regex::new(pattern)?));
        }
        Ok(args)
    }
}

/// Expected outcome of a check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expectation {
    /// The rule must report no violation
    Pass,
    /// The rule must report a violation
    Fail,
    /// Any outcome is accepted
    #[default]
    Any,
}

impl Expectation {
    /// Returns true if the outcome satisfies this expectation.
    pub fn is_met_by(&self, outcome: Option<&Violation>) -> bool {
        match self {
            Expectation::Pass => outcome.is_none(),
            Expectation::Fail => outcome.is_some(),
            Expectation::Any => true,
        }
    }
}
