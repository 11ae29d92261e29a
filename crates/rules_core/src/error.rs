//! Error types for rules and validators.
//!
//! A predicate signals that it cannot evaluate its input by returning a
//! [`RuleFault`]. Compiled validators never surface faults directly; every
//! failure is folded into a [`Violation`].

use crate::Value;
use thiserror::Error;

/// Failure raised by a rule predicate on malformed input or arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RuleFault {
    message: String,
}

impl RuleFault {
    /// Creates a new fault with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The value had to be a string.
    pub fn expected_string(value: &Value) -> Self {
        Self::new(format!("Expected a string but received a {}.", value.type_name()))
    }

    /// The value had to be a number.
    pub fn expected_number(value: &Value) -> Self {
        Self::new(format!("Expected a number but received a {}.", value.type_name()))
    }

    /// A mandatory rule argument was not supplied.
    pub fn missing_argument(rule: &str, what: &str) -> Self {
        Self::new(format!("Rule `{rule}` requires {what}."))
    }

    /// A rule argument had the wrong shape.
    pub fn invalid_argument(rule: &str, expected: &str, got: impl std::fmt::Display) -> Self {
        Self::new(format!("Rule `{rule}` expected {expected}, but got {got}."))
    }

    /// Returns the fault message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The single failure channel of every compiled validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// Value is null or undefined
    #[error("Got invalid value `{value}`!")]
    InvalidValue { value: String },

    /// Predicate could not evaluate the value or its arguments
    #[error("{0}")]
    Fault(String),

    /// Value does not satisfy the rule
    #[error("{0}")]
    Rejected(String),
}

impl Violation {
    /// Creates an invalid value violation for a null or undefined value.
    pub fn invalid_value(value: &Value) -> Self {
        Self::InvalidValue {
            value: value.to_string(),
        }
    }

    /// Returns the human-readable failure message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns true if the value itself was null or undefined.
    pub fn is_invalid_value(&self) -> bool {
        matches!(self, Self::InvalidValue { .. })
    }

    /// Returns true if the predicate raised a fault.
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }
}

impl From<RuleFault> for Violation {
    fn from(fault: RuleFault) -> Self {
        Self::Fault(fault.message)
    }
}

/// Errors raised while assembling a rule catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A rule with this name is already registered
    #[error("Rule '{0}' is already registered")]
    DuplicateRule(String),

    /// Rule names must not be empty
    #[error("Rule name must not be empty")]
    EmptyName,
}

/// Lookup of a rule that is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown rule '{0}'")]
pub struct UnknownRule(pub String);
