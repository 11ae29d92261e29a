//! Builder pattern for creating rule definitions.
//!
//! This module provides an ergonomic builder for constructing rules
//! with a fluent API.

use crate::{
    ErrorMessage, ExpectedTypes, Predicate, RuleArg, RuleDefinition, RuleFault, TypeTag, Value,
};
use std::sync::Arc;

/// Message used when a rule does not declare its own.
pub const DEFAULT_MESSAGE: &str = "Validation failed.";

/// Builder for creating a `RuleDefinition`.
///
/// # Example
///
/// ```rust
/// use rules_core::{RuleArg, RuleBuilder, TypeTag, Value};
///
/// let rule = RuleBuilder::new(|value: &Value, args: &[RuleArg]| {
///     let step = args.first().and_then(RuleArg::as_f64).unwrap_or(1.0);
///     Ok(value.as_f64().is_some_and(|n| n % step == 0.0))
/// })
/// .dynamic_message(|value, args| format!("{value} is not a multiple of {}", args[0]))
/// .expected_types([TypeTag::Json, TypeTag::Ref, TypeTag::Number])
/// .build();
///
/// assert!(!rule.ignore_empty_string());
/// ```
pub struct RuleBuilder {
    predicate: Predicate,
    message: ErrorMessage,
    expected_types: ExpectedTypes,
    ignore_empty_string: bool,
}

impl RuleBuilder {
    /// Creates a new rule builder around a predicate.
    ///
    /// Defaults to the generic failure message, the `json` and `ref` type
    /// tags, and no empty-string bypass.
    pub fn new(
        predicate: impl Fn(&Value, &[RuleArg]) -> Result<bool, RuleFault> + Send + Sync + 'static,
    ) -> Self {
        Self {
            predicate: Arc::new(predicate),
            message: ErrorMessage::from(DEFAULT_MESSAGE),
            expected_types: ExpectedTypes::from([TypeTag::Json, TypeTag::Ref]),
            ignore_empty_string: false,
        }
    }

    /// Sets a fixed failure message.
    pub fn message(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets a failure message generated from the value and arguments.
    pub fn dynamic_message(
        mut self,
        f: impl Fn(&Value, &[RuleArg]) -> String + Send + Sync + 'static,
    ) -> Self {
        self.message = ErrorMessage::dynamic(f);
        self
    }

    /// Replaces the expected type tags.
    pub fn expected_types(mut self, tags: impl IntoIterator<Item = TypeTag>) -> Self {
        self.expected_types = tags.into_iter().collect();
        self
    }

    /// Sets whether empty strings bypass the predicate.
    pub fn ignore_empty_string(mut self, ignore: bool) -> Self {
        self.ignore_empty_string = ignore;
        self
    }

    /// Builds the rule definition.
    pub fn build(self) -> RuleDefinition {
        RuleDefinition {
            predicate: self.predicate,
            message: self.message,
            expected_types: self.expected_types,
            ignore_empty_string: self.ignore_empty_string,
        }
    }
}

impl RuleDefinition {
    /// Starts building a rule around a predicate.
    pub fn builder(
        predicate: impl Fn(&Value, &[RuleArg]) -> Result<bool, RuleFault> + Send + Sync + 'static,
    ) -> RuleBuilder {
        RuleBuilder::new(predicate)
    }
}
