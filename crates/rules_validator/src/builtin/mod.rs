//! Built-in rule definitions.
//!
//! Each submodule contributes the definitions for one family of rules. The
//! predicates are partial: they raise a [`RuleFault`] whenever
//! the value or an argument has the wrong shape and leave null handling, the
//! empty-string policy and message resolution to the compiler.

mod bounds;
mod dates;
mod formats;
mod matching;
mod types;

use rules_core::{ExpectedTypes, RuleArg, RuleDefinition, RuleFault, TypeTag, Value};

/// All built-in rules in catalog order.
pub(crate) fn rules() -> Vec<(&'static str, RuleDefinition)> {
    let mut rules = Vec::with_capacity(21);
    rules.extend(types::rules());
    rules.extend(bounds::numeric_rules());
    rules.extend(dates::rules());
    rules.extend(formats::rules());
    rules.extend(matching::membership_rules());
    rules.extend(bounds::length_rules());
    rules.extend(matching::pattern_rules());
    rules
}

/// The `json` and `ref` tags plus `extra`.
fn tags(extra: &[TypeTag]) -> ExpectedTypes {
    [TypeTag::Json, TypeTag::Ref]
        .into_iter()
        .chain(extra.iter().copied())
        .collect()
}

/// Borrows the value as a string or faults.
fn require_str(value: &Value) -> Result<&str, RuleFault> {
    value.as_str().ok_or_else(|| RuleFault::expected_string(value))
}

/// Reads the value as a number or faults.
fn require_number(value: &Value) -> Result<f64, RuleFault> {
    value.as_f64().ok_or_else(|| RuleFault::expected_number(value))
}

/// Reads the first argument as a number or faults.
fn numeric_arg(rule: &str, args: &[RuleArg], what: &str) -> Result<f64, RuleFault> {
    let arg = args
        .first()
        .ok_or_else(|| RuleFault::missing_argument(rule, what))?;
    arg.as_f64().ok_or_else(|| {
        RuleFault::invalid_argument(rule, what, format_args!("{} `{arg}`", arg.type_name()))
    })
}

/// Renders the first argument for a failure message.
fn first_arg_text(args: &[RuleArg]) -> String {
    args.first()
        .map_or_else(|| "undefined".to_string(), ToString::to_string)
}
