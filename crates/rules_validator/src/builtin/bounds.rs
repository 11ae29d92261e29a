//! Numeric bounds and string length bounds.

use super::{first_arg_text, numeric_arg, require_number, require_str, tags};
use rules_core::{RuleArg, RuleDefinition, RuleFault, TypeTag};
use validator::ValidateLength;

pub(super) fn numeric_rules() -> Vec<(&'static str, RuleDefinition)> {
    vec![
        (
            "max",
            RuleDefinition::builder(|value, args| {
                let x = require_number(value)?;
                Ok(x <= numeric_arg("max", args, "a numeric bound")?)
            })
            .dynamic_message(|value, args| {
                format!(
                    "Value {value} exceeds the allowed maximum ({})",
                    first_arg_text(args)
                )
            })
            .expected_types(tags(&[TypeTag::Number]))
            .build(),
        ),
        (
            "min",
            RuleDefinition::builder(|value, args| {
                let x = require_number(value)?;
                Ok(x >= numeric_arg("min", args, "a numeric bound")?)
            })
            .dynamic_message(|value, args| {
                format!(
                    "Value {value} is below the allowed minimum ({})",
                    first_arg_text(args)
                )
            })
            .expected_types(tags(&[TypeTag::Number]))
            .build(),
        ),
    ]
}

pub(super) fn length_rules() -> Vec<(&'static str, RuleDefinition)> {
    vec![
        (
            "minLength",
            RuleDefinition::builder(|value, args| {
                let s = require_str(value)?;
                let min = length_arg("minLength", args)?;
                Ok(s.validate_length(Some(min), None, None))
            })
            .dynamic_message(|_, args| {
                format!(
                    "Shorter than the allowed minimum length ({} characters)",
                    first_arg_text(args)
                )
            })
            .expected_types(tags(&[TypeTag::String]))
            .ignore_empty_string(true)
            .build(),
        ),
        (
            "maxLength",
            RuleDefinition::builder(|value, args| {
                let s = require_str(value)?;
                let max = length_arg("maxLength", args)?;
                Ok(s.validate_length(None, Some(max), None))
            })
            .dynamic_message(|_, args| {
                format!(
                    "Longer than the allowed maximum length ({} characters)",
                    first_arg_text(args)
                )
            })
            .expected_types(tags(&[TypeTag::String]))
            .ignore_empty_string(true)
            .build(),
        ),
    ]
}

/// Reads a character count; must be a non-negative whole number.
fn length_arg(rule: &str, args: &[RuleArg]) -> Result<u64, RuleFault> {
    let n = numeric_arg(rule, args, "a character count")?;
    if n < 0.0 || n.fract() != 0.0 {
        return Err(RuleFault::invalid_argument(
            rule,
            "a character count",
            format_args!("`{n}`"),
        ));
    }
    Ok(n as u64)
}
