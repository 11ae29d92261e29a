//! Simple type checks.

use super::tags;
use rules_core::{RuleDefinition, TypeTag, Value};

pub(super) fn rules() -> Vec<(&'static str, RuleDefinition)> {
    vec![
        (
            "isBoolean",
            RuleDefinition::builder(|value, _| Ok(matches!(value, Value::Bool(_))))
                .message("Expected a boolean value.")
                .expected_types(tags(&[]))
                .build(),
        ),
        (
            "isNotEmptyString",
            RuleDefinition::builder(|value, _| Ok(!value.is_empty_string()))
                .message("Must not be an empty string.")
                .expected_types(tags(&[TypeTag::String]))
                .build(),
        ),
        (
            "isInteger",
            RuleDefinition::builder(|value, _| Ok(is_integer(value)))
                .message("Expected an integer.")
                .expected_types(tags(&[TypeTag::Number]))
                .build(),
        ),
        (
            "isNumber",
            RuleDefinition::builder(|value, _| Ok(value.is_number()))
                .message("Expected a number.")
                .expected_types(tags(&[]))
                .build(),
        ),
        (
            "isString",
            RuleDefinition::builder(|value, _| Ok(matches!(value, Value::String(_))))
                .message("Expected a string.")
                .expected_types(tags(&[]))
                .build(),
        ),
    ]
}

fn is_integer(value: &Value) -> bool {
    match value {
        Value::Int(_) => true,
        Value::Float(f) => f.is_finite() && f.fract() == 0.0,
        _ => false,
    }
}
