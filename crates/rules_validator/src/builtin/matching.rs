//! Membership, pattern and custom predicate rules.

use super::{first_arg_text, require_str, tags};
use rules_core::{DEFAULT_MESSAGE, RuleArg, RuleDefinition, RuleFault, TypeTag, Value};

pub(super) fn membership_rules() -> Vec<(&'static str, RuleDefinition)> {
    let membership_tags = tags(&[TypeTag::String, TypeTag::Number]);
    vec![
        (
            "isIn",
            RuleDefinition::builder(|value, args| is_in("isIn", value, args))
                .dynamic_message(|_, args| format!("Expected one of ({})", allowed_text(args)))
                .expected_types(membership_tags.clone())
                .ignore_empty_string(true)
                .build(),
        ),
        (
            "isNotIn",
            RuleDefinition::builder(|value, args| is_in("isNotIn", value, args).map(|found| !found))
                .dynamic_message(|_, args| format!("Must not be one of ({})", allowed_text(args)))
                .expected_types(membership_tags)
                .ignore_empty_string(true)
                .build(),
        ),
    ]
}

pub(super) fn pattern_rules() -> Vec<(&'static str, RuleDefinition)> {
    vec![
        (
            "regex",
            RuleDefinition::builder(|value, args| {
                let pattern = match args.first() {
                    Some(RuleArg::Pattern(re)) => re,
                    Some(other) => {
                        return Err(RuleFault::invalid_argument(
                            "regex",
                            "a regular expression",
                            format_args!("{} `{other}`", other.type_name()),
                        ));
                    }
                    None => {
                        return Err(RuleFault::missing_argument("regex", "a regular expression"));
                    }
                };
                Ok(pattern.is_match(require_str(value)?))
            })
            .dynamic_message(|_, args| {
                format!("Does not match the pattern ({})", first_arg_text(args))
            })
            .expected_types(tags(&[TypeTag::String]))
            .ignore_empty_string(true)
            .build(),
        ),
        (
            "custom",
            RuleDefinition::builder(|value, args| match args.first() {
                Some(RuleArg::Predicate(f)) => Ok(f.call(value)),
                Some(other) => Err(RuleFault::invalid_argument(
                    "custom",
                    "a predicate function",
                    format_args!("{} `{other}`", other.type_name()),
                )),
                None => Err(RuleFault::missing_argument("custom", "a predicate function")),
            })
            .message(DEFAULT_MESSAGE)
            .expected_types(tags(&[TypeTag::String, TypeTag::Number, TypeTag::Boolean]))
            .build(),
        ),
    ]
}

/// Membership test shared by `isIn` and `isNotIn`.
///
/// Scalars are compared by their string form. A list argument matches any
/// element, a string argument matches any substring and a map argument
/// matches its keys.
fn is_in(rule: &str, value: &Value, args: &[RuleArg]) -> Result<bool, RuleFault> {
    let needle = match value {
        Value::String(s) => s.clone(),
        Value::Int(_) | Value::Float(_) | Value::Bool(_) => value.to_string(),
        other => return Err(RuleFault::expected_string(other)),
    };
    let allowed = args
        .first()
        .ok_or_else(|| RuleFault::missing_argument(rule, "a list of allowed values"))?;

    Ok(match allowed.as_value() {
        Some(Value::List(items)) => items.iter().any(|item| item.to_string() == needle),
        Some(Value::String(s)) => s.contains(needle.as_str()),
        Some(Value::Map(map)) => map.contains_key(&needle),
        _ => false,
    })
}

fn allowed_text(args: &[RuleArg]) -> String {
    match args.first().and_then(RuleArg::as_value) {
        Some(Value::List(items)) => items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        _ => first_arg_text(args),
    }
}
