use anyhow::{Context, Result};
use rules_core::Check;
use rules_validator::registry;
use tracing::info;

use crate::output;

pub fn execute(
    rule: &str,
    raw_value: &str,
    raw_args: &[String],
    pattern: Option<String>,
    format: &str,
) -> Result<()> {
    info!("Checking value with rule: {}", rule);

    let check = Check {
        rule: rule.to_string(),
        value: parse_value(raw_value),
        args: raw_args.iter().map(|raw| parse_json(raw)).collect(),
        pattern,
        expect: Default::default(),
        description: None,
    };

    let validator = registry()
        .get(rule)
        .with_context(|| format!("Unknown rule '{}' (see `rules list`)", rule))?;
    let args = check
        .rule_args()
        .with_context(|| format!("Invalid pattern for rule '{}'", rule))?;

    let value = check.value();
    let outcome = validator.validate(&value, &args);
    output::print_outcome(rule, &value, outcome.as_ref(), format)?;

    if outcome.is_some() {
        std::process::exit(1);
    }

    Ok(())
}

/// `undefined` means no value at all; everything else goes through `parse_json`.
fn parse_value(raw: &str) -> Option<serde_json::Value> {
    (raw != "undefined").then(|| parse_json(raw))
}

/// Parses JSON, falling back to the raw text as a string.
fn parse_json(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_json_values() {
        assert_eq!(parse_json("5"), json!(5));
        assert_eq!(parse_json("[\"a\",\"b\"]"), json!(["a", "b"]));
        assert_eq!(parse_json("null"), json!(null));
        assert_eq!(parse_json("true"), json!(true));
    }

    #[test]
    fn test_parse_json_falls_back_to_string() {
        assert_eq!(parse_json("ada@example.com"), json!("ada@example.com"));
        assert_eq!(parse_json(""), json!(""));
        assert_eq!(parse_json("\"quoted\""), json!("quoted"));
    }

    #[test]
    fn test_parse_value_undefined() {
        assert_eq!(parse_value("undefined"), None);
        assert_eq!(parse_value("null"), Some(json!(null)));
    }
}
