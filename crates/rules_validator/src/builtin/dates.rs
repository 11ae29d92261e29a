//! Date comparisons.
//!
//! Both rules compare the value against the first argument, or against the
//! current time when no argument is given. A value or comparison date that
//! cannot be parsed makes the rule fail rather than fault.

use super::{require_str, tags};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rules_core::{RuleArg, RuleDefinition, RuleFault, TypeTag, Value};
use std::cmp::Ordering;

pub(super) fn rules() -> Vec<(&'static str, RuleDefinition)> {
    vec![
        (
            "isAfter",
            RuleDefinition::builder(|value, args| {
                compare(value, args).map(|ord| ord == Some(Ordering::Greater))
            })
            .dynamic_message(|_, args| {
                format!("Earlier than the allowed minimum time ({})", comparison_text(args))
            })
            .expected_types(tags(&[TypeTag::String, TypeTag::Number]))
            .ignore_empty_string(true)
            .build(),
        ),
        (
            "isBefore",
            RuleDefinition::builder(|value, args| {
                compare(value, args).map(|ord| ord == Some(Ordering::Less))
            })
            .dynamic_message(|_, args| {
                format!("Later than the allowed maximum time ({})", comparison_text(args))
            })
            .expected_types(tags(&[TypeTag::String, TypeTag::Number]))
            .ignore_empty_string(true)
            .build(),
        ),
    ]
}

/// Orders the value against the comparison date; `None` if either is unparseable.
fn compare(value: &Value, args: &[RuleArg]) -> Result<Option<Ordering>, RuleFault> {
    let date = parse_date(require_str(value)?);
    let comparison = match args.first().and_then(RuleArg::as_value) {
        None => Some(Utc::now()),
        Some(Value::String(s)) => parse_date(s),
        Some(Value::Int(epoch)) => parse_date(&epoch.to_string()),
        Some(_) => None,
    };
    Ok(date.zip(comparison).map(|(a, b)| a.cmp(&b)))
}

fn comparison_text(args: &[RuleArg]) -> String {
    args.first()
        .map_or_else(|| "now".to_string(), ToString::to_string)
}

/// Parses a date in one of several formats.
///
/// Supports:
/// - ISO 8601 / RFC 3339 (e.g., "2024-01-15T10:30:00Z")
/// - Unix epoch seconds (e.g., "1705318200")
/// - Unix epoch milliseconds (e.g., "1705318200000")
/// - Date and time without zone (e.g., "2024-01-15 10:30:00"), taken as UTC
/// - Date only (e.g., "2024-01-15"), taken as start of day UTC
pub(crate) fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(epoch) = input.parse::<i64>() {
        // Large values are milliseconds
        return if epoch.abs() > 10_000_000_000 {
            DateTime::from_timestamp_millis(epoch)
        } else {
            DateTime::from_timestamp(epoch, 0)
        };
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    None
}
