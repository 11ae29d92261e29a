//! Tests for the uniform contract every compiled validator follows.
//!
//! These run against the process-wide registry:
//! - Null and undefined always fail, for every rule
//! - Empty strings pass for rules that ignore them and reach the predicate otherwise
//! - Faults from misused rules come back as violations, never panics
//! - Results are stable across repeated calls

use rules_core::{RuleArg, TypeTag, Value, Violation};
use rules_validator::{RuleCatalog, registry};

/// Rules without the bypass whose predicate still accepts an empty string.
const EMPTY_STRING_OK: &[&str] = &["isString", "custom"];

#[test]
fn test_null_and_undefined_fail_every_rule() {
    for validator in registry() {
        for value in [Value::Null, Value::Undefined] {
            let violation = validator
                .validate(&value, &[])
                .unwrap_or_else(|| panic!("{} accepted {value}", validator.name()));
            assert!(violation.is_invalid_value(), "{}: {violation:?}", validator.name());
            assert_eq!(
                violation.message(),
                format!("Got invalid value `{value}`!"),
                "rule {}",
                validator.name()
            );
        }
    }
}

#[test]
fn test_null_guard_wins_over_arguments() {
    let min = registry().get("min").unwrap();
    assert!(min
        .validate(&Value::Null, &[5.into()])
        .is_some_and(|v| v.is_invalid_value()));

    let custom = registry().get("custom").unwrap();
    let always = RuleArg::predicate(|_| true);
    assert!(custom
        .validate(&Value::Undefined, &[always])
        .is_some_and(|v| v.is_invalid_value()));
}

#[test]
fn test_empty_string_bypassed_when_flagged() {
    let flagged: Vec<_> = registry()
        .iter()
        .filter(|v| v.ignores_empty_string())
        .collect();
    assert_eq!(flagged.len(), 13);

    for validator in flagged {
        // No arguments at all: the predicate would fault if it ran
        assert_eq!(
            validator.validate(&Value::from(""), &[]),
            None,
            "rule {}",
            validator.name()
        );
    }
}

#[test]
fn test_empty_string_follows_predicate_otherwise() {
    let registry = registry();
    assert_eq!(
        registry.validate("isNotEmptyString", &"".into(), &[]),
        Ok(Some(Violation::Rejected("Must not be an empty string.".to_string())))
    );
    assert_eq!(registry.validate("isString", &"".into(), &[]), Ok(None));
    assert!(registry
        .validate("isBoolean", &"".into(), &[])
        .unwrap()
        .is_some());
    assert!(registry
        .validate("isNumber", &"".into(), &[])
        .unwrap()
        .is_some());
    assert!(registry
        .validate("min", &"".into(), &[1.into()])
        .unwrap()
        .is_some_and(|v| v.is_fault()));

    for validator in registry.iter().filter(|v| !v.ignores_empty_string()) {
        let outcome = validator.validate(&"".into(), &[RuleArg::predicate(|_| true)]);
        assert_eq!(
            outcome.is_none(),
            EMPTY_STRING_OK.contains(&validator.name()),
            "rule {}: {outcome:?}",
            validator.name()
        );
    }
}

#[test]
fn test_faults_never_panic() {
    let registry = registry();
    let odd_args: Vec<Vec<RuleArg>> = vec![
        vec![],
        vec![RuleArg::from("x")],
        vec![RuleArg::from(Value::Null)],
        vec![RuleArg::predicate(|_| panic!("caller bug"))],
        vec![RuleArg::from(regex::Regex::new("^a").unwrap())],
    ];
    let odd_values = [
        Value::from(1),
        Value::from(2.5),
        Value::from(true),
        Value::from("abc"),
        Value::from(vec![1, 2]),
    ];

    for validator in registry {
        for value in &odd_values {
            for args in &odd_args {
                // Either outcome is fine; reaching the assertion means nothing escaped
                let outcome = validator.validate(value, args);
                if let Some(violation) = outcome {
                    assert!(!violation.message().is_empty(), "rule {}", validator.name());
                }
            }
        }
    }
}

#[test]
fn test_caller_predicate_panic_is_a_fault() {
    let custom = registry().get("custom").unwrap();
    let violation = custom
        .validate(&5.into(), &[RuleArg::predicate(|_| panic!("caller bug"))])
        .unwrap();
    assert_eq!(violation, Violation::Fault("caller bug".to_string()));
}

#[test]
fn test_idempotent_results() {
    let registry = registry();
    let cases: Vec<(&str, Value, Vec<RuleArg>)> = vec![
        ("min", 3.into(), vec![5.into()]),
        ("isEmail", "nope".into(), vec![]),
        ("isIn", "b".into(), vec![vec!["a", "b"].into()]),
        ("regex", "abc".into(), vec!["not-a-pattern".into()]),
        ("isNumber", Value::Null, vec![]),
    ];
    for (rule, value, args) in cases {
        let first = registry.validate(rule, &value, &args);
        let second = registry.validate(rule, &value, &args);
        assert_eq!(first, second, "rule {rule}");
    }
}

#[test]
fn test_expected_types_match_definitions() {
    let catalog = RuleCatalog::builtin();
    for (name, definition) in catalog.iter() {
        let validator = registry().get(name).unwrap();
        assert_eq!(validator.expected_types(), definition.expected_types(), "rule {name}");
    }

    let custom = registry().get("custom").unwrap();
    assert_eq!(custom.expected_types().len(), 5);
    let is_number = registry().get("isNumber").unwrap();
    assert!(!is_number.accepts(TypeTag::Number));
}
