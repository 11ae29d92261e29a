//! The rule compiler.
//!
//! Wraps every raw rule definition in the same validation contract:
//!
//! 1. Null and undefined values always fail, whatever the rule.
//! 2. Empty strings pass untouched when the rule ignores them.
//! 3. The predicate runs inside a failure boundary; faults and panics become
//!    violations carrying their message.
//! 4. A passing predicate yields no violation; a failing one yields the rule's
//!    static or generated message.

use crate::{RuleCatalog, ValidatorRegistry};
use rules_core::{
    DEFAULT_MESSAGE, ExpectedTypes, RuleArg, RuleDefinition, RuleFault, TypeTag, Value, Violation,
};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// A rule wrapped in the uniform validation contract.
///
/// Cloning is cheap; clones share the underlying definition.
///
/// # Example
///
/// ```rust
/// use rules_validator::registry;
///
/// let min = registry().get("min").unwrap();
/// assert_eq!(min.validate(&10.into(), &[5.into()]), None);
///
/// let violation = min.validate(&3.into(), &[5.into()]).unwrap();
/// assert_eq!(violation.message(), "Value 3 is below the allowed minimum (5)");
/// ```
#[derive(Debug, Clone)]
pub struct CompiledValidator {
    name: Arc<str>,
    rule: Arc<RuleDefinition>,
}

impl CompiledValidator {
    /// Returns the rule name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the advisory expected types, exactly as declared by the rule.
    pub fn expected_types(&self) -> &ExpectedTypes {
        self.rule.expected_types()
    }

    /// Returns true if the rule declares `tag` among its expected types.
    ///
    /// This is informational only; `validate` never consults it.
    pub fn accepts(&self, tag: TypeTag) -> bool {
        self.expected_types().contains(&tag)
    }

    /// Returns true if empty strings bypass the predicate.
    pub fn ignores_empty_string(&self) -> bool {
        self.rule.ignore_empty_string()
    }

    /// Validates a value.
    ///
    /// Returns `None` when the value passes, or the violation describing why
    /// it does not. A failure message that resolves to an empty string is
    /// replaced by [`DEFAULT_MESSAGE`].
    ///
    /// # Panics
    ///
    /// Panics raised by the predicate or a dynamic message are caught and
    /// reported as `Violation::Fault`. The process panic hook still runs, so
    /// the default hook prints each caught panic to stderr. Under
    /// `panic = "abort"` nothing is caught and such a panic aborts the process.
    pub fn validate(&self, value: &Value, args: &[RuleArg]) -> Option<Violation> {
        if value.is_null() {
            return Some(Violation::invalid_value(value));
        }

        if value.is_empty_string() && self.rule.ignore_empty_string() {
            return None;
        }

        let outcome = guarded(|| self.rule.evaluate(value, args)).and_then(|passed| {
            if passed {
                Ok(None)
            } else {
                guarded(|| Ok(Some(self.rule.message().resolve(value, args))))
            }
        });

        match outcome {
            Ok(None) => None,
            Ok(Some(message)) if message.is_empty() => {
                Some(Violation::Rejected(DEFAULT_MESSAGE.to_string()))
            }
            Ok(Some(message)) => Some(Violation::Rejected(message)),
            Err(fault) => {
                debug!(rule = %self.name, %fault, "Rule raised a fault");
                Some(Violation::from(fault))
            }
        }
    }

    /// Validates a value, returning the violation as an error.
    pub fn check(&self, value: &Value, args: &[RuleArg]) -> Result<(), Violation> {
        match self.validate(value, args) {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }
}

/// Runs rule code, turning a panic into a fault.
fn guarded<T>(f: impl FnOnce() -> Result<T, RuleFault>) -> Result<T, RuleFault> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(RuleFault::new(panic_message(&*payload))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Rule panicked".to_string()
    }
}

/// Compiles rule catalogs into validator registries.
///
/// # Example
///
/// ```rust
/// use rules_core::{RuleDefinition, Value};
/// use rules_validator::{RuleCatalog, RuleCompiler};
///
/// let catalog = RuleCatalog::builtin()
///     .with_rule(
///         "isShort",
///         RuleDefinition::builder(|value, _| Ok(value.as_str().is_some_and(|s| s.len() < 4)))
///             .message("Too long.")
///             .build(),
///     )
///     .unwrap();
///
/// let registry = RuleCompiler::new().compile(catalog);
/// let is_short = registry.get("isShort").unwrap();
/// assert_eq!(is_short.validate(&Value::from("abc"), &[]), None);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleCompiler;

impl RuleCompiler {
    /// Creates a new compiler.
    pub fn new() -> Self {
        Self
    }

    /// Compiles every rule in the catalog.
    pub fn compile(&self, catalog: RuleCatalog) -> ValidatorRegistry {
        let start = Instant::now();
        let validators: Vec<CompiledValidator> = catalog
            .into_iter()
            .map(|(name, rule)| self.compile_rule(name, rule))
            .collect();

        info!(
            "Compiled {} rules in {}µs",
            validators.len(),
            start.elapsed().as_micros()
        );

        ValidatorRegistry::from_validators(validators)
    }

    /// Compiles a single rule.
    pub fn compile_rule(&self, name: impl Into<String>, rule: RuleDefinition) -> CompiledValidator {
        let name: Arc<str> = Arc::from(name.into());
        debug!(
            rule = %name,
            ignore_empty_string = rule.ignore_empty_string(),
            "Compiling rule"
        );
        CompiledValidator {
            name,
            rule: Arc::new(rule),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rules_core::RuleBuilder;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn compile(rule: RuleDefinition) -> CompiledValidator {
        RuleCompiler::new().compile_rule("test", rule)
    }

    #[test]
    fn test_null_guard_precedes_predicate() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let validator = compile(
            RuleBuilder::new(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(true)
            })
            .build(),
        );

        assert_eq!(
            validator.validate(&Value::Null, &[]),
            Some(Violation::InvalidValue {
                value: "null".to_string()
            })
        );
        assert_eq!(
            validator.validate(&Value::Undefined, &[]),
            Some(Violation::InvalidValue {
                value: "undefined".to_string()
            })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_string_bypass_skips_predicate() {
        let validator = compile(
            RuleBuilder::new(|_, _| panic!("predicate must not run"))
                .ignore_empty_string(true)
                .build(),
        );
        assert_eq!(validator.validate(&Value::from(""), &[]), None);
    }

    #[test]
    fn test_empty_string_reaches_predicate_without_flag() {
        let validator = compile(
            RuleBuilder::new(|value, _| Ok(!value.is_empty_string()))
                .message("empty")
                .build(),
        );
        assert_eq!(
            validator.validate(&Value::from(""), &[]),
            Some(Violation::Rejected("empty".to_string()))
        );
    }

    #[test]
    fn test_fault_becomes_violation() {
        let validator = compile(
            RuleBuilder::new(|value, _| Err(RuleFault::expected_number(value))).build(),
        );
        let violation = validator.validate(&Value::from("x"), &[]).unwrap();
        assert!(violation.is_fault());
        assert_eq!(violation.message(), "Expected a number but received a string.");
    }

    #[test]
    fn test_panic_becomes_violation() {
        let validator = compile(RuleBuilder::new(|_, _| panic!("boom")).build());
        let violation = validator.validate(&Value::from(1), &[]).unwrap();
        assert_eq!(violation, Violation::Fault("boom".to_string()));
    }

    #[test]
    fn test_panicking_message_becomes_violation() {
        let validator = compile(
            RuleBuilder::new(|_, _| Ok(false))
                .dynamic_message(|_, args| format!("bound {}", args[0]))
                .build(),
        );
        let violation = validator.validate(&Value::from(1), &[]).unwrap();
        assert!(violation.is_fault());
    }

    #[test]
    fn test_dynamic_message_sees_value_and_args() {
        let validator = compile(
            RuleBuilder::new(|_, _| Ok(false))
                .dynamic_message(|value, args| format!("{value} / {}", args[0]))
                .build(),
        );
        assert_eq!(
            validator.validate(&Value::from(7), &[3.into()]),
            Some(Violation::Rejected("7 / 3".to_string()))
        );
    }

    #[test]
    fn test_empty_message_falls_back_to_default() {
        let static_empty = compile(RuleBuilder::new(|_, _| Ok(false)).message("").build());
        assert_eq!(
            static_empty.validate(&Value::from(1), &[]),
            Some(Violation::Rejected(DEFAULT_MESSAGE.to_string()))
        );

        let dynamic_empty = compile(
            RuleBuilder::new(|_, _| Ok(false))
                .dynamic_message(|_, _| String::new())
                .build(),
        );
        assert_eq!(
            dynamic_empty.validate(&Value::from(1), &[]).map(|v| v.message()),
            Some("Validation failed.".to_string())
        );
    }

    #[test]
    fn test_check_maps_to_result() {
        let validator = compile(RuleBuilder::new(|_, _| Ok(true)).build());
        assert_eq!(validator.check(&Value::from(1), &[]), Ok(()));
        assert!(validator.check(&Value::Null, &[]).is_err());
    }

    #[test]
    fn test_metadata_copied_verbatim() {
        let validator = compile(
            RuleBuilder::new(|_, _| Ok(true))
                .expected_types([TypeTag::Boolean, TypeTag::Number])
                .build(),
        );
        assert_eq!(
            validator.expected_types(),
            &ExpectedTypes::from([TypeTag::Boolean, TypeTag::Number])
        );
        assert!(validator.accepts(TypeTag::Number));
        assert!(!validator.accepts(TypeTag::String));
        assert_eq!(validator.name(), "test");
    }
}
