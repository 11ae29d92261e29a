//! The validator registry.
//!
//! An immutable map from rule name to compiled validator, plus the
//! process-wide registry compiled from the built-in catalog.

use crate::{CompiledValidator, RuleCatalog, RuleCompiler};
use rules_core::{RuleArg, UnknownRule, Value, Violation};
use std::collections::HashMap;
use std::sync::LazyLock;

static REGISTRY: LazyLock<ValidatorRegistry> =
    LazyLock::new(|| RuleCompiler::new().compile(RuleCatalog::builtin()));

/// Returns the process-wide registry of built-in validators.
///
/// The registry is compiled on first use and never changes afterwards, so it
/// can be shared freely across threads.
///
/// # Example
///
/// ```rust
/// use rules_validator::registry;
///
/// let is_in = registry().get("isIn").unwrap();
/// assert_eq!(is_in.validate(&"b".into(), &[vec!["a", "b", "c"].into()]), None);
/// ```
pub fn registry() -> &'static ValidatorRegistry {
    &REGISTRY
}

/// Immutable mapping from rule name to compiled validator.
///
/// Iteration follows the order of the catalog the registry was compiled from.
#[derive(Debug, Clone)]
pub struct ValidatorRegistry {
    validators: Vec<CompiledValidator>,
    index: HashMap<String, usize>,
}

impl ValidatorRegistry {
    /// Builds a registry from validators with unique names.
    pub(crate) fn from_validators(validators: Vec<CompiledValidator>) -> Self {
        let index = validators
            .iter()
            .enumerate()
            .map(|(i, v)| (v.name().to_string(), i))
            .collect();
        Self { validators, index }
    }

    /// Returns the validator for `name`.
    pub fn get(&self, name: &str) -> Option<&CompiledValidator> {
        self.index.get(name).map(|&i| &self.validators[i])
    }

    /// Returns true if a validator named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the number of validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Returns true if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Returns the rule names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.validators.iter().map(CompiledValidator::name)
    }

    /// Returns an iterator over the validators in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &CompiledValidator> {
        self.validators.iter()
    }

    /// Looks up `name` and validates a value with it.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRule` if no validator is registered under `name`.
    pub fn validate(
        &self,
        name: &str,
        value: &Value,
        args: &[RuleArg],
    ) -> Result<Option<Violation>, UnknownRule> {
        let validator = self
            .get(name)
            .ok_or_else(|| UnknownRule(name.to_string()))?;
        Ok(validator.validate(value, args))
    }
}

impl<'a> IntoIterator for &'a ValidatorRegistry {
    type Item = &'a CompiledValidator;
    type IntoIter = std::slice::Iter<'a, CompiledValidator>;

    fn into_iter(self) -> Self::IntoIter {
        self.validators.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rules_core::RuleBuilder;

    #[test]
    fn test_global_registry_has_all_builtins() {
        let registry = registry();
        assert_eq!(registry.len(), RuleCatalog::builtin().len());
        assert!(registry.names().eq(RuleCatalog::builtin().names()));
    }

    #[test]
    fn test_global_registry_is_shared() {
        assert!(std::ptr::eq(registry(), registry()));
    }

    #[test]
    fn test_validate_by_name() {
        let registry = registry();
        assert_eq!(registry.validate("isString", &Value::from("x"), &[]), Ok(None));
        assert!(matches!(
            registry.validate("isString", &Value::from(1), &[]),
            Ok(Some(Violation::Rejected(_)))
        ));
        assert_eq!(
            registry.validate("isFoo", &Value::from(1), &[]),
            Err(UnknownRule("isFoo".to_string()))
        );
    }

    #[test]
    fn test_custom_registry_lookup() {
        let catalog = RuleCatalog::new()
            .with_rule("yes", RuleBuilder::new(|_, _| Ok(true)).build())
            .unwrap();
        let registry = RuleCompiler::new().compile(catalog);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("yes"));
        assert!(!registry.contains("isEmail"));
        assert_eq!(registry.iter().count(), 1);
    }

    #[test]
    fn test_registry_shared_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    registry()
                        .get("min")
                        .and_then(|min| min.validate(&Value::from(i), &[2.into()]))
                        .is_none()
                })
            })
            .collect();
        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![false, false, true, true]);
    }
}
