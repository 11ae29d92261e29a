//! The rule catalog.
//!
//! Holds raw rule definitions keyed by name, in registration order, until the
//! compiler turns them into validators.

use crate::builtin;
use rules_core::{CatalogError, RuleDefinition};

/// Ordered collection of named rule definitions.
///
/// # Example
///
/// ```rust
/// use rules_core::RuleDefinition;
/// use rules_validator::RuleCatalog;
///
/// let mut catalog = RuleCatalog::builtin();
/// catalog
///     .register(
///         "isPositive",
///         RuleDefinition::builder(|value, _| Ok(value.as_f64().is_some_and(|n| n > 0.0)))
///             .message("Expected a positive number.")
///             .build(),
///     )
///     .unwrap();
///
/// assert!(catalog.contains("isPositive"));
/// assert!(catalog.contains("isEmail"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct RuleCatalog {
    rules: Vec<(String, RuleDefinition)>,
}

impl RuleCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding every built-in rule.
    pub fn builtin() -> Self {
        Self {
            rules: builtin::rules()
                .into_iter()
                .map(|(name, rule)| (name.to_string(), rule))
                .collect(),
        }
    }

    /// Registers an additional rule.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyName` for an empty name and
    /// `CatalogError::DuplicateRule` if the name is already taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        rule: RuleDefinition,
    ) -> Result<&mut Self, CatalogError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self.contains(&name) {
            return Err(CatalogError::DuplicateRule(name));
        }
        self.rules.push((name, rule));
        Ok(self)
    }

    /// Registers an additional rule, consuming and returning the catalog.
    pub fn with_rule(
        mut self,
        name: impl Into<String>,
        rule: RuleDefinition,
    ) -> Result<Self, CatalogError> {
        self.register(name, rule)?;
        Ok(self)
    }

    /// Returns the definition registered under `name`.
    pub fn get(&self, name: &str) -> Option<&RuleDefinition> {
        self.rules
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, rule)| rule)
    }

    /// Returns true if a rule named `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the rule names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(name, _)| name.as_str())
    }

    /// Returns an iterator over the rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleDefinition)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }
}

impl IntoIterator for RuleCatalog {
    type Item = (String, RuleDefinition);
    type IntoIter = std::vec::IntoIter<(String, RuleDefinition)>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rules_core::{RuleBuilder, TypeTag};

    fn always() -> RuleDefinition {
        RuleBuilder::new(|_, _| Ok(true)).build()
    }

    #[test]
    fn test_builtin_catalog_order() {
        let catalog = RuleCatalog::builtin();
        let names: Vec<_> = catalog.names().collect();
        assert_eq!(
            names,
            vec![
                "isBoolean",
                "isNotEmptyString",
                "isInteger",
                "isNumber",
                "isString",
                "max",
                "min",
                "isAfter",
                "isBefore",
                "isCreditCard",
                "isEmail",
                "isHexColor",
                "isIP",
                "isURL",
                "isUUID",
                "isIn",
                "isNotIn",
                "minLength",
                "maxLength",
                "regex",
                "custom",
            ]
        );
    }

    #[test]
    fn test_register_extends_catalog() {
        let mut catalog = RuleCatalog::new();
        assert!(catalog.is_empty());

        catalog.register("a", always()).unwrap().register("b", always()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut catalog = RuleCatalog::builtin();
        let err = catalog.register("isEmail", always()).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateRule("isEmail".to_string()));
        assert_eq!(catalog.len(), 21);
    }

    #[test]
    fn test_register_rejects_empty_name() {
        let err = RuleCatalog::new().with_rule("", always()).unwrap_err();
        assert_eq!(err, CatalogError::EmptyName);
    }

    #[test]
    fn test_get_returns_definition() {
        let catalog = RuleCatalog::builtin();
        let rule = catalog.get("isUUID").unwrap();
        assert!(rule.ignore_empty_string());
        assert!(rule.expected_types().contains(&TypeTag::String));
        assert!(catalog.get("isFoo").is_none());
    }
}
