//! Rule definitions and their building blocks.
//!
//! A [`RuleDefinition`] pairs a raw predicate with the metadata the compiler
//! needs: the failure message, the advisory expected types and the
//! empty-string policy.

use crate::{RuleFault, Value};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Semantic value categories a rule is designed for.
///
/// Advisory only: validators never enforce these tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    /// Arbitrary structured data
    Json,
    /// Opaque reference value
    Ref,
    /// String value
    String,
    /// Numeric value
    Number,
    /// Boolean value
    Boolean,
}

impl TypeTag {
    /// Returns the lowercase tag name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Json => "json",
            TypeTag::Ref => "ref",
            TypeTag::String => "string",
            TypeTag::Number => "number",
            TypeTag::Boolean => "boolean",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(TypeTag::Json),
            "ref" => Ok(TypeTag::Ref),
            "string" => Ok(TypeTag::String),
            "number" => Ok(TypeTag::Number),
            "boolean" => Ok(TypeTag::Boolean),
            other => Err(format!("Unknown type tag: {other}")),
        }
    }
}

/// Set of expected type tags attached to a rule.
pub type ExpectedTypes = BTreeSet<TypeTag>;

/// A caller-supplied predicate passed as an argument to the `custom` rule.
#[derive(Clone)]
pub struct CustomPredicate(Arc<dyn Fn(&Value) -> bool + Send + Sync>);

impl CustomPredicate {
    /// Wraps a closure as a custom predicate.
    pub fn new(f: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invokes the predicate on a value.
    pub fn call(&self, value: &Value) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for CustomPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomPredicate(..)")
    }
}

/// A single rule argument.
///
/// Rule arguments are passed as an ordered slice after the value under test.
#[derive(Debug, Clone)]
pub enum RuleArg {
    /// Plain value such as a bound, a version or an allowed set
    Value(Value),
    /// Compiled regular expression
    Pattern(Regex),
    /// Caller-supplied predicate
    Predicate(CustomPredicate),
}

impl RuleArg {
    /// Creates a predicate argument from a closure.
    pub fn predicate(f: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        RuleArg::Predicate(CustomPredicate::new(f))
    }

    /// Returns the plain value, if any.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            RuleArg::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the argument as a number, if it is one.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_value().and_then(Value::as_f64)
    }

    /// Returns the compiled pattern, if any.
    pub fn as_pattern(&self) -> Option<&Regex> {
        match self {
            RuleArg::Pattern(re) => Some(re),
            _ => None,
        }
    }

    /// Returns the custom predicate, if any.
    pub fn as_predicate(&self) -> Option<&CustomPredicate> {
        match self {
            RuleArg::Predicate(p) => Some(p),
            _ => None,
        }
    }

    /// Returns the type name of this argument.
    pub fn type_name(&self) -> &'static str {
        match self {
            RuleArg::Value(v) => v.type_name(),
            RuleArg::Pattern(_) => "regexp",
            RuleArg::Predicate(_) => "function",
        }
    }
}

impl fmt::Display for RuleArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleArg::Value(v) => write!(f, "{v}"),
            RuleArg::Pattern(re) => write!(f, "/{}/", re.as_str()),
            RuleArg::Predicate(_) => f.write_str("[function]"),
        }
    }
}

macro_rules! impl_rule_arg_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for RuleArg {
                fn from(value: $ty) -> Self {
                    RuleArg::Value(value.into())
                }
            }
        )*
    };
}

impl_rule_arg_from!(Value, bool, i32, i64, u32, f64, &str, String);

impl<T: Into<Value>> From<Vec<T>> for RuleArg {
    fn from(items: Vec<T>) -> Self {
        RuleArg::Value(items.into())
    }
}

impl From<Regex> for RuleArg {
    fn from(re: Regex) -> Self {
        RuleArg::Pattern(re)
    }
}

/// Raw rule logic: `Ok(passed)`, or a fault when it cannot evaluate its input.
pub type Predicate = Arc<dyn Fn(&Value, &[RuleArg]) -> Result<bool, RuleFault> + Send + Sync>;

/// Generator for a context-specific failure message.
pub type MessageFn = Arc<dyn Fn(&Value, &[RuleArg]) -> String + Send + Sync>;

/// Failure message of a rule.
#[derive(Clone)]
pub enum ErrorMessage {
    /// Fixed message
    Static(Cow<'static, str>),
    /// Message built from the value and the rule arguments
    Dynamic(MessageFn),
}

impl ErrorMessage {
    /// Creates a dynamic message from a closure.
    pub fn dynamic(f: impl Fn(&Value, &[RuleArg]) -> String + Send + Sync + 'static) -> Self {
        ErrorMessage::Dynamic(Arc::new(f))
    }

    /// Resolves the message for a failed value.
    pub fn resolve(&self, value: &Value, args: &[RuleArg]) -> String {
        match self {
            ErrorMessage::Static(message) => message.to_string(),
            ErrorMessage::Dynamic(f) => f(value, args),
        }
    }
}

impl fmt::Debug for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorMessage::Static(message) => f.debug_tuple("Static").field(message).finish(),
            ErrorMessage::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<&'static str> for ErrorMessage {
    fn from(message: &'static str) -> Self {
        ErrorMessage::Static(Cow::Borrowed(message))
    }
}

impl From<String> for ErrorMessage {
    fn from(message: String) -> Self {
        ErrorMessage::Static(Cow::Owned(message))
    }
}

/// A raw rule as stored in the catalog.
///
/// # Example
///
/// ```rust
/// use rules_core::{RuleDefinition, TypeTag, Value};
///
/// let rule = RuleDefinition::builder(|value: &Value, _args: &[rules_core::RuleArg]| {
///     Ok(value.as_str().is_some_and(|s| s.starts_with("ORD-")))
/// })
/// .message("Expected an order reference.")
/// .expected_types([TypeTag::Json, TypeTag::Ref, TypeTag::String])
/// .ignore_empty_string(true)
/// .build();
///
/// assert!(rule.ignore_empty_string());
/// ```
#[derive(Clone)]
pub struct RuleDefinition {
    pub(crate) predicate: Predicate,
    pub(crate) message: ErrorMessage,
    pub(crate) expected_types: ExpectedTypes,
    pub(crate) ignore_empty_string: bool,
}

impl RuleDefinition {
    /// Runs the raw predicate without any wrapping policy.
    pub fn evaluate(&self, value: &Value, args: &[RuleArg]) -> Result<bool, RuleFault> {
        (self.predicate)(value, args)
    }

    /// Returns the failure message.
    pub fn message(&self) -> &ErrorMessage {
        &self.message
    }

    /// Returns the advisory expected types.
    pub fn expected_types(&self) -> &ExpectedTypes {
        &self.expected_types
    }

    /// Whether an empty string is accepted without running the predicate.
    pub fn ignore_empty_string(&self) -> bool {
        self.ignore_empty_string
    }
}

impl fmt::Debug for RuleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDefinition")
            .field("message", &self.message)
            .field("expected_types", &self.expected_types)
            .field("ignore_empty_string", &self.ignore_empty_string)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tag_round_trip_names() {
        for tag in [
            TypeTag::Json,
            TypeTag::Ref,
            TypeTag::String,
            TypeTag::Number,
            TypeTag::Boolean,
        ] {
            assert_eq!(tag.as_str().parse::<TypeTag>(), Ok(tag));
        }
        assert!("date".parse::<TypeTag>().is_err());
    }

    #[test]
    fn test_type_tag_serde() {
        let json = serde_json::to_string(&TypeTag::Number).unwrap();
        assert_eq!(json, "\"number\"");
    }

    #[test]
    fn test_rule_arg_display() {
        assert_eq!(RuleArg::from(10).to_string(), "10");
        assert_eq!(RuleArg::from(Regex::new("^a").unwrap()).to_string(), "/^a/");
        assert_eq!(RuleArg::predicate(|_| true).to_string(), "[function]");
    }

    #[test]
    fn test_rule_arg_accessors() {
        assert_eq!(RuleArg::from(2.5).as_f64(), Some(2.5));
        assert!(RuleArg::from("x").as_f64().is_none());
        assert!(RuleArg::from(Regex::new("x").unwrap()).as_pattern().is_some());
        let p = RuleArg::predicate(|v| v.as_i64() == Some(1));
        assert!(p.as_predicate().is_some_and(|f| f.call(&Value::from(1))));
        assert_eq!(p.type_name(), "function");
    }

    #[test]
    fn test_error_message_resolution() {
        let fixed = ErrorMessage::from("Needs a value.");
        assert_eq!(fixed.resolve(&Value::Null, &[]), "Needs a value.");

        let dynamic = ErrorMessage::dynamic(|value, args| {
            format!("{value} vs {}", args[0])
        });
        assert_eq!(dynamic.resolve(&Value::from(3), &[5.into()]), "3 vs 5");
    }
}
