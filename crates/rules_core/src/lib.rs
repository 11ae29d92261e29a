//! # Rules Core
//!
//! Core data structures for the rule-wrapping validation engine.
//!
//! A rule is a raw predicate plus the metadata needed to turn it into a
//! uniform validator. This crate defines those building blocks; compiling
//! rules into validators lives in `rules_validator`.
//!
//! ## Key Concepts
//!
//! - **Value**: The tagged value handed to every rule
//! - **RuleDefinition**: Predicate, failure message, expected types and empty-string policy
//! - **RuleArg**: Rule-specific arguments (bounds, allowed sets, patterns, predicates)
//! - **Violation**: The single failure channel of a compiled validator
//! - **Suite**: A configured list of checks, and the report produced by running it
//!
//! ## Example
//!
//! ```rust
//! use rules_core::{RuleBuilder, RuleFault, TypeTag, Value};
//!
//! let even = RuleBuilder::new(|value, _args| match value {
//!     Value::Int(i) => Ok(i % 2 == 0),
//!     other => Err(RuleFault::expected_number(other)),
//! })
//! .message("Expected an even number.")
//! .expected_types([TypeTag::Json, TypeTag::Ref, TypeTag::Number])
//! .build();
//!
//! assert_eq!(even.evaluate(&Value::from(4), &[]), Ok(true));
//! ```

pub mod builder;
pub mod error;
pub mod report;
pub mod rule;
pub mod suite;
pub mod value;

pub use builder::*;
pub use error::*;
pub use report::*;
pub use rule::*;
pub use suite::*;
pub use value::*;
