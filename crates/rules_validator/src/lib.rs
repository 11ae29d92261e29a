//! # Rules Validator
//!
//! Compiles rule catalogs into uniform validators. This crate provides:
//!
//! - The built-in rule catalog (type checks, bounds, formats, membership,
//!   patterns and custom predicates)
//! - The compiler that wraps each rule in one calling and failure contract
//! - The immutable validator registry and the process-wide built-in registry
//! - A runner for configured check suites
//!
//! ## Example
//!
//! ```rust
//! use rules_core::{RuleArg, Value};
//! use rules_validator::registry;
//!
//! let validators = registry();
//!
//! // Passing values produce no violation
//! assert!(validators.get("isEmail").unwrap().validate(&"ada@example.com".into(), &[]).is_none());
//!
//! // Null never passes, whatever the rule
//! let violation = validators.get("isString").unwrap().validate(&Value::Null, &[]).unwrap();
//! assert_eq!(violation.message(), "Got invalid value `null`!");
//!
//! // Misused rules report instead of panicking
//! let violation = validators
//!     .get("regex")
//!     .unwrap()
//!     .validate(&"abc".into(), &[RuleArg::from("not-a-pattern")])
//!     .unwrap();
//! assert!(violation.is_fault());
//! ```

mod builtin;
mod catalog;
mod compiler;
mod registry;
mod suite;

pub use catalog::*;
pub use compiler::*;
pub use registry::*;
pub use suite::*;
