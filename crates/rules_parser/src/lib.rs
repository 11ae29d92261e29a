//! Parser for check suites (YAML/TOML/JSON formats).
//!
//! This module loads suite files into the strongly-typed `Suite` structure.
//! Patterns are compiled while loading, so a suite that parses is ready to run.
//!
//! # Example
//!
//! ```rust
//! use rules_parser::parse_yaml;
//!
//! let yaml = r#"
//! name: signup_form
//! description: Checks for the signup form
//! checks:
//!   - rule: isEmail
//!     value: ada@example.com
//!     expect: pass
//!   - rule: min
//!     value: 3
//!     args: [5]
//!     expect: fail
//! "#;
//!
//! let suite = parse_yaml(yaml).expect("Failed to parse suite");
//! assert_eq!(suite.name, "signup_form");
//! assert_eq!(suite.checks.len(), 2);
//! ```

use regex::Regex;
use rules_core::Suite;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during suite parsing.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// A check carries a pattern that does not compile
    #[error("Invalid pattern for rule '{rule}': {error}")]
    InvalidPattern { rule: String, error: String },
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported suite file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

/// Parse a suite from a YAML string.
///
/// A check whose `value` key is missing tests an undefined value, while
/// `value: null` (or `~`) tests null.
pub fn parse_yaml(content: &str) -> Result<Suite> {
    let suite: Suite = serde_yaml_ng::from_str(content)?;
    check_patterns(suite)
}

/// Parse a suite from a TOML string.
///
/// TOML has no null, so a check without `value` always tests undefined.
///
/// # Example
///
/// ```rust
/// use rules_parser::parse_toml;
///
/// let toml = r#"
/// name = "ids"
///
/// [[checks]]
/// rule = "isUUID"
/// value = "3b241101-e2bb-4255-8caf-4136c566a962"
/// args = [4]
/// expect = "pass"
/// "#;
///
/// let suite = parse_toml(toml).unwrap();
/// assert_eq!(suite.checks[0].rule, "isUUID");
/// ```
pub fn parse_toml(content: &str) -> Result<Suite> {
    let suite: Suite = toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    check_patterns(suite)
}

/// Parse a suite from a JSON string.
pub fn parse_json(content: &str) -> Result<Suite> {
    let suite: Suite = serde_json::from_str(content)?;
    check_patterns(suite)
}

fn check_patterns(suite: Suite) -> Result<Suite> {
    for check in &suite.checks {
        if let Some(pattern) = &check.pattern {
            Regex::new(pattern).map_err(|e| ParserError::InvalidPattern {
                rule: check.rule.clone(),
                error: e.to_string(),
            })?;
        }
    }
    Ok(suite)
}

/// Detect the suite format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `SuiteFormat::Yaml`
/// * `.toml` → `SuiteFormat::Toml`
/// * `.json` → `SuiteFormat::Json`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<SuiteFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(SuiteFormat::Yaml),
        "toml" => Ok(SuiteFormat::Toml),
        "json" => Ok(SuiteFormat::Json),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a suite from a file with automatic format detection.
///
/// # Example
///
/// ```no_run
/// use rules_parser::parse_file;
/// use std::path::Path;
///
/// let suite = parse_file(Path::new("suites/signup.yml")).unwrap();
/// println!("Loaded suite: {}", suite.name);
/// ```
pub fn parse_file(path: &Path) -> Result<Suite> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        SuiteFormat::Yaml => parse_yaml(&content),
        SuiteFormat::Toml => parse_toml(&content),
        SuiteFormat::Json => parse_json(&content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rules_core::{Expectation, Value};

    #[test]
    fn test_parse_yaml_minimal() {
        let suite = parse_yaml("name: empty\n").expect("Failed to parse valid YAML");

        assert_eq!(suite.name, "empty");
        assert_eq!(suite.description, None);
        assert!(suite.checks.is_empty());
    }

    #[test]
    fn test_parse_yaml_checks() {
        let yaml = r#"
name: profile
description: Profile form
checks:
  - rule: isIn
    value: b
    args:
      - [a, b, c]
    expect: pass
    description: Known option
  - rule: regex
    value: abc
    pattern: ^a
  - rule: isString
    value: ~
    expect: fail
  - rule: isString
    expect: fail
"#;

        let suite = parse_yaml(yaml).expect("Failed to parse YAML with checks");
        assert_eq!(suite.description.as_deref(), Some("Profile form"));
        assert_eq!(suite.checks.len(), 4);

        let is_in = &suite.checks[0];
        assert_eq!(is_in.rule, "isIn");
        assert_eq!(is_in.expect, Expectation::Pass);
        assert_eq!(is_in.args, vec![serde_json::json!(["a", "b", "c"])]);
        assert_eq!(is_in.description.as_deref(), Some("Known option"));

        let regex = &suite.checks[1];
        assert_eq!(regex.pattern.as_deref(), Some("^a"));
        assert_eq!(regex.expect, Expectation::Any);
        assert_eq!(regex.rule_args().unwrap().len(), 1);

        assert_eq!(suite.checks[2].value(), Value::Null);
        assert_eq!(suite.checks[3].value(), Value::Undefined);
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse_yaml("name: [unclosed\n");
        assert!(matches!(result.unwrap_err(), ParserError::YamlError(_)));
    }

    #[test]
    fn test_parse_yaml_missing_rule() {
        let yaml = r#"
name: broken
checks:
  - value: 1
"#;
        assert!(parse_yaml(yaml).is_err());
    }

    #[test]
    fn test_parse_yaml_unknown_expectation() {
        let yaml = r#"
name: broken
checks:
  - rule: isString
    value: x
    expect: maybe
"#;
        assert!(matches!(parse_yaml(yaml).unwrap_err(), ParserError::YamlError(_)));
    }

    #[test]
    fn test_invalid_pattern_rejected_on_load() {
        let yaml = r#"
name: patterns
checks:
  - rule: regex
    value: abc
    pattern: "("
"#;
        let err = parse_yaml(yaml).unwrap_err();
        match err {
            ParserError::InvalidPattern { rule, .. } => assert_eq!(rule, "regex"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_toml_checks() {
        let toml = r#"
name = "numbers"

[[checks]]
rule = "min"
value = 10
args = [5]
expect = "pass"

[[checks]]
rule = "max"
value = 12.5
args = [10]
expect = "fail"
"#;

        let suite = parse_toml(toml).expect("Failed to parse TOML with checks");
        assert_eq!(suite.checks.len(), 2);
        assert_eq!(suite.checks[0].value(), Value::Int(10));
        assert_eq!(suite.checks[1].value(), Value::Float(12.5));
        assert_eq!(suite.checks[1].expect, Expectation::Fail);
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_toml("name = \"x\"\n[[[invalid syntax\n");
        assert!(matches!(result.unwrap_err(), ParserError::TomlError(_)));
    }

    #[test]
    fn test_parse_json_checks() {
        let json = r#"{
            "name": "json_suite",
            "checks": [
                {"rule": "isBoolean", "value": true, "expect": "pass"},
                {"rule": "isBoolean", "value": null, "expect": "fail"}
            ]
        }"#;

        let suite = parse_json(json).expect("Failed to parse JSON suite");
        assert_eq!(suite.checks[0].value(), Value::Bool(true));
        assert_eq!(suite.checks[1].value(), Value::Null);
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_json("{\"name\": ");
        assert!(matches!(result.unwrap_err(), ParserError::JsonError(_)));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(Path::new("suite.yaml")).unwrap(), SuiteFormat::Yaml);
        assert_eq!(detect_format(Path::new("suite.YML")).unwrap(), SuiteFormat::Yaml);
        assert_eq!(detect_format(Path::new("suite.toml")).unwrap(), SuiteFormat::Toml);
        assert_eq!(detect_format(Path::new("suite.json")).unwrap(), SuiteFormat::Json);
    }

    #[test]
    fn test_detect_format_unsupported() {
        let result = detect_format(Path::new("suite.xml"));
        assert!(matches!(
            result.unwrap_err(),
            ParserError::UnsupportedFormat(ext) if ext == "xml"
        ));
    }

    #[test]
    fn test_detect_format_no_extension() {
        let result = detect_format(Path::new("suite"));
        assert!(matches!(result.unwrap_err(), ParserError::InvalidExtension));
    }

    #[test]
    fn test_parse_file_missing() {
        let result = parse_file(Path::new("does/not/exist.yml"));
        assert!(matches!(result.unwrap_err(), ParserError::IoError(_)));
    }
}
