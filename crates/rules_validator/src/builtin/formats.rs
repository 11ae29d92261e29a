//! String format checks backed by the `validator` crate.

use super::{require_str, tags};
use regex::Regex;
use rules_core::{RuleArg, RuleDefinition, RuleFault, TypeTag, Value};
use std::sync::LazyLock;
use url::{Host, Url};
use validator::{ValidateCreditCard, ValidateEmail, ValidateIp};

const DEFAULT_URL_PROTOCOLS: [&str; 3] = ["http", "https", "ftp"];

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#?(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("hex color pattern compiles")
});

static UUID_ANY: LazyLock<Regex> = LazyLock::new(|| uuid_pattern("[0-9a-fA-F]", "[0-9a-fA-F]"));
static UUID_V3: LazyLock<Regex> = LazyLock::new(|| uuid_pattern("3", "[0-9a-fA-F]"));
static UUID_V4: LazyLock<Regex> = LazyLock::new(|| uuid_pattern("4", "[89abAB]"));
static UUID_V5: LazyLock<Regex> = LazyLock::new(|| uuid_pattern("5", "[89abAB]"));

fn uuid_pattern(version: &str, variant: &str) -> Regex {
    Regex::new(&format!(
        "^[0-9a-fA-F]{{8}}-[0-9a-fA-F]{{4}}-{version}[0-9a-fA-F]{{3}}-{variant}[0-9a-fA-F]{{3}}-[0-9a-fA-F]{{12}}$"
    ))
    .expect("uuid pattern compiles")
}

pub(super) fn rules() -> Vec<(&'static str, RuleDefinition)> {
    let string_tags = tags(&[TypeTag::String]);
    vec![
        (
            "isCreditCard",
            RuleDefinition::builder(|value, _| {
                let sanitized: String = require_str(value)?
                    .chars()
                    .filter(|c| !matches!(c, ' ' | '-'))
                    .collect();
                Ok(sanitized.validate_credit_card())
            })
            .message("Expected a valid credit card number.")
            .expected_types(string_tags.clone())
            .ignore_empty_string(true)
            .build(),
        ),
        (
            "isEmail",
            RuleDefinition::builder(|value, _| Ok(require_str(value)?.validate_email()))
                .message("Expected a valid email address.")
                .expected_types(string_tags.clone())
                .ignore_empty_string(true)
                .build(),
        ),
        (
            "isHexColor",
            RuleDefinition::builder(|value, _| Ok(HEX_COLOR.is_match(require_str(value)?)))
                .message("Expected a valid hexadecimal color.")
                .expected_types(string_tags.clone())
                .ignore_empty_string(true)
                .build(),
        ),
        (
            "isIP",
            RuleDefinition::builder(|value, args| {
                let s = require_str(value)?;
                Ok(match version_arg(args).as_deref() {
                    None => s.validate_ip(),
                    Some("4") => s.validate_ipv4(),
                    Some("6") => s.validate_ipv6(),
                    Some(_) => false,
                })
            })
            .message("Expected a valid IP address.")
            .expected_types(string_tags.clone())
            .ignore_empty_string(true)
            .build(),
        ),
        (
            "isURL",
            RuleDefinition::builder(|value, args| {
                let s = require_str(value)?;
                Ok(UrlOptions::from_args(args)?.matches(s))
            })
            .message("Expected a valid URL.")
            .expected_types(string_tags.clone())
            .ignore_empty_string(true)
            .build(),
        ),
        (
            "isUUID",
            RuleDefinition::builder(|value, args| {
                let s = require_str(value)?;
                let pattern: &Regex = match version_arg(args).as_deref() {
                    None | Some("all") => &UUID_ANY,
                    Some("3") => &UUID_V3,
                    Some("4") => &UUID_V4,
                    Some("5") => &UUID_V5,
                    Some(_) => return Ok(false),
                };
                Ok(pattern.is_match(s))
            })
            .message("Expected a valid UUID.")
            .expected_types(string_tags)
            .ignore_empty_string(true)
            .build(),
        ),
    ]
}

/// Options accepted by `isURL`.
///
/// `true`, null or a missing argument select the defaults: http, https and
/// ftp schemes with a top-level domain required.
#[derive(Debug, Clone, PartialEq)]
struct UrlOptions {
    protocols: Vec<String>,
    require_tld: bool,
}

impl Default for UrlOptions {
    fn default() -> Self {
        Self {
            protocols: DEFAULT_URL_PROTOCOLS.iter().map(|p| p.to_string()).collect(),
            require_tld: true,
        }
    }
}

impl UrlOptions {
    fn from_args(args: &[RuleArg]) -> Result<Self, RuleFault> {
        let mut options = Self::default();
        let Some(Value::Map(map)) = args.first().and_then(RuleArg::as_value) else {
            return Ok(options);
        };

        if let Some(protocols) = map.get("protocols") {
            let invalid = || {
                RuleFault::invalid_argument(
                    "isURL",
                    "`protocols` to be a list of strings",
                    format_args!("{} `{protocols}`", protocols.type_name()),
                )
            };
            options.protocols = protocols
                .as_list()
                .ok_or_else(invalid)?
                .iter()
                .map(|p| p.as_str().map(str::to_lowercase).ok_or_else(invalid))
                .collect::<Result<_, _>>()?;
        }

        match map.get("require_tld") {
            None => {}
            Some(Value::Bool(b)) => options.require_tld = *b,
            Some(other) => {
                return Err(RuleFault::invalid_argument(
                    "isURL",
                    "`require_tld` to be a boolean",
                    format_args!("{} `{other}`", other.type_name()),
                ));
            }
        }

        Ok(options)
    }

    fn matches(&self, input: &str) -> bool {
        let Ok(url) = Url::parse(input) else {
            return false;
        };
        if !self.protocols.iter().any(|p| p == url.scheme()) {
            return false;
        }
        match url.host() {
            Some(Host::Domain(domain)) => !self.require_tld || has_tld(domain),
            Some(Host::Ipv4(_) | Host::Ipv6(_)) => true,
            None => false,
        }
    }
}

/// True if the last label of `domain` looks like a top-level domain.
fn has_tld(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    match domain.rsplit_once('.') {
        Some((rest, tld)) if !rest.is_empty() => {
            tld.starts_with("xn--")
                || (tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic))
        }
        _ => false,
    }
}

/// Reads an optional version argument given as a number or a string.
fn version_arg(args: &[RuleArg]) -> Option<String> {
    match args.first()?.as_value()? {
        Value::Undefined | Value::Null => None,
        Value::Int(i) => Some(i.to_string()),
        Value::String(s) => Some(s.to_lowercase()),
        other => Some(other.to_string()),
    }
}
