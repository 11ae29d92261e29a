use anyhow::Result;
use colored::*;
use rules_core::{Expectation, SuiteReport, Value, Violation};
use rules_validator::ValidatorRegistry;
use serde_json::json;

pub fn print_suite_report(report: &SuiteReport, format: &str) -> Result<()> {
    match format {
        "json" => print_json(&serde_json::to_value(report)?),
        _ => {
            print_text_report(report);
            Ok(())
        }
    }
}

fn print_text_report(report: &SuiteReport) {
    println!("\n{}", "═".repeat(60));
    println!("  {} {}", "SUITE REPORT:".bold(), report.suite.bold());
    println!("{}", "═".repeat(60));

    for (i, result) in report.results.iter().enumerate() {
        let mark = if result.met {
            "✓".green().bold()
        } else {
            "✗".red().bold()
        };
        let outcome = match &result.message {
            None => "passed".to_string(),
            Some(message) => format!("failed: {}", message),
        };
        println!(
            "  {} {:>3}. {}({}) {} [expect {}]",
            mark,
            i + 1,
            result.rule,
            result.value,
            outcome,
            expectation_name(result.expect)
        );
    }

    if report.passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Suite PASSED".green().bold()
        );
    } else {
        println!("\n{} {}", "✗".red().bold(), "Suite FAILED".red().bold());
        println!("\n{}", "Unmet expectations:".red().bold());
        for result in report.unmet() {
            println!(
                "  - {}({}) expected to {}",
                result.rule,
                result.value,
                expectation_name(result.expect)
            );
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Checks run:  {}", report.stats.checks_run);
    println!("  Violations:  {}", report.stats.violations);
    println!("  Unmet:       {}", report.stats.unmet);
    println!("  Duration:    {}ms", report.stats.duration_ms);
    println!("{}", "═".repeat(60));
}

pub fn print_outcome(
    rule: &str,
    value: &Value,
    outcome: Option<&Violation>,
    format: &str,
) -> Result<()> {
    if format == "json" {
        return print_json(&json!({
            "rule": rule,
            "value": value.to_json(),
            "passed": outcome.is_none(),
            "kind": outcome.map(violation_kind),
            "message": outcome.map(Violation::message),
        }));
    }

    match outcome {
        None => print_success(&format!("{}({}) passed", rule, value)),
        Some(violation) if violation.is_fault() => {
            print_error(&format!("{}({}) faulted: {}", rule, value, violation))
        }
        Some(violation) => print_error(&format!("{}({}) failed: {}", rule, value, violation)),
    }
    Ok(())
}

pub fn print_rules(registry: &ValidatorRegistry, format: &str) -> Result<()> {
    if format == "json" {
        let rules: Vec<_> = registry
            .iter()
            .map(|v| {
                json!({
                    "name": v.name(),
                    "expected_types": v.expected_types(),
                    "ignore_empty_string": v.ignores_empty_string(),
                })
            })
            .collect();
        return print_json(&json!(rules));
    }

    println!("{}", "Built-in rules:".bold());
    for validator in registry {
        let types: Vec<_> = validator
            .expected_types()
            .iter()
            .map(|t| t.as_str())
            .collect();
        let bypass = if validator.ignores_empty_string() {
            " (empty strings pass)".dimmed().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:<18} {}{}",
            validator.name().cyan(),
            types.join(", "),
            bypass
        );
    }
    println!("\n{} rules", registry.len());
    Ok(())
}

fn print_json(output: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}

fn violation_kind(violation: &Violation) -> &'static str {
    match violation {
        Violation::InvalidValue { .. } => "invalid_value",
        Violation::Fault(_) => "fault",
        Violation::Rejected(_) => "rejected",
    }
}

fn expectation_name(expect: Expectation) -> &'static str {
    match expect {
        Expectation::Pass => "pass",
        Expectation::Fail => "fail",
        Expectation::Any => "any",
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
