use anyhow::{Context, Result};
use rules_parser::parse_file;
use rules_validator::{SuiteRunner, registry};
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(suite_path: &str, format: &str) -> Result<()> {
    info!("Running suite: {}", suite_path);

    let path = Path::new(suite_path);
    let suite = parse_file(path)
        .with_context(|| format!("Failed to parse suite file: {}", suite_path))?;

    if format != "json" {
        output::print_info(&format!(
            "Suite loaded: {} ({} checks)",
            suite.name,
            suite.checks.len()
        ));
    }

    let report = SuiteRunner::new(registry())
        .run(&suite)
        .with_context(|| format!("Failed to run suite: {}", suite.name))?;

    output::print_suite_report(&report, format)?;

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}
