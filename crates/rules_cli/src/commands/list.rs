use anyhow::Result;
use rules_validator::registry;
use tracing::debug;

use crate::output;

pub fn execute(format: &str) -> Result<()> {
    let registry = registry();
    debug!("Listing {} rules", registry.len());

    output::print_rules(registry, format)
}
