//! Init command - write an example auditor.toml

use anyhow::{Context, Result};
use auditor::config::CONFIG_FILE;
use console::style;
use std::path::Path;

const EXAMPLE_CONFIG: &str = r##"# Auditor Configuration

[report]
version = "2.1.0-hardened"
summary = "Full audit re-execution complete."

[scoring]
# "unweighted" averages check scores; "impact" weights them by impact
weighting = "unweighted"
default_impact = 1.5

[checks]
# Run the built-in mascot service suite
builtin = true
# Skip checks by name, e.g. ["task-tracking"]
skip = []

# Declare additional checks. Conditions are literal text tests:
#   { contains = "..." }, { contains_ignore_case = "..." }, { not = {...} },
#   { any = [...] }, { all = [...] },
#   { every_line = { text = "==", comment_prefix = "#" } }
#
# [[rules]]
# category = "Logging"
# name = "Structured Logger"
# file = "server/app.py"
# condition = { contains = "structlog" }
# impact = 2.0

[defaults]
# format = "text"
# fail_under = 7.5
"##;

/// Run the init command
pub(super) fn run(path: &Path) -> Result<()> {
    let root = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }

    let config_path = root.join(CONFIG_FILE);
    if config_path.exists() {
        println!(
            "{} Already initialized at {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to create {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    println!("\nNext steps:");
    println!("  {} List checks", style("auditor checks").cyan());
    println!("  {} Run the audit", style("auditor audit").cyan());
    Ok(())
}
