//! Checks command - list configured checks

use super::audit::load_context;
use anyhow::Result;
use auditor::checks::{AuditEngine, Check};
use console::style;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct CheckListing<'a> {
    category: &'a str,
    name: &'a str,
    file: String,
    impact: f64,
    condition: String,
}

pub(super) fn run(path: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let (_root, config) = load_context(path, config_path)?;
    let engine = AuditEngine::from_config(&config);
    let default_impact = config.scoring.default_impact;

    let listings: Vec<CheckListing> = engine
        .checks()
        .iter()
        .map(|c| listing(c.as_ref(), default_impact))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
        return Ok(());
    }

    if listings.is_empty() {
        println!("No checks configured.");
        return Ok(());
    }

    println!("{} checks ({} weighting)\n", listings.len(), config.scoring.weighting);
    for l in &listings {
        println!(
            "  {} {}  {}",
            style(format!("[{}]", l.category)).cyan(),
            style(l.name).bold(),
            style(format!("impact {}", l.impact)).dim()
        );
        println!("      {}: {}", l.file, l.condition);
    }
    Ok(())
}

fn listing(check: &dyn Check, default_impact: f64) -> CheckListing<'_> {
    CheckListing {
        category: check.category(),
        name: check.name(),
        file: check.target().display().to_string(),
        impact: check.impact().unwrap_or(default_impact),
        condition: check.describe(),
    }
}
