//! Audit configuration support
//!
//! Loads per-project configuration from `auditor.toml` or `.auditorrc.json`
//! in the root of the audited project.
//!
//! # Configuration Format
//!
//! ```toml
//! # auditor.toml
//!
//! [report]
//! version = "2.1.0-hardened"
//! summary = "Full audit re-execution complete."
//!
//! [scoring]
//! weighting = "unweighted"   # or "impact"
//! default_impact = 1.5
//!
//! # Advisory list; checks outside it only log a warning
//! categories = ["Security", "Dependencies", "Performance"]
//!
//! [checks]
//! builtin = true
//! skip = ["task-tracking"]
//!
//! [[rules]]
//! category = "Logging"
//! name = "Structured Logger"
//! file = "server/app.py"
//! condition = { contains = "structlog" }
//!
//! [defaults]
//! format = "json"
//! fail_under = 7.5
//! ```

use crate::checks::RuleCheck;
use crate::models::{
    DEFAULT_IMPACT, DEFAULT_REPORT_SUMMARY, DEFAULT_REPORT_VERSION, STANDARD_CATEGORIES,
};
use crate::scoring::{CheckRegistry, ReportSettings, Weighting};
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Preferred config file name
pub const CONFIG_FILE: &str = "auditor.toml";
/// JSON fallback config file name
pub const JSON_CONFIG_FILE: &str = ".auditorrc.json";

/// Project-level audit configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    /// Fixed report fields
    #[serde(default)]
    pub report: ReportConfig,

    /// Scoring configuration
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Expected categories (advisory)
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Built-in suite toggles
    #[serde(default)]
    pub checks: ChecksConfig,

    /// User-declared checks, run after the built-in suite
    #[serde(default)]
    pub rules: Vec<RuleCheck>,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            report: ReportConfig::default(),
            scoring: ScoringConfig::default(),
            categories: default_categories(),
            checks: ChecksConfig::default(),
            rules: Vec::new(),
            defaults: CliDefaults::default(),
        }
    }
}

fn default_categories() -> Vec<String> {
    STANDARD_CATEGORIES.iter().map(|s| s.to_string()).collect()
}

/// Version and summary written into every report
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default = "default_summary")]
    pub summary: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            summary: default_summary(),
        }
    }
}

fn default_version() -> String {
    DEFAULT_REPORT_VERSION.to_string()
}

fn default_summary() -> String {
    DEFAULT_REPORT_SUMMARY.to_string()
}

/// Scoring configuration for category aggregation
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Averaging mode (default: unweighted)
    #[serde(default)]
    pub weighting: Weighting,

    /// Impact for checks that do not declare one (default: 1.5)
    #[serde(default = "default_impact")]
    pub default_impact: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weighting: Weighting::default(),
            default_impact: default_impact(),
        }
    }
}

fn default_impact() -> f64 {
    DEFAULT_IMPACT
}

/// Built-in suite toggles
#[derive(Debug, Clone, Deserialize)]
pub struct ChecksConfig {
    /// Run the built-in suite (default: true)
    #[serde(default = "default_true")]
    pub builtin: bool,

    /// Check names to skip (exact or kebab-case)
    #[serde(default)]
    pub skip: Vec<String>,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            builtin: true,
            skip: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json, markdown)
    #[serde(default)]
    pub format: Option<String>,

    /// Default minimum overall score for CI
    #[serde(default)]
    pub fail_under: Option<f64>,
}

/// Load audit configuration from the project root.
///
/// Searches for configuration files in this order:
/// 1. `auditor.toml`
/// 2. `.auditorrc.json`
///
/// Returns default configuration if no config file is found or the file is
/// malformed.
pub fn load_audit_config(root: &Path) -> AuditConfig {
    let toml_path = root.join(CONFIG_FILE);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded audit config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", toml_path.display(), e);
            }
        }
    }

    let json_path = root.join(JSON_CONFIG_FILE);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded audit config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", json_path.display(), e);
            }
        }
    }

    debug!("No audit config found, using defaults");
    AuditConfig::default()
}

/// Load an explicitly named config file; the format follows the extension
pub fn load_config_file(path: &Path) -> anyhow::Result<AuditConfig> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json_config(path),
        _ => load_toml_config(path),
    }
}

fn load_toml_config(path: &Path) -> anyhow::Result<AuditConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: AuditConfig = toml::from_str(&content)
        .with_context(|| format!("Invalid TOML in {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config in {}", path.display()))?;
    Ok(config)
}

fn load_json_config(path: &Path) -> anyhow::Result<AuditConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: AuditConfig = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config in {}", path.display()))?;
    Ok(config)
}

impl AuditConfig {
    /// Reject impacts that cannot be written to a JSON report (NaN, infinities)
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.scoring.default_impact.is_finite() {
            anyhow::bail!(
                "scoring.default_impact must be a finite number, got {}",
                self.scoring.default_impact
            );
        }
        for rule in &self.rules {
            if let Some(impact) = rule.impact.filter(|i| !i.is_finite()) {
                anyhow::bail!(
                    "rule '{}' has impact {}; impacts must be finite numbers",
                    rule.name,
                    impact
                );
            }
        }
        Ok(())
    }

    /// Report fields and weighting for a new registry
    pub fn report_settings(&self) -> ReportSettings {
        ReportSettings {
            version: self.report.version.clone(),
            summary: self.report.summary.clone(),
            weighting: self.scoring.weighting,
        }
    }

    /// Fresh registry configured for this project
    pub fn new_registry(&self) -> CheckRegistry {
        CheckRegistry::with_settings(self.report_settings())
            .with_default_impact(self.scoring.default_impact)
    }

    /// Whether a check is listed in `[checks] skip`
    pub fn is_check_skipped(&self, name: &str) -> bool {
        let normalized = normalize_check_name(name);
        self.checks
            .skip
            .iter()
            .any(|s| s == name || normalize_check_name(s) == normalized)
    }
}

/// Normalize a check name for config lookup
///
/// "Non-blocking AI" -> "non-blocking-ai", "LLM-based Check" -> "llm-based-check"
pub fn normalize_check_name(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            result.extend(c.to_lowercase());
        } else if !result.is_empty() && !result.ends_with('-') {
            result.push('-');
        }
    }
    result.trim_end_matches('-').to_string()
}
