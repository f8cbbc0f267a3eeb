//! Core data models for the auditor
//!
//! These models are shared by the scorer, the aggregator and the reporters.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Score recorded for a passing check
pub const PASS_SCORE: u32 = 10;
/// Score recorded for a failing check
pub const FAIL_SCORE: u32 = 0;
/// Upper bound of a category score
pub const MAX_SCORE: f64 = PASS_SCORE as f64;

/// Impact weight used when a check does not specify one
pub const DEFAULT_IMPACT: f64 = 1.5;

/// Report format version written when the config does not override it
pub const DEFAULT_REPORT_VERSION: &str = "2.1.0-hardened";
/// Report summary written when the config does not override it
pub const DEFAULT_REPORT_SUMMARY: &str = "Full audit re-execution complete.";

/// Category names the audit is expected to cover.
///
/// Advisory only: checks may target any category, and categories with no
/// recorded checks never appear in a report.
pub const STANDARD_CATEGORIES: &[&str] = &[
    "Security",
    "Dependencies",
    "Performance",
    "Accessibility",
    "Logging",
    "Testing",
    "Documentation",
    "Architecture",
    "Code Quality",
    "Error Handling",
    "Data Privacy",
    "Robustness",
    "Scalability",
    "Maintainability",
    "AI Safety (Spoilers)",
    "AI Safety (Destructive)",
    "Context Management",
    "Memory Store",
    "Sports API",
    "Visual Sync",
    "Compliance",
];

/// Outcome of one recorded check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Human-readable check name
    #[serde(rename = "metric", alias = "name")]
    pub name: String,
    /// Either [`PASS_SCORE`] or [`FAIL_SCORE`]
    pub score: u32,
    /// Weight attached to the check
    pub impact: f64,
}

impl MetricRecord {
    pub fn new(name: impl Into<String>, passed: bool, impact: f64) -> Self {
        Self {
            name: name.into(),
            score: if passed { PASS_SCORE } else { FAIL_SCORE },
            impact,
        }
    }

    pub fn passed(&self) -> bool {
        self.score == PASS_SCORE
    }
}

/// Aggregated view of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    /// Mean metric score, rounded to two decimals
    pub score: f64,
    /// Metric records in insertion order
    pub metrics: Vec<MetricRecord>,
}

impl CategoryReport {
    pub fn failed_metrics(&self) -> impl Iterator<Item = &MetricRecord> {
        self.metrics.iter().filter(|m| !m.passed())
    }
}

/// Category name to aggregate, in first-registration order.
///
/// Serialized as a JSON object whose key order matches registration order.
pub type Categories = IndexMap<String, CategoryReport>;

/// Final audit report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub version: String,
    pub summary: String,
    pub categories: Categories,
    /// Failure log, one entry per failing check
    #[serde(default)]
    pub issues: Vec<String>,
}

impl AuditReport {
    /// Mean of the category scores, or `None` when nothing was recorded
    pub fn overall_score(&self) -> Option<f64> {
        if self.categories.is_empty() {
            return None;
        }
        let sum: f64 = self.categories.values().map(|c| c.score).sum();
        Some(sum / self.categories.len() as f64)
    }

    /// Letter grade for a 0-10 score
    pub fn grade_from_score(score: f64) -> &'static str {
        match score {
            s if s >= 9.0 => "A",
            s if s >= 8.0 => "B",
            s if s >= 7.0 => "C",
            s if s >= 6.0 => "D",
            _ => "F",
        }
    }

    /// Letter grade of the overall score
    pub fn grade(&self) -> Option<&'static str> {
        self.overall_score().map(Self::grade_from_score)
    }

    pub fn total_metrics(&self) -> usize {
        self.categories.values().map(|c| c.metrics.len()).sum()
    }

    pub fn failed_metrics(&self) -> usize {
        self.categories
            .values()
            .map(|c| c.failed_metrics().count())
            .sum()
    }
}
