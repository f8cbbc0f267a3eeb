//! Check registry
//!
//! Owns every metric recorded during one audit run. One registry per run;
//! independent audits use independent registries.

use super::aggregator::{Aggregator, Weighting};
use crate::models::{
    AuditReport, MetricRecord, DEFAULT_IMPACT, DEFAULT_REPORT_SUMMARY, DEFAULT_REPORT_VERSION,
};
use indexmap::IndexMap;
use tracing::debug;

/// Fixed report fields and the averaging mode
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub version: String,
    pub summary: String,
    pub weighting: Weighting,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            version: DEFAULT_REPORT_VERSION.to_string(),
            summary: DEFAULT_REPORT_SUMMARY.to_string(),
            weighting: Weighting::default(),
        }
    }
}

/// Issue line logged for a failing check
pub fn failure_message(category: &str, name: &str) -> String {
    format!("[{category}] {name} FAILED calibration.")
}

/// Accumulates check outcomes per category
#[derive(Debug, Clone)]
pub struct CheckRegistry {
    /// Categories in first-registration order
    categories: IndexMap<String, Vec<MetricRecord>>,
    issues: Vec<String>,
    default_impact: f64,
    settings: ReportSettings,
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::with_settings(ReportSettings::default())
    }

    pub fn with_settings(settings: ReportSettings) -> Self {
        Self {
            categories: IndexMap::new(),
            issues: Vec::new(),
            default_impact: DEFAULT_IMPACT,
            settings,
        }
    }

    /// Override the impact used by [`record_check`](Self::record_check)
    pub fn with_default_impact(mut self, impact: f64) -> Self {
        self.default_impact = impact;
        self
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// Record a check outcome with the default impact
    pub fn record_check(&mut self, category: &str, name: &str, passed: bool) {
        self.record_check_with_impact(category, name, passed, self.default_impact);
    }

    /// Record a check outcome.
    ///
    /// Appends a new metric to `category` (creating it on first use) and, when
    /// the check failed, one line to the issue log. Inputs are not validated and
    /// identical calls produce separate records.
    pub fn record_check_with_impact(
        &mut self,
        category: &str,
        name: &str,
        passed: bool,
        impact: f64,
    ) {
        let metric = MetricRecord::new(name, passed, impact);

        match self.categories.get_mut(category) {
            Some(metrics) => metrics.push(metric),
            None => {
                self.categories.insert(category.to_string(), vec![metric]);
            }
        }

        if !passed {
            debug!("[{}] {} failed", category, name);
            self.issues.push(failure_message(category, name));
        }
    }

    /// Failure log in recording order
    pub fn issues(&self) -> &[String] {
        &self.issues
    }

    /// Recorded categories and their metrics, in first-registration order
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[MetricRecord])> {
        self.categories
            .iter()
            .map(|(c, m)| (c.as_str(), m.as_slice()))
    }

    pub fn metrics(&self, category: &str) -> Option<&[MetricRecord]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// Total number of recorded checks
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Aggregate everything recorded so far.
    ///
    /// Never fails and may be called at any point of a run.
    pub fn build_report(&self) -> AuditReport {
        Aggregator::new(self.settings.weighting).build(self)
    }
}
