//! Per-category report aggregation

use super::registry::CheckRegistry;
use crate::models::{AuditReport, Categories, CategoryReport, MetricRecord, MAX_SCORE};
use serde::{Deserialize, Serialize};
use tracing::info;

/// How metric scores are averaged within a category
///
/// Config files and `--weighting` accept the same names, parsed by `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Weighting {
    /// Plain mean; impact is carried but ignored
    #[default]
    Unweighted,
    /// Mean weighted by each metric's impact
    Impact,
}

impl std::str::FromStr for Weighting {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unweighted" | "mean" => Ok(Weighting::Unweighted),
            "impact" | "weighted" => Ok(Weighting::Impact),
            _ => Err(anyhow::anyhow!(
                "Unknown weighting '{}'. Valid values: unweighted, impact",
                s
            )),
        }
    }
}

impl TryFrom<String> for Weighting {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl std::fmt::Display for Weighting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Weighting::Unweighted => write!(f, "unweighted"),
            Weighting::Impact => write!(f, "impact"),
        }
    }
}

/// Round to two decimals, halves away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Stateless report builder
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    weighting: Weighting,
}

impl Aggregator {
    pub fn new(weighting: Weighting) -> Self {
        Self { weighting }
    }

    /// Build a report from the registry's current state
    pub fn build(&self, registry: &CheckRegistry) -> AuditReport {
        let mut categories = Categories::new();
        for (name, metrics) in registry.categories() {
            categories.insert(
                name.to_string(),
                CategoryReport {
                    score: self.category_score(metrics),
                    metrics: metrics.to_vec(),
                },
            );
        }

        let settings = registry.settings();
        let report = AuditReport {
            version: settings.version.clone(),
            summary: settings.summary.clone(),
            categories,
            issues: registry.issues().to_vec(),
        };

        info!(
            "Aggregated {} checks into {} categories ({} weighting, {} issues)",
            registry.len(),
            report.categories.len(),
            self.weighting,
            report.issues.len()
        );
        report
    }

    /// Score of one category. A recorded category always has at least one metric.
    pub fn category_score(&self, metrics: &[MetricRecord]) -> f64 {
        let raw = match self.weighting {
            Weighting::Unweighted => unweighted_mean(metrics),
            Weighting::Impact => {
                impact_weighted_mean(metrics).unwrap_or_else(|| unweighted_mean(metrics))
            }
        };
        round2(raw).clamp(0.0, MAX_SCORE)
    }
}

fn unweighted_mean(metrics: &[MetricRecord]) -> f64 {
    if metrics.is_empty() {
        return 0.0;
    }
    let sum: f64 = metrics.iter().map(|m| m.score as f64).sum();
    sum / metrics.len() as f64
}

/// `None` when the weights cannot produce a mean (zero or non-finite total)
fn impact_weighted_mean(metrics: &[MetricRecord]) -> Option<f64> {
    let total: f64 = metrics.iter().map(|m| m.impact).sum();
    if total == 0.0 || !total.is_finite() {
        return None;
    }
    let weighted: f64 = metrics.iter().map(|m| m.score as f64 * m.impact).sum();
    let mean = weighted / total;
    mean.is_finite().then_some(mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ReportSettings;
    use std::str::FromStr;

    #[test]
    fn test_empty_registry_gives_empty_report() {
        let registry = CheckRegistry::new();
        let report = registry.build_report();
        assert!(report.categories.is_empty());
        assert!(report.issues.is_empty());
        assert_eq!(report.version, "2.1.0-hardened");
        assert_eq!(report.summary, "Full audit re-execution complete.");
    }

    #[test]
    fn test_single_passing_check() {
        let mut registry = CheckRegistry::new();
        registry.record_check("Security", "X", true);
        let report = registry.build_report();

        let security = report.categories.get("Security").unwrap();
        assert_eq!(security.score, 10.0);
        assert_eq!(
            security.metrics,
            vec![MetricRecord {
                name: "X".into(),
                score: 10,
                impact: 1.5
            }]
        );
    }

    #[test]
    fn test_pass_and_fail_average_to_five() {
        let mut registry = CheckRegistry::new();
        registry.record_check("Security", "X", true);
        registry.record_check("Security", "Y", false);
        let report = registry.build_report();

        let security = report.categories.get("Security").unwrap();
        assert_eq!(security.score, 5.0);
        let names: Vec<_> = security.metrics.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["X", "Y"]);
        assert_eq!(registry.issues(), ["[Security] Y FAILED calibration."]);
        assert_eq!(report.issues, vec!["[Security] Y FAILED calibration."]);
    }

    #[test]
    fn test_two_categories_are_averaged_independently() {
        let mut registry = CheckRegistry::new();
        registry.record_check("Security", "A", true);
        registry.record_check("Performance", "B", false);
        registry.record_check("Security", "C", true);
        let report = registry.build_report();

        assert_eq!(report.categories.len(), 2);
        assert_eq!(report.categories.get("Security").unwrap().score, 10.0);
        assert_eq!(report.categories.get("Performance").unwrap().score, 0.0);
        assert!(report.categories.get("Testing").is_none());
    }

    #[test]
    fn test_category_order_follows_first_registration() {
        let mut registry = CheckRegistry::new();
        registry.record_check("Performance", "a", true);
        registry.record_check("Dependencies", "b", true);
        registry.record_check("Security", "c", true);
        registry.record_check("Dependencies", "d", false);

        let report = registry.build_report();
        let names: Vec<_> = report.categories.keys().collect();
        assert_eq!(names, vec!["Performance", "Dependencies", "Security"]);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        let mut registry = CheckRegistry::new();
        registry.record_check("Security", "a", true);
        registry.record_check("Security", "b", false);
        registry.record_check("Security", "c", false);
        let report = registry.build_report();
        assert_eq!(report.categories.get("Security").unwrap().score, 3.33);

        registry.record_check("Testing", "a", true);
        registry.record_check("Testing", "b", true);
        registry.record_check("Testing", "c", false);
        let report = registry.build_report();
        assert_eq!(report.categories.get("Testing").unwrap().score, 6.67);
    }

    #[test]
    fn test_repeated_builds_are_identical() {
        let mut registry = CheckRegistry::new();
        registry.record_check("Security", "X", true);
        registry.record_check("Logging", "Y", false);
        assert_eq!(registry.build_report(), registry.build_report());
    }

    #[test]
    fn test_incremental_reports_reflect_new_records() {
        let mut registry = CheckRegistry::new();
        registry.record_check("Security", "X", true);
        let first = registry.build_report();
        registry.record_check("Security", "Y", false);
        let second = registry.build_report();

        assert_eq!(first.categories.get("Security").unwrap().score, 10.0);
        assert_eq!(second.categories.get("Security").unwrap().score, 5.0);
    }

    #[test]
    fn test_scores_stay_within_bounds() {
        let mut registry = CheckRegistry::new();
        for i in 0..40 {
            registry.record_check(&format!("c{}", i % 7), "m", i % 5 < 2);
        }
        for (_, cat) in registry.build_report().categories.iter() {
            assert!((0.0..=10.0).contains(&cat.score));
        }
    }

    #[test]
    fn test_impact_weighting() {
        let settings = ReportSettings {
            weighting: Weighting::Impact,
            ..Default::default()
        };
        let mut registry = CheckRegistry::with_settings(settings);
        registry.record_check_with_impact("Security", "heavy", true, 3.0);
        registry.record_check_with_impact("Security", "light", false, 1.0);
        let report = registry.build_report();
        assert_eq!(report.categories.get("Security").unwrap().score, 7.5);

        // Same records, default mode ignores impact
        let unweighted = Aggregator::new(Weighting::Unweighted).build(&registry);
        assert_eq!(unweighted.categories.get("Security").unwrap().score, 5.0);
    }

    #[test]
    fn test_impact_weighting_falls_back_on_zero_weights() {
        let metrics = vec![
            MetricRecord::new("a", true, 1.0),
            MetricRecord::new("b", false, -1.0),
        ];
        assert_eq!(Aggregator::new(Weighting::Impact).category_score(&metrics), 5.0);
    }

    #[test]
    fn test_impact_weighting_clamps_negative_weights() {
        let metrics = vec![
            MetricRecord::new("a", true, 2.0),
            MetricRecord::new("b", false, -1.0),
        ];
        // 20 / 1 would exceed the scale
        assert_eq!(Aggregator::new(Weighting::Impact).category_score(&metrics), 10.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.333_333), 3.33);
        assert_eq!(round2(6.666_666), 6.67);
        assert_eq!(round2(10.0), 10.0);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_weighting_parsing() {
        assert_eq!(Weighting::from_str("impact").unwrap(), Weighting::Impact);
        assert_eq!(Weighting::from_str("UNWEIGHTED").unwrap(), Weighting::Unweighted);
        assert!(Weighting::from_str("median").is_err());
        assert_eq!(Weighting::Impact.to_string(), "impact");
    }

    #[test]
    fn test_config_and_cli_accept_same_weighting_names() {
        #[derive(Deserialize)]
        struct Scoring {
            weighting: Weighting,
        }

        for name in ["unweighted", "Mean", "IMPACT", "weighted"] {
            let parsed: Scoring = toml::from_str(&format!("weighting = \"{name}\"")).unwrap();
            assert_eq!(parsed.weighting, Weighting::from_str(name).unwrap());
        }
        assert!(toml::from_str::<Scoring>("weighting = \"median\"").is_err());

        assert_eq!(serde_json::to_string(&Weighting::Impact).unwrap(), "\"impact\"");
    }
}
