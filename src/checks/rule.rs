//! Data-driven checks declared in `[[rules]]` config entries

use super::base::Check;
use super::condition::Condition;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A check fully described by data
///
/// ```toml
/// [[rules]]
/// category = "Logging"
/// name = "Structured Logger"
/// file = "server/app.py"
/// condition = { contains = "structlog" }
/// impact = 2.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCheck {
    pub category: String,
    pub name: String,
    /// Target file relative to the audit root
    pub file: PathBuf,
    pub condition: Condition,
    #[serde(default)]
    pub impact: Option<f64>,
}

impl RuleCheck {
    pub fn new(
        category: impl Into<String>,
        name: impl Into<String>,
        file: impl Into<PathBuf>,
        condition: Condition,
    ) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            file: file.into(),
            condition,
            impact: None,
        }
    }

    pub fn with_impact(mut self, impact: f64) -> Self {
        self.impact = Some(impact);
        self
    }
}

impl Check for RuleCheck {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn target(&self) -> &Path {
        &self.file
    }

    fn evaluate(&self, content: &str) -> bool {
        self.condition.evaluate(content)
    }

    fn impact(&self) -> Option<f64> {
        self.impact
    }

    fn describe(&self) -> String {
        self.condition.to_string()
    }
}
