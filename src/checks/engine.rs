//! Check execution engine
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     AuditEngine                      │
//! ├──────────────────────────────────────────────────────┤
//! │  1. Register checks (built-in suite + [[rules]])     │
//! │  2. For each check, in order:                        │
//! │       read target via ProbeContext                   │
//! │       missing file  -> skipped                       │
//! │       unreadable    -> errored (warn)                │
//! │       otherwise     -> CheckRegistry::record_check   │
//! │  3. Return RunSummary                                │
//! └──────────────────────────────────────────────────────┘
//! ```

use super::base::{Check, CheckOutcome};
use super::builtin::builtin_checks;
use super::context::ProbeContext;
use crate::config::AuditConfig;
use crate::scoring::CheckRegistry;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Counts from one engine run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub checks_run: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errored: usize,
    pub duration_ms: u64,
}

impl RunSummary {
    pub fn recorded(&self) -> usize {
        self.passed + self.failed
    }

    fn tally(&mut self, outcome: CheckOutcome) {
        self.checks_run += 1;
        match outcome {
            CheckOutcome::Passed => self.passed += 1,
            CheckOutcome::Failed => self.failed += 1,
            CheckOutcome::Skipped => self.skipped += 1,
            CheckOutcome::Errored => self.errored += 1,
        }
    }
}

/// Runs registered checks against a project and records their verdicts
#[derive(Default)]
pub struct AuditEngine {
    checks: Vec<Box<dyn Check>>,
    /// Expected category names; others only produce a warning
    known_categories: Vec<String>,
}

impl AuditEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with the checks enabled by `config`
    pub fn from_config(config: &AuditConfig) -> Self {
        let mut engine = Self::new().with_known_categories(config.categories.clone());

        if config.checks.builtin {
            for check in builtin_checks() {
                engine.register(Box::new(check));
            }
        }
        for rule in &config.rules {
            engine.register(Box::new(rule.clone()));
        }

        let before = engine.checks.len();
        engine.checks.retain(|c| !config.is_check_skipped(c.name()));
        if engine.checks.len() < before {
            debug!("Skipped {} checks by config", before - engine.checks.len());
        }
        engine
    }

    pub fn with_check(mut self, check: impl Check + 'static) -> Self {
        self.register(Box::new(check));
        self
    }

    pub fn with_known_categories(mut self, categories: Vec<String>) -> Self {
        self.known_categories = categories;
        self
    }

    pub fn register(&mut self, check: Box<dyn Check>) {
        if !self.known_categories.is_empty()
            && !self.known_categories.iter().any(|c| c == check.category())
        {
            warn!(
                "Check '{}' targets unlisted category '{}'",
                check.name(),
                check.category()
            );
        }
        self.checks.push(check);
    }

    pub fn checks(&self) -> &[Box<dyn Check>] {
        &self.checks
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Run every check in registration order
    pub fn run(&self, ctx: &ProbeContext, registry: &mut CheckRegistry) -> RunSummary {
        let start = Instant::now();
        let mut summary = RunSummary::default();

        for check in &self.checks {
            summary.tally(run_check(check.as_ref(), ctx, registry));
        }

        summary.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "Ran {} checks in {}ms: {} passed, {} failed, {} skipped, {} errored",
            summary.checks_run,
            summary.duration_ms,
            summary.passed,
            summary.failed,
            summary.skipped,
            summary.errored
        );
        summary
    }
}

/// Probe one check and record its verdict
pub fn run_check(
    check: &dyn Check,
    ctx: &ProbeContext,
    registry: &mut CheckRegistry,
) -> CheckOutcome {
    let content = match ctx.read(check.target()) {
        Ok(Some(content)) => content,
        Ok(None) => {
            debug!(
                "Skipping '{}': {} not found",
                check.name(),
                check.target().display()
            );
            return CheckOutcome::Skipped;
        }
        Err(e) => {
            warn!("Skipping '{}': {}", check.name(), e);
            return CheckOutcome::Errored;
        }
    };

    let passed = check.evaluate(&content);
    match check.impact() {
        Some(impact) => {
            registry.record_check_with_impact(check.category(), check.name(), passed, impact)
        }
        None => registry.record_check(check.category(), check.name(), passed),
    }
    CheckOutcome::from_verdict(passed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{Condition, RuleCheck};
    use std::path::Path;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_missing_files_are_skipped_not_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let engine = AuditEngine::new().with_check(RuleCheck::new(
            "Security",
            "CORS Enabled",
            "app.py",
            Condition::contains("CORSMiddleware"),
        ));

        let ctx = ProbeContext::new(dir.path());
        let mut registry = CheckRegistry::new();
        let summary = engine.run(&ctx, &mut registry);

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.recorded(), 0);
        assert!(registry.build_report().categories.is_empty());
    }

    #[test]
    fn test_records_verdicts_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "app.py", "CORSMiddleware\n");

        let engine = AuditEngine::new()
            .with_check(RuleCheck::new(
                "Security",
                "CORS",
                "app.py",
                Condition::contains("CORSMiddleware"),
            ))
            .with_check(
                RuleCheck::new(
                    "Security",
                    "Executor",
                    "app.py",
                    Condition::contains("run_in_executor"),
                )
                .with_impact(4.0),
            );

        let ctx = ProbeContext::new(dir.path());
        let mut registry = CheckRegistry::new();
        let summary = engine.run(&ctx, &mut registry);

        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        let metrics = registry.metrics("Security").unwrap();
        assert_eq!(metrics[0].name, "CORS");
        assert_eq!(metrics[0].impact, 1.5);
        assert_eq!(metrics[1].impact, 4.0);
        assert_eq!(registry.issues(), ["[Security] Executor FAILED calibration."]);
        assert_eq!(ctx.files_probed(), 1);
    }

    #[test]
    fn test_unreadable_file_is_errored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("blob.bin"), [0xc3, 0x28]).unwrap();

        let check = RuleCheck::new("Robustness", "Blob", "blob.bin", Condition::contains("x"));
        let ctx = ProbeContext::new(dir.path());
        let mut registry = CheckRegistry::new();

        assert_eq!(run_check(&check, &ctx, &mut registry), CheckOutcome::Errored);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_from_config_respects_builtin_flag_and_skips() {
        let mut config = AuditConfig::default();
        assert_eq!(AuditEngine::from_config(&config).len(), 8);

        config.checks.skip = vec!["CORS Enabled".into(), "task-tracking".into()];
        assert_eq!(AuditEngine::from_config(&config).len(), 6);

        config.checks.builtin = false;
        config.rules.push(RuleCheck::new(
            "Testing",
            "Tests",
            "t.py",
            Condition::contains("def test_"),
        ));
        let engine = AuditEngine::from_config(&config);
        assert_eq!(engine.len(), 1);
        assert_eq!(engine.checks()[0].name(), "Tests");
    }

    #[test]
    fn test_unlisted_category_is_still_recorded() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.txt", "hello");

        let engine = AuditEngine::new()
            .with_known_categories(vec!["Security".into()])
            .with_check(RuleCheck::new("Custom", "Hello", "a.txt", Condition::contains("hello")));

        let mut registry = CheckRegistry::new();
        engine.run(&ProbeContext::new(dir.path()), &mut registry);
        assert_eq!(registry.build_report().categories.get("Custom").unwrap().score, 10.0);
    }
}
