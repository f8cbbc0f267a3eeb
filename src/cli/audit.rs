//! Audit command - run checks, aggregate, render

use anyhow::{Context, Result};
use auditor::checks::{AuditEngine, ProbeContext, RunSummary};
use auditor::config::{load_audit_config, load_config_file, AuditConfig};
use auditor::models::AuditReport;
use auditor::reporters::{self, OutputFormat};
use auditor::scoring::Weighting;
use console::style;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Flags of the audit command
#[derive(Debug, Default)]
pub(super) struct AuditOptions {
    pub format: Option<String>,
    pub output: Option<PathBuf>,
    pub fail_under: Option<f64>,
    pub weighting: Option<Weighting>,
    pub skip: Vec<String>,
    pub config: Option<PathBuf>,
}

/// Resolve the audited root and its config
pub(super) fn load_context(
    path: &Path,
    config_path: Option<&Path>,
) -> Result<(PathBuf, AuditConfig)> {
    let root = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;
    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }

    let config = match config_path {
        Some(p) => load_config_file(p)?,
        None => load_audit_config(&root),
    };
    Ok((root, config))
}

pub(super) fn run(path: &Path, opts: AuditOptions) -> Result<()> {
    let (root, mut config) = load_context(path, opts.config.as_deref())?;

    if let Some(weighting) = opts.weighting {
        config.scoring.weighting = weighting;
    }
    config.checks.skip.extend(opts.skip);

    let format = opts
        .format
        .or_else(|| config.defaults.format.clone())
        .unwrap_or_else(|| "text".to_string());
    let format = OutputFormat::from_str(&format)?;
    let fail_under = opts.fail_under.or(config.defaults.fail_under);

    info!("Auditing {}", root.display());
    let engine = AuditEngine::from_config(&config);
    let ctx = ProbeContext::new(&root);
    let mut registry = config.new_registry();
    let summary = engine.run(&ctx, &mut registry);
    let report = registry.build_report();

    let output = reporters::report_with_format(&report, format)?;
    match opts.output.as_deref().map(|p| output_path(p, format)) {
        Some(out_path) => {
            std::fs::write(&out_path, &output)
                .with_context(|| format!("Failed to write report to {}", out_path.display()))?;
            eprintln!(
                "Report written to: {}",
                style(out_path.display()).cyan()
            );
        }
        None => println!("{}", output),
    }

    // Keep stdout clean for machine-readable output
    if format == OutputFormat::Text {
        print_run_notes(&summary);
    }

    check_fail_threshold(fail_under, &report)
}

/// `--output` may name a directory; the report then gets the default file name
fn output_path(requested: &Path, format: OutputFormat) -> PathBuf {
    if requested.is_dir() {
        requested.join(reporters::default_file_name(format))
    } else {
        requested.to_path_buf()
    }
}

fn print_run_notes(summary: &RunSummary) {
    if summary.skipped > 0 {
        eprintln!(
            "{} {} checks skipped (target file not found)",
            style("○").dim(),
            summary.skipped
        );
    }
    if summary.errored > 0 {
        eprintln!(
            "{} {} checks could not read their target file",
            style("⚠").yellow(),
            summary.errored
        );
    }
}

/// Exit with code 1 when the overall score is below the threshold.
///
/// A report with no recorded checks has no score and fails any threshold.
fn check_fail_threshold(fail_under: Option<f64>, report: &AuditReport) -> Result<()> {
    if let Some(threshold) = fail_under {
        if below_threshold(threshold, report) {
            let score = report
                .overall_score()
                .map(|s| format!("{:.2}", s))
                .unwrap_or_else(|| "none".to_string());
            eprintln!(
                "Failing due to --fail-under={} threshold (score: {})",
                threshold, score
            );
            std::process::exit(1);
        }
    }
    Ok(())
}

fn below_threshold(threshold: f64, report: &AuditReport) -> bool {
    report.overall_score().map_or(true, |s| s < threshold)
}
