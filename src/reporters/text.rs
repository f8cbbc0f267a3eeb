//! Text (terminal) reporter with colors and formatting

use crate::models::AuditReport;
use anyhow::Result;

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

/// Grade colors
fn grade_color(grade: &str) -> &'static str {
    match grade {
        "A" => GREEN,
        "B" => "\x1b[92m", // Light green
        "C" => YELLOW,
        "D" => "\x1b[91m", // Light red
        "F" => RED,
        _ => RESET,
    }
}

/// Render report as formatted terminal output
pub fn render(report: &AuditReport) -> Result<String> {
    let mut out = String::new();

    // Header
    out.push_str(&format!("\n{BOLD}Compliance Audit{RESET} {DIM}v{}{RESET}\n", report.version));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!("{}\n", report.summary));

    let Some(overall) = report.overall_score() else {
        out.push_str(&format!(
            "\n{DIM}No checks were recorded. Are the audited files present?{RESET}\n"
        ));
        return Ok(out);
    };
    let grade = AuditReport::grade_from_score(overall);
    out.push_str(&format!(
        "Score: {BOLD}{:.2}/10{RESET}  Grade: {}{BOLD}{}{RESET}  Checks: {}  Failed: {}\n\n",
        overall,
        grade_color(grade),
        grade,
        report.total_metrics(),
        report.failed_metrics()
    ));

    // Category table
    out.push_str(&format!("{BOLD}CATEGORIES{RESET}\n"));
    let width = report
        .categories
        .keys()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0);
    for (name, category) in report.categories.iter() {
        let passed = category.metrics.len() - category.failed_metrics().count();
        out.push_str(&format!(
            "  {:<width$}  {}  {DIM}{}/{} passed{RESET}\n",
            name,
            format_score(category.score),
            passed,
            category.metrics.len(),
            width = width
        ));
        for metric in category.failed_metrics() {
            out.push_str(&format!(
                "  {:<width$}    {RED}✗{RESET} {}\n",
                "",
                metric.name,
                width = width
            ));
        }
    }
    out.push('\n');

    // Issue log
    if !report.issues.is_empty() {
        out.push_str(&format!("{BOLD}ISSUES{RESET} ({} total)\n", report.issues.len()));
        for issue in &report.issues {
            out.push_str(&format!("  {}\n", issue));
        }
        out.push('\n');
    }

    if report.issues.is_empty() {
        out.push_str(&format!("{DIM}All categories calibrated.{RESET}\n"));
    } else {
        out.push_str(&format!(
            "{DIM}Run `auditor checks` to see what each check looks for.{RESET}\n"
        ));
    }

    Ok(out)
}

/// Format a 0-10 score with color
fn format_score(score: f64) -> String {
    let color = if score >= 8.0 {
        GREEN
    } else if score >= 6.0 {
        YELLOW
    } else {
        RED
    };
    format!("{color}{:>5.2}{RESET}", score)
}
