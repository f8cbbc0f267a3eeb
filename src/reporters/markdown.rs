//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Suitable for pull request comments and committed audit records.

use crate::models::{AuditReport, CategoryReport};
use anyhow::Result;
use chrono::Local;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &AuditReport) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(report));
    md.push('\n');

    md.push_str(&render_category_scores(report));
    md.push('\n');

    md.push_str(&render_category_details(report));

    md.push_str(&render_issues(report));
    md.push('\n');

    md.push_str("---\n\n*Generated by auditor*\n");
    Ok(md)
}

fn render_header(report: &AuditReport) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    let score_line = match report.overall_score() {
        Some(score) => format!(
            "**Grade: {}** | **Score: {:.2}/10**",
            AuditReport::grade_from_score(score),
            score
        ),
        None => "**No checks recorded**".to_string(),
    };

    format!(
        "# Compliance Audit Report\n\n{}\n\nVersion: `{}`  \n{}  \nGenerated: {}\n",
        score_line, report.version, report.summary, timestamp
    )
}

fn render_category_scores(report: &AuditReport) -> String {
    let mut md = String::from("## Category Scores\n\n");
    if report.categories.is_empty() {
        md.push_str("_No categories._\n");
        return md;
    }

    md.push_str("| Category | Score | Passed | Status |\n");
    md.push_str("|----------|-------|--------|--------|\n");
    for (name, category) in report.categories.iter() {
        let failed = category.failed_metrics().count();
        md.push_str(&format!(
            "| {} | {:.2} | {}/{} | {} |\n",
            escape(name),
            category.score,
            category.metrics.len() - failed,
            category.metrics.len(),
            status(category)
        ));
    }
    md
}

fn render_category_details(report: &AuditReport) -> String {
    let mut md = String::new();
    for (name, category) in report.categories.iter() {
        md.push_str(&format!("### {}\n\n", escape(name)));
        md.push_str("| Metric | Score | Impact |\n");
        md.push_str("|--------|-------|--------|\n");
        for metric in &category.metrics {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                escape(&metric.name),
                metric.score,
                metric.impact
            ));
        }
        md.push('\n');
    }
    md
}

fn render_issues(report: &AuditReport) -> String {
    let mut md = String::from("## Issues\n\n");
    if report.issues.is_empty() {
        md.push_str("None.\n");
    }
    for issue in &report.issues {
        md.push_str(&format!("- {}\n", escape(issue)));
    }
    md
}

fn status(category: &CategoryReport) -> &'static str {
    if category.failed_metrics().next().is_none() {
        "✅"
    } else if category.score > 0.0 {
        "⚠️"
    } else {
        "❌"
    }
}

/// Escape characters that break table cells
fn escape(s: &str) -> String {
    s.replace('|', "\\|")
}
