//! JSON reporter
//!
//! Outputs the full AuditReport as JSON indented with four spaces, the layout
//! existing audit_results.json files use.

use crate::models::AuditReport;
use anyhow::Result;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Render report as indented JSON
pub fn render(report: &AuditReport) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    report.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}
