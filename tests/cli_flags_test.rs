//! CLI flag contract tests
//!
//! Verifies that CLI flags (--fail-under, --output, --skip, --format) and
//! the checks/init/version subcommands behave as documented.

use std::path::Path;
use std::process::Command;

fn auditor_bin() -> String {
    env!("CARGO_BIN_EXE_auditor").to_string()
}

/// Minimal project: every Security check passes, Task Tracking fails.
fn setup_test_project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let service = dir.path().join("lumen-mascot");
    std::fs::create_dir_all(&service).unwrap();
    std::fs::write(
        service.join("main_enhanced.py"),
        r#"
import re
from fastapi.middleware.cors import CORSMiddleware

SAFE_NAME = re.compile(r"^[a-z]+$")
API_KEY = os.getenv("API_KEY")

async def chat(msg):
    return await loop.run_in_executor(None, generate, msg)
"#,
    )
    .unwrap();
    dir
}

fn run(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(auditor_bin())
        .arg(dir)
        .args(args)
        .output()
        .unwrap();
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

// Overall score for this project: Security 10.0, Performance 5.0 -> 7.5

#[test]
fn test_fail_under_exits_nonzero_below_threshold() {
    let dir = setup_test_project();
    let (code, _, stderr) = run(dir.path(), &["audit", "--fail-under", "8"]);
    assert_eq!(code, 1, "score 7.5 is below 8");
    assert!(stderr.contains("--fail-under=8"), "stderr: {}", stderr);
}

#[test]
fn test_fail_under_passes_at_threshold() {
    let dir = setup_test_project();
    let (code, _, stderr) = run(dir.path(), &["audit", "--fail-under", "7.5"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
}

#[test]
fn test_fail_under_with_no_checks_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run(dir.path(), &["audit", "--fail-under", "0"]);
    assert_eq!(code, 1);
}

#[test]
fn test_fail_under_rejects_out_of_range() {
    let dir = setup_test_project();
    let (code, _, stderr) = run(dir.path(), &["audit", "--fail-under", "12"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("between 0 and 10"), "stderr: {}", stderr);
}

#[test]
fn test_fail_under_from_config_defaults() {
    let dir = setup_test_project();
    std::fs::write(
        dir.path().join("auditor.toml"),
        "[defaults]\nfail_under = 9.0\n",
    )
    .unwrap();
    let (code, _, _) = run(dir.path(), &["audit"]);
    assert_eq!(code, 1);
}

#[test]
fn test_output_flag_writes_file() {
    let dir = setup_test_project();
    let out = dir.path().join("audit_results.json");
    let (code, stdout, stderr) = run(
        dir.path(),
        &["audit", "--format", "json", "--output", out.to_str().unwrap()],
    );
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.is_empty(), "report should not go to stdout");
    assert!(stderr.contains("Report written to"));

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("{\n    \"version\""), "4-space indent: {}", content);
    assert!(content.contains("\"Security\""));
}

#[test]
fn test_output_directory_gets_default_file_name() {
    let dir = setup_test_project();
    let out_dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run(
        dir.path(),
        &["audit", "--format", "md", "--output", out_dir.path().to_str().unwrap()],
    );
    assert_eq!(code, 0, "stderr: {}", stderr);

    let content = std::fs::read_to_string(out_dir.path().join("audit_results.md")).unwrap();
    assert!(content.starts_with("# Compliance Audit Report"));
}

#[test]
fn test_json_stdout_is_clean() {
    let dir = setup_test_project();
    let (code, stdout, _) = run(dir.path(), &["audit", "--format", "json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed["categories"]["Performance"]["metrics"].is_array());
    assert_eq!(parsed["categories"]["Performance"]["score"], 5.0);
}

#[test]
fn test_skip_flag_removes_check() {
    let dir = setup_test_project();
    let (code, stdout, _) = run(
        dir.path(),
        &["audit", "--format", "json", "--skip", "task-tracking"],
    );
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["categories"]["Performance"]["score"], 10.0);
    assert_eq!(parsed["issues"].as_array().unwrap().len(), 0);
}

#[test]
fn test_unknown_format_rejected() {
    let dir = setup_test_project();
    let (code, _, _) = run(dir.path(), &["audit", "--format", "sarif"]);
    assert_ne!(code, 0);
}

#[test]
fn test_checks_json_lists_builtin_suite() {
    let dir = setup_test_project();
    let (code, stdout, _) = run(dir.path(), &["checks", "--json"]);
    assert_eq!(code, 0);
    let listings: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(listings.len(), 8);
    assert_eq!(listings[0]["category"], "Security");
    assert_eq!(listings[0]["name"], "CORS Enabled");
    assert_eq!(listings[0]["impact"], 1.5);
}

#[test]
fn test_init_creates_config_once() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run(dir.path(), &["init"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Created"));
    assert!(dir.path().join("auditor.toml").exists());

    let (code, stdout, _) = run(dir.path(), &["init"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Already initialized"));
}

#[test]
fn test_version_subcommand() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run(dir.path(), &["version"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("auditor "));
}

#[test]
fn test_unknown_subcommand_hint() {
    let output = Command::new(auditor_bin()).arg("analyse").output().unwrap();
    assert_ne!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("analyse"), "stderr: {}", stderr);
}
