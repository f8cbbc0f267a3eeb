//! Built-in check suite for the mascot service
//!
//! Probes the FastAPI entry point, its requirements file and the AI safety
//! guard. Disable with `[checks] builtin = false` or skip individual checks
//! by name.

use super::condition::{Condition, LineRule};
use super::rule::RuleCheck;

pub const MAIN_MODULE: &str = "lumen-mascot/main_enhanced.py";
pub const REQUIREMENTS: &str = "lumen-mascot/requirements.txt";
pub const SAFETY_GUARD: &str = "lumen-mascot/ai/safety_guard.py";

/// All built-in checks in run order
pub fn builtin_checks() -> Vec<RuleCheck> {
    let mut checks = Vec::new();
    checks.extend(security_checks());
    checks.extend(dependency_checks());
    checks.extend(ai_safety_checks());
    checks.extend(performance_checks());
    checks
}

fn security_checks() -> Vec<RuleCheck> {
    vec![
        RuleCheck::new(
            "Security",
            "CORS Enabled",
            MAIN_MODULE,
            Condition::contains("CORSMiddleware"),
        ),
        RuleCheck::new(
            "Security",
            "SQLi Pattern Defense",
            MAIN_MODULE,
            Condition::Any(vec![
                Condition::contains("re.compile"),
                Condition::contains("MediaNLU"),
            ]),
        ),
        RuleCheck::new(
            "Security",
            "Sensitive Data Redaction",
            MAIN_MODULE,
            Condition::Any(vec![
                Condition::contains_ignore_case("password").negate(),
                Condition::contains("env"),
            ]),
        ),
    ]
}

fn dependency_checks() -> Vec<RuleCheck> {
    vec![RuleCheck::new(
        "Dependencies",
        "Pinning Status",
        REQUIREMENTS,
        Condition::EveryLine(LineRule {
            text: "==".to_string(),
            allow_blank: true,
            comment_prefix: Some("#".to_string()),
        }),
    )]
}

fn ai_safety_checks() -> Vec<RuleCheck> {
    vec![
        RuleCheck::new(
            "AI Safety (Spoilers)",
            "LLM-based Check",
            SAFETY_GUARD,
            Condition::contains("check_spoiler_risk"),
        ),
        RuleCheck::new(
            "AI Safety (Destructive)",
            "Confirmation Logic",
            SAFETY_GUARD,
            Condition::contains("validate_action"),
        ),
    ]
}

fn performance_checks() -> Vec<RuleCheck> {
    vec![
        RuleCheck::new(
            "Performance",
            "Non-blocking AI",
            MAIN_MODULE,
            Condition::contains("run_in_executor"),
        ),
        RuleCheck::new(
            "Performance",
            "Task Tracking",
            MAIN_MODULE,
            Condition::contains("background_tasks.add"),
        ),
    ]
}
