//! Audit checks
//!
//! A check reads one file of the audited project and turns a literal
//! substring test into a pass/fail verdict. The [`AuditEngine`] runs checks in
//! registration order and records each verdict in a
//! [`CheckRegistry`](crate::scoring::CheckRegistry).
//!
//! # Usage
//!
//! ```no_run
//! use auditor::checks::{AuditEngine, Condition, ProbeContext, RuleCheck};
//! use auditor::scoring::CheckRegistry;
//!
//! let engine = AuditEngine::new().with_check(RuleCheck::new(
//!     "Security",
//!     "CORS Enabled",
//!     "service/main.py",
//!     Condition::contains("CORSMiddleware"),
//! ));
//!
//! let ctx = ProbeContext::new("/path/to/project");
//! let mut registry = CheckRegistry::new();
//! engine.run(&ctx, &mut registry);
//! let report = registry.build_report();
//! ```

mod base;
mod builtin;
mod condition;
mod context;
mod engine;
mod rule;

pub use base::{Check, CheckError, CheckOutcome};
pub use builtin::builtin_checks;
pub use condition::{Condition, LineRule};
pub use context::ProbeContext;
pub use engine::{run_check, AuditEngine, RunSummary};
pub use rule::RuleCheck;
