//! Auditor - static compliance auditing
//!
//! Checks read files of an audited project and test them for literal text.
//! Each verdict becomes a binary metric (10 or 0) in a
//! [`scoring::CheckRegistry`]; the registry aggregates metrics into a
//! per-category [`models::AuditReport`].
//!
//! - [`models`]: metric, category and report types
//! - [`scoring`]: check registry and report aggregation
//! - [`checks`]: check trait, conditions, built-in suite, engine
//! - [`config`]: `auditor.toml` loading
//! - [`reporters`]: text, JSON and Markdown rendering

pub mod checks;
pub mod config;
pub mod models;
pub mod reporters;
pub mod scoring;
