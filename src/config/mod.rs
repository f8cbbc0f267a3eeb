//! Configuration module for the auditor
//!
//! This module handles:
//! - Project-level configuration (auditor.toml)
//! - Report version and summary overrides
//! - Scoring mode and default impact
//! - User-declared rules and check skips

mod audit_config;

pub use audit_config::{
    load_audit_config,
    load_config_file,
    normalize_check_name,
    AuditConfig,
    ChecksConfig,
    CliDefaults,
    ReportConfig,
    ScoringConfig,
    CONFIG_FILE,
    JSON_CONFIG_FILE,
};
