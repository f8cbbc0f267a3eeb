//! Base check trait and types
//!
//! A check targets one file of the audited project and decides pass/fail from
//! that file's text. Checks never score themselves: the engine hands their
//! verdict to the [`CheckRegistry`](crate::scoring::CheckRegistry).

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while probing the audited project
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8")]
    NotUtf8 { path: PathBuf },
}

/// What happened to a single check during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed,
    Failed,
    /// Target file does not exist; nothing was recorded
    Skipped,
    /// Target file could not be read; nothing was recorded
    Errored,
}

impl CheckOutcome {
    pub fn from_verdict(passed: bool) -> Self {
        if passed {
            CheckOutcome::Passed
        } else {
            CheckOutcome::Failed
        }
    }

    pub fn is_recorded(&self) -> bool {
        matches!(self, CheckOutcome::Passed | CheckOutcome::Failed)
    }
}

/// Trait for all audit checks
///
/// # Example Implementation
///
/// ```
/// use auditor::checks::Check;
/// use std::path::Path;
///
/// struct HasReadme;
///
/// impl Check for HasReadme {
///     fn name(&self) -> &str { "Readme Present" }
///     fn category(&self) -> &str { "Documentation" }
///     fn target(&self) -> &Path { Path::new("README.md") }
///     fn evaluate(&self, content: &str) -> bool { !content.trim().is_empty() }
/// }
/// ```
pub trait Check {
    /// Metric name shown in the report
    fn name(&self) -> &str;

    /// Category the metric is recorded under
    fn category(&self) -> &str;

    /// File probed by this check, relative to the audit root
    fn target(&self) -> &Path;

    /// Decide pass/fail from the target file's content
    fn evaluate(&self, content: &str) -> bool;

    /// Impact weight; `None` uses the registry default
    fn impact(&self) -> Option<f64> {
        None
    }

    /// Short human-readable description of the condition
    fn describe(&self) -> String {
        String::new()
    }
}
