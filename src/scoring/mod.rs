//! Check scoring and report aggregation
//!
//! Every check recorded through [`CheckRegistry`] becomes a binary metric:
//! 10 when it passed, 0 when it failed. Failing checks also append a line to
//! the registry's issue log. The [`Aggregator`] collapses the recorded metrics
//! into one score per category.
//!
//! # Scoring Formula
//!
//! ```text
//! metric score   = 10 if passed else 0
//!
//! unweighted     = round2( Σ score / n )                  (default)
//! impact         = round2( Σ score × impact / Σ impact )  (opt-in)
//!
//! round2(x)      = round(x × 100) / 100, halves away from zero
//! ```
//!
//! Category scores are always within `[0, 10]`. Categories appear in the
//! report in the order of their first recorded check.
//!
//! # Example
//!
//! ```
//! use auditor::scoring::CheckRegistry;
//!
//! let mut registry = CheckRegistry::new();
//! registry.record_check("Security", "CORS Enabled", true);
//! registry.record_check("Security", "Sensitive Data Redaction", false);
//!
//! let report = registry.build_report();
//! assert_eq!(report.categories.get("Security").unwrap().score, 5.0);
//! assert_eq!(registry.issues(), ["[Security] Sensitive Data Redaction FAILED calibration."]);
//! ```

mod aggregator;
mod registry;

pub use aggregator::{round2, Aggregator, Weighting};
pub use registry::{failure_message, CheckRegistry, ReportSettings};
