//! Domain-specific error types for casestats
//!
//! # Error Categories
//!
//! - **CaseStatsError**: spreadsheet validation, batch lookups and pipeline failures
//! - **ReportError**: chart rasterization and slide-deck assembly
//! - **NarrativeError**: calls to the narrative-text workflow service
//!
//! # Examples
//!
//! ```rust
//! use casestats::errors::{CaseStatsError, ReportError};
//!
//! let err = CaseStatsError::BatchNotFound(42);
//! assert!(err.is_not_found());
//!
//! let err: CaseStatsError = ReportError::Render("backend closed".to_string()).into();
//! assert_eq!(err.error_code(), "REPORT_FAILED");
//! ```

pub mod case_stats;
pub mod narrative;
pub mod report;

pub use case_stats::CaseStatsError;
pub use narrative::NarrativeError;
pub use report::ReportError;

/// Result type alias for import and batch operations
pub type CaseStatsResult<T> = Result<T, CaseStatsError>;

/// Result type alias for chart and deck generation
pub type ReportResult<T> = Result<T, ReportError>;

/// Result type alias for narrative workflow calls
pub type NarrativeResult<T> = Result<T, NarrativeError>;
