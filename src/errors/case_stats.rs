//! Case statistics error types
//!
//! Covers the import pipeline end to end: spreadsheet validation, batch
//! lookups, report artifacts and the storage layer underneath.
//!
//! # Examples
//!
//! ```rust
//! use casestats::errors::CaseStatsError;
//!
//! let err = CaseStatsError::InvalidHeader;
//! assert!(err.is_client_error());
//!
//! let err = CaseStatsError::ReportFileNotFound(7);
//! assert_eq!(err.error_code(), "NOT_FOUND");
//! ```

use thiserror::Error;

use super::ReportError;

/// Import, batch and report lookup errors
#[derive(Error, Debug)]
pub enum CaseStatsError {
    /// No file or a zero-length upload
    #[error("Please upload an Excel file")]
    EmptyFile,

    /// The workbook could not be opened or read
    #[error("Excel parsing failed: {0}")]
    InvalidSpreadsheet(String),

    /// First sheet missing or with fewer than two rows
    #[error("Excel content is empty")]
    EmptySheet,

    /// Header row differs from the required eight labels
    #[error("Excel header does not match, expected: 序号，时间，区，街镇，登记来源，类型，登记时间，当前办理状态")]
    InvalidHeader,

    /// Every data row was blank
    #[error("No valid detail records found in Excel")]
    NoValidRows,

    /// Batch not found by ID
    #[error("Batch {0} not found")]
    BatchNotFound(i32),

    /// Batch exists but has no report file on disk
    #[error("Report file for batch {0} not found")]
    ReportFileNotFound(i32),

    /// Chart rendering or deck assembly failed
    #[error("Report generation failed: {0}")]
    ReportGeneration(#[from] ReportError),

    /// Blocking worker panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CaseStatsError {
    /// Check if this is a client error (400-series)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CaseStatsError::EmptyFile
                | CaseStatsError::InvalidSpreadsheet(_)
                | CaseStatsError::EmptySheet
                | CaseStatsError::InvalidHeader
                | CaseStatsError::NoValidRows
        )
    }

    /// Check if this is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CaseStatsError::BatchNotFound(_) | CaseStatsError::ReportFileNotFound(_)
        )
    }

    /// Check if this is a server error (500-series)
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error() && !self.is_not_found()
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            CaseStatsError::BatchNotFound(_) | CaseStatsError::ReportFileNotFound(_) => {
                "NOT_FOUND"
            }
            CaseStatsError::EmptyFile
            | CaseStatsError::InvalidSpreadsheet(_)
            | CaseStatsError::EmptySheet
            | CaseStatsError::InvalidHeader
            | CaseStatsError::NoValidRows => "VALIDATION_FAILED",
            CaseStatsError::ReportGeneration(_) => "REPORT_FAILED",
            CaseStatsError::Database(_) => "DATABASE_ERROR",
            CaseStatsError::Io(_) => "IO_ERROR",
            CaseStatsError::Json(_) => "JSON_ERROR",
            CaseStatsError::Task(_) => "OPERATION_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_header_is_validation() {
        let err = CaseStatsError::InvalidHeader;
        assert!(err.is_client_error());
        assert!(!err.is_not_found());
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
        assert!(err.to_string().contains("当前办理状态"));
    }

    #[test]
    fn test_batch_not_found() {
        let err = CaseStatsError::BatchNotFound(42);
        assert_eq!(err.to_string(), "Batch 42 not found");
        assert!(err.is_not_found());
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_report_failure_is_server_error() {
        let err: CaseStatsError = ReportError::Layout("image panel too small".to_string()).into();
        assert!(err.is_server_error());
        assert_eq!(
            err.to_string(),
            "Report generation failed: Layout error: image panel too small"
        );
    }
}
