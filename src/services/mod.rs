pub mod batch_store;
pub mod case_stats_service;

pub use batch_store::{BatchAnalysis, BatchStore, ReportArtifacts, ReportFile};
pub use case_stats_service::{CaseStatsService, ImportSummary};
