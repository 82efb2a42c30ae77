pub mod case_stats_batch;
pub mod case_stats_detail;
