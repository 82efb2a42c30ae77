pub mod case_stats;
pub mod health;
pub mod response;

pub use response::{ApiError, ApiResponse, ApiResult};
