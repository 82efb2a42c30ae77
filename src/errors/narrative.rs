//! Narrative workflow error types
//!
//! These never reach API callers: the report assembler substitutes default
//! text whenever the workflow call fails.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NarrativeError {
    /// Transport-level failure talking to the workflow service
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Workflow service answered with a non-success status
    #[error("Workflow service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Stream finished without a workflow_finished event
    #[error("Workflow response did not contain outputs")]
    MissingOutputs,

    /// No workflow service is configured
    #[error("Narrative workflow is not configured")]
    NotConfigured,
}
