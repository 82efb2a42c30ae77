//! Report generation error types

use thiserror::Error;

/// Chart rendering and slide-deck assembly errors
#[derive(Error, Debug)]
pub enum ReportError {
    /// Drawing backend failed while rasterizing a chart
    #[error("Render error: {0}")]
    Render(String),

    /// Slide layout could not be computed
    #[error("Layout error: {0}")]
    Layout(String),

    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Deck archive could not be written
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Slide part XML could not be written
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    pub fn render<E: std::fmt::Display>(err: E) -> Self {
        ReportError::Render(err.to_string())
    }
}
