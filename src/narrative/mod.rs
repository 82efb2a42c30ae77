//! Slide titles and summaries, optionally written by an external LLM workflow.

pub mod dify;
pub mod extract;
pub mod sse;

pub use dify::DifyClient;
pub use extract::extract_field;
pub use sse::{parse_workflow_sse, WorkflowRun};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::NarrativeResult;
use crate::stats::Analysis;

/// Produces the raw workflow response for an analysis.
#[async_trait]
pub trait NarrativeSource: Send + Sync {
    async fn summarize(&self, analysis: &Analysis) -> NarrativeResult<Value>;
}

/// Text for the four content slides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeText {
    pub month_title: String,
    pub month_summary: String,
    pub street_title: String,
    pub street_summary: String,
    pub type_title: String,
    pub type_summary: String,
    pub district_title: String,
    pub district_summary: String,
}

impl Default for NarrativeText {
    fn default() -> Self {
        Self {
            month_title: "近6个月纠纷量趋势分析".to_string(),
            month_summary: "1）近6个月纠纷量变化见图；2）建议结合环比变化持续跟踪重点月份。".to_string(),
            street_title: "街镇高发案分布分析".to_string(),
            street_summary: "1）街镇高发Top10见图；2）建议对高发街镇开展专项治理。".to_string(),
            type_title: "纠纷类型分布分析".to_string(),
            type_summary: "1）类型高发Top10见图；2）建议聚焦头部类型强化源头治理。".to_string(),
            district_title: "各区办理状态分布分析".to_string(),
            district_summary: "1）各区办理状态分布见图；2）建议跟踪办理中事项提升闭环效率。".to_string(),
        }
    }
}

impl NarrativeText {
    /// Overlay whatever fields the response provides on top of the defaults.
    pub fn from_response(response: &Value) -> Self {
        let mut text = Self::default();
        {
            let fields: [(&mut String, [&str; 2]); 8] = [
                (&mut text.month_title, ["month_title", "monthTitle"]),
                (&mut text.month_summary, ["month_summary", "monthSummary"]),
                (&mut text.street_title, ["street_title", "streetTitle"]),
                (&mut text.street_summary, ["street_summary", "streetSummary"]),
                (&mut text.type_title, ["type_title", "typeTitle"]),
                (&mut text.type_summary, ["type_summary", "typeSummary"]),
                (&mut text.district_title, ["district_title", "districtTitle"]),
                (&mut text.district_summary, ["district_summary", "districtSummary"]),
            ];
            for (slot, keys) in fields {
                if let Some(value) = extract_field(response, &keys) {
                    *slot = value;
                }
            }
        }
        text
    }
}

/// Ask `source` for narrative text, falling back to the defaults on any failure.
pub async fn resolve_narrative(
    source: Option<&dyn NarrativeSource>,
    analysis: &Analysis,
) -> NarrativeText {
    let Some(source) = source else {
        info!("No narrative workflow configured, using default slide text");
        return NarrativeText::default();
    };

    match source.summarize(analysis).await {
        Ok(response) => NarrativeText::from_response(&response),
        Err(err) => {
            warn!("Narrative workflow failed, using default slide text: {}", err);
            NarrativeText::default()
        }
    }
}
