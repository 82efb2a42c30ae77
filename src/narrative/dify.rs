use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use super::sse::parse_workflow_sse;
use super::NarrativeSource;
use crate::config::DifyConfig;
use crate::errors::{NarrativeError, NarrativeResult};
use crate::stats::Analysis;

/// Client for a Dify workflow that writes the report narrative.
#[derive(Clone)]
pub struct DifyClient {
    client: reqwest::Client,
    config: DifyConfig,
}

impl DifyClient {
    pub fn new(config: DifyConfig) -> NarrativeResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &DifyConfig {
        &self.config
    }

    fn headers(&self, trace_id: &str) -> NarrativeResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.config.api_key))
            .map_err(|_| NarrativeError::NotConfigured)?;
        headers.insert(AUTHORIZATION, bearer);
        if let Ok(value) = HeaderValue::from_str(trace_id) {
            headers.insert("X-Trace-Id", value);
        }
        Ok(headers)
    }
}

/// Request body for a streaming workflow run over the four views.
pub fn workflow_request(analysis: &Analysis, user: &str, trace_id: &str) -> NarrativeResult<Value> {
    Ok(json!({
        "inputs": {
            "monthly_trend_json": serde_json::to_string(&analysis.time_trend)?,
            "street_top10_json": serde_json::to_string(&analysis.street_top10)?,
            "type_top10_json": serde_json::to_string(&analysis.type_top10)?,
            "district_status_json": serde_json::to_string(&analysis.district_status)?,
        },
        "response_mode": "streaming",
        "user": user,
        "files": [],
        "trace_id": trace_id,
    }))
}

/// Interpret a workflow response body, streamed or blocking.
pub fn parse_workflow_body(body: &str) -> NarrativeResult<Value> {
    let trimmed = body.trim_start();
    if trimmed.starts_with('{') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    let run = parse_workflow_sse(body);
    if run.outputs.is_none() {
        return Err(NarrativeError::MissingOutputs);
    }
    Ok(run.into_value())
}

#[async_trait]
impl NarrativeSource for DifyClient {
    async fn summarize(&self, analysis: &Analysis) -> NarrativeResult<Value> {
        let url = self.config.workflow_url();
        let trace_id = Uuid::new_v4().to_string();
        let body = workflow_request(analysis, &self.config.user, &trace_id)?;

        info!("Requesting report narrative: url={}, trace_id={}", url, trace_id);
        let response = self
            .client
            .post(&url)
            .headers(self.headers(&trace_id)?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            warn!("Narrative workflow returned {}: trace_id={}", status, trace_id);
            return Err(NarrativeError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        info!("Narrative workflow answered: status={}, trace_id={}", status, trace_id);
        parse_workflow_body(&text)
    }
}
