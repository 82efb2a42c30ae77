//! Parsing of workflow responses delivered as server-sent events.

use serde_json::{json, Value};
use tracing::{debug, warn};

/// Summary of a streamed workflow run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkflowRun {
    pub outputs: Option<Value>,
    pub status: Option<String>,
    pub workflow_run_id: Option<String>,
    pub event_count: usize,
    pub parse_errors: usize,
}

impl WorkflowRun {
    pub fn into_value(self) -> Value {
        json!({
            "outputs": self.outputs,
            "workflow_status": self.status,
            "workflow_run_id": self.workflow_run_id,
            "event_count": self.event_count,
        })
    }
}

/// Scan an SSE body for `data: ` lines and capture the `workflow_finished` event.
///
/// Lines that are not valid JSON are counted and skipped.
pub fn parse_workflow_sse(body: &str) -> WorkflowRun {
    let mut run = WorkflowRun::default();
    let normalized = body.replace("\r\n", "\n");

    for block in normalized.split("\n\n") {
        for line in block.lines() {
            let Some(payload) = line.strip_prefix("data: ") else {
                continue;
            };
            let payload = payload.trim();
            if payload.is_empty() {
                continue;
            }

            let event: Value = match serde_json::from_str(payload) {
                Ok(event) => event,
                Err(err) => {
                    run.parse_errors += 1;
                    warn!("Skipping malformed SSE event: {}", err);
                    continue;
                }
            };
            run.event_count += 1;

            if event.get("event").and_then(Value::as_str) != Some("workflow_finished") {
                continue;
            }
            if let Some(data) = event.get("data").filter(|d| d.is_object()) {
                run.outputs = data.get("outputs").cloned();
                run.status = data.get("status").and_then(Value::as_str).map(str::to_string);
                run.workflow_run_id = event
                    .get("workflow_run_id")
                    .and_then(Value::as_str)
                    .map(str::to_string);
            }
        }
    }

    debug!(
        "Parsed workflow stream: {} events, outputs present: {}",
        run.event_count,
        run.outputs.is_some()
    );
    run
}
