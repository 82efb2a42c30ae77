use std::{collections::HashMap, path::PathBuf, time::Duration};

pub const ENV_DIFY_BASE_URL: &str = "CASESTATS_DIFY_BASE_URL";
pub const ENV_DIFY_API_KEY: &str = "CASESTATS_DIFY_API_KEY";
pub const ENV_DIFY_WORKFLOW_ENDPOINT: &str = "CASESTATS_DIFY_WORKFLOW_ENDPOINT";
pub const ENV_DIFY_USER: &str = "CASESTATS_DIFY_USER";
pub const ENV_DIFY_TIMEOUT_SECS: &str = "CASESTATS_DIFY_TIMEOUT_SECS";
pub const ENV_REPORT_DIR: &str = "CASESTATS_REPORT_DIR";

/// Connection settings for the narrative workflow service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DifyConfig {
    pub base_url: String,
    pub api_key: String,
    pub workflow_endpoint: String,
    pub user: String,
    pub timeout: Duration,
}

impl DifyConfig {
    pub fn workflow_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.workflow_endpoint
        )
    }
}

/// Pipeline configuration loaded from environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseStatsConfig {
    pub report_dir: PathBuf,
    /// `None` when no API key is configured; reports then use default text.
    pub dify: Option<DifyConfig>,
}

impl Default for CaseStatsConfig {
    fn default() -> Self {
        Self::from_map(&HashMap::new())
    }
}

impl CaseStatsConfig {
    pub fn from_env() -> Self {
        let mut values = HashMap::new();
        for key in Self::tracked_keys() {
            if let Ok(value) = std::env::var(key) {
                values.insert(key.to_string(), value);
            }
        }
        Self::from_map(&values)
    }

    pub fn from_map(values: &HashMap<String, String>) -> Self {
        fn value(values: &HashMap<String, String>, key: &str) -> Option<String> {
            values
                .get(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        }

        fn read(values: &HashMap<String, String>, key: &str, default: &str) -> String {
            value(values, key).unwrap_or_else(|| default.to_string())
        }

        let timeout_secs = value(values, ENV_DIFY_TIMEOUT_SECS)
            .and_then(|value| value.parse().ok())
            .unwrap_or(120);

        let dify = value(values, ENV_DIFY_API_KEY).map(|api_key| DifyConfig {
            base_url: read(values, ENV_DIFY_BASE_URL, "http://localhost:5001/v1"),
            api_key,
            workflow_endpoint: read(values, ENV_DIFY_WORKFLOW_ENDPOINT, "/workflows/run"),
            user: read(values, ENV_DIFY_USER, "casestats"),
            timeout: Duration::from_secs(timeout_secs),
        });

        Self {
            report_dir: PathBuf::from(read(values, ENV_REPORT_DIR, "reports")),
            dify,
        }
    }

    pub fn with_report_dir(mut self, report_dir: impl Into<PathBuf>) -> Self {
        self.report_dir = report_dir.into();
        self
    }

    fn tracked_keys() -> [&'static str; 6] {
        [
            ENV_DIFY_BASE_URL,
            ENV_DIFY_API_KEY,
            ENV_DIFY_WORKFLOW_ENDPOINT,
            ENV_DIFY_USER,
            ENV_DIFY_TIMEOUT_SECS,
            ENV_REPORT_DIR,
        ]
    }
}
