use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::CommonError;

pub const DEFAULT_BASE_URL: &str = "https://www.worldcubeassociation.org";

#[derive(Clone, Debug)]
pub struct WcaClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub max_error_body_bytes: usize,
}

impl Default for WcaClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(5),
            max_error_body_bytes: 8 * 1024,
        }
    }
}

impl WcaClientConfig {
    /// Optional:
    /// - `WCA_BASE_URL` (default: the public WCA website)
    /// - `WCA_TIMEOUT_SECS` (default: 5)
    /// - `WCA_MAX_ERROR_BODY_BYTES` (default: 8192)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = std::env::var("WCA_BASE_URL").unwrap_or(defaults.base_url);

        let timeout = std::env::var("WCA_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|&n| n > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let max_error_body_bytes = std::env::var("WCA_MAX_ERROR_BODY_BYTES")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(defaults.max_error_body_bytes);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            max_error_body_bytes,
        }
    }

    pub fn api_url(&self) -> String {
        format!("{}/api/v0", self.base_url)
    }
}

/// Body of `GET /api/v0/search`. Hits are kept as raw JSON so that one
/// malformed entry does not poison the whole batch.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub result: Vec<serde_json::Value>,
}

#[derive(Clone)]
pub struct WcaClient {
    config: WcaClientConfig,
    http: reqwest::Client,
}

impl WcaClient {
    pub fn new(config: WcaClientConfig) -> Result<Self, CommonError> {
        let http = reqwest::Client::builder()
            .user_agent("wca-search")
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &WcaClientConfig {
        &self.config
    }

    /// Runs the site-wide omnisearch. Single attempt, bounded by the configured timeout.
    pub async fn search(&self, query: &str) -> Result<SearchResponse, CommonError> {
        let url = format!("{}/search", self.config.api_url());
        debug!(url, query, "querying wca search");
        let resp = self
            .http
            .get(&url)
            .query(&[("q", query)])
            .timeout(self.config.timeout)
            .send()
            .await?;
        Self::parse_json_response(resp, self.config.max_error_body_bytes).await
    }

    async fn parse_json_response<T: for<'de> Deserialize<'de>>(
        resp: reqwest::Response,
        max_error_body_bytes: usize,
    ) -> Result<T, CommonError> {
        let status = resp.status();
        if status.is_success() {
            let text = resp.text().await?;
            return Ok(serde_json::from_str(&text)?);
        }
        let body = read_limited_text(resp, max_error_body_bytes).await;
        Err(CommonError::Upstream { status, body })
    }
}

async fn read_limited_text(resp: reqwest::Response, max_bytes: usize) -> String {
    match resp.bytes().await {
        Ok(mut b) => {
            if b.len() > max_bytes {
                b.truncate(max_bytes);
            }
            String::from_utf8_lossy(&b).to_string()
        }
        Err(e) => {
            warn!(error = %e, "failed to read upstream error body");
            "<failed to read error body>".to_string()
        }
    }
}
