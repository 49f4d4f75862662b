/// HTTP client for the licensing backend.
///
/// Two endpoints: `GET {base}/requirements` for the rule catalog and `POST {base}/assess`
/// for a profile assessment. There is no retry policy; a failed call is reported once.
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::model::{Profile, Rule};
use crate::orchestrator::LicensingBackend;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_ERROR_BODY_BYTES: usize = 8 * 1024;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash.
    pub base_url: String,
    pub timeout: Duration,
    /// Upper bound on how much of an error body is kept for logging.
    pub max_error_body_bytes: usize,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_error_body_bytes(mut self, bytes: usize) -> Self {
        self.max_error_body_bytes = bytes;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_error_body_bytes: DEFAULT_MAX_ERROR_BODY_BYTES,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid response JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },
}

/// Body of a successful `POST /assess`.
///
/// `report` stays raw JSON here; the orchestrator decides whether it is usable.
#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentResponse {
    pub matches: Vec<String>,
    #[serde(default)]
    pub report: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct CatalogEnvelope {
    #[serde(default)]
    requirements: Vec<Rule>,
}

#[derive(Clone)]
pub struct LicensingClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl LicensingClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent("licensing-advisor")
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn get_requirements(&self) -> Result<Vec<Rule>, ClientError> {
        let url = format!("{}/requirements", self.config.base_url);
        let resp = self.http.get(&url).send().await?;
        let envelope: CatalogEnvelope = self.parse_json_response(resp).await?;
        debug!(rules = envelope.requirements.len(), "catalog fetched");
        Ok(envelope.requirements)
    }

    pub async fn assess(&self, profile: &Profile) -> Result<AssessmentResponse, ClientError> {
        let url = format!("{}/assess", self.config.base_url);
        let resp = self.http.post(&url).json(profile).send().await?;
        self.parse_json_response(resp).await
    }

    async fn parse_json_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if !status.is_success() {
            let url = resp.url().to_string();
            let body = read_limited_text(resp, self.config.max_error_body_bytes).await;
            warn!(status = status.as_u16(), url, body, "backend returned an error status");
            return Err(ClientError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            });
        }

        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl LicensingBackend for LicensingClient {
    async fn fetch_catalog(&self) -> Result<Vec<Rule>, ClientError> {
        self.get_requirements().await
    }

    async fn submit_assessment(&self, profile: &Profile) -> Result<AssessmentResponse, ClientError> {
        self.assess(profile).await
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
            warn!(error = %e, "failed to read error body");
            "<failed to read error body>".to_string()
        }
    }
}
