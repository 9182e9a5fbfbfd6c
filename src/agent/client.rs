use serde::Serialize;
use serde_json::Value;

use crate::config;
use crate::review::SYSTEM_PROMPT;

use super::{AgentClient, AgentError, AgentResponse};

/// Default request timeout. Structured extraction on a small model is
/// usually seconds; the margin covers cold model loads.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// HTTP client for the review-analysis agent service.
///
/// Speaks a LangGraph-style invoke API: one POST with the message list,
/// the full agent state back as JSON. The response body is passed to
/// [`AgentResponse::from_raw`] untouched — absorbing its shape is the
/// extractor's job, not the transport's.
pub struct HttpAgentClient {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpAgentClient {
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        }
    }

    /// Client configured from `MLSERVE_AGENT_URL` / `MLSERVE_AGENT_MODEL`.
    pub fn from_env() -> Self {
        Self::new(
            &config::agent_base_url(),
            &config::agent_model(),
            DEFAULT_TIMEOUT_SECS,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Request body for the agent invoke endpoint.
#[derive(Serialize)]
struct AgentInvokeRequest<'a> {
    model: &'a str,
    system: &'a str,
    messages: Vec<AgentMessage<'a>>,
}

#[derive(Serialize)]
struct AgentMessage<'a> {
    role: &'a str,
    content: &'a str,
}

impl AgentClient for HttpAgentClient {
    fn invoke(&self, prompt: &str) -> Result<AgentResponse, AgentError> {
        let url = format!("{}/invoke", self.base_url);
        let body = AgentInvokeRequest {
            model: &self.model,
            system: SYSTEM_PROMPT,
            messages: vec![AgentMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                AgentError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                AgentError::Timeout(self.timeout_secs)
            } else {
                AgentError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AgentError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: Value = response
            .json()
            .map_err(|e| AgentError::ResponseParsing(e.to_string()))?;

        Ok(AgentResponse::from_raw(parsed))
    }
}
