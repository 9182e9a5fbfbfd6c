//! LLM agent backend: invocation contract, response shapes, and the
//! defensive structured-output extractor.
//!
//! The agent's invocation result is shape-unstable across backend
//! versions — sometimes the typed analysis directly, sometimes an
//! envelope with a `structured_response` entry, sometimes only a
//! trail of `messages` with tool calls. [`AgentResponse`] is the tagged
//! union over those shapes; [`extract::extract_structured`] reduces any
//! of them to one plain map.

pub mod client;
pub mod extract;

pub use client::HttpAgentClient;
pub use extract::extract_structured;

use serde_json::Value;
use thiserror::Error;

use crate::review::ReviewAnalysis;

/// Errors from agent invocation. Shape problems in an otherwise
/// successful response are NOT errors — they degrade to an empty
/// analysis downstream.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Cannot connect to agent service at {0}")]
    Connection(String),

    #[error("Agent request timed out after {0}s")]
    Timeout(u64),

    #[error("Agent HTTP error: {0}")]
    Http(String),

    #[error("Agent returned status {status}: {body}")]
    BadStatus { status: u16, body: String },

    #[error("Cannot parse agent response body: {0}")]
    ResponseParsing(String),
}

/// Raw result of one agent invocation.
#[derive(Debug, Clone)]
pub enum AgentResponse {
    /// The backend deserialized its own structured output.
    Typed(ReviewAnalysis),
    /// An envelope whose shape varies by backend version; the extractor
    /// absorbs the variance.
    Raw(Value),
}

impl AgentResponse {
    /// Classify a raw invocation body into the tagged union.
    ///
    /// Envelope keys win over a bare analysis object, so tool-call
    /// fallbacks stay reachable for backends that return both.
    pub fn from_raw(value: Value) -> Self {
        let is_envelope = value
            .as_object()
            .map(|obj| obj.contains_key("structured_response") || obj.contains_key("messages"))
            .unwrap_or(true);

        if !is_envelope {
            if let Ok(analysis) = serde_json::from_value::<ReviewAnalysis>(value.clone()) {
                return AgentResponse::Typed(analysis);
            }
        }
        AgentResponse::Raw(value)
    }
}

/// Prediction backend for review analysis.
///
/// `invoke` blocks; handlers run it through `spawn_blocking`.
pub trait AgentClient: Send + Sync {
    fn invoke(&self, prompt: &str) -> Result<AgentResponse, AgentError>;
}

/// Mock agent for testing — returns a configurable response.
pub struct MockAgentClient {
    response: Value,
}

impl MockAgentClient {
    pub fn new(response: Value) -> Self {
        Self { response }
    }
}

impl AgentClient for MockAgentClient {
    fn invoke(&self, _prompt: &str) -> Result<AgentResponse, AgentError> {
        Ok(AgentResponse::from_raw(self.response.clone()))
    }
}
