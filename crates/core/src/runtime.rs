//! AgentRuntime trait — the remote hosted agent that answers prompts.
//!
//! The runtime is addressed by a session id so it can keep its own
//! session-scoped state. Its response body is a newline-delimited event
//! stream which the agent crate decodes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::ProviderError;
use crate::session::SessionId;

/// Deployment qualifier targeted when none is configured.
pub const DEFAULT_QUALIFIER: &str = "DEFAULT";

/// JSON body sent to the runtime: `{"input": {"prompt": ..., "model"?: ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationPayload {
    pub input: InvocationInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationInput {
    pub prompt: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// A single invocation of the agent runtime.
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    pub session_id: SessionId,
    pub qualifier: String,
    pub payload: InvocationPayload,
}

impl InvocationRequest {
    pub fn new(session_id: SessionId, prompt: impl Into<String>, model: Option<&str>) -> Self {
        Self {
            session_id,
            qualifier: DEFAULT_QUALIFIER.to_string(),
            payload: InvocationPayload {
                input: InvocationInput {
                    prompt: prompt.into(),
                    model: model.map(str::to_string),
                },
            },
        }
    }

    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = qualifier.into();
        self
    }

    pub fn prompt(&self) -> &str {
        &self.payload.input.prompt
    }
}

/// The core AgentRuntime trait.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// A human-readable name for this runtime (e.g., "agentcore").
    fn name(&self) -> &str;

    /// Invoke the runtime and return the raw response body.
    async fn invoke(&self, request: InvocationRequest) -> std::result::Result<Vec<u8>, ProviderError>;
}
