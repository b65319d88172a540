//! AgentCore runtime — invokes a hosted agent via `InvokeAgentRuntime`.
//!
//! The runtime is addressed by its resource identifier plus a deployment
//! qualifier, and by the session id so the hosted agent can keep its own
//! session-scoped state. The streamed response body is collected whole and
//! handed back undecoded.

use async_trait::async_trait;
use aws_sdk_bedrockagentcore::Client;
use aws_sdk_bedrockagentcore::error::DisplayErrorContext;
use aws_sdk_bedrockagentcore::primitives::Blob;
use corechat_core::error::ProviderError;
use corechat_core::runtime::{AgentRuntime, InvocationRequest};
use tracing::debug;

/// A hosted agent runtime on Bedrock AgentCore.
pub struct AgentCoreRuntime {
    client: Client,
    runtime_arn: String,
}

impl AgentCoreRuntime {
    pub fn new(client: Client, runtime_arn: impl Into<String>) -> Self {
        Self {
            client,
            runtime_arn: runtime_arn.into(),
        }
    }
}

#[async_trait]
impl AgentRuntime for AgentCoreRuntime {
    fn name(&self) -> &str {
        "agentcore"
    }

    async fn invoke(&self, request: InvocationRequest) -> Result<Vec<u8>, ProviderError> {
        let payload = serde_json::to_vec(&request.payload)
            .map_err(|e| ProviderError::InvalidRequest(e.to_string()))?;

        debug!(
            runtime = %self.runtime_arn,
            qualifier = %request.qualifier,
            session = %request.session_id,
            prompt_chars = request.prompt().len(),
            "Invoking agent runtime"
        );

        let output = self
            .client
            .invoke_agent_runtime()
            .agent_runtime_arn(&self.runtime_arn)
            .runtime_session_id(request.session_id.as_str())
            .qualifier(&request.qualifier)
            .payload(Blob::new(payload))
            .send()
            .await
            .map_err(|e| ProviderError::InvocationFailed(DisplayErrorContext(&e).to_string()))?;

        let body = output
            .response
            .collect()
            .await
            .map_err(|e| ProviderError::StreamInterrupted(e.to_string()))?;

        Ok(body.into_bytes().to_vec())
    }
}
