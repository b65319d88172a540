//! The agent invocation client.
//!
//! One chat turn: replay history from memory, assemble the prompt, invoke
//! the remote runtime, decode its event stream, then persist both turns.

use std::sync::Arc;
use corechat_core::error::{MemoryError, ProviderError};
use corechat_core::message::{Role, Turn};
use corechat_core::prompt::{assemble_prompt, DEFAULT_HISTORY_WINDOW};
use corechat_core::runtime::{AgentRuntime, InvocationRequest, DEFAULT_QUALIFIER};
use corechat_core::session::SessionId;
use corechat_memory::ConversationMemory;
use tracing::{debug, info, warn};

use crate::stream::decode_body;

/// Relays chat turns to a hosted agent runtime.
pub struct AgentClient {
    /// The remote runtime
    runtime: Arc<dyn AgentRuntime>,

    /// Conversation memory (possibly disabled)
    memory: ConversationMemory,

    /// Number of past turns replayed into the prompt
    history_window: usize,

    /// Deployment qualifier
    qualifier: String,
}

impl AgentClient {
    pub fn new(runtime: Arc<dyn AgentRuntime>, memory: ConversationMemory) -> Self {
        Self {
            runtime,
            memory,
            history_window: DEFAULT_HISTORY_WINDOW,
            qualifier: DEFAULT_QUALIFIER.to_string(),
        }
    }

    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = qualifier.into();
        self
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Send one message and return the full reply.
    ///
    /// `on_text` sees each fragment in arrival order. Memory failures are
    /// logged and otherwise ignored; an invocation failure is returned and
    /// nothing is persisted.
    pub async fn chat<F>(
        &self,
        message: &str,
        session: &SessionId,
        model: Option<&str>,
        on_text: F,
    ) -> Result<String, ProviderError>
    where
        F: FnMut(&str),
    {
        let history = match self.memory.fetch(session).await {
            Ok(turns) => turns,
            Err(e) => {
                warn!(error = %e, "Could not load conversation history, continuing without it");
                Vec::new()
            }
        };

        let prompt = assemble_prompt(&history, message, self.history_window);
        debug!(
            runtime = self.runtime.name(),
            history = history.len(),
            prompt_chars = prompt.len(),
            "Invoking agent runtime"
        );

        let request = InvocationRequest::new(session.clone(), prompt, model)
            .with_qualifier(self.qualifier.clone());
        let body = self.runtime.invoke(request).await?;

        let text = decode_body(&String::from_utf8_lossy(&body), on_text);
        if text.is_empty() {
            info!("Agent runtime returned no text");
        }

        self.remember(session, Role::User, message).await;
        self.remember(session, Role::Assistant, &text).await;

        Ok(text)
    }

    /// The stored history for `session`, oldest first.
    pub async fn history(&self, session: &SessionId) -> Result<Vec<Turn>, MemoryError> {
        self.memory.fetch(session).await
    }

    async fn remember(&self, session: &SessionId, role: Role, content: &str) {
        if let Err(e) = self.memory.append(session, role, content).await {
            warn!(role = %role, error = %e, "Could not persist conversation turn");
        }
    }
}
