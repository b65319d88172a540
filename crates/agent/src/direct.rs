//! Direct-to-model chat with a locally kept, bounded history.

use std::sync::Arc;
use corechat_core::error::ProviderError;
use corechat_core::message::Message;
use corechat_core::provider::{Provider, ProviderRequest};
use tracing::debug;

/// Number of messages kept when none is configured.
pub const DEFAULT_MAX_HISTORY: usize = 10;

pub struct DirectChat {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    history: Vec<Message>,
    max_history: usize,
}

impl DirectChat {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.7,
            history: Vec::new(),
            max_history: DEFAULT_MAX_HISTORY,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_history(mut self, max: usize) -> Self {
        self.max_history = max;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Send one message, streaming the reply through `on_text`.
    ///
    /// The user message stays in history even if the request fails; the
    /// assistant reply is recorded only when non-empty.
    pub async fn send<F>(&mut self, message: &str, mut on_text: F) -> Result<String, ProviderError>
    where
        F: FnMut(&str),
    {
        self.history.push(Message::user(message));

        let request = ProviderRequest::new(self.model.clone(), self.history.clone())
            .with_temperature(self.temperature);
        let result = self.stream_reply(request, &mut on_text).await;

        if let Ok(reply) = &result {
            if !reply.is_empty() {
                self.history.push(Message::assistant(reply.clone()));
            }
        }
        self.trim();
        result
    }

    async fn stream_reply<F>(&self, request: ProviderRequest, on_text: &mut F) -> Result<String, ProviderError>
    where
        F: FnMut(&str),
    {
        let mut rx = self.provider.stream(request).await?;
        let mut reply = String::new();

        while let Some(chunk) = rx.recv().await {
            let chunk = chunk?;
            if let Some(content) = chunk.content.as_deref() {
                if !content.is_empty() {
                    on_text(content);
                    reply.push_str(content);
                }
            }
            if chunk.done {
                break;
            }
        }

        debug!(provider = self.provider.name(), chars = reply.len(), "Direct chat reply received");
        Ok(reply)
    }

    fn trim(&mut self) {
        if self.history.len() > self.max_history {
            let excess = self.history.len() - self.max_history;
            self.history.drain(..excess);
        }
    }
}
