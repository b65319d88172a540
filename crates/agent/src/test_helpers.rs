//! Shared test doubles for the agent crate.

use async_trait::async_trait;
use corechat_core::error::{IdentityError, MemoryError, ProviderError};
use corechat_core::identity::IdentitySource;
use corechat_core::memory::{EventQuery, EventStore, NewEvent, StoredEvent};
use corechat_core::message::Message;
use corechat_core::provider::{Provider, ProviderRequest, ProviderResponse, StreamChunk};
use corechat_core::runtime::{AgentRuntime, InvocationRequest};
use std::sync::Mutex;

/// A runtime that replies with scripted bodies, one per call.
///
/// Records every request it receives. Panics if more calls are made than
/// bodies provided.
pub struct ScriptedRuntime {
    replies: Mutex<Vec<Result<Vec<u8>, ProviderError>>>,
    requests: Mutex<Vec<InvocationRequest>>,
}

impl ScriptedRuntime {
    pub fn new(replies: Vec<Result<Vec<u8>, ProviderError>>) -> Self {
        Self {
            replies: Mutex::new(replies),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Runtime that streams the given fragments once.
    pub fn streaming(fragments: &[&str]) -> Self {
        Self::new(vec![Ok(event_stream(fragments).into_bytes())])
    }

    pub fn failing(error: ProviderError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn requests(&self) -> Vec<InvocationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentRuntime for ScriptedRuntime {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn invoke(&self, request: InvocationRequest) -> Result<Vec<u8>, ProviderError> {
        self.requests.lock().unwrap().push(request);
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            panic!("ScriptedRuntime: no more replies");
        }
        replies.remove(0)
    }
}

/// Render fragments as a runtime event stream body.
pub fn event_stream(fragments: &[&str]) -> String {
    fragments
        .iter()
        .map(|text| {
            let event = serde_json::json!({
                "event": { "contentBlockDelta": { "delta": { "text": text } } }
            });
            format!("data: {event}\n")
        })
        .collect()
}

/// An event store whose every call fails.
pub struct BrokenStore;

#[async_trait]
impl EventStore for BrokenStore {
    fn name(&self) -> &str {
        "broken"
    }

    async fn create_event(&self, _event: NewEvent) -> Result<(), MemoryError> {
        Err(MemoryError::Storage("store unreachable".into()))
    }

    async fn list_events(&self, _query: EventQuery) -> Result<Vec<StoredEvent>, MemoryError> {
        Err(MemoryError::QueryFailed("store unreachable".into()))
    }
}

pub struct FixedIdentity(pub &'static str);

#[async_trait]
impl IdentitySource for FixedIdentity {
    async fn caller_user_id(&self) -> Result<String, IdentityError> {
        Ok(self.0.to_string())
    }
}

pub struct FailingIdentity;

#[async_trait]
impl IdentitySource for FailingIdentity {
    async fn caller_user_id(&self) -> Result<String, IdentityError> {
        Err(IdentityError::Unavailable("no credentials".into()))
    }
}

/// A provider that streams scripted fragment lists, one list per call.
pub struct SequentialMockProvider {
    replies: Mutex<Vec<Vec<String>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl SequentialMockProvider {
    pub fn new(replies: Vec<Vec<&str>>) -> Self {
        Self {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|r| r.into_iter().map(str::to_string).collect())
                    .collect(),
            ),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_reply(&self, request: ProviderRequest) -> Vec<String> {
        self.requests.lock().unwrap().push(request);
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            panic!("SequentialMockProvider: no more replies");
        }
        replies.remove(0)
    }
}

#[async_trait]
impl Provider for SequentialMockProvider {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let text = self.next_reply(request).concat();
        Ok(ProviderResponse {
            message: Message::assistant(text),
            usage: None,
            model: "mock".into(),
        })
    }

    async fn stream(
        &self,
        request: ProviderRequest,
    ) -> Result<tokio::sync::mpsc::Receiver<Result<StreamChunk, ProviderError>>, ProviderError> {
        let fragments = self.next_reply(request);
        let (tx, rx) = tokio::sync::mpsc::channel(fragments.len() + 1);
        for fragment in fragments {
            let _ = tx
                .send(Ok(StreamChunk { content: Some(fragment), ..Default::default() }))
                .await;
        }
        let _ = tx.send(Ok(StreamChunk { done: true, ..Default::default() })).await;
        Ok(rx)
    }
}

/// A provider that refuses every request.
pub struct UnauthorizedProvider;

#[async_trait]
impl Provider for UnauthorizedProvider {
    fn name(&self) -> &str {
        "unauthorized"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        Err(ProviderError::AuthenticationFailed("bad key".into()))
    }
}
