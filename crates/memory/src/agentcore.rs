//! AgentCore Memory event store.
//!
//! Writes one conversational event per turn with `CreateEvent` and reads a
//! session's events per actor with `ListEvents` (payloads included).

use async_trait::async_trait;
use aws_sdk_bedrockagentcore::Client;
use aws_sdk_bedrockagentcore::error::DisplayErrorContext;
use aws_sdk_bedrockagentcore::primitives::DateTime;
use aws_sdk_bedrockagentcore::types::{Content, Conversational, Event, PayloadType, Role};
use chrono::SecondsFormat;
use corechat_core::error::MemoryError;
use corechat_core::memory::{EventQuery, EventStore, NewEvent, StoredEvent, StoredPayload};
use tracing::debug;

/// Event store backed by the AgentCore Memory data plane.
pub struct AgentCoreEventStore {
    client: Client,
}

impl AgentCoreEventStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EventStore for AgentCoreEventStore {
    fn name(&self) -> &str { "agentcore" }

    async fn create_event(&self, event: NewEvent) -> Result<(), MemoryError> {
        let conversational = Conversational::builder()
            .content(Content::Text(event.text))
            .role(Role::from(event.actor.tag()))
            .build()
            .map_err(|e| MemoryError::Storage(e.to_string()))?;

        self.client
            .create_event()
            .memory_id(event.memory_id)
            .actor_id(event.actor.actor_id())
            .session_id(event.session_id)
            .event_timestamp(DateTime::from_millis(event.timestamp.timestamp_millis()))
            .payload(PayloadType::Conversational(conversational))
            .client_token(event.client_token)
            .send()
            .await
            .map_err(|e| MemoryError::Storage(DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }

    async fn list_events(&self, query: EventQuery) -> Result<Vec<StoredEvent>, MemoryError> {
        let output = self
            .client
            .list_events()
            .memory_id(query.memory_id)
            .session_id(query.session_id)
            .actor_id(&query.actor_id)
            .include_payloads(query.include_payloads)
            .send()
            .await
            .map_err(|e| MemoryError::QueryFailed(DisplayErrorContext(&e).to_string()))?;

        let events: Vec<StoredEvent> = output.events().iter().map(stored_event).collect();
        debug!(actor = %query.actor_id, count = events.len(), "Listed memory events");
        Ok(events)
    }
}

fn stored_event(event: &Event) -> StoredEvent {
    StoredEvent {
        timestamp: format_timestamp(event.event_timestamp()),
        payload: event.payload().iter().filter_map(stored_payload).collect(),
    }
}

/// Only conversational payloads carry turns; anything else is dropped.
fn stored_payload(payload: &PayloadType) -> Option<StoredPayload> {
    let PayloadType::Conversational(conversational) = payload else {
        return None;
    };

    Some(StoredPayload {
        text: match conversational.content() {
            Some(Content::Text(text)) => Some(text.clone()),
            _ => None,
        },
        role: Some(conversational.role().as_str().to_string()),
    })
}

/// RFC 3339, UTC, millisecond precision: lexicographic order is time order.
fn format_timestamp(ts: &DateTime) -> Option<String> {
    chrono::DateTime::from_timestamp(ts.secs(), ts.subsec_nanos())
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}
