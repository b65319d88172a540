//! In-memory event store — useful for testing and ephemeral sessions.

use async_trait::async_trait;
use chrono::SecondsFormat;
use corechat_core::error::MemoryError;
use corechat_core::memory::{EventQuery, EventStore, NewEvent, StoredEvent, StoredPayload};
use std::sync::Arc;
use tokio::sync::RwLock;

/// An in-memory event store that keeps events in a Vec.
/// Useful for testing and sessions where persistence isn't needed.
pub struct InMemoryEventStore {
    events: Arc<RwLock<Vec<NewEvent>>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Total number of stored events across all sessions.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    fn name(&self) -> &str { "in_memory" }

    async fn create_event(&self, event: NewEvent) -> Result<(), MemoryError> {
        let mut events = self.events.write().await;
        // Idempotent on client token, like the remote service
        if events.iter().any(|e| e.client_token == event.client_token) {
            return Ok(());
        }
        events.push(event);
        Ok(())
    }

    async fn list_events(&self, query: EventQuery) -> Result<Vec<StoredEvent>, MemoryError> {
        let events = self.events.read().await;

        let results = events
            .iter()
            .filter(|e| {
                e.memory_id == query.memory_id
                    && e.session_id == query.session_id
                    && e.actor.actor_id() == query.actor_id
            })
            .map(|e| StoredEvent {
                timestamp: Some(e.timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)),
                payload: if query.include_payloads {
                    vec![StoredPayload {
                        text: Some(e.text.clone()),
                        role: Some(e.actor.tag().to_string()),
                    }]
                } else {
                    Vec::new()
                },
            })
            .collect();

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use corechat_core::memory::Actor;

    fn test_event(session: &str, actor: Actor, text: &str, token: &str) -> NewEvent {
        NewEvent {
            memory_id: "mem".into(),
            actor,
            session_id: session.into(),
            timestamp: Utc::now(),
            client_token: token.into(),
            text: text.into(),
        }
    }

    fn query(session: &str, actor: Actor) -> EventQuery {
        EventQuery {
            memory_id: "mem".into(),
            session_id: session.into(),
            actor_id: actor.actor_id().into(),
            include_payloads: true,
        }
    }

    #[tokio::test]
    async fn store_and_list() {
        let store = InMemoryEventStore::new();
        store.create_event(test_event("s1", Actor::User, "Hello", "t1")).await.unwrap();

        let events = store.list_events(query("s1", Actor::User)).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].payload[0].text.as_deref(), Some("Hello"));
        assert_eq!(events[0].payload[0].role.as_deref(), Some("USER"));
        assert!(events[0].timestamp.as_deref().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn list_is_partitioned_by_session_and_actor() {
        let store = InMemoryEventStore::new();
        store.create_event(test_event("s1", Actor::User, "a", "t1")).await.unwrap();
        store.create_event(test_event("s1", Actor::Assistant, "b", "t2")).await.unwrap();
        store.create_event(test_event("s2", Actor::User, "c", "t3")).await.unwrap();

        assert_eq!(store.list_events(query("s1", Actor::User)).await.unwrap().len(), 1);
        assert_eq!(store.list_events(query("s1", Actor::Assistant)).await.unwrap().len(), 1);
        assert_eq!(store.list_events(query("s2", Actor::Assistant)).await.unwrap().len(), 0);
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn repeated_client_token_is_stored_once() {
        let store = InMemoryEventStore::new();
        store.create_event(test_event("s1", Actor::User, "a", "same")).await.unwrap();
        store.create_event(test_event("s1", Actor::User, "a", "same")).await.unwrap();
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn payloads_can_be_excluded() {
        let store = InMemoryEventStore::new();
        store.create_event(test_event("s1", Actor::User, "a", "t1")).await.unwrap();
        let mut q = query("s1", Actor::User);
        q.include_payloads = false;
        let events = store.list_events(q).await.unwrap();
        assert!(events[0].payload.is_empty());
    }
}
