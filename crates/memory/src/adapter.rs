//! Conversation memory adapter: turns in, turns out.
//!
//! Wraps an optional [`EventStore`]. Without a store the adapter is in a
//! silent degraded mode: appends do nothing and fetches return no history.
//! Failures are returned to the caller; deciding that persistence is
//! best-effort is the caller's business.

use std::sync::{Arc, Mutex, PoisonError};
use chrono::{DateTime, Utc};
use corechat_core::error::MemoryError;
use corechat_core::memory::{memory_id_from_arn, Actor, EventQuery, EventStore, NewEvent, StoredEvent};
use corechat_core::message::{Role, Turn};
use corechat_core::session::SessionId;
use tracing::{debug, warn};
use uuid::Uuid;

struct Backing {
    store: Arc<dyn EventStore>,
    memory_id: String,
    last_stamp_ms: Mutex<i64>,
}

impl Backing {
    /// Event times strictly increase at millisecond precision, the finest
    /// the remote store keeps, so replay order matches write order.
    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = Utc::now();
        let mut last = self.last_stamp_ms.lock().unwrap_or_else(PoisonError::into_inner);
        let millis = now.timestamp_millis().max(*last + 1);
        *last = millis;
        DateTime::from_timestamp_millis(millis).unwrap_or(now)
    }
}

/// Appends conversation turns to, and replays them from, an event store.
#[derive(Clone, Default)]
pub struct ConversationMemory {
    backing: Option<Arc<Backing>>,
}

impl ConversationMemory {
    /// Memory backed by `store`, partitioned under `memory_id`.
    pub fn new(store: Arc<dyn EventStore>, memory_id: impl Into<String>) -> Self {
        Self {
            backing: Some(Arc::new(Backing {
                store,
                memory_id: memory_id.into(),
                last_stamp_ms: Mutex::new(i64::MIN),
            })),
        }
    }

    /// Memory backed by `store`, with the id taken from a resource identifier.
    pub fn from_arn(store: Arc<dyn EventStore>, memory_arn: &str) -> Result<Self, MemoryError> {
        Ok(Self::new(store, memory_id_from_arn(memory_arn)?))
    }

    /// No memory store configured.
    pub fn disabled() -> Self {
        Self { backing: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.backing.is_some()
    }

    /// Backend name for display ("none" when disabled).
    pub fn backend_name(&self) -> &str {
        self.backing.as_deref().map_or("none", |b| b.store.name())
    }

    /// Persist one turn. Each call carries a fresh idempotency token.
    pub async fn append(&self, session: &SessionId, role: Role, content: &str) -> Result<(), MemoryError> {
        let Some(backing) = &self.backing else {
            return Ok(());
        };

        let actor = Actor::from(role);
        let event = NewEvent {
            memory_id: backing.memory_id.clone(),
            actor,
            session_id: session.to_string(),
            timestamp: backing.next_timestamp(),
            client_token: Uuid::new_v4().to_string(),
            text: content.to_string(),
        };

        debug!(
            store = backing.store.name(),
            actor = actor.actor_id(),
            chars = content.len(),
            "Appending conversation event"
        );
        backing.store.create_event(event).await
    }

    /// Replay every stored turn for `session`, oldest first.
    ///
    /// Each actor category is queried separately; a failing category is
    /// logged and skipped. An error is returned only when every category
    /// failed.
    pub async fn fetch(&self, session: &SessionId) -> Result<Vec<Turn>, MemoryError> {
        let Some(backing) = &self.backing else {
            return Ok(Vec::new());
        };

        let mut turns = Vec::new();
        let mut last_error = None;
        let mut succeeded = 0usize;

        for actor in Actor::ALL {
            let query = EventQuery {
                memory_id: backing.memory_id.clone(),
                session_id: session.to_string(),
                actor_id: actor.actor_id().to_string(),
                include_payloads: true,
            };

            match backing.store.list_events(query).await {
                Ok(events) => {
                    succeeded += 1;
                    turns.extend(events.iter().flat_map(turns_from_event));
                }
                Err(e) => {
                    warn!(actor = actor.actor_id(), error = %e, "Could not list memory events");
                    last_error = Some(e);
                }
            }
        }

        if succeeded == 0 {
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        // Stable: ties keep user events ahead of assistant events
        turns.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        debug!(turns = turns.len(), "Fetched conversation history");
        Ok(turns)
    }
}

/// Flatten one event's payloads into turns, skipping entries without text.
fn turns_from_event(event: &StoredEvent) -> Vec<Turn> {
    let timestamp = event.timestamp.clone().unwrap_or_default();
    event
        .payload
        .iter()
        .filter_map(|item| {
            let text = item.text.as_deref().filter(|t| !t.is_empty())?;
            let role = Role::from_label(item.role.as_deref().unwrap_or("USER"));
            Some(Turn::new(role, text, timestamp.clone()))
        })
        .collect()
}
