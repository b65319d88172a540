//! EventStore trait — the remote, ordered conversation event log.
//!
//! The memory service stores one event per conversation turn, partitioned by
//! memory id, session id and actor. The store is deliberately low level:
//! payload fields are optional on the read side because the service may
//! return events that this client did not write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::error::MemoryError;
use crate::message::Role;

/// The party a stored event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Actor {
    User,
    Assistant,
}

impl Actor {
    /// Every actor category, in the order history is fetched.
    pub const ALL: [Actor; 2] = [Actor::User, Actor::Assistant];

    /// Actor id used to partition events (`user` / `assistant`).
    pub fn actor_id(&self) -> &'static str {
        match self {
            Actor::User => "user",
            Actor::Assistant => "assistant",
        }
    }

    /// Conversational role tag written into the payload (`USER` / `ASSISTANT`).
    pub fn tag(&self) -> &'static str {
        match self {
            Actor::User => "USER",
            Actor::Assistant => "ASSISTANT",
        }
    }
}

impl From<Role> for Actor {
    fn from(role: Role) -> Self {
        match role {
            Role::User => Actor::User,
            Role::Assistant => Actor::Assistant,
        }
    }
}

/// An event to append.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub memory_id: String,
    pub actor: Actor,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,

    /// Idempotency token, fresh per append
    pub client_token: String,

    pub text: String,
}

/// A query for one actor's events in a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventQuery {
    pub memory_id: String,
    pub session_id: String,
    pub actor_id: String,
    #[serde(default = "default_include_payloads")]
    pub include_payloads: bool,
}

fn default_include_payloads() -> bool {
    true
}

/// An event as returned by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredEvent {
    /// Sortable timestamp string (RFC 3339, UTC)
    #[serde(default)]
    pub timestamp: Option<String>,

    #[serde(default)]
    pub payload: Vec<StoredPayload>,
}

/// One conversational payload item; either field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredPayload {
    #[serde(default)]
    pub text: Option<String>,

    /// Role tag as stored (`USER`, `ASSISTANT`, ...)
    #[serde(default)]
    pub role: Option<String>,
}

/// The core EventStore trait.
///
/// Implementations: AgentCore Memory, in-memory (for testing and ephemeral sessions).
#[async_trait]
pub trait EventStore: Send + Sync {
    /// The backend name (e.g., "agentcore", "in_memory").
    fn name(&self) -> &str;

    /// Append one event.
    async fn create_event(&self, event: NewEvent) -> std::result::Result<(), MemoryError>;

    /// List the events for one actor in one session.
    async fn list_events(&self, query: EventQuery) -> std::result::Result<Vec<StoredEvent>, MemoryError>;
}

/// Derive the memory-store id from a memory resource identifier.
///
/// The id is the final `/`-separated segment of the resource identifier.
pub fn memory_id_from_arn(arn: &str) -> Result<String, MemoryError> {
    let id = arn.trim().rsplit('/').next().unwrap_or_default();
    if id.is_empty() {
        return Err(MemoryError::InvalidResource(arn.to_string()));
    }
    Ok(id.to_string())
}
