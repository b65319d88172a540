//! Conversation memory for corechat.
//!
//! [`ConversationMemory`] is what the agent client talks to; the event
//! stores below are the backends it can sit on.

pub mod adapter;
pub mod in_memory;

#[cfg(feature = "agentcore")]
pub mod agentcore;

pub use adapter::ConversationMemory;
pub use in_memory::InMemoryEventStore;

#[cfg(feature = "agentcore")]
pub use agentcore::AgentCoreEventStore;
