//! # corechat Core
//!
//! Domain types, traits, and error definitions for the corechat client.
//! This crate has **no network dependencies**: it defines the seams
//! (agent runtime, memory event store, caller identity, chat provider)
//! that the other crates implement against, plus the pure pieces of
//! conversation logic (session ids, prompt assembly).
//!
//! ## Design Philosophy
//!
//! Every remote service is a trait here. Implementations live in their
//! respective crates and are constructed once by the binary, then passed
//! in explicitly. This enables:
//! - Swapping the AWS-backed services for in-process ones
//! - Testing with scripted/recording doubles
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod identity;
pub mod memory;
pub mod message;
pub mod prompt;
pub mod provider;
pub mod runtime;
pub mod session;

// Re-export key types at crate root for ergonomics
pub use error::{IdentityError, MemoryError, ProviderError};
pub use identity::IdentitySource;
pub use memory::{Actor, EventQuery, EventStore, NewEvent, StoredEvent, StoredPayload};
pub use message::{Message, Role, Turn};
pub use prompt::{DEFAULT_HISTORY_WINDOW, assemble_prompt};
pub use provider::{Provider, ProviderRequest, ProviderResponse, StreamChunk, Usage};
pub use runtime::{AgentRuntime, DEFAULT_QUALIFIER, InvocationPayload, InvocationRequest};
pub use session::{MIN_SESSION_ID_LEN, SessionId};
