//! Chat orchestration for corechat.
//!
//! Two conversation paths share this crate:
//!
//! 1. **Agent runtime**: history is replayed from conversation memory into
//!    a single prompt, the hosted runtime answers with an event stream,
//!    and both turns are written back to memory.
//! 2. **Direct chat**: messages go straight to a model provider, with a
//!    short history kept in process.

pub mod client;
pub mod direct;
pub mod session;
pub mod stream;

#[cfg(test)]
mod test_helpers;

pub use client::AgentClient;
pub use direct::{DirectChat, DEFAULT_MAX_HISTORY};
pub use session::resolve_session_id;
pub use stream::{decode_body, parse_event_line, StreamDecoder};
