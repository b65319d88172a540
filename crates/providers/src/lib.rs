//! Remote service implementations for corechat.
//!
//! - [`OpenAiCompatProvider`] implements `corechat_core::Provider` for the
//!   direct chat loop.
//! - [`AgentCoreRuntime`] implements `corechat_core::AgentRuntime`.
//! - [`StsIdentity`] implements `corechat_core::IdentitySource`.
//!
//! The AWS-backed types take already-built SDK clients; the binary loads
//! one SDK config and constructs every client from it.

#[cfg(feature = "agentcore")]
pub mod agentcore;
pub mod openai_compat;
#[cfg(feature = "agentcore")]
pub mod sts;

#[cfg(feature = "agentcore")]
pub use agentcore::AgentCoreRuntime;
pub use openai_compat::OpenAiCompatProvider;
#[cfg(feature = "agentcore")]
pub use sts::StsIdentity;
