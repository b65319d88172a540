//! Caller identity lookup.
//!
//! The session resolver derives a stable session id from the caller's
//! identity so the same user lands in the same conversation memory.

use async_trait::async_trait;
use crate::error::IdentityError;

#[async_trait]
pub trait IdentitySource: Send + Sync {
    /// Look up the caller's user identifier.
    async fn caller_user_id(&self) -> Result<String, IdentityError>;
}
