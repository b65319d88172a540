//! Session id resolution from the caller's identity.

use corechat_core::identity::IdentitySource;
use corechat_core::session::SessionId;
use tracing::debug;

/// Derive the session id for this run.
///
/// The same caller always lands in the same session. When the identity
/// lookup fails a random id is used instead; this never errors.
pub async fn resolve_session_id(identity: &dyn IdentitySource, min_len: usize) -> SessionId {
    match identity.caller_user_id().await {
        Ok(user_id) => {
            let session = SessionId::from_identity(&user_id, min_len);
            debug!(session = %session, "Resolved session from caller identity");
            session
        }
        Err(e) => {
            debug!(error = %e, "Identity lookup failed, using a random session id");
            SessionId::random(min_len)
        }
    }
}
