//! Session identifiers.
//!
//! A session id partitions conversation memory and correlates turns on the
//! agent runtime. The memory service rejects ids shorter than
//! [`MIN_SESSION_ID_LEN`] characters, so every constructor here guarantees
//! at least that many.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum session id length accepted by the memory service.
pub const MIN_SESSION_ID_LEN: usize = 33;

const SESSION_PREFIX: &str = "session-";
const PAD: &str = "-0";

/// An opaque, immutable session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Build a stable session id from a caller identity string.
    ///
    /// Characters unsafe for downstream keys (`:`, `@`, `.`) become `_`, the
    /// result is prefixed with `session-` and padded up to `min_len`.
    pub fn from_identity(user_id: &str, min_len: usize) -> Self {
        let sanitized: String = user_id
            .chars()
            .map(|c| match c {
                ':' | '@' | '.' => '_',
                other => other,
            })
            .collect();
        Self(pad(format!("{SESSION_PREFIX}{sanitized}"), min_len))
    }

    /// Build a random session id from two UUIDs, the second cut to 8 chars.
    pub fn random(min_len: usize) -> Self {
        let first = Uuid::new_v4().to_string();
        let second = Uuid::new_v4().to_string();
        Self(pad(format!("{first}-{}", &second[..8]), min_len))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn pad(mut id: String, min_len: usize) -> String {
    while id.chars().count() < min_len {
        id.push_str(PAD);
    }
    id
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
