//! Chat session and transcript types.
//!
//! A session is one independent conversation thread. Its history lives in a
//! conversation store for the lifetime of the process; nothing here is
//! persisted to disk.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

pub use crate::llm::{Message, MessageRole};

/// Number of leading characters shown when a session id is displayed.
pub const SHORT_ID_LEN: usize = 8;

/// Opaque session identifier, wrapping a random UUID v4.
///
/// Random rather than time-ordered: ids are handed to browsers and must not
/// be guessable from one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a fresh random session id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Human-distinguishable prefix (e.g. "3f2a9c1e") for page titles and logs.
    pub fn short(&self) -> String {
        let mut s = self.0.to_string();
        s.truncate(SHORT_ID_LEN);
        s
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Everything the presentation layer needs to draw one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub session_id: SessionId,
    /// Chronological history (user, assistant, user, assistant, ...).
    pub messages: Vec<Message>,
    /// User-visible notice for a turn that did not complete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl Transcript {
    pub fn new(session_id: SessionId, messages: Vec<Message>) -> Self {
        Self {
            session_id,
            messages,
            notice: None,
        }
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ids_are_distinct() {
        let a = SessionId::new();
        let b = SessionId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_session_id_short_prefix() {
        let id: SessionId = "3f2a9c1e-0000-4000-8000-000000000000".parse().unwrap();
        assert_eq!(id.short(), "3f2a9c1e");
        assert!(id.to_string().starts_with(&id.short()));
    }

    #[test]
    fn test_session_id_parse_rejects_garbage() {
        assert!("not-a-session".parse::<SessionId>().is_err());
    }

    #[test]
    fn test_session_id_display_roundtrip() {
        let id = SessionId::new();
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_transcript_notice() {
        let t = Transcript::new(SessionId::new(), Vec::new());
        assert!(t.notice.is_none());
        let json = serde_json::to_value(&t).unwrap();
        assert!(json.get("notice").is_none());

        let t = t.with_notice("Error processing request: timeout");
        assert_eq!(t.notice.as_deref(), Some("Error processing request: timeout"));
    }
}
