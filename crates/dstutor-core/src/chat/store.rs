//! ConversationStore trait and its in-memory implementation.
//!
//! Histories are keyed by `SessionId` and live only as long as the process.
//! Sessions are fully isolated: nothing appended to one is visible in another.

use dashmap::DashMap;

use dstutor_types::chat::{Message, SessionId};

/// Per-session message history.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition) so a persistent
/// backend can be slotted in later without changing callers.
pub trait ConversationStore: Send + Sync {
    /// Register an empty history under a fresh random id.
    fn create_session(&self) -> impl std::future::Future<Output = SessionId> + Send;

    /// Whether the session has been registered.
    fn contains(&self, id: SessionId) -> impl std::future::Future<Output = bool> + Send;

    /// Snapshot of the session's history in chronological order.
    ///
    /// Unknown sessions yield an empty history.
    fn get(&self, id: SessionId) -> impl std::future::Future<Output = Vec<Message>> + Send;

    /// Append messages to the end of a session's history, creating it if needed.
    fn append(
        &self,
        id: SessionId,
        messages: Vec<Message>,
    ) -> impl std::future::Future<Output = ()> + Send;

    /// Number of live sessions.
    fn session_count(&self) -> impl std::future::Future<Output = usize> + Send;
}

/// Process-local store backed by a concurrent map.
#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    histories: DashMap<SessionId, Vec<Message>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversationStore for InMemoryConversationStore {
    async fn create_session(&self) -> SessionId {
        let id = SessionId::new();
        self.histories.entry(id).or_default();
        id
    }

    async fn contains(&self, id: SessionId) -> bool {
        self.histories.contains_key(&id)
    }

    async fn get(&self, id: SessionId) -> Vec<Message> {
        self.histories
            .get(&id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    async fn append(&self, id: SessionId, messages: Vec<Message>) {
        self.histories.entry(id).or_default().extend(messages);
    }

    async fn session_count(&self) -> usize {
        self.histories.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_session_is_empty() {
        let store = InMemoryConversationStore::new();
        let id = SessionId::new();
        assert!(store.get(id).await.is_empty());
        assert!(!store.contains(id).await);
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let store = InMemoryConversationStore::new();
        let id = store.create_session().await;
        store
            .append(id, vec![Message::user("q1"), Message::assistant("a1")])
            .await;
        store
            .append(id, vec![Message::user("q2"), Message::assistant("a2")])
            .await;

        let history = store.get(id).await;
        let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["q1", "a1", "q2", "a2"]);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = InMemoryConversationStore::new();
        let a = store.create_session().await;
        let b = store.create_session().await;
        assert_ne!(a, b);
        store.append(a, vec![Message::user("only in a")]).await;

        assert_eq!(store.get(a).await.len(), 1);
        assert!(store.get(b).await.is_empty());
        assert_eq!(store.session_count().await, 2);
    }

    #[tokio::test]
    async fn test_create_session_registers_empty_history() {
        let store = InMemoryConversationStore::new();
        let id = store.create_session().await;
        assert!(store.contains(id).await);
        assert!(store.get(id).await.is_empty());
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_append_creates_missing_entry() {
        let store = InMemoryConversationStore::new();
        let id = SessionId::new();
        store.append(id, vec![Message::user("kept")]).await;
        assert!(store.contains(id).await);
        assert_eq!(store.get(id).await.len(), 1);
    }

    #[tokio::test]
    async fn test_get_returns_snapshot() {
        let store = InMemoryConversationStore::new();
        let id = SessionId::new();
        store.append(id, vec![Message::user("q1")]).await;
        let mut snapshot = store.get(id).await;
        snapshot.push(Message::assistant("not stored"));
        assert_eq!(store.get(id).await.len(), 1);
    }
}
