//! TurnProcessor -- executes one conversational turn.
//!
//! A turn is: validate the utterance, read the session's history, ask the
//! model for a reply, and on success record the exchange. A failed model call
//! leaves the history exactly as it was.

use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{info, warn};

use dstutor_types::chat::{Message, SessionId};
use dstutor_types::error::TurnError;

use crate::llm::client::ModelClient;

use super::prompt::SYSTEM_DIRECTIVE;
use super::store::ConversationStore;

/// Reject utterances that are empty after trimming whitespace.
pub fn validate_utterance(user_text: &str) -> Result<(), TurnError> {
    if user_text.trim().is_empty() {
        return Err(TurnError::Validation(
            "message must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Runs turns against a shared store through a model client.
///
/// Turns for the same session are serialized: a second turn waits until the
/// first has recorded its exchange, so it sees the full prior history.
/// Turns for different sessions proceed independently.
pub struct TurnProcessor<S, M> {
    store: Arc<S>,
    client: M,
    turn_locks: DashMap<SessionId, Arc<Mutex<()>>>,
}

impl<S: ConversationStore, M: ModelClient> TurnProcessor<S, M> {
    pub fn new(store: Arc<S>, client: M) -> Self {
        Self {
            store,
            client,
            turn_locks: DashMap::new(),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn client(&self) -> &M {
        &self.client
    }

    fn turn_lock(&self, session_id: SessionId) -> Arc<Mutex<()>> {
        self.turn_locks.entry(session_id).or_default().clone()
    }

    /// Process one utterance and return the assistant's reply.
    ///
    /// Validation happens before any store read or model call. On success the
    /// user message and the reply are appended, in that order.
    pub async fn handle_turn(
        &self,
        session_id: SessionId,
        user_text: &str,
    ) -> Result<String, TurnError> {
        validate_utterance(user_text)?;

        let lock = self.turn_lock(session_id);
        let _guard = lock.lock().await;

        let history = self.store.get(session_id).await;
        let started = Instant::now();

        match self
            .client
            .generate(SYSTEM_DIRECTIVE, &history, user_text)
            .await
        {
            Ok(reply) => {
                self.store
                    .append(
                        session_id,
                        vec![Message::user(user_text), Message::assistant(reply.as_str())],
                    )
                    .await;
                info!(
                    session = %session_id.short(),
                    backend = self.client.name(),
                    history_len = history.len() + 2,
                    latency_ms = started.elapsed().as_millis() as u64,
                    "Turn completed"
                );
                Ok(reply)
            }
            Err(e) => {
                warn!(
                    session = %session_id.short(),
                    backend = self.client.name(),
                    latency_ms = started.elapsed().as_millis() as u64,
                    error = %e,
                    "Turn failed; history unchanged"
                );
                Err(TurnError::Upstream(e))
            }
        }
    }
}
