//! SessionController -- the boundary the presentation layer talks to.
//!
//! Owns the create-if-absent rule for sessions and turns turn failures into
//! user-visible notices so a session keeps accepting input after an error.

use std::sync::Arc;

use dstutor_types::chat::{SessionId, Transcript};
use dstutor_types::error::TurnError;
use tracing::debug;

use crate::llm::client::ModelClient;

use super::store::ConversationStore;
use super::turn::TurnProcessor;

/// Notice shown when the submitted message was blank.
pub const EMPTY_INPUT_NOTICE: &str = "Please enter a question.";

/// User-visible text for a failed turn.
pub fn notice_for(err: &TurnError) -> String {
    match err {
        TurnError::Validation(_) => EMPTY_INPUT_NOTICE.to_string(),
        TurnError::Upstream(e) => format!("Error processing request: {e}"),
    }
}

pub struct SessionController<S, M> {
    store: Arc<S>,
    processor: TurnProcessor<S, M>,
}

impl<S: ConversationStore, M: ModelClient> SessionController<S, M> {
    pub fn new(store: Arc<S>, client: M) -> Self {
        let processor = TurnProcessor::new(store.clone(), client);
        Self { store, processor }
    }

    /// Return `requested` if the store knows it, otherwise start a new session.
    pub async fn ensure_session(&self, requested: Option<SessionId>) -> SessionId {
        if let Some(id) = requested {
            if self.store.contains(id).await {
                return id;
            }
            debug!(session = %id.short(), "Unknown session id; starting a new session");
        }
        self.store.create_session().await
    }

    /// Whether the session exists.
    pub async fn contains(&self, session_id: SessionId) -> bool {
        self.store.contains(session_id).await
    }

    /// Start a new, empty session.
    pub async fn create_session(&self) -> SessionId {
        self.store.create_session().await
    }

    /// Run one turn and return the reply, or the turn error.
    pub async fn turn(&self, session_id: SessionId, user_text: &str) -> Result<String, TurnError> {
        self.processor.handle_turn(session_id, user_text).await
    }

    /// Run one turn and return the resulting transcript.
    ///
    /// Errors never escape: they become the transcript's notice and the
    /// history stays as it was before the turn.
    pub async fn submit(&self, session_id: SessionId, user_text: &str) -> Transcript {
        let outcome = self.processor.handle_turn(session_id, user_text).await;
        let transcript = self.transcript(session_id).await;
        match outcome {
            Ok(_) => transcript,
            Err(e) => transcript.with_notice(notice_for(&e)),
        }
    }

    /// Full ordered history of a session.
    pub async fn transcript(&self, session_id: SessionId) -> Transcript {
        Transcript::new(session_id, self.store.get(session_id).await)
    }

    pub async fn session_count(&self) -> usize {
        self.store.session_count().await
    }

    pub fn backend_name(&self) -> &str {
        self.processor.client().name()
    }
}
