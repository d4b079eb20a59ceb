//! LlmProvider trait definition.
//!
//! This is the wire-level abstraction that hosted model backends implement.
//! Uses RPITIT for `complete`; `BoxLlmProvider` provides dynamic dispatch.

use dstutor_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends (Gemini, OpenAI, ...).
///
/// Implementations live in dstutor-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini", "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
