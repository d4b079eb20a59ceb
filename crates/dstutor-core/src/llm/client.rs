//! ModelClient -- the single outbound call the tutor makes per turn.
//!
//! `ModelClient` is the seam the turn processor depends on: given the
//! system directive, the prior history, and the new utterance, it returns the
//! assistant's reply text. `ProviderModelClient` implements it on top of a
//! `BoxLlmProvider`, adding the request timeout and GenAI span.

use std::time::Duration;

use tracing::{Instrument, debug, info_span};

use dstutor_observe::genai_attrs;
use dstutor_types::config::ModelConfig;
use dstutor_types::llm::{CompletionRequest, LlmError, Message};

use super::box_provider::BoxLlmProvider;

/// Produces the assistant reply for one turn.
///
/// Implementations must not mutate `history`; the caller owns conversation
/// state and only records the exchange after a successful reply.
pub trait ModelClient: Send + Sync {
    /// Backend name used in logs (e.g. "gemini").
    fn name(&self) -> &str;

    fn generate(
        &self,
        system_prompt: &str,
        history: &[Message],
        user_text: &str,
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;
}

/// Per-request model settings, fixed at startup.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl From<&ModelConfig> for ModelSettings {
    fn from(config: &ModelConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

/// `ModelClient` backed by a chat-completions provider.
pub struct ProviderModelClient {
    provider: BoxLlmProvider,
    settings: ModelSettings,
}

impl ProviderModelClient {
    pub fn new(provider: BoxLlmProvider, settings: ModelSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    /// Assemble the request: directive as the system field, then the full
    /// history, then the new user utterance.
    fn build_request(
        &self,
        system_prompt: &str,
        history: &[Message],
        user_text: &str,
    ) -> CompletionRequest {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.extend_from_slice(history);
        messages.push(Message::user(user_text));

        CompletionRequest {
            model: self.settings.model.clone(),
            messages,
            system: Some(system_prompt.to_string()),
            max_tokens: self.settings.max_tokens,
            temperature: Some(self.settings.temperature),
        }
    }
}

impl ModelClient for ProviderModelClient {
    fn name(&self) -> &str {
        self.provider.name()
    }

    async fn generate(
        &self,
        system_prompt: &str,
        history: &[Message],
        user_text: &str,
    ) -> Result<String, LlmError> {
        let request = self.build_request(system_prompt, history, user_text);

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.provider.name(),
            gen_ai.operation.name = genai_attrs::OP_CHAT,
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
            gen_ai.request.messages = request.messages.len(),
            gen_ai.response.id = tracing::field::Empty,
            gen_ai.usage.input_tokens = tracing::field::Empty,
            gen_ai.usage.output_tokens = tracing::field::Empty,
        );

        let timeout = self.settings.timeout;
        let response = tokio::time::timeout(timeout, self.provider.complete(&request))
            .instrument(span.clone())
            .await
            .map_err(|_| LlmError::Timeout(timeout))??;

        span.record(genai_attrs::GEN_AI_RESPONSE_ID, response.id.as_str());
        span.record(genai_attrs::GEN_AI_USAGE_INPUT_TOKENS, response.usage.input_tokens);
        span.record(genai_attrs::GEN_AI_USAGE_OUTPUT_TOKENS, response.usage.output_tokens);

        if response.content.trim().is_empty() {
            debug!(stop_reason = %response.stop_reason, "Model returned blank content");
            return Err(LlmError::EmptyCompletion);
        }

        Ok(response.content)
    }
}
