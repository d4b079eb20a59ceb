//! LLM provider implementations.
//!
//! Contains the concrete [`LlmProvider`](dstutor_core::llm::provider::LlmProvider)
//! implementation used by the tutor, plus a factory ([`create_provider`]) that
//! builds it from the `[model]` section of the configuration.

pub mod openai_compat;

use dstutor_core::llm::box_provider::BoxLlmProvider;
use dstutor_types::config::ModelConfig;
use dstutor_types::llm::{LlmError, ProviderType};

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::{gemini_defaults, openai_defaults};

/// Create a [`BoxLlmProvider`] from a [`ModelConfig`].
///
/// `api_key` is the already-resolved credential. A configured `base_url`
/// replaces the provider's default endpoint.
///
/// # Errors
///
/// Returns `LlmError::AuthenticationFailed` if the key is blank.
pub fn create_provider(config: &ModelConfig, api_key: &str) -> Result<BoxLlmProvider, LlmError> {
    if api_key.trim().is_empty() {
        return Err(LlmError::AuthenticationFailed);
    }

    let mut oai_config = match config.provider {
        ProviderType::Gemini => gemini_defaults(api_key, &config.model),
        ProviderType::OpenAi => openai_defaults(api_key, &config.model),
    };
    if let Some(ref base_url) = config.base_url {
        oai_config = oai_config.with_base_url(base_url.as_str());
    }

    tracing::debug!(
        provider = %config.provider,
        model = %config.model,
        base_url = %oai_config.base_url,
        "Creating LLM provider"
    );

    Ok(BoxLlmProvider::new(OpenAiCompatibleProvider::new(oai_config)))
}
