use thiserror::Error;

use crate::llm::LlmError;

/// Errors from a single conversational turn.
#[derive(Debug, Error)]
pub enum TurnError {
    /// The utterance was rejected before reaching the model.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The model call failed; conversation state is unchanged.
    #[error(transparent)]
    Upstream(#[from] LlmError),
}

/// Startup configuration errors. Fatal: the server must not accept turns.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing credential '{0}': set it in the environment or the OS keychain")]
    MissingCredential(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("secret store error: {0}")]
    SecretStore(#[from] SecretError),
}

/// Errors related to secret lookup.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("secret provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("secret provider is read-only")]
    ReadOnly,
}
