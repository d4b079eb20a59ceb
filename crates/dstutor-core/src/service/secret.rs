//! Secret resolution service.
//!
//! SecretService resolves secrets through a chain of providers in priority
//! order. Default precedence: environment variables > OS keychain.
//!
//! Lives in `dstutor-core` and depends only on the `DynSecretProvider`
//! abstraction, never on concrete infra implementations.

use tracing::{debug, warn};

use dstutor_types::error::{ConfigError, SecretError};

use crate::repository::secret::DynSecretProvider;

/// Resolves secrets across multiple storage backends.
///
/// Providers are ordered by precedence (first match wins).
/// Default chain: `[EnvSecretProvider, KeychainProvider]`
pub struct SecretService {
    providers: Vec<DynSecretProvider>,
}

impl SecretService {
    /// Providers should be ordered by precedence (highest priority first).
    pub fn new(providers: Vec<DynSecretProvider>) -> Self {
        Self { providers }
    }

    /// Resolve a secret value by iterating through providers in priority order.
    ///
    /// An unavailable provider (e.g. no keychain daemon on a headless host) is
    /// logged and skipped rather than failing the whole lookup.
    pub async fn get_secret(&self, key: &str) -> Option<String> {
        for provider in &self.providers {
            match provider.get_boxed(key).await {
                Ok(Some(value)) => {
                    debug!(key, provider = provider.name(), "Secret resolved");
                    return Some(value);
                }
                Ok(None) => continue,
                Err(e) => {
                    warn!(key, provider = provider.name(), error = %e, "Secret provider failed; skipping");
                }
            }
        }
        None
    }

    /// Resolve a credential that startup cannot proceed without.
    ///
    /// Absent and blank values both yield `ConfigError::MissingCredential`.
    pub async fn require_credential(&self, key: &str) -> Result<String, ConfigError> {
        match self.get_secret(key).await {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(ConfigError::MissingCredential(key.to_string())),
        }
    }

    /// Store a secret value in the first writable provider.
    ///
    /// Read-only providers (e.g. env vars) are skipped. If every writable
    /// provider fails, the last failure is returned.
    pub async fn set_secret(&self, key: &str, value: &str) -> Result<(), SecretError> {
        let mut last_error = None;
        for provider in &self.providers {
            match provider.set_boxed(key, value).await {
                Ok(()) => {
                    debug!(key, provider = provider.name(), "Secret stored");
                    return Ok(());
                }
                Err(SecretError::ReadOnly) => continue,
                Err(e) => {
                    warn!(key, provider = provider.name(), error = %e, "Secret provider failed to store");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            SecretError::ProviderUnavailable("no writable secret provider available".to_string())
        }))
    }

    /// Mask a secret value, showing only the last 4 characters.
    ///
    /// - "sk-abcdefghijklmnop" -> "****mnop"
    /// - "abc" -> "****" (too short to show any chars)
    pub fn mask_secret(value: &str) -> String {
        let count = value.chars().count();
        if count <= 4 {
            "****".to_string()
        } else {
            let tail: String = value.chars().skip(count - 4).collect();
            format!("****{tail}")
        }
    }
}
