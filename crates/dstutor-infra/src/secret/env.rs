//! Environment variable secret provider.
//!
//! A read-only provider that looks the key up as an environment variable
//! name (e.g. `GOOGLE_API_KEY`). Highest priority in the resolution chain.

use dstutor_core::repository::secret::SecretProvider;
use dstutor_types::error::SecretError;

/// Environment variable secret provider.
///
/// Read-only: `set()` returns `SecretError::ReadOnly` because environment
/// variables cannot be persistently modified.
#[derive(Debug, Default)]
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self
    }
}

impl SecretProvider for EnvSecretProvider {
    fn name(&self) -> &str {
        "env"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        match std::env::var(key) {
            Ok(val) => Ok(Some(val)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            // Present but not valid Unicode: unusable as a credential.
            Err(std::env::VarError::NotUnicode(_)) => Ok(None),
        }
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), SecretError> {
        Err(SecretError::ReadOnly)
    }
}
