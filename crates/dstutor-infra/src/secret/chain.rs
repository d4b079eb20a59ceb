//! Secret chain builder -- wires concrete providers in priority order.
//!
//! Lives in `dstutor-infra` because it assembles concrete provider
//! implementations. The resulting chain is passed to `SecretService` in
//! `dstutor-core` via the `DynSecretProvider` abstraction.
//!
//! Default chain order: `[EnvSecretProvider, KeychainProvider]`

use std::sync::Arc;

use dstutor_core::repository::secret::DynSecretProvider;

use crate::keychain::KeychainProvider;
use crate::secret::env::EnvSecretProvider;

/// Build the secret resolution chain.
///
/// The chain is ordered by precedence (first match wins):
/// 1. Environment variables (if `include_env` is true)
/// 2. OS keychain (if `keychain` is Some; may be unavailable on headless servers)
pub fn build_secret_chain(
    keychain: Option<KeychainProvider>,
    include_env: bool,
) -> Vec<DynSecretProvider> {
    let mut chain: Vec<DynSecretProvider> = Vec::new();

    if include_env {
        chain.push(Arc::new(EnvSecretProvider::new()));
    }

    if let Some(kc) = keychain {
        chain.push(Arc::new(kc));
    }

    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_order_env_first() {
        let chain = build_secret_chain(Some(KeychainProvider::with_service("dstutor-test")), true);
        let names: Vec<&str> = chain.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["env", "keychain"]);
    }

    #[test]
    fn test_chain_without_keychain() {
        let chain = build_secret_chain(None, true);
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].name(), "env");
    }
}
