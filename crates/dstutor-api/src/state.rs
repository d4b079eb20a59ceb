//! Application state wiring the tutor together.
//!
//! AppState pins the generic `SessionController` to the in-memory store and
//! the provider-backed model client, and is shared by every HTTP handler.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use dstutor_core::chat::controller::SessionController;
use dstutor_core::chat::store::InMemoryConversationStore;
use dstutor_core::llm::client::{ModelSettings, ProviderModelClient};
use dstutor_core::service::secret::SecretService;
use dstutor_infra::llm::create_provider;
use dstutor_types::config::TutorConfig;

/// Concrete controller type used by the server.
pub type TutorController = SessionController<InMemoryConversationStore, ProviderModelClient>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<TutorController>,
    pub config: Arc<TutorConfig>,
}

impl AppState {
    /// Wire a fresh in-memory store to the given model client.
    pub fn new(client: ProviderModelClient, config: TutorConfig) -> Self {
        let store = Arc::new(InMemoryConversationStore::new());
        Self {
            controller: Arc::new(SessionController::new(store, client)),
            config: Arc::new(config),
        }
    }

    /// Resolve the credential and build the model client.
    ///
    /// Fails before any listener is bound if the credential is absent.
    pub async fn init(config: TutorConfig, secrets: &SecretService) -> anyhow::Result<Self> {
        let secret_name = config.model.secret_name();
        let api_key = secrets.require_credential(secret_name).await?;

        let provider =
            create_provider(&config.model, &api_key).context("failed to create model provider")?;
        let client = ProviderModelClient::new(provider, ModelSettings::from(&config.model));

        info!(
            provider = %config.model.provider,
            model = %config.model.model,
            credential = %SecretService::mask_secret(&api_key),
            "Model client ready"
        );

        Ok(Self::new(client, config))
    }
}
