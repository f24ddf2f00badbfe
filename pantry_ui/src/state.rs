//! Shared application state.

use std::sync::Arc;

use axum::http::HeaderMap;

use pantry_capability::{CapabilityDeriver, RequestContext};
use pantry_runtime::{
    AccountService, ConfirmationTokens, LogMailSender, RecipeService, RuntimeConfig,
    SessionManager,
};
use pantry_store::{
    ImageStore, InMemoryCredentialStore, InMemoryImageStore, InMemoryRecipeRepository,
};

use crate::session::session_token;

/// Everything the handlers share.
pub struct AppState {
    pub accounts: AccountService,
    pub recipes: RecipeService,
    pub sessions: Arc<SessionManager>,
    pub deriver: Arc<CapabilityDeriver>,
    pub images: Arc<dyn ImageStore>,
}

impl AppState {
    /// Wire the in-memory stores, services, and the capability core.
    pub fn build(config: &RuntimeConfig) -> Arc<Self> {
        let credentials = Arc::new(InMemoryCredentialStore::new());
        let repository = Arc::new(InMemoryRecipeRepository::new());
        let images: Arc<dyn ImageStore> = Arc::new(InMemoryImageStore::new());

        let sessions = Arc::new(SessionManager::new(
            credentials.clone(),
            config.session_ttl_secs,
            config.remember_session_ttl_secs,
        ));
        let deriver = Arc::new(CapabilityDeriver::new(repository.clone()));

        let accounts = AccountService::new(
            credentials,
            images.clone(),
            sessions.clone(),
            Arc::new(LogMailSender::new(config.mail_sender.clone())),
            ConfirmationTokens::new(&config.secret_key, config.confirmation_token_ttl_secs),
            config.admin_emails(),
        );
        let recipes = RecipeService::new(repository, images.clone());

        Arc::new(Self {
            accounts,
            recipes,
            sessions,
            deriver,
            images,
        })
    }

    /// Build the request context: resolve the session cookie to a
    /// principal and hand it the deriver. The capability set itself is
    /// derived on first check.
    pub fn context(&self, headers: &HeaderMap) -> RequestContext {
        let token = session_token(headers);
        RequestContext::new(self.sessions.resolve(token.as_ref()), self.deriver.clone())
    }
}
