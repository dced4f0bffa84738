//! Runtime wiring helpers for assembling a conversation session.

use std::path::Path;
use std::sync::Arc;

use reqwest::Client;
use vadvisor::{AdvisorClient, HttpAdvisorClient};
use vobserve::{SafeSessionHooks, TracingSessionHooks};
use vsession::{
    InMemorySessionStore, SessionError, SessionHooks, SessionService, SessionStore,
};
use vstore::FilesystemSessionStore;

pub fn http_advisor() -> Arc<dyn AdvisorClient> {
    Arc::new(HttpAdvisorClient::new(Client::new()))
}

pub fn http_advisor_at(endpoint: impl Into<String>) -> Arc<dyn AdvisorClient> {
    Arc::new(HttpAdvisorClient::new(Client::new()).with_endpoint(endpoint))
}

pub fn in_memory_store() -> Arc<dyn SessionStore> {
    Arc::new(InMemorySessionStore::new())
}

pub fn filesystem_store(root: impl AsRef<Path>) -> Result<Arc<dyn SessionStore>, SessionError> {
    Ok(Arc::new(FilesystemSessionStore::new(root)?))
}

/// Default production hooks: tracing events, isolated from hook panics.
pub fn observed_hooks() -> Arc<dyn SessionHooks> {
    Arc::new(SafeSessionHooks::new(TracingSessionHooks))
}

pub fn session(advisor: Arc<dyn AdvisorClient>) -> SessionService {
    SessionService::builder(advisor)
        .hooks(observed_hooks())
        .build()
}

/// Builds a session over `store` and loads the persisted transcript before
/// handing it back.
pub async fn restored_session(
    advisor: Arc<dyn AdvisorClient>,
    store: Arc<dyn SessionStore>,
) -> SessionService {
    let service = SessionService::builder(advisor)
        .store(store)
        .hooks(observed_hooks())
        .build();

    service.restore().await;
    service
}
