use std::sync::Arc;

use tokatsu_core::auth::{Authenticator, SessionKeys};
use tokatsu_core::company::CompanyProfile;
use tokatsu_core::store::ContentStore;
use tokatsu_core::Lifecycle;

use crate::config::AppConfig;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    store: Arc<dyn ContentStore>,
    content: Lifecycle,
    company: CompanyProfile,
    authenticator: Authenticator,
    sessions: SessionKeys,
}

impl AppState {
    pub fn new(store: Arc<dyn ContentStore>, config: &AppConfig) -> Self {
        Self {
            inner: Arc::new(InnerState {
                content: Lifecycle::new(store.clone()),
                company: CompanyProfile::new(store.clone()),
                authenticator: Authenticator::new(vec![config.admin.clone()]),
                sessions: SessionKeys::new(&config.jwt_secret, config.session_ttl()),
                store,
            }),
        }
    }

    pub fn store(&self) -> &dyn ContentStore {
        self.inner.store.as_ref()
    }

    pub fn content(&self) -> &Lifecycle {
        &self.inner.content
    }

    pub fn company(&self) -> &CompanyProfile {
        &self.inner.company
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.inner.authenticator
    }

    pub fn sessions(&self) -> &SessionKeys {
        &self.inner.sessions
    }
}
