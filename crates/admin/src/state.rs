//! Application state shared across handlers.

use std::sync::Arc;

use crate::backend::BackendClient;
use crate::config::AdminConfig;
use crate::query::QueryClient;

/// Application state shared across all handlers.
///
/// The query cache is the only process-wide mutable state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    queries: QueryClient,
}

impl AppState {
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let backend = BackendClient::new(config.backend_url.clone());
        let queries = QueryClient::new(backend, &config.query);
        Self {
            inner: Arc::new(AppStateInner { config, queries }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn queries(&self) -> &QueryClient {
        &self.inner.queries
    }

    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        self.inner.queries.backend()
    }
}
