//! Application state shared across handlers.

use std::sync::Arc;

use crate::cache::QueryCache;
use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::queries::Queries;
use crate::session::SessionVerifier;
use crate::wordpress::WordPressClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The query cache is constructed here and
/// reaches handlers only through this state - there is no global instance.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    queries: Queries,
    sessions: SessionVerifier,
}

impl AppState {
    /// Create a new application state from configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let http = reqwest::Client::new();
        let catalog = CatalogClient::new(http.clone(), &config.catalog_api_url);
        let wordpress = WordPressClient::new(http, &config.wordpress_api_url);
        let queries = Queries::new(QueryCache::new(), catalog, wordpress);
        let sessions = SessionVerifier::new(&config.session_secret);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                queries,
                sessions,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the cached query layer.
    #[must_use]
    pub fn queries(&self) -> &Queries {
        &self.inner.queries
    }

    /// Get a reference to the session verifier.
    #[must_use]
    pub fn sessions(&self) -> &SessionVerifier {
        &self.inner.sessions
    }
}
