//! Application state shared across handlers.

use std::sync::Arc;

use vendora_client::{FixtureClient, MarketplaceApi, RestClient};

use crate::config::MarketplaceConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the backend API client. The client implementation
/// (real HTTP or in-memory fixtures) is chosen once, here, at composition
/// time.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: MarketplaceConfig,
    api: Arc<dyn MarketplaceApi>,
}

impl AppState {
    /// Create application state, selecting the API implementation from
    /// configuration.
    #[must_use]
    pub fn new(config: MarketplaceConfig) -> Self {
        let api: Arc<dyn MarketplaceApi> = if config.use_fixtures {
            tracing::info!("using in-memory fixture data instead of the backend");
            Arc::new(FixtureClient::new())
        } else {
            Arc::new(RestClient::new(&config.api_base_url))
        };
        Self::with_api(config, api)
    }

    /// Create application state with an explicit API implementation
    /// (used by tests to inject fixtures or mocks).
    #[must_use]
    pub fn with_api(config: MarketplaceConfig, api: Arc<dyn MarketplaceApi>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, api }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &MarketplaceConfig {
        &self.inner.config
    }

    /// Get a reference to the backend API client.
    #[must_use]
    pub fn api(&self) -> &dyn MarketplaceApi {
        self.inner.api.as_ref()
    }
}
