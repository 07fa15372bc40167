//! Per-invocation application context

use karia_api_client::{ClientConfig, Session, StoreClient};
use karia_contact::ContactPlanner;
use karia_core::config::{Config, SearchConfig};
use karia_core::{Error, Result};
use karia_search::{default_catalog, SearchEngine};
use std::path::Path;
use tracing::debug;

/// Loaded configuration plus the client settings derived from it
pub struct AppContext {
    pub config: Config,
    pub client_config: ClientConfig,
}

impl AppContext {
    /// Load configuration and apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = Config::load(path)?;
        let client_config = ClientConfig::from_store_config(&config.schema.store)
            .with_env_overrides()
            .map_err(Error::from)?;

        debug!(
            config = ?config.path,
            store = %client_config.base_url,
            "Configuration loaded"
        );

        Ok(Self {
            config,
            client_config,
        })
    }

    /// Store client for this invocation
    pub fn client(&self) -> Result<StoreClient> {
        StoreClient::with_config(self.client_config.clone()).map_err(Error::from)
    }

    /// Session seeded with the configured installed version
    pub fn session(&self, installed: Option<u32>) -> Result<Session> {
        let installed = installed.unwrap_or(self.config.schema.app.version_code);
        Session::start(self.client_config.clone(), installed).map_err(Error::from)
    }

    /// Probe the built-in catalog and build a search engine
    pub async fn engine(&self, search: SearchConfig) -> Result<SearchEngine<StoreClient>> {
        let client = self.client()?;
        Ok(SearchEngine::initialize(client, &default_catalog(), search).await)
    }

    /// Search settings from configuration
    pub fn search_config(&self) -> SearchConfig {
        self.config.schema.search.clone()
    }

    /// Contact planner using the configured numbers
    pub fn planner(&self) -> ContactPlanner {
        ContactPlanner::new(&self.config.schema.contact)
    }
}
