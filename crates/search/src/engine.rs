//! Search engine: store handle, tuning and the probed resource list.

use crate::descriptor::ResourceDescriptor;
use crate::error::{Result, SearchError};
use crate::probe::{AvailableResource, ResourceProbe};
use karia_api_client::DataStore;
use karia_core::config::{SearchConfig, SearchStrategy};
use tracing::info;

/// Browse and keyword search over the resources a store actually has.
///
/// Built once per session; the available-resource list does not change
/// afterwards.
#[derive(Debug)]
pub struct SearchEngine<S> {
    store: S,
    config: SearchConfig,
    resources: Vec<AvailableResource>,
}

impl<S: DataStore> SearchEngine<S> {
    /// Probe `catalog` against `store` and keep what answers.
    ///
    /// Columns are sampled only for the combined strategy, which needs
    /// them to build its OR query.
    pub async fn initialize(store: S, catalog: &[ResourceDescriptor], config: SearchConfig) -> Self {
        let probe = ResourceProbe::new().sample_columns(config.strategy == SearchStrategy::Combined);
        let resources = probe.run(&store, catalog).await;
        info!(
            available = resources.len(),
            configured = catalog.len(),
            "Search resources probed"
        );
        Self::with_resources(store, resources, config)
    }

    /// Use an already probed resource list.
    pub fn with_resources(store: S, resources: Vec<AvailableResource>, config: SearchConfig) -> Self {
        Self {
            store,
            config,
            resources,
        }
    }

    /// Available resources in probe order.
    pub fn available(&self) -> &[AvailableResource] {
        &self.resources
    }

    /// Look up an available resource by name.
    pub fn resource(&self, name: &str) -> Result<&AvailableResource> {
        self.resources
            .iter()
            .find(|r| r.name() == name)
            .ok_or_else(|| SearchError::ResourceUnavailable(name.to_string()))
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Search tuning in effect.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use karia_api_client::MemoryStore;

    #[tokio::test]
    async fn test_unknown_resource_is_unavailable() {
        let store = MemoryStore::new().with_columns("builders", ["id", "name"]);
        let catalog = vec![
            ResourceDescriptor::new("builders", "Builders"),
            ResourceDescriptor::new("contractors", "Contractors"),
        ];
        let engine = SearchEngine::initialize(store, &catalog, SearchConfig::default()).await;

        assert_eq!(engine.available().len(), 1);
        assert!(engine.resource("builders").is_ok());
        assert!(matches!(
            engine.resource("contractors"),
            Err(SearchError::ResourceUnavailable(name)) if name == "contractors"
        ));
    }
}
