//! Category browse.

use crate::engine::SearchEngine;
use crate::error::Result;
use crate::item::SearchResultItem;
use crate::results::ResultSet;
use karia_api_client::{DataStore, Query};
use tracing::{debug, warn};

impl<S: DataStore> SearchEngine<S> {
    /// Up to `browse_limit` records of one resource, in store order.
    ///
    /// Fails only when the resource is not available; a failing query
    /// yields an empty list.
    pub async fn browse(&self, resource: &str) -> Result<Vec<SearchResultItem>> {
        let available = self.resource(resource)?;
        let query = Query::from(resource).limit(self.config().browse_limit);

        let rows = match self.store().select(&query).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(resource, error = %e, "Browse query failed");
                return Ok(Vec::new());
            }
        };

        let set: ResultSet = rows
            .into_iter()
            .map(|row| SearchResultItem::decorate(&available.descriptor, row))
            .collect();
        debug!(resource, items = set.len(), "Browse finished");
        Ok(set.into_items())
    }
}

#[cfg(test)]
mod tests {
    use crate::descriptor::ResourceDescriptor;
    use crate::engine::SearchEngine;
    use crate::error::SearchError;
    use crate::probe::AvailableResource;
    use karia_api_client::MemoryStore;
    use karia_core::config::SearchConfig;
    use serde_json::json;

    fn engine(store: MemoryStore) -> SearchEngine<MemoryStore> {
        let resources = vec![
            AvailableResource::new(ResourceDescriptor::new("shops", "Shops")),
            AvailableResource::new(ResourceDescriptor::new("items", "Items")),
        ];
        SearchEngine::with_resources(store, resources, SearchConfig::default())
    }

    #[tokio::test]
    async fn test_browse_caps_at_limit_in_store_order() {
        let rows = (0..150).rev().map(|i| json!({"id": i, "name": format!("Shop {i}")}));
        let engine = engine(MemoryStore::new().with_table("shops", rows));

        let items = engine.browse("shops").await.unwrap();

        assert_eq!(items.len(), 100);
        assert_eq!(items[0].key, "shops-149");
        assert_eq!(items[99].key, "shops-50");
        assert_eq!(engine.store().queries()[0].to_query_string(), "select=*&limit=100");
    }

    #[tokio::test]
    async fn test_browse_dedups_by_key() {
        let engine = engine(MemoryStore::new().with_table(
            "shops",
            vec![json!({"id": 1, "name": "A"}), json!({"id": 1, "name": "B"})],
        ));

        let items = engine.browse("shops").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn test_browse_failure_is_empty() {
        let engine = engine(MemoryStore::new().with_failing("items"));
        assert!(engine.browse("items").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_browse_unavailable_resource() {
        let engine = engine(MemoryStore::new());
        let err = engine.browse("builders").await.unwrap_err();
        assert!(matches!(err, SearchError::ResourceUnavailable(_)));
        assert_eq!(engine.store().query_count(), 0);
    }
}
