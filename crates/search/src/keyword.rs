//! Keyword search across every available resource.
//!
//! Two strategies share the same variant list and result set:
//!
//! - field-by-field: one `ilike` query per field name, trying each typo
//!   variant until one returns rows; the first field name that returns rows
//!   settles its field group.
//! - combined: one OR-across-columns query per resource and variant, with
//!   a field-by-field fallback when columns are unknown or the query fails.
//!
//! Store errors never surface; they only mean fewer results.

use crate::engine::SearchEngine;
use crate::fuzzy::fuzzy_variants;
use crate::item::SearchResultItem;
use crate::probe::AvailableResource;
use crate::results::ResultSet;
use karia_api_client::{contains_pattern, DataStore, Query, Record};
use karia_core::config::SearchStrategy;
use tracing::{debug, instrument, warn};

impl<S: DataStore> SearchEngine<S> {
    /// Search all available resources for `query`.
    ///
    /// A blank query returns nothing without touching the store.
    #[instrument(skip(self), fields(strategy = ?self.config().strategy))]
    pub async fn search(&self, query: &str) -> Vec<SearchResultItem> {
        let variants = fuzzy_variants(query);
        if variants.is_empty() {
            return Vec::new();
        }
        debug!(variants = ?variants, "Searching");

        let mut results = ResultSet::new();
        for resource in self.available() {
            match self.config().strategy {
                SearchStrategy::FieldByField => {
                    self.search_fields(resource, &variants, &mut results).await;
                }
                SearchStrategy::Combined => {
                    self.search_combined(resource, &variants, &mut results).await;
                }
            }
        }

        debug!(items = results.len(), "Search finished");
        results.into_sorted(self.config().order, &variants)
    }

    async fn search_fields(
        &self,
        resource: &AvailableResource,
        variants: &[String],
        results: &mut ResultSet,
    ) {
        for group in &resource.descriptor.field_groups {
            for column in group.columns() {
                if !resource.may_have(column) {
                    continue;
                }
                if let Some(rows) = self.match_field(resource.name(), column, variants).await {
                    collect(resource, rows, results);
                    break;
                }
            }
        }
    }

    /// Rows for the first variant that matches `column`.
    ///
    /// A failed query only skips that variant.
    async fn match_field(&self, resource: &str, column: &str, variants: &[String]) -> Option<Vec<Record>> {
        for variant in variants {
            let query = Query::from(resource)
                .ilike(column, contains_pattern(variant))
                .limit(self.config().field_limit);

            match self.store().select(&query).await {
                Ok(rows) if rows.is_empty() => {}
                Ok(rows) => {
                    debug!(resource, column, variant = %variant, rows = rows.len(), "Field matched");
                    return Some(rows);
                }
                Err(e) => {
                    warn!(resource, column, variant = %variant, error = %e, "Field query failed");
                }
            }
        }
        None
    }

    async fn search_combined(
        &self,
        resource: &AvailableResource,
        variants: &[String],
        results: &mut ResultSet,
    ) {
        let Some(columns) = resource.match_columns() else {
            debug!(resource = %resource.name(), "Columns unresolved, matching field by field");
            return self.search_fields(resource, variants, results).await;
        };

        for variant in variants {
            let query = Query::from(resource.name())
                .any_ilike(columns.iter().cloned(), contains_pattern(variant))
                .limit(self.config().field_limit);

            match self.store().select(&query).await {
                Ok(rows) if rows.is_empty() => {}
                Ok(rows) => {
                    collect(resource, rows, results);
                    return;
                }
                Err(e) => {
                    warn!(resource = %resource.name(), error = %e, "Combined query failed, matching field by field");
                    return self.search_fields(resource, variants, results).await;
                }
            }
        }
    }
}

fn collect(resource: &AvailableResource, rows: Vec<Record>, results: &mut ResultSet) {
    results.extend(
        rows.into_iter()
            .map(|row| SearchResultItem::decorate(&resource.descriptor, row)),
    );
}

#[cfg(test)]
mod tests {
    use crate::descriptor::{default_catalog, ResourceDescriptor};
    use crate::engine::SearchEngine;
    use crate::probe::AvailableResource;
    use karia_api_client::{ApiError, ApiResult, DataStore, Filter, MemoryStore, Query, Record};
    use karia_core::config::{ResultOrder, SearchConfig, SearchStrategy};
    use serde_json::json;
    use std::collections::HashSet;
    use std::future::Future;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Fails the first select with a 503, then defers to the inner store.
    struct FailsOnce {
        inner: MemoryStore,
        failed: AtomicBool,
    }

    impl FailsOnce {
        fn new(inner: MemoryStore) -> Self {
            Self {
                inner,
                failed: AtomicBool::new(false),
            }
        }
    }

    impl DataStore for FailsOnce {
        fn select(&self, query: &Query) -> impl Future<Output = ApiResult<Vec<Record>>> + Send {
            let fail = !self.failed.swap(true, Ordering::SeqCst);
            async move {
                if fail {
                    return Err(ApiError::api_response(503, "service unavailable"));
                }
                self.inner.select(query).await
            }
        }
    }

    fn combined() -> SearchConfig {
        SearchConfig {
            strategy: SearchStrategy::Combined,
            ..SearchConfig::default()
        }
    }

    fn marketplace() -> MemoryStore {
        MemoryStore::new()
            .with_table(
                "labours",
                vec![json!({"id": 1, "expertise": "General Labour"})],
            )
            .with_table(
                "Engineer",
                vec![json!({"id": 7, "name": "Kiran Jadhav", "Specialization": "Structural"})],
            )
    }

    fn keys(items: &[crate::item::SearchResultItem]) -> Vec<&str> {
        items.iter().map(|i| i.key.as_str()).collect()
    }

    #[tokio::test]
    async fn test_labor_finds_labour_row_only() {
        for config in [SearchConfig::default(), combined()] {
            let engine = SearchEngine::initialize(marketplace(), &default_catalog(), config).await;
            let names: Vec<&str> = engine.available().iter().map(AvailableResource::name).collect();
            assert_eq!(names, ["Engineer", "labours"]);

            let items = engine.search("labor").await;
            assert_eq!(keys(&items), ["labours-1"]);
            assert_eq!(items[0].offer.as_deref(), Some("General Labour"));
        }
    }

    #[tokio::test]
    async fn test_blank_query_issues_no_queries() {
        let engine = SearchEngine::initialize(marketplace(), &default_catalog(), SearchConfig::default()).await;
        engine.store().clear_log();

        assert!(engine.search("").await.is_empty());
        assert!(engine.search("   \t").await.is_empty());
        assert_eq!(engine.store().query_count(), 0);
    }

    #[tokio::test]
    async fn test_misspelling_covers_correct_spelling() {
        let store = MemoryStore::new().with_table(
            "engineers",
            vec![
                json!({"id": 1, "name": "A", "specialization": "Civil Engineer"}),
                json!({"id": 2, "name": "B", "specialization": "Site Engineer"}),
                json!({"id": 3, "name": "C", "specialization": "Surveyor"}),
            ],
        );
        let resources = vec![AvailableResource::new(
            ResourceDescriptor::new("engineers", "Engineers").group(["specialization"]),
        )];
        let engine = SearchEngine::with_resources(store, resources, SearchConfig::default());

        let correct: HashSet<String> = engine.search("engineer").await.into_iter().map(|i| i.key).collect();
        let typo: HashSet<String> = engine.search("enginer").await.into_iter().map(|i| i.key).collect();

        assert_eq!(correct.len(), 2);
        assert!(typo.is_superset(&correct));
    }

    #[tokio::test]
    async fn test_substring_match_is_found_and_idempotent() {
        let store = MemoryStore::new()
            .with_table("builders", vec![json!({"id": 5, "name": "Shree Constructions"})])
            .with_table("shops", vec![json!({"id": 5, "shop_name": "Shree Hardware"})]);
        let engine = SearchEngine::initialize(store, &default_catalog(), SearchConfig::default()).await;

        let first = engine.search("SHREE").await;
        let second = engine.search("shree").await;

        assert_eq!(keys(&first), ["builders-5", "shops-5"]);
        assert_eq!(keys(&first), keys(&second));
    }

    #[tokio::test]
    async fn test_field_group_stops_at_first_matching_column() {
        let store = MemoryStore::new().with_table(
            "architects",
            vec![json!({"id": 1, "name": "Studio Arc", "Name": "Studio Arc", "city": "Pune"})],
        );
        let resources = vec![AvailableResource::new(
            ResourceDescriptor::new("architects", "Architects").group(["name", "Name"]),
        )];
        let engine = SearchEngine::with_resources(store, resources, SearchConfig::default());

        let items = engine.search("studio").await;
        assert_eq!(items.len(), 1);
        let queries = engine.store().queries();
        let columns: Vec<Vec<&str>> = queries
            .iter()
            .flat_map(|q| q.filters().iter().map(Filter::columns).collect::<Vec<_>>())
            .collect();
        assert_eq!(columns, [vec!["name"]]);
    }

    #[tokio::test]
    async fn test_errors_are_swallowed() {
        let store = MemoryStore::new()
            .with_failing("builders")
            .with_table("shops", vec![json!({"id": 1, "shop_name": "Om Cement"})]);
        let engine = SearchEngine::with_resources(
            store,
            vec![
                AvailableResource::new(default_catalog().remove(0)),
                AvailableResource::new(ResourceDescriptor::new("shops", "Shops").group(["shop_name"])),
            ],
            SearchConfig::default(),
        );

        let items = engine.search("cement").await;
        assert_eq!(keys(&items), ["shops-1"]);
    }

    #[tokio::test]
    async fn test_failed_variant_does_not_skip_the_rest() {
        let store = FailsOnce::new(MemoryStore::new().with_table(
            "engineers",
            vec![json!({"id": 1, "name": "A", "specialization": "Civil Engineer"})],
        ));
        let resources = vec![AvailableResource::new(
            ResourceDescriptor::new("engineers", "Engineers").group(["specialization"]),
        )];
        let engine = SearchEngine::with_resources(store, resources, SearchConfig::default());

        let items = engine.search("enginer").await;

        assert_eq!(keys(&items), ["engineers-1"]);
        let queries = engine.store().inner.queries();
        assert!(queries[0].to_query_string().contains("engineer"));
    }

    #[tokio::test]
    async fn test_row_matching_several_groups_is_returned_once() {
        let store = MemoryStore::new().with_table(
            "builders",
            vec![json!({"id": 3, "name": "Pune Builders", "location": "Pune"})],
        );
        let resources = vec![AvailableResource::new(
            ResourceDescriptor::new("builders", "Builders")
                .group(["name"])
                .group(["location"]),
        )];
        let engine = SearchEngine::with_resources(store, resources, SearchConfig::default());

        let items = engine.search("pune").await;

        assert_eq!(keys(&items), ["builders-3"]);
        assert_eq!(engine.store().query_count(), 2);
    }

    #[tokio::test]
    async fn test_combined_issues_one_query_per_resource() {
        let store = MemoryStore::new().with_table(
            "Engineer",
            vec![
                json!({"id": 1, "name": "Kiran", "Specialization": "Structural", "location": "Pune"}),
                json!({"id": 2, "name": "Structo Labs", "Specialization": "MEP", "location": "Thane"}),
            ],
        );
        let engine = SearchEngine::initialize(store, &default_catalog(), combined()).await;
        engine.store().clear_log();

        let items = engine.search("struct").await;

        assert_eq!(keys(&items), ["Engineer-1", "Engineer-2"]);
        let queries = engine.store().queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(
            queries[0].filters()[0].columns(),
            ["name", "Specialization", "location"]
        );
    }

    #[tokio::test]
    async fn test_relevance_order() {
        let store = MemoryStore::new()
            .with_table("architects", vec![json!({"id": 1, "name": "Modern Paint Studio"})])
            .with_table("shops", vec![json!({"id": 2, "shop_name": "Paint"})]);
        let config = SearchConfig {
            order: ResultOrder::Relevance,
            ..SearchConfig::default()
        };
        let engine = SearchEngine::initialize(store, &default_catalog(), config).await;

        let items = engine.search("paint").await;
        assert_eq!(keys(&items), ["shops-2", "architects-1"]);
    }
}
