//! Resource availability probe.
//!
//! Some catalog entries are legacy aliases of each other and only one of
//! each pair exists in a given deployment. The probe asks the store for a
//! single id per resource and keeps those that answer without error.

use crate::descriptor::ResourceDescriptor;
use karia_api_client::{DataStore, Query};
use std::collections::BTreeSet;
use tracing::debug;

/// A resource that answered the probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableResource {
    /// Static description
    pub descriptor: ResourceDescriptor,
    /// Columns seen in a sampled row; `None` when not sampled or the table is empty
    pub columns: Option<BTreeSet<String>>,
}

impl AvailableResource {
    /// Available resource with unknown columns.
    #[must_use]
    pub fn new(descriptor: ResourceDescriptor) -> Self {
        Self {
            descriptor,
            columns: None,
        }
    }

    /// Resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Whether `column` may exist; unknown columns are assumed present.
    #[must_use]
    pub fn may_have(&self, column: &str) -> bool {
        self.columns
            .as_ref()
            .is_none_or(|columns| columns.contains(column))
    }

    /// First existing column of every field group.
    ///
    /// `None` when columns were never resolved or no group has a match.
    #[must_use]
    pub fn match_columns(&self) -> Option<Vec<String>> {
        let columns = self.columns.as_ref()?;
        let resolved: Vec<String> = self
            .descriptor
            .field_groups
            .iter()
            .filter_map(|group| group.columns().iter().find(|c| columns.contains(*c)))
            .cloned()
            .collect();
        (!resolved.is_empty()).then_some(resolved)
    }
}

/// Sequential availability probe.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceProbe {
    sample_columns: bool,
}

impl ResourceProbe {
    /// Probe existence only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also sample one full row per resource to learn its columns.
    #[must_use]
    pub fn sample_columns(mut self, sample: bool) -> Self {
        self.sample_columns = sample;
        self
    }

    /// Probe each descriptor in order and keep the ones that answer.
    pub async fn run<S: DataStore>(
        &self,
        store: &S,
        catalog: &[ResourceDescriptor],
    ) -> Vec<AvailableResource> {
        let mut available = Vec::with_capacity(catalog.len());

        for descriptor in catalog {
            let probe = Query::from(descriptor.name.as_str()).select("id").limit(1);
            if let Err(e) = store.select(&probe).await {
                debug!(resource = %descriptor.name, error = %e, "Resource unavailable");
                continue;
            }

            let columns = if self.sample_columns {
                sample_columns(store, &descriptor.name).await
            } else {
                None
            };
            debug!(
                resource = %descriptor.name,
                columns = columns.as_ref().map_or(0, BTreeSet::len),
                "Resource available"
            );

            available.push(AvailableResource {
                descriptor: descriptor.clone(),
                columns,
            });
        }

        available
    }
}

async fn sample_columns<S: DataStore>(store: &S, resource: &str) -> Option<BTreeSet<String>> {
    match store.select(&Query::from(resource).limit(1)).await {
        Ok(rows) => rows.first().map(|row| row.keys().cloned().collect()),
        Err(e) => {
            debug!(resource, error = %e, "Column sample failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use karia_api_client::MemoryStore;
    use serde_json::json;

    fn catalog() -> Vec<ResourceDescriptor> {
        vec![
            ResourceDescriptor::new("Engineer", "Engineers").group(["name"]).group(["Specialization", "specialization"]),
            ResourceDescriptor::new("engineers", "Engineers").group(["name"]),
            ResourceDescriptor::new("architects", "Architects").group(["name"]),
            ResourceDescriptor::new("shops", "Shops").group(["shop_name", "name"]),
        ]
    }

    fn store() -> MemoryStore {
        MemoryStore::new()
            .with_table(
                "Engineer",
                vec![json!({"id": 1, "name": "Kiran", "Specialization": "Structural"})],
            )
            .with_columns("architects", ["id", "name"])
            .with_table("shops", vec![json!({"id": 4, "shop_name": "Om Hardware"})])
            .with_failing("shops")
    }

    #[tokio::test]
    async fn test_probe_keeps_answering_resources_in_order() {
        let store = store();
        let available = ResourceProbe::new().run(&store, &catalog()).await;

        let names: Vec<&str> = available.iter().map(AvailableResource::name).collect();
        assert_eq!(names, ["Engineer", "architects"]);
        assert!(available.iter().all(|r| r.columns.is_none()));

        let probes = store.queries();
        assert_eq!(probes.len(), 4);
        assert!(probes.iter().all(|q| q.to_query_string() == "select=id&limit=1"));
    }

    #[tokio::test]
    async fn test_sampling_resolves_columns() {
        let store = store();
        let available = ResourceProbe::new()
            .sample_columns(true)
            .run(&store, &catalog())
            .await;

        let engineer = &available[0];
        assert_eq!(
            engineer.match_columns(),
            Some(vec!["name".to_string(), "Specialization".to_string()])
        );
        assert!(!engineer.may_have("specialization"));

        // empty table: nothing to sample
        let architects = &available[1];
        assert_eq!(architects.columns, None);
        assert_eq!(architects.match_columns(), None);
        assert!(architects.may_have("anything"));
    }
}
