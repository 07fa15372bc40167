//! Deduplicated result accumulation.

use crate::item::SearchResultItem;
use crate::relevance::item_relevance;
use karia_core::config::ResultOrder;
use std::cmp::Reverse;
use std::collections::HashSet;

/// Result items keyed by `"{source}-{id}"`, first-seen wins.
#[derive(Debug, Default, Clone)]
pub struct ResultSet {
    items: Vec<SearchResultItem>,
    keys: HashSet<String>,
}

impl ResultSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless the key is already present; returns whether it was added.
    pub fn insert(&mut self, item: SearchResultItem) -> bool {
        if !self.keys.insert(item.key.clone()) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Number of distinct items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether an item with this key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Items in arrival order.
    #[must_use]
    pub fn into_items(self) -> Vec<SearchResultItem> {
        self.items
    }

    /// Items in the requested order.
    ///
    /// Both orders are stable: `Resource` sorts by resource name keeping
    /// arrival order inside a resource, `Relevance` sorts by descending
    /// score and breaks ties the same way.
    #[must_use]
    pub fn into_sorted(self, order: ResultOrder, variants: &[String]) -> Vec<SearchResultItem> {
        let mut items = self.items;
        match order {
            ResultOrder::Resource => items.sort_by(|a, b| a.source.cmp(&b.source)),
            ResultOrder::Relevance => {
                let mut scored: Vec<(u32, SearchResultItem)> = items
                    .into_iter()
                    .map(|item| (item_relevance(&item, variants), item))
                    .collect();
                scored.sort_by(|(sa, a), (sb, b)| {
                    Reverse(*sa).cmp(&Reverse(*sb)).then_with(|| a.source.cmp(&b.source))
                });
                items = scored.into_iter().map(|(_, item)| item).collect();
            }
        }
        items
    }
}

impl Extend<SearchResultItem> for ResultSet {
    fn extend<I: IntoIterator<Item = SearchResultItem>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl FromIterator<SearchResultItem> for ResultSet {
    fn from_iter<I: IntoIterator<Item = SearchResultItem>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ResourceDescriptor;
    use proptest::prelude::*;
    use serde_json::json;

    fn item(resource: &str, id: u32, name: &str) -> SearchResultItem {
        SearchResultItem::decorate(
            &ResourceDescriptor::new(resource, resource),
            json!({"id": id, "name": name}).as_object().cloned().unwrap(),
        )
    }

    #[test]
    fn test_first_seen_wins() {
        let mut set = ResultSet::new();
        assert!(set.insert(item("shops", 1, "First")));
        assert!(!set.insert(item("shops", 1, "Second")));
        assert!(set.insert(item("items", 1, "Other resource")));

        assert_eq!(set.len(), 2);
        assert!(set.contains_key("shops-1"));
        let items = set.into_items();
        assert_eq!(items[0].name.as_deref(), Some("First"));
    }

    #[test]
    fn test_resource_order_is_stable() {
        let set: ResultSet = vec![
            item("shops", 2, "b"),
            item("builders", 9, "x"),
            item("shops", 1, "a"),
            item("builders", 3, "y"),
        ]
        .into_iter()
        .collect();

        let keys: Vec<String> = set
            .into_sorted(ResultOrder::Resource, &[])
            .into_iter()
            .map(|i| i.key)
            .collect();
        assert_eq!(keys, ["builders-9", "builders-3", "shops-2", "shops-1"]);
    }

    #[test]
    fn test_relevance_order() {
        let set: ResultSet = vec![
            item("shops", 1, "Hardware and Paint"),
            item("shops", 2, "Paint House"),
            item("builders", 3, "paint"),
        ]
        .into_iter()
        .collect();

        let keys: Vec<String> = set
            .into_sorted(ResultOrder::Relevance, &["paint".to_string()])
            .into_iter()
            .map(|i| i.key)
            .collect();
        assert_eq!(keys, ["builders-3", "shops-2", "shops-1"]);
    }

    proptest! {
        #[test]
        fn prop_keys_unique(entries in prop::collection::vec((0usize..3, 0u32..20), 0..60)) {
            let resources = ["builders", "shops", "labours"];
            let set: ResultSet = entries
                .iter()
                .map(|(r, id)| item(resources[*r], *id, "n"))
                .collect();

            let expected: HashSet<(usize, u32)> = entries.iter().copied().collect();
            let items = set.into_sorted(ResultOrder::Resource, &[]);
            let keys: HashSet<&str> = items.iter().map(|i| i.key.as_str()).collect();

            prop_assert_eq!(keys.len(), items.len());
            prop_assert_eq!(items.len(), expected.len());
        }
    }
}
