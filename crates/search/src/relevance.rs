//! Relevance scoring for search results.

use crate::fuzzy::fuzzy_match;
use crate::item::SearchResultItem;
use unicode_segmentation::UnicodeSegmentation;

/// Relevance score levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RelevanceScore {
    /// No match
    None = 0,
    /// Query characters appear in order
    Fuzzy = 10,
    /// Contains substring
    Contains = 20,
    /// A word starts with the query
    WordBoundary = 30,
    /// Starts with query
    StartsWith = 40,
    /// Exact match
    Exact = 50,
}

/// Calculate relevance score for a text against a query.
///
/// Comparison is case-insensitive; higher is better.
#[must_use]
pub fn calculate_relevance(text: &str, query: &str) -> u32 {
    let text_lower = text.to_lowercase();
    let query_lower = query.trim().to_lowercase();

    if query_lower.is_empty() {
        return RelevanceScore::None as u32;
    }

    if text_lower == query_lower {
        return RelevanceScore::Exact as u32;
    }

    if text_lower.starts_with(&query_lower) {
        return RelevanceScore::StartsWith as u32;
    }

    let at_word_start = text_lower
        .split_word_bound_indices()
        .filter(|(_, word)| word.chars().any(char::is_alphanumeric))
        .any(|(start, _)| text_lower[start..].starts_with(&query_lower));
    if at_word_start {
        return RelevanceScore::WordBoundary as u32;
    }

    if text_lower.contains(&query_lower) {
        return RelevanceScore::Contains as u32;
    }

    if fuzzy_match(&text_lower, &query_lower) {
        return RelevanceScore::Fuzzy as u32;
    }

    RelevanceScore::None as u32
}

/// Best score of the item's name and offer against any query variant.
#[must_use]
pub fn item_relevance(item: &SearchResultItem, variants: &[String]) -> u32 {
    [item.name.as_deref(), item.offer.as_deref()]
        .into_iter()
        .flatten()
        .flat_map(|text| variants.iter().map(move |v| calculate_relevance(text, v)))
        .max()
        .unwrap_or(RelevanceScore::None as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ResourceDescriptor;
    use serde_json::json;

    #[test]
    fn test_exact_match() {
        assert_eq!(calculate_relevance("Mason", "mason"), RelevanceScore::Exact as u32);
    }

    #[test]
    fn test_starts_with() {
        assert_eq!(
            calculate_relevance("Mason Work", "mason"),
            RelevanceScore::StartsWith as u32
        );
    }

    #[test]
    fn test_word_boundary() {
        assert_eq!(
            calculate_relevance("General Labour", "labour"),
            RelevanceScore::WordBoundary as u32
        );
        assert_eq!(
            calculate_relevance("Civil/Structural", "structural"),
            RelevanceScore::WordBoundary as u32
        );
    }

    #[test]
    fn test_contains() {
        assert_eq!(
            calculate_relevance("Sitework", "work"),
            RelevanceScore::Contains as u32
        );
    }

    #[test]
    fn test_fuzzy_and_none() {
        assert_eq!(calculate_relevance("Plumbing", "plmb"), RelevanceScore::Fuzzy as u32);
        assert_eq!(calculate_relevance("Plumbing", "xyz"), RelevanceScore::None as u32);
        assert_eq!(calculate_relevance("Plumbing", "  "), RelevanceScore::None as u32);
    }

    #[test]
    fn test_item_relevance_uses_best_field_and_variant() {
        let descriptor = ResourceDescriptor::new("labours", "Labour").offer_fields(&["expertise"]);
        let item = SearchResultItem::decorate(
            &descriptor,
            json!({"id": 1, "name": "Ramesh", "expertise": "Labour"})
                .as_object()
                .cloned()
                .unwrap(),
        );

        let variants = vec!["labor".to_string(), "labour".to_string()];
        assert_eq!(item_relevance(&item, &variants), RelevanceScore::Exact as u32);
        assert_eq!(item_relevance(&item, &[]), RelevanceScore::None as u32);
    }
}
