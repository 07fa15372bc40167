//! Typo-tolerant query variants.
//!
//! Variants come from a fixed table of domain keywords and the ways people
//! actually misspell them. There is no edit-distance step: a query only
//! gains variants when it contains a listed spelling.

use once_cell::sync::Lazy;

/// One domain keyword and its known misspellings.
#[derive(Debug, Clone, Copy)]
pub struct TypoEntry {
    /// Correct spelling
    pub keyword: &'static str,
    /// Common misspellings
    pub misspellings: &'static [&'static str],
}

impl TypoEntry {
    fn spellings(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.keyword).chain(self.misspellings.iter().copied())
    }
}

/// Built-in misspelling table.
pub static TYPO_TABLE: &[TypoEntry] = &[
    TypoEntry {
        keyword: "engineer",
        misspellings: &["enginer", "engeneer", "enginner", "engineear", "enjineer"],
    },
    TypoEntry {
        keyword: "labour",
        misspellings: &["labor", "labur", "lebour", "lobour"],
    },
    TypoEntry {
        keyword: "contractor",
        misspellings: &["contracter", "contarctor", "contrator", "contractar"],
    },
    TypoEntry {
        keyword: "builder",
        misspellings: &["bulder", "buider", "bilder", "buildar"],
    },
    TypoEntry {
        keyword: "architecture",
        misspellings: &["architecure", "architechture", "arcitecture", "architectre"],
    },
    TypoEntry {
        keyword: "architect",
        misspellings: &["architech", "arcitect", "archtect", "architekt"],
    },
    TypoEntry {
        keyword: "shop",
        misspellings: &["shope", "shoop"],
    },
    TypoEntry {
        keyword: "machinery",
        misspellings: &["machinary", "machienery", "machenery", "mashinery"],
    },
];

/// Every spelling in the table, longest first, paired with its entry.
static SPELLINGS: Lazy<Vec<(&'static str, &'static TypoEntry)>> = Lazy::new(|| {
    let mut spellings: Vec<_> = TYPO_TABLE
        .iter()
        .flat_map(|entry| entry.spellings().map(move |s| (s, entry)))
        .collect();
    spellings.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));
    spellings.dedup_by(|a, b| a.0 == b.0);
    spellings
});

/// A spelling found in the query.
#[derive(Debug, Clone, Copy)]
struct Hit {
    start: usize,
    end: usize,
    entry: &'static TypoEntry,
}

/// Locate listed spellings, longest first, without overlaps.
fn find_hits(query: &str) -> Vec<Hit> {
    let mut hits: Vec<Hit> = Vec::new();
    for &(spelling, entry) in SPELLINGS.iter() {
        for (start, _) in query.match_indices(spelling) {
            let end = start + spelling.len();
            if hits.iter().any(|h| start < h.end && h.start < end) {
                continue;
            }
            hits.push(Hit { start, end, entry });
        }
    }
    hits.sort_by_key(|h| h.start);
    hits
}

/// Lowercase query followed by its typo variants.
///
/// The first element is always the trimmed, lowercased query. For every
/// listed spelling found in it, the canonical keyword and each other
/// misspelling are substituted at that position. Variants equal to the
/// literal query or to an earlier variant are dropped. A blank query
/// yields an empty list.
#[must_use]
pub fn fuzzy_variants(query: &str) -> Vec<String> {
    let literal = query.trim().to_lowercase();
    if literal.is_empty() {
        return Vec::new();
    }

    let mut variants = vec![literal.clone()];
    for hit in find_hits(&literal) {
        for spelling in hit.entry.spellings() {
            let candidate = format!(
                "{}{}{}",
                &literal[..hit.start],
                spelling,
                &literal[hit.end..]
            );
            if !variants.contains(&candidate) {
                variants.push(candidate);
            }
        }
    }
    variants
}

/// Check if text contains all characters of query in order.
///
/// Used as the weakest relevance tier.
#[must_use]
pub fn fuzzy_match(text: &str, query: &str) -> bool {
    let mut text_chars = text.chars();
    query
        .chars()
        .all(|query_char| text_chars.any(|c| c == query_char))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_query_has_only_literal() {
        assert_eq!(fuzzy_variants("  Plumbing "), vec!["plumbing"]);
    }

    #[test]
    fn test_blank_query_has_no_variants() {
        assert!(fuzzy_variants("   ").is_empty());
    }

    #[test]
    fn test_misspelling_yields_canonical() {
        let variants = fuzzy_variants("Enginer");
        assert_eq!(variants[0], "enginer");
        assert_eq!(variants[1], "engineer");
        assert!(variants.contains(&"engeneer".to_string()));
        assert_eq!(variants.iter().filter(|v| *v == "enginer").count(), 1);
    }

    #[test]
    fn test_keyword_yields_misspellings() {
        let variants = fuzzy_variants("labour");
        assert_eq!(variants[0], "labour");
        assert!(variants.contains(&"labor".to_string()));
        assert!(!variants[1..].contains(&"labour".to_string()));
    }

    #[test]
    fn test_substitution_keeps_surrounding_text() {
        let variants = fuzzy_variants("civil enginer pune");
        assert!(variants.contains(&"civil engineer pune".to_string()));
    }

    #[test]
    fn test_longest_spelling_wins() {
        let variants = fuzzy_variants("architecture");
        assert_eq!(variants.len(), 5);
        assert!(variants.contains(&"architechture".to_string()));
        assert!(!variants.contains(&"architechure".to_string()));
    }

    #[test]
    fn test_two_keywords() {
        let variants = fuzzy_variants("bulder contracter");
        assert!(variants.contains(&"builder contracter".to_string()));
        assert!(variants.contains(&"bulder contractor".to_string()));
    }

    #[test]
    fn test_fuzzy_match() {
        assert!(fuzzy_match("hello world", "hwo"));
        assert!(fuzzy_match("hello", "hello"));
        assert!(!fuzzy_match("hello", "lhe"));
        assert!(fuzzy_match("anything", ""));
    }
}
