//! Probing, category browse and typo-tolerant keyword search for Karia Mitra.
//!
//! This crate provides:
//! - Availability probing of the resource catalog
//! - Category browse with a row cap
//! - Keyword search with static misspelling variants
//! - Field-by-field and combined OR query strategies
//! - Deduplicated results ordered by resource or relevance
//! - A debounced, latest-submission-wins search session

mod browse;
mod debounce;
mod descriptor;
mod engine;
mod error;
mod fuzzy;
mod item;
mod keyword;
mod probe;
mod relevance;
mod results;

pub use debounce::SearchSession;
pub use descriptor::{default_catalog, FieldGroup, FieldMapping, ResourceDescriptor};
pub use engine::SearchEngine;
pub use error::{Result, SearchError};
pub use fuzzy::{fuzzy_match, fuzzy_variants, TypoEntry, TYPO_TABLE};
pub use item::SearchResultItem;
pub use probe::{AvailableResource, ResourceProbe};
pub use relevance::{calculate_relevance, item_relevance, RelevanceScore};
pub use results::ResultSet;
