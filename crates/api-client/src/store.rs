//! The data-store seam
//!
//! Consumers (probe, browse, keyword search, update check) only ever need
//! "run this filtered select and give me the rows". [`DataStore`] is that
//! capability; [`StoreClient`](crate::client::StoreClient) provides it over
//! HTTP and [`MemoryStore`](crate::memory::MemoryStore) in process.

use crate::error::ApiResult;
use crate::query::Query;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

/// A loosely-typed row as returned by the store
pub type Record = serde_json::Map<String, Value>;

/// Filtered select over named resources
pub trait DataStore: Send + Sync {
    /// Run a query and return the matching rows
    fn select(&self, query: &Query) -> impl Future<Output = ApiResult<Vec<Record>>> + Send;
}

impl<T: DataStore> DataStore for Arc<T> {
    fn select(&self, query: &Query) -> impl Future<Output = ApiResult<Vec<Record>>> + Send {
        (**self).select(query)
    }
}

impl<T: DataStore> DataStore for &T {
    fn select(&self, query: &Query) -> impl Future<Output = ApiResult<Vec<Record>>> + Send {
        (**self).select(query)
    }
}

/// Render a field as display text
///
/// Strings are trimmed, numbers and booleans are formatted; nulls, empty
/// strings, arrays and objects yield `None`.
#[must_use]
pub fn field_text(record: &Record, column: &str) -> Option<String> {
    value_text(record.get(column)?)
}

/// Render a JSON value as display text, see [`field_text`]
#[must_use]
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// First non-empty field among `columns`, in order
#[must_use]
pub fn first_text<S: AsRef<str>>(record: &Record, columns: &[S]) -> Option<String> {
    columns
        .iter()
        .find_map(|column| field_text(record, column.as_ref()))
}
