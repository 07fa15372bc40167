//! Resource query model
//!
//! A [`Query`] names a resource and describes a filtered select: selected
//! columns, equality and case-insensitive pattern filters, ordering and a row
//! limit. It renders to PostgREST query parameters for [`StoreClient`] and is
//! evaluated directly by [`MemoryStore`].
//!
//! [`StoreClient`]: crate::client::StoreClient
//! [`MemoryStore`]: crate::memory::MemoryStore

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;
use std::fmt;

/// Characters escaped in query-string values
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'=')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Wrap a search term as a `%term%` substring pattern
///
/// `%`, `_` and `\` in the term are escaped so they match literally. A `*`
/// cannot be carried through PostgREST, so it becomes the single-character
/// wildcard `_`.
#[must_use]
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        match c {
            '%' | '_' | '\\' => {
                pattern.push('\\');
                pattern.push(c);
            }
            '*' => pattern.push('_'),
            _ => pattern.push(c),
        }
    }
    pattern.push('%');
    pattern
}

/// A single row filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Filter {
    /// Column equals value (compared as text)
    Eq {
        /// Column name
        column: String,
        /// Expected value
        value: String,
    },
    /// Case-insensitive pattern match, `%` matches any run of characters
    ILike {
        /// Column name
        column: String,
        /// Pattern with `%` wildcards
        pattern: String,
    },
    /// Case-insensitive pattern match against any of several columns
    AnyILike {
        /// Candidate columns
        columns: Vec<String>,
        /// Pattern with `%` wildcards
        pattern: String,
    },
}

impl Filter {
    /// Columns this filter refers to
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        match self {
            Self::Eq { column, .. } | Self::ILike { column, .. } => vec![column.as_str()],
            Self::AnyILike { columns, .. } => columns.iter().map(String::as_str).collect(),
        }
    }

    fn to_param(&self) -> (String, String) {
        match self {
            Self::Eq { column, value } => (column.clone(), format!("eq.{value}")),
            Self::ILike { column, pattern } => {
                (column.clone(), format!("ilike.{}", postgrest_pattern(pattern)))
            }
            Self::AnyILike { columns, pattern } => {
                let pattern = quote_logic_value(&postgrest_pattern(pattern));
                let clauses: Vec<String> = columns
                    .iter()
                    .map(|c| format!("{c}.ilike.{pattern}"))
                    .collect();
                ("or".to_string(), format!("({})", clauses.join(",")))
            }
        }
    }
}

/// PostgREST accepts `*` in place of `%` so patterns survive URL encoding
fn postgrest_pattern(pattern: &str) -> String {
    pattern.replace('%', "*")
}

/// Values inside `or=(...)` must be quoted when they contain reserved characters
fn quote_logic_value(value: &str) -> String {
    if value.contains([',', '(', ')', '"', ':', '\\', ' ']) {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

/// Row ordering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    /// Column to order by
    pub column: String,
    /// Ascending if true
    pub ascending: bool,
}

/// A filtered select over one named resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    resource: String,
    columns: String,
    filters: Vec<Filter>,
    order: Option<Order>,
    limit: Option<usize>,
}

impl Query {
    /// Select all columns from a resource
    #[allow(clippy::should_implement_trait)]
    pub fn from(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Restrict the selected columns (comma separated)
    #[must_use]
    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    /// Add an equality filter
    #[must_use]
    pub fn eq(mut self, column: impl Into<String>, value: impl fmt::Display) -> Self {
        self.filters.push(Filter::Eq {
            column: column.into(),
            value: value.to_string(),
        });
        self
    }

    /// Add a case-insensitive pattern filter
    #[must_use]
    pub fn ilike(mut self, column: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.filters.push(Filter::ILike {
            column: column.into(),
            pattern: pattern.into(),
        });
        self
    }

    /// Add a case-insensitive pattern filter matched against any of `columns`
    #[must_use]
    pub fn any_ilike<I, S>(mut self, columns: I, pattern: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.push(Filter::AnyILike {
            columns: columns.into_iter().map(Into::into).collect(),
            pattern: pattern.into(),
        });
        self
    }

    /// Order ascending by a column
    #[must_use]
    pub fn order_asc(mut self, column: impl Into<String>) -> Self {
        self.order = Some(Order {
            column: column.into(),
            ascending: true,
        });
        self
    }

    /// Order descending by a column
    #[must_use]
    pub fn order_desc(mut self, column: impl Into<String>) -> Self {
        self.order = Some(Order {
            column: column.into(),
            ascending: false,
        });
        self
    }

    /// Cap the number of returned rows
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Resource name
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Selected columns (`*` for all)
    #[must_use]
    pub fn columns(&self) -> &str {
        &self.columns
    }

    /// Filters in the order they were added
    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Requested ordering
    #[must_use]
    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    /// Requested row cap
    #[must_use]
    pub fn row_limit(&self) -> Option<usize> {
        self.limit
    }

    /// Render as PostgREST query parameters
    #[must_use]
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.columns.clone())];
        params.extend(self.filters.iter().map(Filter::to_param));

        if let Some(ref order) = self.order {
            let direction = if order.ascending { "asc" } else { "desc" };
            params.push(("order".to_string(), format!("{}.{direction}", order.column)));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        params
    }

    /// Render as an encoded query string (without the leading `?`)
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.to_params()
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(key, QUERY_VALUE),
                    utf8_percent_encode(value, QUERY_VALUE)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}?{}", self.resource, self.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_query() {
        let query = Query::from("builders").select("id").limit(1);
        assert_eq!(query.to_query_string(), "select=id&limit=1");
        assert_eq!(query.to_string(), "builders?select=id&limit=1");
    }

    #[test]
    fn test_ilike_uses_star_wildcards() {
        let query = Query::from("labours")
            .ilike("expertise", contains_pattern("general labour"))
            .limit(50);

        assert_eq!(
            query.to_query_string(),
            "select=*&expertise=ilike.*general%20labour*&limit=50"
        );
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("civil"), "%civil%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(contains_pattern("2*4"), "%2_4%");

        let query = Query::from("items").any_ilike(["name"], contains_pattern("a_b"));
        assert_eq!(query.to_params()[1].1, "(name.ilike.\"*a\\\\_b*\")");
    }

    #[test]
    fn test_any_ilike_renders_or_group() {
        let query = Query::from("Engineer").any_ilike(["name", "Specialization"], "%civil%");
        let params = query.to_params();

        assert_eq!(params[1].0, "or");
        assert_eq!(params[1].1, "(name.ilike.*civil*,Specialization.ilike.*civil*)");
    }

    #[test]
    fn test_any_ilike_quotes_reserved_characters() {
        let query = Query::from("shops").any_ilike(["name"], "%tools, pipes%");
        assert_eq!(query.to_params()[1].1, "(name.ilike.\"*tools, pipes*\")");
    }

    #[test]
    fn test_eq_order_limit() {
        let query = Query::from("app_updates")
            .eq("is_active", true)
            .order_desc("version_code")
            .limit(1);

        assert_eq!(
            query.to_query_string(),
            "select=*&is_active=eq.true&order=version_code.desc&limit=1"
        );
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let query = Query::from("items").eq("name", "a&b=c");
        assert_eq!(query.to_query_string(), "select=*&name=eq.a%26b%3Dc");
    }

    #[test]
    fn test_filter_columns() {
        let filter = Filter::AnyILike {
            columns: vec!["a".into(), "b".into()],
            pattern: "%x%".into(),
        };
        assert_eq!(filter.columns(), vec!["a", "b"]);
    }
}
