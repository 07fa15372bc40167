//! In-process data store
//!
//! Evaluates [`Query`] values against tables held in memory with the same
//! observable behaviour the search component relies on from PostgREST:
//! unknown resources and unknown filter columns are errors, `ilike` is a
//! case-insensitive `%` wildcard match, rows keep insertion order unless an
//! ordering is requested. Every issued query is recorded.

use crate::error::{ApiError, ApiResult};
use crate::query::{Filter, Query};
use crate::store::{value_text, DataStore, Record};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Mutex;
use tracing::trace;

#[derive(Debug, Default)]
struct Table {
    columns: BTreeSet<String>,
    rows: Vec<Record>,
}

/// Tables held in memory, queried through [`DataStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: HashMap<String, Table>,
    failing: HashSet<String>,
    log: Mutex<Vec<Query>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or extend) a table; non-object values are ignored
    #[must_use]
    pub fn with_table<I>(mut self, name: impl Into<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let table = self.tables.entry(name.into()).or_default();
        for row in rows {
            if let Value::Object(record) = row {
                table.columns.extend(record.keys().cloned());
                table.rows.push(record);
            }
        }
        self
    }

    /// Declare columns explicitly (needed for empty tables)
    #[must_use]
    pub fn with_columns<I, S>(mut self, name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let table = self.tables.entry(name.into()).or_default();
        table.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Make every query against `name` fail, as an unreachable resource would
    #[must_use]
    pub fn with_failing(mut self, name: impl Into<String>) -> Self {
        self.failing.insert(name.into());
        self
    }

    /// Queries issued so far, oldest first
    #[must_use]
    pub fn queries(&self) -> Vec<Query> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// Number of queries issued so far
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.log.lock().map(|log| log.len()).unwrap_or_default()
    }

    /// Forget recorded queries
    pub fn clear_log(&self) {
        if let Ok(mut log) = self.log.lock() {
            log.clear();
        }
    }

    fn run(&self, query: &Query) -> ApiResult<Vec<Record>> {
        if let Ok(mut log) = self.log.lock() {
            log.push(query.clone());
        }

        let resource = query.resource();
        if self.failing.contains(resource) {
            return Err(ApiError::api_response(
                503,
                format!("resource {resource} is unreachable"),
            ));
        }
        let table = self.tables.get(resource).ok_or_else(|| {
            ApiError::api_response(404, format!("relation \"public.{resource}\" does not exist"))
        })?;

        let selected: Vec<&str> = match query.columns().trim() {
            "*" => Vec::new(),
            list => list.split(',').map(str::trim).collect(),
        };
        table.check_columns(resource, selected.iter().copied())?;
        for filter in query.filters() {
            table.check_columns(resource, filter.columns())?;
        }

        let mut rows: Vec<&Record> = table
            .rows
            .iter()
            .filter(|row| query.filters().iter().all(|f| matches_filter(row, f)))
            .collect();

        if let Some(order) = query.order() {
            rows.sort_by(|a, b| {
                let ordering = compare_values(a.get(&order.column), b.get(&order.column));
                if order.ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
        }

        if let Some(limit) = query.row_limit() {
            rows.truncate(limit);
        }

        trace!(query = %query, rows = rows.len(), "Memory select");

        Ok(rows
            .into_iter()
            .map(|row| project(row, &selected))
            .collect())
    }
}

impl Table {
    /// Tables without any known column accept every column name
    fn check_columns<'a>(
        &self,
        resource: &str,
        columns: impl IntoIterator<Item = &'a str>,
    ) -> ApiResult<()> {
        if self.columns.is_empty() {
            return Ok(());
        }
        for column in columns {
            if !self.columns.contains(column) {
                return Err(ApiError::api_response(
                    400,
                    format!("column {resource}.{column} does not exist"),
                ));
            }
        }
        Ok(())
    }
}

impl DataStore for MemoryStore {
    async fn select(&self, query: &Query) -> ApiResult<Vec<Record>> {
        self.run(query)
    }
}

fn project(row: &Record, selected: &[&str]) -> Record {
    if selected.is_empty() {
        return row.clone();
    }
    selected
        .iter()
        .filter_map(|column| row.get(*column).map(|v| ((*column).to_string(), v.clone())))
        .collect()
}

fn matches_filter(row: &Record, filter: &Filter) -> bool {
    let text = |column: &str| row.get(column).and_then(value_text);
    match filter {
        Filter::Eq { column, value } => text(column).is_some_and(|t| t == *value),
        Filter::ILike { column, pattern } => text(column).is_some_and(|t| ilike(&t, pattern)),
        Filter::AnyILike { columns, pattern } => columns
            .iter()
            .any(|column| text(column).is_some_and(|t| ilike(&t, pattern))),
    }
}

/// Pattern element of an `ilike` pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Char(char),
    One,
    Any,
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        tokens.push(match c {
            '\\' => Token::Char(chars.next().unwrap_or('\\')),
            '%' => Token::Any,
            '_' => Token::One,
            c => Token::Char(c),
        });
    }
    tokens
}

/// Case-insensitive SQL `ILIKE`: `%` matches any run of characters, `_`
/// exactly one, and `\` escapes the next character
#[must_use]
pub fn ilike(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.to_lowercase().chars().collect();
    let tokens = tokenize(&pattern.to_lowercase());

    let (mut t, mut p) = (0, 0);
    // last `%` seen and the text position it is currently absorbing up to
    let mut backtrack: Option<(usize, usize)> = None;
    while t < text.len() {
        match tokens.get(p) {
            Some(Token::Any) => {
                backtrack = Some((p, t));
                p += 1;
                continue;
            }
            Some(Token::One) => {
                t += 1;
                p += 1;
                continue;
            }
            Some(Token::Char(c)) if *c == text[t] => {
                t += 1;
                p += 1;
                continue;
            }
            _ => {}
        }
        match backtrack {
            Some((any, from)) => {
                p = any + 1;
                t = from + 1;
                backtrack = Some((any, from + 1));
            }
            None => return false,
        }
    }
    tokens[p..].iter().all(|token| *token == Token::Any)
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::Null) | None, Some(Value::Null) | None) => Ordering::Equal,
        // nulls sort last
        (Some(Value::Null) | None, _) => Ordering::Greater,
        (_, Some(Value::Null) | None) => Ordering::Less,
        (Some(x), Some(y)) => value_text(x).cmp(&value_text(y)),
    }
}
