//! Error types for the search crate.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations.
///
/// Store failures never appear here: they degrade to fewer results.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Resource is not part of the probed-available set
    #[error("Resource not available: {0}")]
    ResourceUnavailable(String),
}

impl From<SearchError> for karia_core::Error {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::ResourceUnavailable(ref name) => karia_core::Error::resource_unavailable(name),
        }
    }
}
