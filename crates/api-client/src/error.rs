//! Error types for the API client

use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing environment variable
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// Store returned an error response
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Error message from the store
        message: String,
    },

    /// Operation requires a signed-in user
    #[error("No user is signed in")]
    NotSignedIn,

    /// All retry attempts exhausted
    #[error("All {attempts} retry attempts failed: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Last error message
        last_error: String,
    },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing env var error
    pub fn missing_env(var: impl Into<String>) -> Self {
        Self::MissingEnvVar(var.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            Self::ApiResponse { status, .. } => *status >= 500 || *status == 429,
            Self::Config(_)
            | Self::MissingEnvVar(_)
            | Self::Json(_)
            | Self::NotSignedIn
            | Self::InvalidUrl(_)
            | Self::RetriesExhausted { .. } => false,
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if (400..500).contains(status))
    }

    /// Check if this is an authentication failure
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::NotSignedIn)
            || matches!(self, Self::ApiResponse { status, .. } if *status == 401 || *status == 403)
    }
}

impl From<ApiError> for karia_core::Error {
    fn from(err: ApiError) -> Self {
        use karia_core::ErrorCode;

        let code = match &err {
            ApiError::Config(_) | ApiError::MissingEnvVar(_) | ApiError::InvalidUrl(_) => {
                ErrorCode::ConfigError
            }
            ApiError::NotSignedIn => ErrorCode::NotSignedIn,
            e if e.is_auth_error() => ErrorCode::AuthError,
            ApiError::Request(_) | ApiError::RetriesExhausted { .. } => ErrorCode::StoreUnreachable,
            ApiError::ApiResponse { .. } => ErrorCode::QueryRejected,
            ApiError::Json(_) => ErrorCode::InvalidFormat,
        };
        karia_core::Error::new(code, err.to_string()).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(ApiError::api_response(503, "unavailable").is_retryable());
        assert!(ApiError::api_response(429, "slow down").is_retryable());
        assert!(!ApiError::api_response(400, "bad column").is_retryable());
        assert!(!ApiError::NotSignedIn.is_retryable());
    }

    #[test]
    fn test_auth_error_detection() {
        assert!(ApiError::api_response(401, "JWT expired").is_auth_error());
        assert!(ApiError::NotSignedIn.is_auth_error());
        assert!(!ApiError::api_response(404, "missing").is_auth_error());
    }

    #[test]
    fn test_into_core_error() {
        let core: karia_core::Error = ApiError::api_response(400, "column does not exist").into();
        assert_eq!(core.code, karia_core::ErrorCode::QueryRejected);
        assert!(core.message.contains("column does not exist"));
    }
}
