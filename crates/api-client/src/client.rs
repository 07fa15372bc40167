//! HTTP store client

use crate::config::ClientConfig;
use crate::endpoints::{AuthApi, StorageApi};
use crate::error::{ApiError, ApiResult};
use crate::query::Query;
use crate::store::{DataStore, Record};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// API key header for Supabase
const APIKEY_HEADER: &str = "apikey";

/// Client for the hosted store (REST, auth and storage endpoints)
///
/// Cheap to clone; clones share the HTTP connection pool and the access
/// token installed by [`Session`](crate::session::Session).
#[derive(Clone)]
pub struct StoreClient {
    inner: Client,
    config: Arc<ClientConfig>,
    access_token: Arc<RwLock<Option<String>>>,
}

impl StoreClient {
    /// Create a new client with configuration from the environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("karia-api-client/", env!("CARGO_PKG_VERSION"))),
        );

        if let Some(ref key) = config.anon_key {
            let value = HeaderValue::from_str(key)
                .map_err(|_| ApiError::config("anon key contains invalid header characters"))?;
            default_headers.insert(APIKEY_HEADER, value);
        }

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
            access_token: Arc::new(RwLock::new(None)),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the project URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Install or clear the user access token used for `Authorization`
    pub fn set_access_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.access_token.write() {
            *guard = token;
        }
    }

    /// Whether a user access token is installed
    #[must_use]
    pub fn has_access_token(&self) -> bool {
        self.access_token
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    /// Access auth endpoints
    #[must_use]
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    /// Access object storage endpoints
    #[must_use]
    pub fn storage(&self) -> StorageApi {
        StorageApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods
    // -------------------------------------------------------------------------

    /// Perform a GET request to an absolute URL
    #[instrument(skip(self))]
    pub async fn get_url<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        self.execute_with_retry(Method::GET, url, Option::<&()>::None)
            .await
    }

    /// Perform a POST request to an absolute URL
    #[instrument(skip(self, body))]
    pub async fn post_url<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.execute_with_retry(Method::POST, url, Some(body)).await
    }

    /// Execute request with retry logic
    async fn execute_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let request_id = Uuid::new_v4().to_string();
        let retry_config = &self.config.retry;
        let mut last_error: Option<ApiError> = None;

        for attempt in 0..retry_config.max_attempts {
            if attempt > 0 {
                let delay = retry_config.delay_for_attempt(attempt);
                debug!(
                    request_id = %request_id,
                    attempt = attempt,
                    delay_ms = delay.as_millis(),
                    "Retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            let start = Instant::now();
            let result = self
                .execute_single_request(&request_id, method.clone(), url, body)
                .await;
            let elapsed = start.elapsed();

            match result {
                Ok(value) => {
                    debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        elapsed_ms = elapsed.as_millis(),
                        "Request succeeded"
                    );
                    return Ok(value);
                }
                Err(e) if e.is_retryable() && attempt + 1 < retry_config.max_attempts => {
                    debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        error = %e,
                        "Request failed, will retry"
                    );
                    last_error = Some(e);
                }
                Err(e) => {
                    debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        error = %e,
                        "Request failed, not retrying"
                    );
                    return Err(e);
                }
            }
        }

        Err(ApiError::RetriesExhausted {
            attempts: retry_config.max_attempts,
            last_error: last_error.map_or_else(|| "Unknown error".to_string(), |e| e.to_string()),
        })
    }

    /// Execute a single request without retry
    async fn execute_single_request<T: DeserializeOwned, B: Serialize>(
        &self,
        request_id: &str,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let mut request = self
            .inner
            .request(method, url)
            .header(X_REQUEST_ID, request_id);

        if let Some(bearer) = self.bearer_token() {
            request = request.header(AUTHORIZATION, format!("Bearer {bearer}"));
        }

        if let Some(b) = body {
            request = request.json(b);
        }

        let response = request.send().await?;
        handle_response(response).await
    }

    /// User token when signed in, otherwise the anon key
    fn bearer_token(&self) -> Option<String> {
        self.access_token
            .read()
            .ok()
            .and_then(|guard| guard.clone())
            .or_else(|| self.config.anon_key.clone())
    }
}

impl DataStore for StoreClient {
    async fn select(&self, query: &Query) -> ApiResult<Vec<Record>> {
        let url = format!(
            "{}?{}",
            self.config.rest_url(query.resource()),
            query.to_query_string()
        );
        debug!(query = %query, "Store select");
        self.get_url(&url).await
    }
}

/// Error body returned by PostgREST and the auth/storage services
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
    hint: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        let message = self
            .message
            .or(self.msg)
            .or(self.error_description)
            .or(self.error)?;
        Some(match self.hint {
            Some(hint) if !hint.is_empty() => format!("{message} (hint: {hint})"),
            _ => message,
        })
    }
}

/// Handle HTTP response and deserialize
async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();

    if status.is_success() {
        response.json().await.map_err(ApiError::Request)
    } else {
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ApiError::api_response(status.as_u16(), error_message(&text)))
    }
}

/// Extract the most useful message from an error body
fn error_message(text: &str) -> String {
    serde_json::from_str::<ErrorBody>(text)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = ClientConfig::development();
        let client = StoreClient::with_config(config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let config = ClientConfig::default().with_base_url("not-a-url");
        assert!(StoreClient::with_config(config).is_err());
    }

    #[test]
    fn test_access_token_falls_back_to_anon_key() {
        let client =
            StoreClient::with_config(ClientConfig::default().with_anon_key("anon-key")).unwrap();
        assert_eq!(client.bearer_token().as_deref(), Some("anon-key"));
        assert!(!client.has_access_token());

        client.set_access_token(Some("user-jwt".to_string()));
        assert_eq!(client.bearer_token().as_deref(), Some("user-jwt"));
        assert!(client.has_access_token());

        client.set_access_token(None);
        assert_eq!(client.bearer_token().as_deref(), Some("anon-key"));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"code":"42703","message":"column builders.nme does not exist","hint":null}"#),
            "column builders.nme does not exist"
        );
        assert_eq!(
            error_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }
}
