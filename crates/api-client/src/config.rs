//! Configuration for the store client
//!
//! Starts from the `[store]` section of the application configuration and
//! lets environment variables override the endpoint and keys.

use crate::error::{ApiError, ApiResult};
use karia_core::config::{StoreConfig, DEFAULT_STORE_URL};
use karia_core::retry::RetryConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Environment types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (typically a localhost Supabase stack)
    Development,
    /// Hosted production project
    #[default]
    Production,
}

impl Environment {
    /// Parse from the `KARIA_ENV` environment variable
    #[must_use]
    pub fn from_env() -> Self {
        match env::var("KARIA_ENV")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "development" | "dev" | "local" => Self::Development,
            _ => Self::Production,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Project URL, e.g. `https://<ref>.supabase.co`
    pub base_url: String,
    /// Public anonymous key sent as `apikey`
    pub anon_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Retry policy for idempotent requests
    pub retry: RetryConfig,
    /// Current environment
    pub environment: Environment,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_store_config(&StoreConfig::default())
    }
}

impl ClientConfig {
    /// Build from the `[store]` configuration section
    #[must_use]
    pub fn from_store_config(store: &StoreConfig) -> Self {
        Self {
            base_url: store.url.trim_end_matches('/').to_string(),
            anon_key: store.anon_key.clone(),
            timeout: Duration::from_secs(store.timeout_secs),
            retry: RetryConfig::with_attempts(store.retry_attempts),
            environment: Environment::Production,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `KARIA_SUPABASE_URL` or `SUPABASE_URL`: project URL
    /// - `SUPABASE_ANON_KEY`: anonymous key
    /// - `KARIA_ENV`: environment (development/production)
    /// - `KARIA_TIMEOUT_SECS`: request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply environment overrides on top of this configuration
    pub fn with_env_overrides(mut self) -> ApiResult<Self> {
        self.environment = Environment::from_env();

        if let Ok(url) = env::var("KARIA_SUPABASE_URL").or_else(|_| env::var("SUPABASE_URL")) {
            self = self.with_base_url(url);
        } else if self.environment == Environment::Development
            && self.base_url == DEFAULT_STORE_URL
        {
            self = self.with_base_url("http://localhost:54321");
        }

        if let Ok(key) = env::var("SUPABASE_ANON_KEY") {
            self.anon_key = Some(key);
        }

        if let Ok(secs) = env::var("KARIA_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|_| ApiError::config(format!("KARIA_TIMEOUT_SECS is not a number: {secs}")))?;
            self.timeout = Duration::from_secs(secs);
        }

        self.validate()?;
        Ok(self)
    }

    /// Create development configuration (local Supabase)
    #[must_use]
    pub fn development() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            anon_key: env::var("SUPABASE_ANON_KEY").ok(),
            timeout: Duration::from_secs(10),
            retry: RetryConfig::no_retry(),
            environment: Environment::Development,
        }
    }

    /// Builder-style method to set the project URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder-style method to set anon key
    #[must_use]
    pub fn with_anon_key(mut self, key: impl Into<String>) -> Self {
        self.anon_key = Some(key.into());
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set retry config
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// REST endpoint for a named resource
    #[must_use]
    pub fn rest_url(&self, resource: &str) -> String {
        format!("{}/rest/v1/{resource}", self.base_url)
    }

    /// Auth endpoint for a path such as `user`
    #[must_use]
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Storage endpoint for a path such as `object/list/avatars`
    #[must_use]
    pub fn storage_url(&self, path: &str) -> String {
        format!("{}/storage/v1/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}
