//! Configuration schema definitions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default hosted store endpoint
pub const DEFAULT_STORE_URL: &str = "https://karia-mitra.supabase.co";

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Remote store connection
    #[serde(default)]
    pub store: StoreConfig,

    /// Mediator and support numbers
    #[serde(default)]
    pub contact: ContactConfig,

    /// Local app version metadata
    #[serde(default)]
    pub app: AppConfig,

    /// Search and browse tuning
    #[serde(default)]
    pub search: SearchConfig,
}

impl ConfigSchema {
    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.store.validate()?;
        self.search.validate()?;
        Ok(())
    }
}

/// Remote store connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Project URL (without `/rest/v1`)
    #[serde(default = "default_store_url")]
    pub url: String,

    /// Public anonymous key
    #[serde(default)]
    pub anon_key: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per request; 1 disables retries
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_store_url(),
            anon_key: None,
            timeout_secs: default_timeout_secs(),
            retry_attempts: default_retry_attempts(),
        }
    }
}

impl StoreConfig {
    fn validate(&self) -> Result<()> {
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(Error::invalid_config(
                "store.url",
                "must start with http:// or https://",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_config("store.timeout_secs", "cannot be zero"));
        }
        if self.retry_attempts == 0 {
            return Err(Error::invalid_config(
                "store.retry_attempts",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

fn default_store_url() -> String {
    DEFAULT_STORE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_retry_attempts() -> u32 {
    1
}

/// Contact numbers used for handoff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    /// WhatsApp number of the mediator (country code, digits only)
    #[serde(default = "default_mediator_whatsapp")]
    pub mediator_whatsapp: String,

    /// Dialable mediator number
    #[serde(default = "default_mediator_phone")]
    pub mediator_phone: String,

    /// Customer support number
    #[serde(default = "default_support_phone")]
    pub support_phone: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            mediator_whatsapp: default_mediator_whatsapp(),
            mediator_phone: default_mediator_phone(),
            support_phone: default_support_phone(),
        }
    }
}

fn default_mediator_whatsapp() -> String {
    "919876543210".to_string()
}

fn default_mediator_phone() -> String {
    "+919876543210".to_string()
}

fn default_support_phone() -> String {
    "+919123456780".to_string()
}

/// Version metadata of the locally installed client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Human version label
    #[serde(default = "default_version")]
    pub version: String,

    /// Monotonic version counter compared against `app_updates`
    #[serde(default = "default_version_code")]
    pub version_code: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            version_code: default_version_code(),
        }
    }
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_version_code() -> u32 {
    3
}

/// How keyword search issues its queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchStrategy {
    /// One query per field name with early stop per field group
    #[default]
    FieldByField,
    /// One OR-across-columns query per resource
    Combined,
}

/// Ordering applied to a finished result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultOrder {
    /// Lexicographic by resource name, arrival order within a resource
    #[default]
    Resource,
    /// Text relevance of name/offer against the query
    Relevance,
}

/// Search and browse tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Debounce delay before a typed query is executed
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Row cap for each field query
    #[serde(default = "default_field_limit")]
    pub field_limit: usize,

    /// Row cap for category browse
    #[serde(default = "default_browse_limit")]
    pub browse_limit: usize,

    /// Query strategy
    #[serde(default)]
    pub strategy: SearchStrategy,

    /// Result ordering
    #[serde(default)]
    pub order: ResultOrder,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            field_limit: default_field_limit(),
            browse_limit: default_browse_limit(),
            strategy: SearchStrategy::default(),
            order: ResultOrder::default(),
        }
    }
}

impl SearchConfig {
    fn validate(&self) -> Result<()> {
        if self.field_limit == 0 {
            return Err(Error::invalid_config("search.field_limit", "cannot be zero"));
        }
        if self.browse_limit == 0 {
            return Err(Error::invalid_config("search.browse_limit", "cannot be zero"));
        }
        Ok(())
    }
}

fn default_debounce_ms() -> u64 {
    400
}

fn default_field_limit() -> usize {
    50
}

fn default_browse_limit() -> usize {
    100
}
