//! Update-check contract
//!
//! The store carries an `app_updates` resource; the newest active row (by
//! `version_code`) describes the latest release. When its counter exceeds the
//! locally installed one an [`UpdateDescriptor`] is surfaced. No signature
//! verification and no rollback.

use crate::error::ApiResult;
use crate::query::Query;
use crate::store::{DataStore, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Resource holding release metadata
pub const APP_UPDATES_RESOURCE: &str = "app_updates";

/// Update API over any [`DataStore`]
pub struct AppUpdatesApi<S> {
    store: S,
}

impl<S: DataStore> AppUpdatesApi<S> {
    /// Create a new update API interface
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Newest active release, if any
    pub async fn latest(&self) -> ApiResult<Option<AppRelease>> {
        let query = Query::from(APP_UPDATES_RESOURCE)
            .eq("is_active", true)
            .order_desc("version_code")
            .limit(1);

        let rows = self.store.select(&query).await?;
        rows.into_iter()
            .next()
            .map(AppRelease::from_record)
            .transpose()
    }

    /// Update descriptor when the newest release is newer than `installed_code`
    pub async fn check(&self, installed_code: u32) -> ApiResult<Option<UpdateDescriptor>> {
        let latest = self.latest().await?;
        debug!(
            installed_code,
            latest_code = latest.as_ref().map(|r| r.version_code),
            "Update check"
        );
        Ok(latest
            .filter(|release| release.version_code > installed_code)
            .map(UpdateDescriptor::from))
    }
}

/// Row of the `app_updates` resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppRelease {
    /// Monotonic version counter
    pub version_code: u32,
    /// Human version label
    #[serde(default)]
    pub version_name: Option<String>,
    /// Where to download the build
    #[serde(alias = "apk_url")]
    pub download_url: String,
    /// Release notes
    #[serde(default, alias = "changelog")]
    pub release_notes: Option<String>,
    /// Whether the release is offered
    #[serde(default)]
    pub is_active: bool,
    /// Publication time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl AppRelease {
    fn from_record(record: Record) -> ApiResult<Self> {
        Ok(serde_json::from_value(Value::Object(record))?)
    }
}

/// What the caller needs to offer an update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateDescriptor {
    /// Version counter of the offered release
    pub version_code: u32,
    /// Human version label
    pub version_label: String,
    /// Where to download the build
    pub download_url: String,
    /// Release notes, possibly empty
    pub release_notes: String,
}

impl From<AppRelease> for UpdateDescriptor {
    fn from(release: AppRelease) -> Self {
        Self {
            version_label: release
                .version_name
                .unwrap_or_else(|| format!("build {}", release.version_code)),
            version_code: release.version_code,
            download_url: release.download_url,
            release_notes: release.release_notes.unwrap_or_default(),
        }
    }
}
