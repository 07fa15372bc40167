//! Object storage endpoints

use crate::client::StoreClient;
use crate::config::ClientConfig;
use crate::error::ApiResult;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Characters escaped in object path segments
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'?')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Storage API interface
#[derive(Clone)]
pub struct StorageApi {
    client: StoreClient,
}

impl StorageApi {
    /// Create a new storage API interface
    pub(crate) fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// List objects under `prefix` in a bucket
    ///
    /// POST /storage/v1/object/list/{bucket}
    pub async fn list(&self, bucket: &str, prefix: &str, limit: usize) -> ApiResult<Vec<StorageObject>> {
        let url = self
            .client
            .config()
            .storage_url(&format!("object/list/{bucket}"));
        let body = ListRequest {
            prefix,
            limit,
            offset: 0,
            sort_by: SortBy {
                column: "name",
                order: "asc",
            },
        };
        self.client.post_url(&url, &body).await
    }

    /// Public URL of an object
    #[must_use]
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        public_url(self.client.config(), bucket, path)
    }
}

/// Public URL of an object in a public bucket
#[must_use]
pub fn public_url(config: &ClientConfig, bucket: &str, path: &str) -> String {
    let encoded: Vec<String> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect();
    config.storage_url(&format!("object/public/{bucket}/{}", encoded.join("/")))
}

/// Turn a stored image reference into a fetchable URL
///
/// Absolute URLs are returned unchanged; anything else is treated as an
/// object path inside `bucket`.
#[must_use]
pub fn resolve_image_url(config: &ClientConfig, bucket: &str, image: &str) -> String {
    if image.starts_with("http://") || image.starts_with("https://") {
        image.to_string()
    } else {
        public_url(config, bucket, image)
    }
}

#[derive(Serialize)]
struct ListRequest<'a> {
    prefix: &'a str,
    limit: usize,
    offset: usize,
    #[serde(rename = "sortBy")]
    sort_by: SortBy,
}

#[derive(Serialize)]
struct SortBy {
    column: &'static str,
    order: &'static str,
}

/// Entry returned by an object listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageObject {
    /// Object or folder name relative to the listed prefix
    pub name: String,
    /// Object id; folders have none
    #[serde(default)]
    pub id: Option<String>,
    /// Last modification time
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Size, mimetype and cache metadata
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl StorageObject {
    /// Whether the entry is a folder placeholder
    #[must_use]
    pub fn is_folder(&self) -> bool {
        self.id.is_none()
    }

    /// Object size in bytes, when reported
    #[must_use]
    pub fn size(&self) -> Option<u64> {
        self.metadata.as_ref()?.get("size")?.as_u64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::default().with_base_url("https://abc.supabase.co")
    }

    #[test]
    fn test_public_url_encodes_segments() {
        assert_eq!(
            public_url(&config(), "images", "/shops/front view.jpg"),
            "https://abc.supabase.co/storage/v1/object/public/images/shops/front%20view.jpg"
        );
    }

    #[test]
    fn test_resolve_image_url() {
        assert_eq!(
            resolve_image_url(&config(), "images", "https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
        assert_eq!(
            resolve_image_url(&config(), "images", "items/mixer.png"),
            "https://abc.supabase.co/storage/v1/object/public/images/items/mixer.png"
        );
    }

    #[test]
    fn test_storage_object_deserialize() {
        let json = r#"[
            {"name": "items", "id": null, "metadata": null},
            {"name": "mixer.png", "id": "f1", "updated_at": "2024-05-01T00:00:00Z",
             "metadata": {"size": 20480, "mimetype": "image/png"}}
        ]"#;

        let objects: Vec<StorageObject> = serde_json::from_str(json).unwrap();
        assert!(objects[0].is_folder());
        assert!(!objects[1].is_folder());
        assert_eq!(objects[1].size(), Some(20480));
    }
}
