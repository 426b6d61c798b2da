//! Queued-video listing.

use crate::StoreResult;
use crate::status::{status_error, transport_error};
use async_trait::async_trait;
use derive_getters::Getters;
use serde::Deserialize;
use tracing::{debug, instrument};
use twain_core::{VIDEO_QUEUE_PREFIX, VideoEntry};
use twain_error::{BuilderError, StoreError, StoreErrorKind};

/// Default Cloud Storage JSON API endpoint.
pub const STORAGE_BASE_URL: &str = "https://storage.googleapis.com/storage/v1";

/// Public host that serves bucket objects.
const PUBLIC_HOST: &str = "https://storage.googleapis.com";

/// Source of rendered videos waiting in the queue.
#[async_trait]
pub trait VideoCatalog: Send + Sync {
    /// Every `.mp4` object under the queue prefix.
    async fn list_videos(&self) -> StoreResult<Vec<VideoEntry>>;
}

/// Fixed catalog for tests and local runs.
///
/// Applies the same `.mp4`/prefix filter as the bucket-backed catalog so
/// fixtures may include objects that must not be listed.
#[derive(Debug, Clone, Default)]
pub struct StaticVideoCatalog {
    entries: Vec<VideoEntry>,
}

impl StaticVideoCatalog {
    /// Catalog over the given objects.
    pub fn new(entries: Vec<VideoEntry>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl VideoCatalog for StaticVideoCatalog {
    async fn list_videos(&self) -> StoreResult<Vec<VideoEntry>> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| {
                entry.name.starts_with(VIDEO_QUEUE_PREFIX) && VideoEntry::is_video_name(&entry.name)
            })
            .cloned()
            .collect())
    }
}

/// Settings for [`BucketVideoCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into), build_fn(error = "BuilderError"))]
pub struct BucketConfig {
    /// Bucket name, e.g. `twain-prod.appspot.com`
    bucket: String,
    /// Object prefix to list
    #[builder(default = "VIDEO_QUEUE_PREFIX.to_string()")]
    prefix: String,
    /// OAuth access token
    #[builder(default)]
    access_token: Option<String>,
    /// JSON API endpoint
    #[builder(default = "STORAGE_BASE_URL.to_string()")]
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectList {
    #[serde(default)]
    items: Vec<ObjectResource>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ObjectResource {
    name: String,
    #[serde(default)]
    size: String,
    #[serde(default)]
    updated: String,
}

/// [`VideoCatalog`] over a Cloud Storage bucket.
#[derive(Debug, Clone)]
pub struct BucketVideoCatalog {
    config: BucketConfig,
    client: reqwest::Client,
}

impl BucketVideoCatalog {
    /// Create a catalog client.
    pub fn new(config: BucketConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn public_url(&self, name: &str) -> String {
        let encoded: String = name
            .split('/')
            .map(urlencode_segment)
            .collect::<Vec<_>>()
            .join("%2F");
        format!("{}/{}/{}", PUBLIC_HOST, self.config.bucket(), encoded)
    }

    fn entry(&self, object: ObjectResource) -> VideoEntry {
        VideoEntry {
            url: self.public_url(&object.name),
            name: object.name,
            size: object.size,
            updated: object.updated,
        }
    }
}

fn urlencode_segment(segment: &str) -> String {
    segment
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'!' | b'~' | b'*'
            | b'\'' | b'(' | b')' => (b as char).to_string(),
            _ => format!("%{:02X}", b),
        })
        .collect()
}

#[async_trait]
impl VideoCatalog for BucketVideoCatalog {
    #[instrument(skip(self), fields(bucket = %self.config.bucket()))]
    async fn list_videos(&self) -> StoreResult<Vec<VideoEntry>> {
        let url = format!("{}/b/{}/o", self.config.base_url(), self.config.bucket());
        let mut videos = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(&url)
                .query(&[("prefix", self.config.prefix().as_str())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }
            if let Some(token) = self.config.access_token() {
                request = request.bearer_auth(token);
            }

            let response = request
                .send()
                .await
                .map_err(|e| StoreError::new(transport_error(&e)))?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(StoreError::new(status_error(status.as_u16(), &body)));
            }
            let page: ObjectList = response.json().await.map_err(|e| {
                StoreError::new(StoreErrorKind::Backend(format!("Bad listing: {}", e)))
            })?;

            videos.extend(
                page.items
                    .into_iter()
                    .filter(|object| VideoEntry::is_video_name(&object.name))
                    .map(|object| self.entry(object)),
            );

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(count = videos.len(), "Listed queued videos");
        Ok(videos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_encodes_prefix_separator() {
        let catalog = BucketVideoCatalog::new(
            BucketConfigBuilder::default()
                .bucket("twain.appspot.com")
                .build()
                .unwrap(),
        );
        assert_eq!(
            catalog.public_url("queue/first clip.mp4"),
            "https://storage.googleapis.com/twain.appspot.com/queue%2Ffirst%20clip.mp4"
        );
    }

    #[tokio::test]
    async fn test_static_catalog_filters_non_videos() {
        let entry = |name: &str| VideoEntry {
            name: name.to_string(),
            url: format!("https://example.test/{name}"),
            size: "10".to_string(),
            updated: "2025-01-01T00:00:00Z".to_string(),
        };
        let catalog = StaticVideoCatalog::new(vec![
            entry("queue/a.mp4"),
            entry("queue/notes.txt"),
            entry("archive/b.mp4"),
            entry("queue/c.mp4"),
        ]);

        let names: Vec<_> = catalog
            .list_videos()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, vec!["queue/a.mp4", "queue/c.mp4"]);
    }
}
