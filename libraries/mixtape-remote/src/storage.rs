//! Object-storage operations for track binaries.

use crate::client::{authorized, check_status, send};
use crate::error::{RemoteError, Result};
use crate::types::RemoveObjects;
use mixtape_core::TrackFile;
use reqwest::{Client, Method};
use tracing::{debug, info};
use url::Url;

/// Bucket client for the hosted backend.
pub struct StorageClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    api_key: &'a str,
    bucket: &'a str,
}

impl<'a> StorageClient<'a> {
    pub(crate) fn new(
        http: &'a Client,
        base_url: &'a str,
        api_key: &'a str,
        bucket: &'a str,
    ) -> Self {
        Self {
            http,
            base_url,
            api_key,
            bucket,
        }
    }

    /// Build `{base}/storage/v1/{prefix...}/{bucket}/{key}` with each segment escaped.
    fn object_url(&self, prefix: &[&str], key: Option<&str>) -> Result<Url> {
        let mut url =
            Url::parse(self.base_url).map_err(|e| RemoteError::InvalidUrl(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| RemoteError::InvalidUrl(self.base_url.to_string()))?;
            segments
                .pop_if_empty()
                .extend(["storage", "v1"])
                .extend(prefix)
                .push(self.bucket);
            if let Some(key) = key {
                segments.extend(key.split('/'));
            }
        }
        Ok(url)
    }

    /// Upload a binary to `key`, replacing any existing object.
    pub async fn upload(&self, key: &str, file: &TrackFile) -> Result<()> {
        let url = self.object_url(&["object"], Some(key))?;
        debug!(url = %url, file = %file.name, size = file.size(), "Uploading track file");

        let request = authorized(self.http, Method::POST, url, self.api_key)
            .header("x-upsert", "true")
            .header("cache-control", "max-age=3600")
            .header("content-type", file.mime_type())
            .body(file.bytes.clone());
        check_status(send(request).await?).await?;

        info!(key = %key, size = file.size(), "Track file uploaded");
        Ok(())
    }

    /// Durable public URL of the object at `key`.
    pub fn public_url(&self, key: &str) -> Result<String> {
        Ok(self.object_url(&["object", "public"], Some(key))?.to_string())
    }

    /// Remove the objects at `keys` in one call.
    pub async fn remove(&self, keys: &[String]) -> Result<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let url = self.object_url(&["object"], None)?;
        debug!(url = %url, count = keys.len(), "Removing stored files");

        let request = authorized(self.http, Method::DELETE, url, self.api_key)
            .json(&RemoveObjects { prefixes: keys });
        check_status(send(request).await?).await?;

        info!(count = keys.len(), "Stored files removed");
        Ok(())
    }
}
