//! Main backend client.

use crate::error::{RemoteError, Result};
use crate::storage::StorageClient;
use crate::tables::TablesClient;
use crate::types::RemoteConfig;
use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::Duration;
use tracing::debug;

/// Client for the hosted backend.
///
/// Holds one HTTP connection pool and hands out borrowed sub-clients for the
/// relational tables and the object-storage bucket.
///
/// # Example
///
/// ```ignore
/// use mixtape_remote::{RemoteClient, RemoteConfig};
///
/// let client = RemoteClient::new(RemoteConfig::new("https://project.example.co", "anon-key"))?;
/// let rows = client.tables().select_projects(&profile_id).await?;
/// ```
pub struct RemoteClient {
    http: Client,
    config: RemoteConfig,
}

impl RemoteClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        // Validate URL
        if config.url.trim().is_empty() {
            return Err(RemoteError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let url = config.url.trim().trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(RemoteError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&url).map_err(|e| RemoteError::InvalidUrl(e.to_string()))?;

        if config.anon_key.trim().is_empty() {
            return Err(RemoteError::NotConfigured("anon key is empty".into()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Mixtape/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!(url = %url, bucket = %config.bucket, "Remote client created");

        Ok(Self {
            http,
            config: RemoteConfig { url, ..config },
        })
    }

    /// Get the normalized backend URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Get the storage bucket name.
    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }

    /// Get a client for table operations.
    pub fn tables(&self) -> TablesClient<'_> {
        TablesClient::new(&self.http, &self.config.url, &self.config.anon_key)
    }

    /// Get a client for bucket operations.
    pub fn storage(&self) -> StorageClient<'_> {
        StorageClient::new(
            &self.http,
            &self.config.url,
            &self.config.anon_key,
            &self.config.bucket,
        )
    }
}

/// Start a request carrying the access key headers.
pub(crate) fn authorized(
    http: &Client,
    method: Method,
    url: impl reqwest::IntoUrl,
    api_key: &str,
) -> RequestBuilder {
    http.request(method, url)
        .header("apikey", api_key)
        .bearer_auth(api_key)
}

/// Send a request, classifying transport failures.
pub(crate) async fn send(request: RequestBuilder) -> Result<Response> {
    request.send().await.map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            RemoteError::Unreachable(e.to_string())
        } else {
            RemoteError::Request(e)
        }
    })
}

/// Map a non-success response to an error.
pub(crate) async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();

    if status.is_success() {
        Ok(response)
    } else if status.as_u16() == 401 || status.as_u16() == 403 {
        let error_text = response.text().await.unwrap_or_default();
        Err(RemoteError::Unauthorized(error_text))
    } else if status.as_u16() == 429 {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        Err(RemoteError::RateLimited {
            retry_after_secs: retry_after,
        })
    } else {
        let error_text = response.text().await.unwrap_or_default();
        Err(RemoteError::Server {
            status: status.as_u16(),
            message: error_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        // Valid URLs
        assert!(RemoteClient::new(RemoteConfig::new("https://example.co", "k")).is_ok());
        assert!(RemoteClient::new(RemoteConfig::new("http://localhost:54321", "k")).is_ok());

        // Invalid URLs
        assert!(RemoteClient::new(RemoteConfig::new("", "k")).is_err());
        assert!(RemoteClient::new(RemoteConfig::new("not-a-url", "k")).is_err());
        assert!(RemoteClient::new(RemoteConfig::new("ftp://example.co", "k")).is_err());
    }

    #[test]
    fn test_url_normalization() {
        let client = RemoteClient::new(RemoteConfig::new("https://example.co///", "k"))
            .expect("valid url");
        assert_eq!(client.url(), "https://example.co");
    }

    #[test]
    fn test_missing_key_rejected() {
        match RemoteClient::new(RemoteConfig::new("https://example.co", " ")) {
            Err(RemoteError::NotConfigured(_)) => {}
            other => panic!("Expected NotConfigured, got: {:?}", other.err()),
        }
    }
}
