//! Types for backend requests and responses.

use serde::{Deserialize, Serialize};

/// Bucket used when none is configured.
pub const DEFAULT_BUCKET: &str = "mixtape-tracks";

/// Configuration for connecting to the hosted backend.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the backend (e.g., "https://project.example.co")
    pub url: String,
    /// Anonymous access key sent with every request
    pub anon_key: String,
    /// Object-storage bucket for track binaries
    pub bucket: String,
}

impl RemoteConfig {
    /// Create a config using the default bucket.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            bucket: DEFAULT_BUCKET.to_string(),
        }
    }

    /// Use a specific bucket; blank names keep the default.
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        let bucket = bucket.into();
        if !bucket.trim().is_empty() {
            self.bucket = bucket;
        }
        self
    }
}

// =============================================================================
// Table Rows
// =============================================================================

/// Body for inserting a project.
#[derive(Debug, Clone, Serialize)]
pub struct NewProjectRow {
    pub name: String,
    pub owner: String,
    pub user_id: String,
    pub cover_gradient: String,
    pub created_at: String,
}

/// Body for inserting a track.
#[derive(Debug, Clone, Serialize)]
pub struct NewTrackRow {
    pub title: String,
    pub project_id: String,
    pub file_url: String,
    pub storage_path: String,
    pub file_size: u64,
    pub duration: f64,
    pub created_at: String,
}

/// A profile row, sent on upsert and returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
}

/// Body for removing objects from the bucket.
#[derive(Debug, Serialize)]
pub(crate) struct RemoveObjects<'a> {
    pub prefixes: &'a [String],
}

// =============================================================================
// Column Lists
// =============================================================================

pub(crate) const PROJECT_COLUMNS: &str = "id,name,owner,cover_gradient,created_at";

pub(crate) const TRACK_COLUMNS: &str =
    "id,title,file_url,storage_path,file_size,duration,created_at";

pub(crate) const PROFILE_COLUMNS: &str = "id,name,email";

/// Projects with their nested tracks.
pub(crate) fn project_with_tracks_columns() -> String {
    format!("{PROJECT_COLUMNS},tracks({TRACK_COLUMNS})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bucket() {
        let config = RemoteConfig::new("https://example.co", "key");
        assert_eq!(config.bucket, DEFAULT_BUCKET);
        assert_eq!(config.with_bucket("  ").bucket, DEFAULT_BUCKET);
    }

    #[test]
    fn test_custom_bucket() {
        let config = RemoteConfig::new("https://example.co", "key").with_bucket("audio");
        assert_eq!(config.bucket, "audio");
    }

    #[test]
    fn test_profile_row_omits_missing_id() {
        let row = ProfileRow {
            id: None,
            name: "Taylor".into(),
            email: "t@gmail.com".into(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_nested_select() {
        assert_eq!(
            project_with_tracks_columns(),
            "id,name,owner,cover_gradient,created_at,tracks(id,title,file_url,storage_path,file_size,duration,created_at)"
        );
    }
}
