//! Track domain types

use crate::types::{ProjectId, TrackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title used when a track record carries none.
pub const DEFAULT_TRACK_TITLE: &str = "Untitled track";

/// A single audio item in a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Display title
    pub title: String,

    /// Playable source: a transient `blob:` reference or a durable remote URL
    pub file_url: String,

    /// Object-storage key, `None` for local-only tracks
    pub storage_path: Option<String>,

    /// Size of the uploaded binary in bytes
    pub file_size: u64,

    /// Duration in seconds, `0.0` when it could not be probed
    pub duration: f64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Track {
    /// Whether the track lives only in this session (no remote file)
    pub fn is_local_only(&self) -> bool {
        self.storage_path.is_none()
    }
}

/// Metadata for a track record about to be persisted remotely.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrack {
    /// Display title
    pub title: String,

    /// Project the track belongs to
    pub project_id: ProjectId,

    /// Public URL of the uploaded binary
    pub file_url: String,

    /// Object-storage key of the uploaded binary
    pub storage_path: String,

    /// Size of the binary in bytes
    pub file_size: u64,

    /// Duration in seconds
    pub duration: f64,
}
