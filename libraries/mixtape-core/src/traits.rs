//! Core traits for Mixtape

use crate::error::Result;
use crate::types::{
    NewTrack, Profile, ProfileId, Project, ProjectId, Track, TrackFile, TrackId, UploadedFile,
};
use async_trait::async_trait;

/// Key-value storage trait
///
/// On-device storage of JSON text blobs under fixed keys.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` (no-op when absent)
    fn remove(&self, key: &str) -> Result<()>;
}

/// Remote sync trait
///
/// Mirrors project, track and profile mutations to a hosted backend and
/// stores track binaries in its object storage. Each operation is
/// independently fallible.
#[async_trait]
pub trait RemoteSync: Send + Sync {
    /// All projects owned by the profile with their tracks, oldest first
    async fn fetch_projects(&self, profile_id: &ProfileId) -> Result<Vec<Project>>;

    /// Insert a project; `position` is the current local project count and
    /// picks the cover gradient
    async fn create_project(&self, name: &str, profile: &Profile, position: usize)
        -> Result<Project>;

    /// Remove the stored files of `tracks`, then the project record
    async fn delete_project(&self, id: &ProjectId, tracks: &[Track]) -> Result<()>;

    /// Store a binary under `{profile}/{project}/{generated}` and resolve its public URL
    async fn upload_track(
        &self,
        file: &TrackFile,
        project_id: &ProjectId,
        profile_id: &ProfileId,
    ) -> Result<UploadedFile>;

    /// Persist track metadata
    async fn create_track_record(&self, track: NewTrack) -> Result<Track>;

    /// Best-effort removal of the stored file, then the track record
    async fn delete_track(&self, id: &TrackId, storage_path: Option<&str>) -> Result<()>;

    /// Create or update the profile keyed by its unique email
    async fn upsert_profile(
        &self,
        id: Option<&ProfileId>,
        name: &str,
        email: &str,
    ) -> Result<Profile>;
}

/// Media duration probe trait
#[async_trait]
pub trait DurationProbe: Send + Sync {
    /// Duration of the audio file in seconds
    ///
    /// # Errors
    /// Returns an error if the file cannot be probed
    async fn probe(&self, file: &TrackFile) -> Result<f64>;
}

/// Interactive prompts owned by the host UI
pub trait Prompter: Send + Sync {
    /// Ask for a line of text; `None` when the user cancels
    fn prompt(&self, message: &str, default: &str) -> Option<String>;

    /// Ask for a yes/no confirmation
    fn confirm(&self, message: &str) -> bool;
}
