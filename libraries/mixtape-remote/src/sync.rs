//! `RemoteSync` over the table and storage clients.

use crate::client::RemoteClient;
use crate::types::{NewProjectRow, NewTrackRow, ProfileRow};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use mixtape_core::normalize::{normalize_project, normalize_projects, normalize_track};
use mixtape_core::{
    cover_gradient, ids, NewTrack, Profile, ProfileId, Project, ProjectId, RemoteSync, Result,
    Track, TrackFile, TrackId, UploadedFile,
};
use tracing::{info, warn};

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Bucket key for a new upload: `{profile}/{project}/{generated}[.ext]`.
pub(crate) fn storage_key(
    file: &TrackFile,
    project_id: &ProjectId,
    profile_id: &ProfileId,
) -> String {
    let name = match file.extension() {
        Some(ext) => format!("{}.{}", ids::generate(), ext),
        None => ids::generate(),
    };
    format!("{}/{}/{}", profile_id, project_id, name)
}

#[async_trait]
impl RemoteSync for RemoteClient {
    async fn fetch_projects(&self, profile_id: &ProfileId) -> Result<Vec<Project>> {
        let rows = self.tables().select_projects(profile_id.as_str()).await?;
        Ok(normalize_projects(rows))
    }

    async fn create_project(
        &self,
        name: &str,
        profile: &Profile,
        position: usize,
    ) -> Result<Project> {
        let row = NewProjectRow {
            name: name.to_string(),
            owner: profile.name.clone(),
            user_id: profile.id.to_string(),
            cover_gradient: cover_gradient(position).to_string(),
            created_at: now(),
        };
        let raw = self.tables().insert_project(&row).await?;

        let mut project = normalize_project(raw, position);
        project.tracks.clear();
        info!(project_id = %project.id, name = %project.name, "Project created");
        Ok(project)
    }

    async fn delete_project(&self, id: &ProjectId, tracks: &[Track]) -> Result<()> {
        let keys: Vec<String> = tracks
            .iter()
            .filter_map(|track| track.storage_path.clone())
            .collect();
        self.storage().remove(&keys).await?;
        self.tables().delete_project(id.as_str()).await?;

        info!(project_id = %id, files = keys.len(), "Project deleted");
        Ok(())
    }

    async fn upload_track(
        &self,
        file: &TrackFile,
        project_id: &ProjectId,
        profile_id: &ProfileId,
    ) -> Result<UploadedFile> {
        let key = storage_key(file, project_id, profile_id);
        let storage = self.storage();
        storage.upload(&key, file).await?;
        let public_url = storage.public_url(&key)?;

        Ok(UploadedFile {
            storage_path: key,
            public_url,
        })
    }

    async fn create_track_record(&self, track: NewTrack) -> Result<Track> {
        let row = NewTrackRow {
            title: track.title,
            project_id: track.project_id.to_string(),
            file_url: track.file_url,
            storage_path: track.storage_path,
            file_size: track.file_size,
            duration: track.duration,
            created_at: now(),
        };
        let raw = self.tables().insert_track(&row).await?;

        let track = normalize_track(raw);
        info!(track_id = %track.id, project_id = %row.project_id, "Track record created");
        Ok(track)
    }

    async fn delete_track(&self, id: &TrackId, storage_path: Option<&str>) -> Result<()> {
        if let Some(path) = storage_path {
            if let Err(e) = self.storage().remove(&[path.to_string()]).await {
                warn!(track_id = %id, path = %path, error = %e, "Failed to remove stored file");
            }
        }
        self.tables().delete_track(id.as_str()).await?;

        info!(track_id = %id, "Track deleted");
        Ok(())
    }

    async fn upsert_profile(
        &self,
        id: Option<&ProfileId>,
        name: &str,
        email: &str,
    ) -> Result<Profile> {
        let row = ProfileRow {
            id: id.map(ToString::to_string),
            name: name.to_string(),
            email: email.to_string(),
        };
        let saved = self.tables().upsert_profile(&row).await?;

        let profile = Profile {
            id: saved.id.map_or_else(ProfileId::generate, ProfileId::new),
            name: saved.name,
            email: saved.email,
        };
        info!(profile_id = %profile.id, "Profile saved");
        Ok(profile)
    }
}
