//! Application state controller.
//!
//! Owns the canonical project list and the signed-in profile, runs every
//! user flow against local storage and (when enabled) the hosted backend,
//! and records the status text the host UI shows.
//!
//! Operations take `&mut self`, so at most one mutation runs at a time.
//! Every change to projects or profile is written to local storage; write
//! failures are logged and never abort the flow.

use crate::config::SyncMode;
use crate::error::{AppError, Result};
use crate::messages;
use chrono::Utc;
use mixtape_core::blob::is_transient;
use mixtape_core::format::total_duration;
use mixtape_core::{
    validate_account, BlobRegistry, DurationProbe, KeyValueStore, NewTrack, Profile, ProfileId,
    Project, ProjectId, Prompter, RemoteSync, Track, TrackFile, TrackId,
};
use mixtape_storage::LocalStore;
use tracing::{debug, error, info, warn};

/// Which screen the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Projects,
    Library,
}

pub struct Controller<S: KeyValueStore> {
    projects: Vec<Project>,
    profile: Option<Profile>,

    view: View,
    selected_project_id: Option<ProjectId>,

    project_status: Option<String>,
    upload_status: Option<String>,
    account_status: Option<String>,

    // Busy flags for a host that renders from a snapshot of the controller.
    // `&mut self` already rules out overlapping operations.
    processing_track: bool,
    project_syncing: bool,
    saving_account: bool,
    loading_remote: bool,

    sync: SyncMode,
    store: LocalStore<S>,
    blobs: BlobRegistry,
    probe: Box<dyn DurationProbe>,
    prompter: Box<dyn Prompter>,
}

impl<S: KeyValueStore> Controller<S> {
    /// Load the stored profile and projects, then reconcile with the backend
    /// when a profile is signed in and remote sync is enabled.
    pub async fn start(
        store: S,
        sync: SyncMode,
        probe: Box<dyn DurationProbe>,
        prompter: Box<dyn Prompter>,
    ) -> Self {
        let store = LocalStore::new(store);
        let profile = store.load_profile();
        let projects = store.load_projects();

        info!(
            projects = projects.len(),
            signed_in = profile.is_some(),
            remote = sync.is_remote(),
            "Controller started"
        );

        let mut controller = Self {
            projects,
            profile,
            view: View::Projects,
            selected_project_id: None,
            project_status: None,
            upload_status: None,
            account_status: None,
            processing_track: false,
            project_syncing: false,
            saving_account: false,
            loading_remote: false,
            sync,
            store,
            blobs: BlobRegistry::new(),
            probe,
            prompter,
        };

        if let Err(e) = controller.reload_remote().await {
            debug!(error = %e, "Startup sync failed, keeping local data");
        }
        controller
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| &project.id == id)
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected_project_id(&self) -> Option<&ProjectId> {
        self.selected_project_id.as_ref()
    }

    /// The open project, if any
    pub fn selected_project(&self) -> Option<&Project> {
        self.selected_project_id
            .as_ref()
            .and_then(|id| self.project(id))
    }

    /// Total duration in seconds of the open project, `0.0` when none is open
    pub fn total_duration(&self) -> f64 {
        self.selected_project().map_or(0.0, total_duration)
    }

    pub fn project_status(&self) -> Option<&str> {
        self.project_status.as_deref()
    }

    pub fn upload_status(&self) -> Option<&str> {
        self.upload_status.as_deref()
    }

    pub fn account_status(&self) -> Option<&str> {
        self.account_status.as_deref()
    }

    pub fn is_processing_track(&self) -> bool {
        self.processing_track
    }

    pub fn is_project_syncing(&self) -> bool {
        self.project_syncing
    }

    pub fn is_saving_account(&self) -> bool {
        self.saving_account
    }

    pub fn is_loading_remote(&self) -> bool {
        self.loading_remote
    }

    pub fn sync_mode(&self) -> &SyncMode {
        &self.sync
    }

    /// Transient references held by local-only tracks
    pub fn blobs(&self) -> &BlobRegistry {
        &self.blobs
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Open a project in the library view. Unknown ids are ignored.
    pub fn open_project(&mut self, id: &ProjectId) {
        if self.project(id).is_none() {
            debug!(project_id = %id, "Ignoring open of unknown project");
            return;
        }
        self.selected_project_id = Some(id.clone());
        self.view = View::Library;
        self.upload_status = None;
        self.processing_track = false;
    }

    pub fn go_back(&mut self) {
        self.close_library();
    }

    fn close_library(&mut self) {
        self.view = View::Projects;
        self.selected_project_id = None;
        self.upload_status = None;
        self.processing_track = false;
    }

    // =========================================================================
    // Projects
    // =========================================================================

    /// Create a project named `name` (trimmed). A blank name does nothing.
    pub async fn create_project(&mut self, name: &str) -> Result<Option<ProjectId>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        self.project_status = None;
        let position = self.projects.len();

        let project = match (self.sync.remote(), self.profile.as_ref()) {
            (Some(remote), Some(profile)) => {
                self.project_syncing = true;
                let result = remote.create_project(name, profile, position).await;
                self.project_syncing = false;

                match result {
                    Ok(project) => project,
                    Err(e) => {
                        error!(error = %e, name = %name, "Failed to create project");
                        self.project_status = Some(messages::CREATE_PROJECT_FAILED.to_string());
                        return Err(e.into());
                    }
                }
            }
            _ => Project::new(
                name,
                self.profile.as_ref().map(|profile| profile.name.as_str()),
                position,
            ),
        };

        let id = project.id.clone();
        info!(project_id = %id, name = %project.name, "Project added");
        self.projects.push(project);
        self.persist_projects();
        Ok(Some(id))
    }

    /// Delete a project and its tracks after confirmation.
    ///
    /// When synced, the remote files and record go first; on failure the
    /// project stays in place.
    pub async fn delete_project(&mut self, id: &ProjectId) -> Result<()> {
        if !self.prompter.confirm(messages::CONFIRM_DELETE_PROJECT) {
            return Err(AppError::Cancelled);
        }
        let index = self
            .projects
            .iter()
            .position(|project| &project.id == id)
            .ok_or_else(|| AppError::not_found("project", id.as_str()))?;

        if let (Some(remote), Some(_)) = (self.sync.remote(), self.profile.as_ref()) {
            self.project_status = None;
            if let Err(e) = remote.delete_project(id, &self.projects[index].tracks).await {
                error!(error = %e, project_id = %id, "Failed to delete project remotely");
                self.project_status = Some(messages::DELETE_PROJECT_FAILED.to_string());
                return Err(e.into());
            }
        }

        let project = self.projects.remove(index);
        for track in &project.tracks {
            self.release(track);
        }
        self.persist_projects();
        info!(project_id = %id, tracks = project.tracks.len(), "Project removed");

        if self.selected_project_id.as_ref() == Some(id) {
            self.close_library();
        }
        Ok(())
    }

    // =========================================================================
    // Tracks
    // =========================================================================

    /// Add a track to the open project.
    ///
    /// Asks for a title, probes the duration, then either uploads the file
    /// or keeps it as a session-local reference.
    pub async fn add_track(&mut self, file: TrackFile) -> Result<TrackId> {
        let Some(project_id) = self.selected_project_id.clone() else {
            self.upload_status = Some(messages::OPEN_PROJECT_FIRST.to_string());
            return Err(AppError::NoProjectSelected);
        };
        if self.project(&project_id).is_none() {
            return Err(AppError::not_found("project", project_id.as_str()));
        }

        self.processing_track = true;
        self.upload_status = None;
        let result = self.process_track(&project_id, &file).await;
        self.processing_track = false;
        let track = result?;

        let id = track.id.clone();
        info!(
            track_id = %id,
            project_id = %project_id,
            synced = !track.is_local_only(),
            "Track added"
        );
        if let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) {
            project.tracks.push(track);
        }
        self.persist_projects();
        Ok(id)
    }

    async fn process_track(&mut self, project_id: &ProjectId, file: &TrackFile) -> Result<Track> {
        let guard = self.blobs.create(file);

        let default_title = file.default_title();
        let Some(answer) = self
            .prompter
            .prompt(messages::TRACK_TITLE_PROMPT, &default_title)
        else {
            debug!(file = %file.name, "Track title prompt cancelled");
            return Err(AppError::Cancelled);
        };
        let title = match answer.trim() {
            "" => default_title,
            trimmed => trimmed.to_string(),
        };

        let duration = self.probe_duration(file).await;

        match (self.sync.remote(), self.profile.as_ref()) {
            (Some(remote), Some(profile)) => {
                let result =
                    upload_and_record(remote, file, project_id, &profile.id, title, duration)
                        .await;
                drop(guard);

                result.map_err(|e| {
                    error!(error = %e, file = %file.name, "Track upload failed");
                    self.upload_status = Some(messages::UPLOAD_FAILED.to_string());
                    AppError::from(e)
                })
            }
            _ => Ok(Track {
                id: TrackId::generate(),
                title,
                file_url: guard.keep(),
                storage_path: None,
                file_size: file.size(),
                duration,
                created_at: Utc::now(),
            }),
        }
    }

    async fn probe_duration(&self, file: &TrackFile) -> f64 {
        match self.probe.probe(file).await {
            Ok(seconds) if seconds.is_finite() && seconds > 0.0 => seconds,
            Ok(_) => 0.0,
            Err(e) => {
                debug!(error = %e, file = %file.name, "Duration probe failed");
                0.0
            }
        }
    }

    /// Delete a track after confirmation. When synced, the remote record goes first.
    pub async fn delete_track(&mut self, project_id: &ProjectId, track_id: &TrackId) -> Result<()> {
        if !self.prompter.confirm(messages::CONFIRM_DELETE_TRACK) {
            return Err(AppError::Cancelled);
        }
        let track = self
            .project(project_id)
            .and_then(|project| project.track(track_id))
            .cloned()
            .ok_or_else(|| AppError::not_found("track", track_id.as_str()))?;

        if let Some(remote) = self.sync.remote() {
            self.upload_status = None;
            if let Err(e) = remote
                .delete_track(track_id, track.storage_path.as_deref())
                .await
            {
                error!(error = %e, track_id = %track_id, "Failed to delete track remotely");
                self.upload_status = Some(messages::DELETE_TRACK_FAILED.to_string());
                return Err(e.into());
            }
        }

        self.release(&track);
        if let Some(project) = self.projects.iter_mut().find(|p| &p.id == project_id) {
            project.tracks.retain(|t| &t.id != track_id);
        }
        self.persist_projects();
        info!(track_id = %track_id, project_id = %project_id, "Track removed");
        Ok(())
    }

    // =========================================================================
    // Account
    // =========================================================================

    /// Validate the account form and sign in.
    pub async fn create_account(&mut self, name: &str, email: &str) -> Result<()> {
        let form = match validate_account(name, email) {
            Ok(form) => form,
            Err(e) => {
                self.account_status = Some(e.to_string());
                return Err(e.into());
            }
        };
        self.account_status = None;

        let profile = match self.sync.remote() {
            Some(remote) => {
                self.saving_account = true;
                let existing = self.profile.as_ref().map(|profile| &profile.id);
                let result = remote.upsert_profile(existing, &form.name, &form.email).await;
                self.saving_account = false;

                match result {
                    Ok(profile) => profile,
                    Err(e) => {
                        error!(error = %e, "Failed to save profile");
                        self.account_status = Some(messages::SAVE_PROFILE_FAILED.to_string());
                        return Err(e.into());
                    }
                }
            }
            None => Profile::new(form.name, form.email),
        };

        info!(profile_id = %profile.id, "Signed in");
        self.profile = Some(profile);
        self.persist_profile();

        if let Err(e) = self.reload_remote().await {
            debug!(error = %e, "Initial sync failed, keeping local data");
        }
        Ok(())
    }

    /// Replace the project list with the backend's copy.
    ///
    /// Does nothing when signed out or local-only. On failure the local list
    /// is kept.
    pub async fn reload_remote(&mut self) -> Result<()> {
        let (Some(remote), Some(profile)) = (self.sync.remote(), self.profile.as_ref()) else {
            return Ok(());
        };

        self.loading_remote = true;
        let result = remote.fetch_projects(&profile.id).await;
        self.loading_remote = false;

        match result {
            Ok(projects) => {
                self.release_all();
                info!(projects = projects.len(), "Loaded projects from server");
                self.projects = projects;
                self.project_status = None;
                self.persist_projects();

                let selection_gone = self
                    .selected_project_id
                    .as_ref()
                    .is_some_and(|id| self.project(id).is_none());
                if selection_gone {
                    self.close_library();
                }
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load projects from server");
                self.project_status = Some(messages::SYNC_FAILED.to_string());
                Err(e.into())
            }
        }
    }

    /// Clear the profile and every project, and reset the view.
    pub fn sign_out(&mut self) {
        if let Some(profile) = &self.profile {
            info!(profile_id = %profile.id, "Signing out");
        }
        self.release_all();
        self.projects.clear();
        self.profile = None;

        self.close_library();
        self.project_status = None;
        self.account_status = None;
        self.project_syncing = false;
        self.saving_account = false;
        self.loading_remote = false;

        self.persist_profile();
        self.persist_projects();
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn release(&self, track: &Track) {
        if is_transient(&track.file_url) && self.blobs.is_live(&track.file_url) {
            self.blobs.revoke(&track.file_url);
        }
    }

    fn release_all(&self) {
        for track in self.projects.iter().flat_map(|project| &project.tracks) {
            self.release(track);
        }
    }

    fn persist_projects(&mut self) {
        if let Err(e) = self.store.save_projects(&self.projects) {
            warn!(error = %e, "Failed to persist projects");
        }
    }

    fn persist_profile(&mut self) {
        if let Err(e) = self.store.save_profile(self.profile.as_ref()) {
            warn!(error = %e, "Failed to persist profile");
        }
    }
}

async fn upload_and_record(
    remote: &dyn RemoteSync,
    file: &TrackFile,
    project_id: &ProjectId,
    profile_id: &ProfileId,
    title: String,
    duration: f64,
) -> mixtape_core::Result<Track> {
    let uploaded = remote.upload_track(file, project_id, profile_id).await?;
    remote
        .create_track_record(NewTrack {
            title,
            project_id: project_id.clone(),
            file_url: uploaded.public_url,
            storage_path: uploaded.storage_path,
            file_size: file.size(),
            duration,
        })
        .await
}
