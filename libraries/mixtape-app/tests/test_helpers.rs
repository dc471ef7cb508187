#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use mixtape_app::{Controller, SyncMode};
use mixtape_core::normalize::{normalize_projects, RawProject};
use mixtape_core::{
    cover_gradient, DurationProbe, MixtapeError, NewTrack, Profile, ProfileId, Project, ProjectId,
    Prompter, RemoteSync, Result, Track, TrackFile, TrackId, UploadedFile,
};
use mixtape_storage::MemoryStore;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::{Arc, Once};
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// =============================================================================
// Prompter
// =============================================================================

/// Answers prompts from a script. An empty script cancels.
#[derive(Clone, Default)]
pub struct ScriptedPrompter {
    answers: Arc<Mutex<VecDeque<Option<String>>>>,
    confirm: Arc<Mutex<bool>>,
    pub asked: Arc<Mutex<Vec<(String, String)>>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        let prompter = Self::default();
        *prompter.confirm.lock() = true;
        prompter
    }

    pub fn answer(&self, answer: &str) {
        self.answers.lock().push_back(Some(answer.to_string()));
    }

    pub fn cancel(&self) {
        self.answers.lock().push_back(None);
    }

    pub fn set_confirm(&self, confirm: bool) {
        *self.confirm.lock() = confirm;
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&self, message: &str, default: &str) -> Option<String> {
        self.asked
            .lock()
            .push((message.to_string(), default.to_string()));
        self.answers.lock().pop_front().flatten()
    }

    fn confirm(&self, _message: &str) -> bool {
        *self.confirm.lock()
    }
}

// =============================================================================
// Probe
// =============================================================================

/// Returns a fixed duration, or fails when `None`.
pub struct FixedProbe(pub Option<f64>);

#[async_trait]
impl DurationProbe for FixedProbe {
    async fn probe(&self, _file: &TrackFile) -> Result<f64> {
        self.0.ok_or_else(|| MixtapeError::probe("unsupported format"))
    }
}

// =============================================================================
// Remote
// =============================================================================

#[derive(Default)]
pub struct FakeState {
    pub projects: Vec<(ProfileId, Project)>,
    pub profiles: Vec<Profile>,
    pub stored_files: Vec<String>,
    pub calls: Vec<String>,

    pub fail_fetch: bool,
    pub fail_create_project: bool,
    pub fail_delete_project: bool,
    pub fail_upload: bool,
    pub fail_create_track: bool,
    pub fail_delete_track: bool,
    pub fail_upsert_profile: bool,
}

/// In-memory backend with failure toggles. Clones share state.
#[derive(Clone, Default)]
pub struct FakeRemote {
    pub state: Arc<Mutex<FakeState>>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut FakeState) -> R) -> R {
        f(&mut self.state.lock())
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    fn fail(message: &str) -> MixtapeError {
        MixtapeError::remote(format!("Server error (500): {}", message))
    }
}

#[async_trait]
impl RemoteSync for FakeRemote {
    async fn fetch_projects(&self, profile_id: &ProfileId) -> Result<Vec<Project>> {
        let mut state = self.state.lock();
        state.calls.push("fetch_projects".into());
        if state.fail_fetch {
            return Err(Self::fail("fetch"));
        }
        let owned: Vec<RawProject> = state
            .projects
            .iter()
            .filter(|(owner, _)| owner == profile_id)
            .map(|(_, project)| project.clone().into())
            .collect();
        Ok(normalize_projects(owned))
    }

    async fn create_project(
        &self,
        name: &str,
        profile: &Profile,
        position: usize,
    ) -> Result<Project> {
        let mut state = self.state.lock();
        state.calls.push("create_project".into());
        if state.fail_create_project {
            return Err(Self::fail("create project"));
        }
        let project = Project {
            id: ProjectId::generate(),
            name: name.to_string(),
            owner: profile.name.clone(),
            cover_gradient: cover_gradient(position).to_string(),
            created_at: Utc::now(),
            tracks: Vec::new(),
        };
        state.projects.push((profile.id.clone(), project.clone()));
        Ok(project)
    }

    async fn delete_project(&self, id: &ProjectId, tracks: &[Track]) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push("delete_project".into());
        if state.fail_delete_project {
            return Err(Self::fail("remove files"));
        }
        let paths: Vec<String> = tracks.iter().filter_map(|t| t.storage_path.clone()).collect();
        state.stored_files.retain(|f| !paths.contains(f));
        state.projects.retain(|(_, project)| &project.id != id);
        Ok(())
    }

    async fn upload_track(
        &self,
        file: &TrackFile,
        project_id: &ProjectId,
        profile_id: &ProfileId,
    ) -> Result<UploadedFile> {
        let mut state = self.state.lock();
        state.calls.push("upload_track".into());
        if state.fail_upload {
            return Err(Self::fail("upload"));
        }
        let storage_path = format!("{}/{}/{}", profile_id, project_id, file.name);
        state.stored_files.push(storage_path.clone());
        Ok(UploadedFile {
            public_url: format!("https://cdn.example.com/{}", storage_path),
            storage_path,
        })
    }

    async fn create_track_record(&self, track: NewTrack) -> Result<Track> {
        let mut state = self.state.lock();
        state.calls.push("create_track_record".into());
        if state.fail_create_track {
            return Err(Self::fail("insert track"));
        }
        let record = Track {
            id: TrackId::generate(),
            title: track.title,
            file_url: track.file_url,
            storage_path: Some(track.storage_path),
            file_size: track.file_size,
            duration: track.duration,
            created_at: Utc::now(),
        };
        if let Some((_, project)) = state
            .projects
            .iter_mut()
            .find(|(_, project)| project.id == track.project_id)
        {
            project.tracks.push(record.clone());
        }
        Ok(record)
    }

    async fn delete_track(&self, id: &TrackId, storage_path: Option<&str>) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push("delete_track".into());
        if state.fail_delete_track {
            return Err(Self::fail("delete track"));
        }
        if let Some(path) = storage_path {
            state.stored_files.retain(|f| f != path);
        }
        for (_, project) in &mut state.projects {
            project.tracks.retain(|t| &t.id != id);
        }
        Ok(())
    }

    async fn upsert_profile(
        &self,
        id: Option<&ProfileId>,
        name: &str,
        email: &str,
    ) -> Result<Profile> {
        let mut state = self.state.lock();
        state.calls.push("upsert_profile".into());
        if state.fail_upsert_profile {
            return Err(Self::fail("upsert profile"));
        }
        let existing = state.profiles.iter().position(|p| p.email == email);
        let profile = match existing {
            Some(index) => {
                state.profiles[index].name = name.to_string();
                state.profiles[index].clone()
            }
            None => {
                let profile = Profile {
                    id: id.cloned().unwrap_or_else(|| ProfileId::new("srv-profile")),
                    name: name.to_string(),
                    email: email.to_string(),
                };
                state.profiles.push(profile.clone());
                profile
            }
        };
        Ok(profile)
    }
}

// =============================================================================
// Controller Builders
// =============================================================================

pub struct Harness {
    pub controller: Controller<MemoryStore>,
    pub store: MemoryStore,
    pub prompter: ScriptedPrompter,
}

pub async fn local_controller(store: MemoryStore, duration: Option<f64>) -> Harness {
    init_tracing();
    let prompter = ScriptedPrompter::new();
    let controller = Controller::start(
        store.clone(),
        SyncMode::LocalOnly,
        Box::new(FixedProbe(duration)),
        Box::new(prompter.clone()),
    )
    .await;
    Harness {
        controller,
        store,
        prompter,
    }
}

pub async fn remote_controller(
    store: MemoryStore,
    remote: &FakeRemote,
    duration: Option<f64>,
) -> Harness {
    init_tracing();
    let prompter = ScriptedPrompter::new();
    let controller = Controller::start(
        store.clone(),
        SyncMode::Remote(Box::new(remote.clone())),
        Box::new(FixedProbe(duration)),
        Box::new(prompter.clone()),
    )
    .await;
    Harness {
        controller,
        store,
        prompter,
    }
}

pub fn audio(name: &str) -> TrackFile {
    TrackFile::new(name, vec![0u8; 64])
}
