//! Local persistence adapter.

use crate::error::Result;
use mixtape_core::normalize::{normalize_project, RawProject};
use mixtape_core::{KeyValueStore, Profile, ProfileId, Project};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Key holding `{"projects": [...]}`.
pub const PROJECTS_KEY: &str = "simple-audio-library";

/// Key holding the active profile, absent when signed out.
pub const PROFILE_KEY: &str = "simple-audio-user";

#[derive(Serialize)]
struct ProjectsSnapshot<'a> {
    projects: &'a [Project],
}

#[derive(Deserialize)]
struct StoredProfile {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    email: Option<Value>,
}

/// Reads and writes full snapshots of the project list and profile.
///
/// Writes skip a snapshot identical to the last one this adapter wrote, so
/// repeated saves of unchanged state are harmless.
pub struct LocalStore<S> {
    store: S,
    last_projects: Option<String>,
    last_profile: Option<Option<String>>,
}

impl<S: KeyValueStore> LocalStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            last_projects: None,
            last_profile: None,
        }
    }

    /// Underlying key-value store
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Load and normalize the stored project list. Never fails.
    pub fn load_projects(&self) -> Vec<Project> {
        let text = match self.store.get(PROJECTS_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read stored projects");
                return Vec::new();
            }
        };

        let items = match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(mut root)) => match root.remove("projects") {
                Some(Value::Array(items)) => items,
                _ => {
                    warn!("Stored projects snapshot has no project list");
                    return Vec::new();
                }
            },
            Ok(_) => {
                warn!("Stored projects snapshot is not an object");
                return Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "Stored projects snapshot is corrupt");
                return Vec::new();
            }
        };

        let projects: Vec<Project> = items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value::<RawProject>(item).ok())
            .enumerate()
            .map(|(index, raw)| normalize_project(raw, index))
            .collect();

        debug!(count = projects.len(), "Loaded projects from local storage");
        projects
    }

    /// Overwrite the stored project list.
    pub fn save_projects(&mut self, projects: &[Project]) -> Result<()> {
        let text = serde_json::to_string(&ProjectsSnapshot { projects })?;
        if self.last_projects.as_deref() == Some(text.as_str()) {
            return Ok(());
        }
        self.store.set(PROJECTS_KEY, &text)?;
        debug!(count = projects.len(), bytes = text.len(), "Saved projects snapshot");
        self.last_projects = Some(text);
        Ok(())
    }

    /// Load the stored profile. Missing name or email reads as signed out.
    pub fn load_profile(&self) -> Option<Profile> {
        let text = match self.store.get(PROFILE_KEY) {
            Ok(text) => text?,
            Err(e) => {
                warn!(error = %e, "Failed to read stored profile");
                return None;
            }
        };

        let stored: StoredProfile = match serde_json::from_str(&text) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Stored profile is corrupt");
                return None;
            }
        };

        let name = non_empty(stored.name)?;
        let email = non_empty(stored.email)?;
        let id = match stored.id {
            Some(Value::String(id)) if !id.is_empty() => ProfileId::new(id),
            Some(Value::Number(id)) => ProfileId::new(id.to_string()),
            _ => ProfileId::generate(),
        };

        Some(Profile { id, name, email })
    }

    /// Overwrite the stored profile, or remove it when signed out.
    pub fn save_profile(&mut self, profile: Option<&Profile>) -> Result<()> {
        let text = profile.map(serde_json::to_string).transpose()?;
        if self.last_profile.as_ref() == Some(&text) {
            return Ok(());
        }
        match &text {
            Some(text) => self.store.set(PROFILE_KEY, text)?,
            None => self.store.remove(PROFILE_KEY)?,
        }
        debug!(signed_in = text.is_some(), "Saved profile");
        self.last_profile = Some(text);
        Ok(())
    }
}

fn non_empty(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}
