//! Project domain types

use crate::types::{ProjectId, Track};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owner shown when a project record carries none.
pub const DEFAULT_OWNER_NAME: &str = "Youfoundmikey";

/// Cover palette, assigned by creation-order position.
pub const GRADIENTS: [&str; 6] = [
    "linear-gradient(135deg, #5b7cfa, #9c4df4)",
    "linear-gradient(135deg, #ff6a88, #ff99ac)",
    "linear-gradient(135deg, #45f79a, #00c4a1)",
    "linear-gradient(135deg, #ffd36f, #ff8a57)",
    "linear-gradient(135deg, #76a7ff, #a873ff)",
    "linear-gradient(135deg, #ffcfe4, #b0f3ff)",
];

/// Cover gradient for the project at `position` in creation order.
pub fn cover_gradient(position: usize) -> &'static str {
    GRADIENTS[position % GRADIENTS.len()]
}

/// A named collection of tracks (a mixtape)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique project identifier
    pub id: ProjectId,

    /// Project name
    pub name: String,

    /// Display name of the owning profile
    pub owner: String,

    /// CSS gradient used for the cover tile
    pub cover_gradient: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Tracks in insertion order
    pub tracks: Vec<Track>,
}

impl Project {
    /// Create a new local project at the given creation-order position
    pub fn new(name: impl Into<String>, owner: Option<&str>, position: usize) -> Self {
        Self {
            id: ProjectId::generate(),
            name: name.into(),
            owner: owner.unwrap_or(DEFAULT_OWNER_NAME).to_string(),
            cover_gradient: cover_gradient(position).to_string(),
            created_at: Utc::now(),
            tracks: Vec::new(),
        }
    }

    /// Find a track by id
    pub fn track(&self, id: &crate::types::TrackId) -> Option<&Track> {
        self.tracks.iter().find(|track| &track.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_cycles_through_palette() {
        assert_eq!(cover_gradient(0), GRADIENTS[0]);
        assert_eq!(cover_gradient(5), GRADIENTS[5]);
        assert_eq!(cover_gradient(6), GRADIENTS[0]);
        assert_eq!(cover_gradient(13), GRADIENTS[1]);
    }

    #[test]
    fn new_project_defaults_owner() {
        let project = Project::new("Road trip", None, 2);
        assert_eq!(project.owner, DEFAULT_OWNER_NAME);
        assert_eq!(project.cover_gradient, GRADIENTS[2]);
        assert!(project.tracks.is_empty());
    }

    #[test]
    fn project_serializes_camel_case() {
        let project = Project::new("Road trip", Some("Taylor"), 0);
        let value = serde_json::to_value(&project).unwrap();
        assert!(value.get("coverGradient").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("cover_gradient").is_none());
    }
}
