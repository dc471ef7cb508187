//! Shape normalization.
//!
//! Stored snapshots use camelCase field names while backend rows use
//! snake_case. `RawProject` and `RawTrack` enumerate every field under both
//! names, tolerate malformed values, and drop anything they do not know.
//! `normalize_project` / `normalize_track` then build the canonical entity with
//! every default applied. Normalization never fails and is idempotent.

use crate::types::{
    cover_gradient, Project, ProjectId, Track, TrackId, DEFAULT_OWNER_NAME, DEFAULT_TRACK_TITLE,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::Value;

/// A track record as found in storage or on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawTrack {
    /// Track id, string or integer
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<String>,

    /// Display title
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,

    /// Playable URL, local field name
    #[serde(default, rename = "fileUrl", deserialize_with = "lenient::string")]
    pub file_url: Option<String>,
    /// Playable URL, remote column name
    #[serde(default, rename = "file_url", deserialize_with = "lenient::string")]
    pub file_url_remote: Option<String>,

    /// Object-storage key, local field name
    #[serde(default, rename = "storagePath", deserialize_with = "lenient::string")]
    pub storage_path: Option<String>,
    /// Object-storage key, remote column name
    #[serde(default, rename = "storage_path", deserialize_with = "lenient::string")]
    pub storage_path_remote: Option<String>,

    /// Size in bytes, local field name
    #[serde(default, rename = "fileSize")]
    pub file_size: Option<Value>,
    /// Size in bytes, remote column name
    #[serde(default, rename = "file_size")]
    pub file_size_remote: Option<Value>,

    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<Value>,

    /// Creation timestamp, local field name
    #[serde(default, rename = "createdAt", deserialize_with = "lenient::string")]
    pub created_at: Option<String>,
    /// Creation timestamp, remote column name
    #[serde(default, rename = "created_at", deserialize_with = "lenient::string")]
    pub created_at_remote: Option<String>,
}

/// A project record as found in storage or on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawProject {
    /// Project id, string or integer
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<String>,

    /// Project name
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,

    /// Owner display name
    #[serde(default, deserialize_with = "lenient::string")]
    pub owner: Option<String>,

    /// Cover gradient, local field name
    #[serde(default, rename = "coverGradient", deserialize_with = "lenient::string")]
    pub cover_gradient: Option<String>,
    /// Cover gradient, remote column name
    #[serde(default, rename = "cover_gradient", deserialize_with = "lenient::string")]
    pub cover_gradient_remote: Option<String>,

    /// Creation timestamp, local field name
    #[serde(default, rename = "createdAt", deserialize_with = "lenient::string")]
    pub created_at: Option<String>,
    /// Creation timestamp, remote column name
    #[serde(default, rename = "created_at", deserialize_with = "lenient::string")]
    pub created_at_remote: Option<String>,

    /// Track records
    #[serde(default, deserialize_with = "lenient::records")]
    pub tracks: Vec<RawTrack>,
}

/// Build a canonical track, filling every default.
pub fn normalize_track(raw: RawTrack) -> Track {
    let file_size = number(raw.file_size.as_ref())
        .or_else(|| number(raw.file_size_remote.as_ref()))
        .map_or(0, |size| size.max(0.0).round() as u64);

    Track {
        id: raw.id.map_or_else(TrackId::generate, TrackId::new),
        title: raw.title.unwrap_or_else(|| DEFAULT_TRACK_TITLE.to_string()),
        file_url: raw.file_url.or(raw.file_url_remote).unwrap_or_default(),
        storage_path: raw.storage_path.or(raw.storage_path_remote),
        file_size,
        duration: number(raw.duration.as_ref()).map_or(0.0, |d| d.max(0.0)),
        created_at: timestamp(raw.created_at.as_deref())
            .or_else(|| timestamp(raw.created_at_remote.as_deref()))
            .unwrap_or_else(Utc::now),
    }
}

/// Build a canonical project at creation-order `position`, filling every default.
pub fn normalize_project(raw: RawProject, position: usize) -> Project {
    Project {
        id: raw.id.map_or_else(ProjectId::generate, ProjectId::new),
        name: raw.name.unwrap_or_default(),
        owner: raw.owner.unwrap_or_else(|| DEFAULT_OWNER_NAME.to_string()),
        cover_gradient: raw
            .cover_gradient
            .or(raw.cover_gradient_remote)
            .unwrap_or_else(|| cover_gradient(position).to_string()),
        created_at: timestamp(raw.created_at.as_deref())
            .or_else(|| timestamp(raw.created_at_remote.as_deref()))
            .unwrap_or_else(Utc::now),
        tracks: raw.tracks.into_iter().map(normalize_track).collect(),
    }
}

/// Normalize a list of projects, using each one's index as its position.
pub fn normalize_projects(raws: Vec<RawProject>) -> Vec<Project> {
    raws.into_iter()
        .enumerate()
        .map(|(index, raw)| normalize_project(raw, index))
        .collect()
}

/// Finite number from a loosely typed value. Numeric strings count.
fn number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value?)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

fn iso(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl From<Track> for RawTrack {
    fn from(track: Track) -> Self {
        Self {
            id: Some(track.id.as_str().to_string()),
            title: Some(track.title),
            file_url: Some(track.file_url).filter(|url| !url.is_empty()),
            storage_path: track.storage_path,
            file_size: Some(Value::from(track.file_size)),
            duration: Some(Value::from(track.duration)),
            created_at: Some(iso(&track.created_at)),
            ..Self::default()
        }
    }
}

impl From<Project> for RawProject {
    fn from(project: Project) -> Self {
        Self {
            id: Some(project.id.as_str().to_string()),
            name: Some(project.name).filter(|name| !name.is_empty()),
            owner: Some(project.owner),
            cover_gradient: Some(project.cover_gradient),
            created_at: Some(iso(&project.created_at)),
            tracks: project.tracks.into_iter().map(RawTrack::from).collect(),
            ..Self::default()
        }
    }
}

mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Non-empty strings only; anything else reads as absent.
    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        })
    }

    /// Ids may arrive as strings or as integer keys.
    pub fn id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Arrays of objects; non-arrays read as empty, non-objects are skipped.
    pub fn records<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter(Value::is_object)
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        })
    }
}
