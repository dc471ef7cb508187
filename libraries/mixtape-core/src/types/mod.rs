//! Domain types for Mixtape

mod file;
mod ids;
mod profile;
mod project;
mod track;

pub use file::{TrackFile, UploadedFile};
pub use ids::{ProfileId, ProjectId, TrackId};
pub use profile::Profile;
pub use project::{cover_gradient, Project, DEFAULT_OWNER_NAME, GRADIENTS};
pub use track::{NewTrack, Track, DEFAULT_TRACK_TITLE};
