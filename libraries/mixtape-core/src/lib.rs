//! Mixtape Core
//!
//! Platform-agnostic types, traits, and error handling for the Mixtape sync core.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Profile`, `Project`, `Track`, and their typed ids
//! - **Normalization**: typed raw records that accept both local and remote field names
//! - **Core Traits**: `KeyValueStore`, `RemoteSync`, `DurationProbe`, `Prompter`
//! - **Transient references**: `BlobRegistry` and its scoped `BlobGuard`
//! - **Error Handling**: Unified `MixtapeError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use mixtape_core::normalize::{normalize_project, RawProject};
//! use mixtape_core::format::format_duration;
//!
//! let raw: RawProject = serde_json::from_str(r#"{"id": "p1", "name": "Road trip"}"#).unwrap();
//! let project = normalize_project(raw, 0);
//!
//! assert_eq!(project.owner, mixtape_core::DEFAULT_OWNER_NAME);
//! assert!(project.tracks.is_empty());
//! assert_eq!(format_duration(125.0), "2m 05s");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod account;
pub mod blob;
pub mod error;
pub mod format;
pub mod ids;
pub mod normalize;
pub mod traits;
pub mod types;

pub use account::{validate_account, AccountError, AccountForm};
pub use blob::{BlobGuard, BlobRegistry, BlobStats};
pub use error::{MixtapeError, Result};
pub use traits::{DurationProbe, KeyValueStore, Prompter, RemoteSync};
pub use types::{
    cover_gradient, NewTrack, Profile, ProfileId, Project, ProjectId, Track, TrackFile, TrackId,
    UploadedFile, DEFAULT_OWNER_NAME, DEFAULT_TRACK_TITLE, GRADIENTS,
};
