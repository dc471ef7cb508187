//! Mixtape Remote
//!
//! HTTP client mirroring Mixtape state to a hosted backend: a PostgREST-style
//! relational API (`profiles`, `projects`, `tracks`) plus an object-storage
//! bucket for track binaries.
//!
//! # Features
//!
//! - **Tables**: fetch projects with nested tracks, insert/delete records, upsert profiles
//! - **Object storage**: upload track binaries, resolve public URLs, remove files
//! - **`RemoteSync`**: `RemoteClient` implements the core sync seam
//!
//! # Example
//!
//! ```ignore
//! use mixtape_core::{ProfileId, RemoteSync};
//! use mixtape_remote::{RemoteClient, RemoteConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RemoteConfig::new("https://project.example.co", "anon-key");
//!     let client = RemoteClient::new(config)?;
//!
//!     let projects = client.fetch_projects(&ProfileId::new("profile-1")).await?;
//!     println!("Found {} projects", projects.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod storage;
mod sync;
mod tables;
mod types;

pub use client::RemoteClient;
pub use error::{RemoteError, Result};
pub use storage::StorageClient;
pub use tables::TablesClient;
pub use types::{NewProjectRow, NewTrackRow, ProfileRow, RemoteConfig, DEFAULT_BUCKET};
