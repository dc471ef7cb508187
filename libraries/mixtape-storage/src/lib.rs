//! Mixtape Storage
//!
//! On-device persistence for the Mixtape sync core.
//!
//! The whole project collection and the active profile are stored as JSON
//! text under two fixed keys of a [`KeyValueStore`]. Reads fail soft: missing,
//! corrupt or wrongly shaped data loads as an empty collection / no profile.
//!
//! # Example
//!
//! ```rust,no_run
//! use mixtape_storage::{LocalStore, RedbStore};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = LocalStore::new(RedbStore::open("data/mixtape.redb")?);
//! let projects = store.load_projects();
//! let profile = store.load_profile();
//! # Ok(())
//! # }
//! ```

mod error;
mod local;
mod memory;
mod redb_store;

pub use error::{Result, StorageError};
pub use local::{LocalStore, PROFILE_KEY, PROJECTS_KEY};
pub use memory::MemoryStore;
pub use redb_store::RedbStore;

pub use mixtape_core::KeyValueStore;
