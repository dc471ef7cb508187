//! Mixtape App
//!
//! The application core the host UI drives: configuration, the sync mode
//! decided at startup, duration probing, and the state controller that runs
//! every project, track and account flow.
//!
//! # Example
//!
//! ```ignore
//! use mixtape_app::{AppConfig, Controller, LoftyProbe};
//! use mixtape_storage::RedbStore;
//!
//! let config = AppConfig::load()?;
//! let store = RedbStore::open(config.database_path())?;
//! let mut controller = Controller::start(
//!     store,
//!     config.sync_mode(),
//!     Box::new(LoftyProbe::new()),
//!     Box::new(host_prompter),
//! )
//! .await;
//!
//! controller.create_project("Road trip").await?;
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod messages;
pub mod probe;

pub use config::{AppConfig, RemoteSettings, StorageSettings, SyncMode};
pub use controller::{Controller, View};
pub use error::{AppError, Result};
pub use probe::{LoftyProbe, ProbeError};
