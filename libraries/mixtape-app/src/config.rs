/// Application configuration
use crate::error::Result;
use mixtape_core::RemoteSync;
use mixtape_remote::{RemoteClient, RemoteConfig, DEFAULT_BUCKET};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "MIXTAPE_CONFIG_PATH";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub remote: RemoteSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

/// Hosted backend endpoint. Remote sync is off unless both url and key are set.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteSettings {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub anon_key: String,

    #[serde(default = "default_bucket")]
    pub bucket: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            bucket: default_bucket(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl RemoteSettings {
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }
}

impl AppConfig {
    /// Load configuration from the optional config file and environment
    ///
    /// Environment variables use the `MIXTAPE` prefix and `__` as the section
    /// separator, e.g. `MIXTAPE_REMOTE__URL`.
    pub fn load() -> Result<Self> {
        Self::load_from(resolve_config_path().as_deref())
    }

    /// Load configuration from a specific file (if any) and environment
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            settings = settings.add_source(config::File::from(path).required(false));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("MIXTAPE")
                .prefix_separator("_")
                .separator("__"),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Path of the on-device key-value store
    pub fn database_path(&self) -> PathBuf {
        self.storage.data_dir.join("mixtape.redb")
    }

    /// Decide the sync mode once for the lifetime of the session.
    ///
    /// An unusable endpoint is logged and treated as local-only.
    pub fn sync_mode(&self) -> SyncMode {
        if !self.remote.is_configured() {
            info!("Remote sync not configured, running local-only");
            return SyncMode::LocalOnly;
        }

        let config = RemoteConfig::new(self.remote.url.clone(), self.remote.anon_key.clone())
            .with_bucket(self.remote.bucket.clone());
        match RemoteClient::new(config) {
            Ok(client) => {
                info!(url = %client.url(), bucket = %client.bucket(), "Remote sync enabled");
                SyncMode::Remote(Box::new(client))
            }
            Err(e) => {
                warn!(error = %e, "Remote sync misconfigured, running local-only");
                SyncMode::LocalOnly
            }
        }
    }
}

/// Whether mutations are mirrored to the hosted backend.
pub enum SyncMode {
    LocalOnly,
    Remote(Box<dyn RemoteSync>),
}

impl SyncMode {
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    pub fn remote(&self) -> Option<&dyn RemoteSync> {
        match self {
            Self::LocalOnly => None,
            Self::Remote(remote) => Some(remote.as_ref()),
        }
    }
}

impl fmt::Debug for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocalOnly => f.write_str("LocalOnly"),
            Self::Remote(_) => f.write_str("Remote"),
        }
    }
}

/// Resolve the config path from `MIXTAPE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// `$XDG_CONFIG_HOME/mixtape/config.toml`, or `~/.config/mixtape/config.toml`
/// when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("mixtape").join("config.toml"))
}

// Default values
fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
