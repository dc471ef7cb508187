//! Transient local references to uploaded binaries.
//!
//! A `blob:` URL points at file bytes held in memory for the current session.
//! Every URL minted by [`BlobRegistry::create`] is owned by a [`BlobGuard`]
//! that revokes it when dropped, so early returns and errors cannot leak it.
//! A guard can be disarmed with [`BlobGuard::keep`] when the URL becomes the
//! playable source of a local-only track; that URL must later be released
//! with [`BlobRegistry::revoke`].

use crate::types::TrackFile;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Scheme prefix of transient references.
pub const BLOB_SCHEME: &str = "blob:";

/// Whether a URL is a transient local reference.
pub fn is_transient(url: &str) -> bool {
    url.starts_with(BLOB_SCHEME)
}

/// Counters used to detect leaked or double-released references.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlobStats {
    /// References minted so far
    pub created: u64,
    /// References revoked so far
    pub revoked: u64,
    /// References currently alive
    pub outstanding: usize,
}

#[derive(Default)]
struct RegistryState {
    live: HashMap<String, Bytes>,
    created: u64,
    revoked: u64,
}

/// Session-scoped table of transient references.
///
/// Cloning shares the same table.
///
/// ```rust
/// use mixtape_core::{BlobRegistry, TrackFile};
///
/// let registry = BlobRegistry::new();
/// let guard = registry.create(&TrackFile::new("demo.mp3", vec![1u8, 2, 3]));
/// assert!(registry.is_live(guard.url()));
///
/// let url = guard.keep();
/// assert_eq!(registry.stats().outstanding, 1);
///
/// assert!(registry.revoke(&url));
/// assert_eq!(registry.stats().revoked, 1);
/// ```
#[derive(Clone, Default)]
pub struct BlobRegistry {
    state: Arc<Mutex<RegistryState>>,
}

impl BlobRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a transient reference for the file's bytes.
    pub fn create(&self, file: &TrackFile) -> BlobGuard {
        let url = format!("{}{}", BLOB_SCHEME, crate::ids::generate());
        let mut state = self.state.lock();
        state.live.insert(url.clone(), file.bytes.clone());
        state.created += 1;
        debug!(url = %url, file = %file.name, size = file.size(), "Created transient reference");

        BlobGuard {
            registry: self.clone(),
            url,
            armed: true,
        }
    }

    /// Release a transient reference.
    ///
    /// Returns `false` for non-`blob:` URLs and for references that are not
    /// (or no longer) alive.
    pub fn revoke(&self, url: &str) -> bool {
        if !is_transient(url) {
            return false;
        }
        let mut state = self.state.lock();
        if state.live.remove(url).is_some() {
            state.revoked += 1;
            debug!(url = %url, "Revoked transient reference");
            true
        } else {
            warn!(url = %url, "Revoke of unknown transient reference");
            false
        }
    }

    /// Bytes behind a live reference, for handing to the host media element.
    pub fn resolve(&self, url: &str) -> Option<Bytes> {
        self.state.lock().live.get(url).cloned()
    }

    /// Whether the reference is currently alive.
    pub fn is_live(&self, url: &str) -> bool {
        self.state.lock().live.contains_key(url)
    }

    /// Number of references currently alive.
    pub fn outstanding(&self) -> usize {
        self.state.lock().live.len()
    }

    /// Snapshot of the lifetime counters.
    pub fn stats(&self) -> BlobStats {
        let state = self.state.lock();
        BlobStats {
            created: state.created,
            revoked: state.revoked,
            outstanding: state.live.len(),
        }
    }
}

/// Owner of a freshly minted transient reference. Revokes it on drop.
#[must_use = "dropping the guard revokes the reference immediately"]
pub struct BlobGuard {
    registry: BlobRegistry,
    url: String,
    armed: bool,
}

impl BlobGuard {
    /// The `blob:` URL this guard owns.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Disarm the guard and hand the URL to a long-lived owner.
    pub fn keep(mut self) -> String {
        self.armed = false;
        std::mem::take(&mut self.url)
    }
}

impl Drop for BlobGuard {
    fn drop(&mut self) {
        if self.armed {
            self.registry.revoke(&self.url);
        }
    }
}

impl std::fmt::Debug for BlobGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobGuard")
            .field("url", &self.url)
            .field("armed", &self.armed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> TrackFile {
        TrackFile::new("song.mp3", vec![1u8, 2, 3])
    }

    #[test]
    fn dropping_guard_revokes() {
        let registry = BlobRegistry::new();
        {
            let guard = registry.create(&file());
            assert!(is_transient(guard.url()));
            assert!(registry.is_live(guard.url()));
            assert_eq!(registry.outstanding(), 1);
        }
        assert_eq!(
            registry.stats(),
            BlobStats {
                created: 1,
                revoked: 1,
                outstanding: 0
            }
        );
    }

    #[test]
    fn guard_is_released_on_early_return() {
        fn fails(registry: &BlobRegistry) -> Result<(), &'static str> {
            let _guard = registry.create(&file());
            Err("probe failed")
        }

        let registry = BlobRegistry::new();
        assert!(fails(&registry).is_err());
        assert_eq!(registry.outstanding(), 0);
    }

    #[test]
    fn kept_reference_survives_until_revoked() {
        let registry = BlobRegistry::new();
        let url = registry.create(&file()).keep();
        assert_eq!(registry.outstanding(), 1);
        assert_eq!(registry.resolve(&url).as_deref(), Some(&[1u8, 2, 3][..]));

        assert!(registry.revoke(&url));
        assert!(!registry.revoke(&url));
        assert_eq!(registry.stats().revoked, 1);
        assert_eq!(registry.outstanding(), 0);
    }

    #[test]
    fn revoke_ignores_remote_urls() {
        let registry = BlobRegistry::new();
        assert!(!registry.revoke("https://cdn.example.com/a.mp3"));
        assert_eq!(registry.stats().revoked, 0);
    }

    #[test]
    fn clones_share_state() {
        let registry = BlobRegistry::new();
        let other = registry.clone();
        let url = registry.create(&file()).keep();
        assert!(other.revoke(&url));
        assert_eq!(registry.outstanding(), 0);
    }
}
