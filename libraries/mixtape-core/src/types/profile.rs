//! Profile domain type

use crate::types::ProfileId;
use serde::{Deserialize, Serialize};

/// The signed-in user on this device.
///
/// Not a verified identity: a profile is a local record, optionally mirrored
/// to the backend keyed by its unique email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique profile identifier
    pub id: ProfileId,

    /// Display name
    pub name: String,

    /// Lower-cased email address
    pub email: String,
}

impl Profile {
    /// Create a local-only profile with a freshly generated id
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: ProfileId::generate(),
            name: name.into(),
            email: email.into(),
        }
    }
}
