//! Domain model for guest snapshots from `/nodes/{node}/{type}/{vmid}/snapshot`.

use crate::core::domain::value_object::serde_helpers::{lenient_string, lenient_u64};
use serde::{Deserialize, Serialize};

/// Name of the pseudo-snapshot the API uses for the live state of a guest.
pub(crate) const CURRENT_SNAPSHOT: &str = "current";

/// A named, point-in-time state of a guest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Snapshot {
    pub name: String,
    /// Creation time in seconds since the UNIX epoch, if the API reported one.
    pub created_at: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Name of the snapshot this one was taken on top of.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// A snapshot entry exactly as the API sends it.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawSnapshot {
    #[serde(deserialize_with = "lenient_string::deserialize")]
    name: Option<String>,
    #[serde(deserialize_with = "lenient_u64::deserialize")]
    snaptime: Option<u64>,
    #[serde(deserialize_with = "lenient_string::deserialize")]
    description: Option<String>,
    #[serde(deserialize_with = "lenient_string::deserialize")]
    parent: Option<String>,
}

impl RawSnapshot {
    fn is_current(&self) -> bool {
        self.name.as_deref() == Some(CURRENT_SNAPSHOT)
    }
}

impl From<RawSnapshot> for Snapshot {
    fn from(raw: RawSnapshot) -> Self {
        Self {
            name: raw.name.unwrap_or_default(),
            created_at: raw.snaptime,
            description: raw.description.filter(|d| !d.trim().is_empty()),
            parent: raw.parent,
        }
    }
}

/// Converts a snapshot listing, dropping the `current` pseudo-snapshot.
pub(crate) fn user_snapshots(raw: Vec<RawSnapshot>) -> Vec<Snapshot> {
    raw.into_iter()
        .filter(|s| !s.is_current())
        .map(Snapshot::from)
        .collect()
}
