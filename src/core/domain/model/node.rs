//! Domain model for cluster nodes from the `/nodes` endpoint.

use crate::core::domain::value_object::serde_helpers::lenient_string;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reachability of a node as reported by the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Online,
    Offline,
    /// Missing, empty or any status string the client does not recognize.
    #[default]
    Unknown,
}

impl NodeStatus {
    /// Maps a remote status string onto the known states.
    #[must_use]
    pub fn from_remote(status: Option<&str>) -> Self {
        match status {
            Some("online") => Self::Online,
            Some("offline") => Self::Offline,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A node in the Proxmox cluster.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Node {
    /// The node name (e.g., "pve1"), `"unknown"` if the API omitted it or sent a blank one.
    pub name: String,
    pub status: NodeStatus,
}

/// A node entry exactly as the API sends it.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawNode {
    #[serde(deserialize_with = "lenient_string::deserialize")]
    node: Option<String>,
    #[serde(deserialize_with = "lenient_string::deserialize")]
    status: Option<String>,
}

impl From<RawNode> for Node {
    fn from(raw: RawNode) -> Self {
        Self {
            name: raw
                .node
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| "unknown".to_string()),
            status: NodeStatus::from_remote(raw.status.as_deref()),
        }
    }
}
