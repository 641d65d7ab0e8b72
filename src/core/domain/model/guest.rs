//! Domain models for guests: QEMU virtual machines and LXC containers.
//!
//! Guests are listed through `/nodes/{node}/qemu` and `/nodes/{node}/lxc`, and
//! their runtime detail comes from `/nodes/{node}/{type}/{vmid}/status/current`.
//! A guest is identified by the `(node, type, id)` triple; the numeric id alone
//! is not unique across nodes or guest types.

use crate::core::domain::{
    error::ValidationError,
    value_object::serde_helpers::{lenient_f64, lenient_string, lenient_u64},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::debug;

/// The virtualization flavour of a guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestType {
    /// A full virtual machine.
    Qemu,
    /// A container.
    Lxc,
}

impl GuestType {
    /// Both guest types, in the order their collections are merged.
    pub const ALL: [GuestType; 2] = [GuestType::Qemu, GuestType::Lxc];

    /// The path segment the API uses for this guest type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Qemu => "qemu",
            Self::Lxc => "lxc",
        }
    }
}

impl fmt::Display for GuestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for GuestType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "qemu" => Ok(Self::Qemu),
            "lxc" => Ok(Self::Lxc),
            other => Err(ValidationError::Format(format!(
                "Unknown guest type '{}': expected 'qemu' or 'lxc'",
                other
            ))),
        }
    }
}

/// Power state of a guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestStatus {
    Running,
    Stopped,
    /// Missing, empty or any status string the client does not recognize
    /// (e.g. "paused", "suspended").
    #[default]
    Unknown,
}

impl GuestStatus {
    /// Maps a remote status string onto the known states.
    #[must_use]
    pub fn from_remote(status: Option<&str>) -> Self {
        match status {
            Some("running") => Self::Running,
            Some("stopped") => Self::Stopped,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for GuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A guest as listed on a node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Guest {
    /// The guest identifier (`vmid`).
    pub id: u32,
    /// Human-readable name, `"VM <id>"` when the API reports none.
    pub name: String,
    pub status: GuestStatus,
    #[serde(rename = "type")]
    pub guest_type: GuestType,
    /// The node hosting the guest.
    pub node: String,
}

/// Runtime detail of a single guest.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GuestDetail {
    pub id: u32,
    pub name: String,
    /// Status exactly as the API reported it, `"unknown"` if absent.
    /// See [`GuestDetail::status_kind`] for the normalized view.
    pub status: String,
    #[serde(rename = "type")]
    pub guest_type: GuestType,
    pub node: String,
    /// Uptime in seconds.
    pub uptime: u64,
    /// CPU usage as a fraction of the allocated CPUs (may exceed 1.0).
    pub cpu: f64,
    /// Memory usage in bytes.
    pub mem: u64,
    /// Memory limit in bytes, 0 if unknown.
    pub max_mem: u64,
}

impl GuestDetail {
    /// The free-text status collapsed onto [`GuestStatus`].
    #[must_use]
    pub fn status_kind(&self) -> GuestStatus {
        GuestStatus::from_remote(Some(&self.status))
    }
}

/// Name shown for guests the API reports without one.
pub(crate) fn placeholder_name(id: u32) -> String {
    format!("VM {}", id)
}

fn guest_name(name: Option<String>, id: u32) -> String {
    name.filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| placeholder_name(id))
}

fn guest_id(vmid: Option<u64>) -> u32 {
    let id = vmid.and_then(|v| u32::try_from(v).ok());
    if id.is_none() {
        debug!(?vmid, "Guest reported without a usable vmid, using 0");
    }
    id.unwrap_or(0)
}

/// A guest list entry exactly as the API sends it.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawGuest {
    #[serde(deserialize_with = "lenient_u64::deserialize")]
    vmid: Option<u64>,
    #[serde(deserialize_with = "lenient_string::deserialize")]
    name: Option<String>,
    #[serde(deserialize_with = "lenient_string::deserialize")]
    status: Option<String>,
}

impl RawGuest {
    pub(crate) fn into_guest(self, node: &str, guest_type: GuestType) -> Guest {
        let id = guest_id(self.vmid);
        Guest {
            id,
            name: guest_name(self.name, id),
            status: GuestStatus::from_remote(self.status.as_deref()),
            guest_type,
            node: node.to_string(),
        }
    }
}

/// The `status/current` payload exactly as the API sends it.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawGuestStatus {
    #[serde(deserialize_with = "lenient_string::deserialize")]
    name: Option<String>,
    #[serde(deserialize_with = "lenient_string::deserialize")]
    status: Option<String>,
    #[serde(deserialize_with = "lenient_u64::deserialize")]
    uptime: Option<u64>,
    #[serde(deserialize_with = "lenient_f64::deserialize")]
    cpu: Option<f64>,
    #[serde(deserialize_with = "lenient_u64::deserialize")]
    mem: Option<u64>,
    #[serde(deserialize_with = "lenient_u64::deserialize")]
    maxmem: Option<u64>,
}

impl RawGuestStatus {
    pub(crate) fn into_detail(self, node: &str, guest_type: GuestType, id: u32) -> GuestDetail {
        GuestDetail {
            id,
            name: guest_name(self.name, id),
            status: self.status.unwrap_or_else(|| "unknown".to_string()),
            guest_type,
            node: node.to_string(),
            uptime: self.uptime.unwrap_or(0),
            cpu: self.cpu.unwrap_or(0.0),
            mem: self.mem.unwrap_or(0),
            max_mem: self.maxmem.unwrap_or(0),
        }
    }
}
