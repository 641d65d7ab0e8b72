pub mod client_config;
pub mod guest;
pub mod node;
pub mod proxmox_connection;
pub mod snapshot;

pub use client_config::{ClientConfig, RateLimitConfig};
pub use guest::{Guest, GuestDetail, GuestStatus, GuestType};
pub use node::{Node, NodeStatus};
pub use proxmox_connection::ProxmoxConnection;
pub use snapshot::Snapshot;
