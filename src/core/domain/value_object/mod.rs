mod proxmox_api_token;
mod proxmox_host;
pub(crate) mod serde_helpers;

pub use proxmox_api_token::ProxmoxApiToken;
pub use proxmox_host::ProxmoxHost;

// Re-export validation functions for internal use
pub(crate) use proxmox_api_token::validate_token;
pub(crate) use proxmox_host::validate_host;
