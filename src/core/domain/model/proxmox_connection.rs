use crate::core::domain::{
    error::ValidationError,
    value_object::{ProxmoxApiToken, ProxmoxHost, validate_host, validate_token},
};
use url::Url;

/// Root of the JSON API below the host.
const API_ROOT: [&str; 2] = ["api2", "json"];

/// Immutable connection settings shared by every request of a client.
#[derive(Debug, Clone)]
pub struct ProxmoxConnection {
    proxmox_host: ProxmoxHost,
    proxmox_token: ProxmoxApiToken,
    proxmox_insecure: bool,
}

impl ProxmoxConnection {
    pub fn new(
        proxmox_host: ProxmoxHost,
        proxmox_token: ProxmoxApiToken,
        proxmox_insecure: bool,
    ) -> Self {
        Self {
            proxmox_host,
            proxmox_token,
            proxmox_insecure,
        }
    }

    pub fn proxmox_host(&self) -> &ProxmoxHost {
        &self.proxmox_host
    }

    pub fn proxmox_token(&self) -> &ProxmoxApiToken {
        &self.proxmox_token
    }

    /// Returns the insecure flag exactly as configured.
    pub fn is_insecure(&self) -> bool {
        self.proxmox_insecure
    }

    /// Returns `true` if certificate validation must be disabled: the insecure
    /// flag is set and the host speaks TLS. The flag never affects plain HTTP.
    pub fn accepts_invalid_certs(&self) -> bool {
        self.proxmox_insecure && !self.proxmox_host.is_plain_http()
    }

    /// Checks that both host and token are present.
    ///
    /// # Errors
    /// Returns the first missing field as a `ValidationError`.
    pub fn ensure_configured(&self) -> Result<(), ValidationError> {
        validate_host(self.proxmox_host.as_str())?;
        validate_token(self.proxmox_token.as_str())?;
        Ok(())
    }

    /// Builds the absolute URL of an API endpoint below `api2/json/`.
    ///
    /// Each segment is percent-encoded on its own, so caller-supplied values
    /// such as node or snapshot names can never introduce extra path levels.
    ///
    /// # Errors
    /// Returns a `ValidationError` if the host is empty or not a usable base URL.
    pub fn api_url<I, S>(&self, segments: I) -> Result<Url, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.proxmox_host.base_url()?;
        url.path_segments_mut()
            .map_err(|_| {
                ValidationError::Format(format!(
                    "Host '{}' cannot be used as a base URL",
                    self.proxmox_host.as_str()
                ))
            })?
            .pop_if_empty()
            .extend(API_ROOT)
            .extend(segments);
        Ok(url)
    }
}
