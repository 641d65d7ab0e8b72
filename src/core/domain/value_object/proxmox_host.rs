use crate::core::domain::error::ValidationError;
use url::Url;

/// The base address of a Proxmox VE API endpoint, as entered by the operator.
///
/// The value is trimmed on construction and otherwise kept verbatim. It is only
/// interpreted when a request is built, so an empty or malformed host surfaces
/// as a configuration error at call time rather than at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxmoxHost(String);

impl ProxmoxHost {
    /// Creates a new host from raw operator input.
    pub fn new(host: impl Into<String>) -> Self {
        Self(host.into().trim().to_string())
    }

    /// Returns the host as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if no host was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the host with a scheme and exactly one trailing slash, so that
    /// `https://pve:8006` and `https://pve:8006/` resolve identically.
    ///
    /// A host without a scheme is assumed to speak HTTPS.
    #[must_use]
    pub fn normalized(&self) -> String {
        let mut value = if self.0.contains("://") {
            self.0.clone()
        } else {
            format!("https://{}", self.0)
        };
        if !value.ends_with('/') {
            value.push('/');
        }
        value
    }

    /// Parses the normalized host into a base URL that relative API paths can
    /// be appended to.
    ///
    /// # Errors
    /// Returns a `ValidationError` if the host is empty or not a usable base URL.
    pub fn base_url(&self) -> Result<Url, ValidationError> {
        validate_host(&self.0)?;
        let url = Url::parse(&self.normalized())
            .map_err(|e| ValidationError::Format(format!("Invalid host '{}': {}", self.0, e)))?;
        if url.cannot_be_a_base() {
            return Err(ValidationError::Format(format!(
                "Host '{}' cannot be used as a base URL",
                self.0
            )));
        }
        Ok(url)
    }

    /// Returns `true` if the host uses the plain-text `http` scheme. Every other
    /// scheme, including an unparsable host, is treated as TLS.
    #[must_use]
    pub fn is_plain_http(&self) -> bool {
        self.base_url()
            .map(|url| url.scheme() == "http")
            .unwrap_or(false)
    }
}

/// Validates that a host was supplied.
pub(crate) fn validate_host(host: &str) -> Result<(), ValidationError> {
    if host.trim().is_empty() {
        return Err(ValidationError::field("host", "Host cannot be empty"));
    }
    Ok(())
}
