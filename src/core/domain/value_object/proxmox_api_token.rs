use crate::core::domain::error::ValidationError;
use std::fmt;

/// A Proxmox API token in the `user@realm!tokenid=secret` form.
///
/// The value is treated as opaque: it is trimmed and sent as-is. `Debug`
/// never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxmoxApiToken(String);

impl ProxmoxApiToken {
    /// Creates a new token from raw operator input.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into().trim().to_string())
    }

    /// Returns the token value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if no token was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Formats the token as the value of the `Authorization` header.
    #[must_use]
    pub fn as_auth_header(&self) -> String {
        format!("PVEAPIToken={}", self.0)
    }
}

impl fmt::Debug for ProxmoxApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("ProxmoxApiToken(<empty>)")
        } else {
            f.write_str("ProxmoxApiToken(<redacted>)")
        }
    }
}

/// Validates that a token was supplied.
pub(crate) fn validate_token(token: &str) -> Result<(), ValidationError> {
    if token.trim().is_empty() {
        return Err(ValidationError::field("token", "API token cannot be empty"));
    }
    Ok(())
}
