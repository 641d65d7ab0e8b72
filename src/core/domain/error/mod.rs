use thiserror::Error;

/// The main error type for Proxmox API operations.
///
/// Every failure of a client operation surfaces as one of these variants. The
/// `Display` output is meant for a human operator, so callers that only need
/// "the operation failed" can print it without matching on the variant.
#[derive(Error, Debug)]
pub enum ProxmoxError {
    /// The client is not usable as configured (missing host or token,
    /// unparsable host, invalid rate limit). Raised before any network I/O.
    ///
    /// # Fields
    /// * `0` - The underlying validation error
    #[error("Configuration error: {0}")]
    Configuration(#[from] ValidationError),

    /// Represents errors raised by the transport itself (connection refused,
    /// DNS failure, TLS validation failure)
    ///
    /// # Fields
    /// * `0` - A description of what went wrong during the exchange
    #[error("Connection error: {0}")]
    Connection(String),

    /// The API answered with a non-2xx status
    ///
    /// # Fields
    /// * `status` - The HTTP status code
    /// * `body` - The raw response body, verbatim
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The API answered with a 2xx status but the body was not the expected JSON
    ///
    /// # Fields
    /// * `0` - The parser's description of the failure
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    ///
    /// # Fields
    /// * `0` - Description of the format violation
    #[error("Format error: {0}")]
    Format(String),
}

impl ValidationError {
    pub(crate) fn field(field: &str, message: impl Into<String>) -> Self {
        Self::Field {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Type alias for Results that may fail with a ProxmoxError
pub type ProxmoxResult<T> = Result<T, ProxmoxError>;
