mod core;
mod resources;


pub use crate::core::domain::error::{ProxmoxError, ProxmoxResult, ValidationError};
pub use crate::core::domain::model::{
    ClientConfig, Guest, GuestDetail, GuestStatus, GuestType, Node, NodeStatus,
    ProxmoxConnection, RateLimitConfig, Snapshot,
};
pub use crate::core::domain::value_object::{ProxmoxApiToken, ProxmoxHost};
pub use crate::core::infrastructure::transport::{
    ApiRequest, ApiResponse, HttpTransport, ReqwestTransport, TransportOptions,
};

use crate::core::infrastructure::api_client::ApiClient;
use std::sync::Arc;

/// Environment variable holding the API base URL.
pub const HOST_ENV: &str = "PROXMOX_HOST";
/// Environment variable holding the API token (`user@realm!tokenid=secret`).
pub const TOKEN_ENV: &str = "PROXMOX_API_TOKEN";
/// Environment variable enabling insecure TLS (`1`, `true`, `yes`, `on`).
pub const INSECURE_ENV: &str = "PROXMOX_INSECURE";

/// A Client for interacting with the Proxmox VE API
///
/// This client provides a safe, ergonomic interface for:
/// - Listing nodes and the guests (VMs and containers) they host
/// - Starting, stopping and rebooting guests
/// - Listing, creating, deleting and rolling back snapshots
///
/// The client authenticates every request with an API token and keeps no state
/// between calls besides its immutable connection settings. Lifecycle and
/// snapshot operations are fire-and-forget: they return once the API accepted
/// the request, without waiting for the resulting task to finish.
///
/// # Examples
///
/// ```no_run
/// use pve_control::{ProxmoxClient, ProxmoxResult};
///
/// #[tokio::main]
/// async fn main() -> ProxmoxResult<()> {
///     let client = ProxmoxClient::builder()
///         .host("https://proxmox.example.com:8006")
///         .token("automation@pve!ci=00000000-0000-0000-0000-000000000000")
///         .insecure(true)
///         .build()?;
///
///     for node in client.nodes().await? {
///         println!("{} is {}", node.name, node.status);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct ProxmoxClient {
    pub(crate) api_client: ApiClient,
}

/// Builder for ProxmoxClient configuration
#[derive(Debug, Default)]
pub struct ProxmoxClientBuilder {
    host: Option<String>,
    token: Option<String>,
    insecure: bool,
    config: ClientConfig,
}

impl ProxmoxClientBuilder {
    /// Reads the connection settings from the process environment
    /// (`PROXMOX_HOST`, `PROXMOX_API_TOKEN`, `PROXMOX_INSECURE`).
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Reads the connection settings from key/value pairs, using the same keys
    /// as [`ProxmoxClientBuilder::from_env`]. Unrelated keys are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut builder = Self::default();
        for (key, value) in vars {
            let value: String = value.into();
            match key.as_ref() {
                HOST_ENV => builder.host = Some(value),
                TOKEN_ENV => builder.token = Some(value),
                INSECURE_ENV => builder.insecure = parse_flag(&value),
                _ => {}
            }
        }
        builder
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Disables certificate validation for HTTPS hosts. Has no effect on `http://` hosts.
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Throttles outgoing requests on the client side.
    pub fn rate_limit(mut self, requests_per_second: u32, burst_size: u32) -> Self {
        self.config.rate_limit = Some(RateLimitConfig {
            requests_per_second,
            burst_size,
        });
        self
    }

    /// Builds the client. No network call is made, and a missing host or
    /// token is only reported when an operation is invoked.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Configuration` for an invalid rate limit and
    /// `ProxmoxError::Connection` if the HTTP client cannot be created.
    pub fn build(self) -> ProxmoxResult<ProxmoxClient> {
        let connection = self.connection();
        Ok(ProxmoxClient {
            api_client: ApiClient::new(connection, self.config)?,
        })
    }

    /// Builds the client on top of a custom transport.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Configuration` for an invalid rate limit.
    pub fn build_with_transport(
        self,
        transport: Arc<dyn HttpTransport>,
    ) -> ProxmoxResult<ProxmoxClient> {
        let connection = self.connection();
        Ok(ProxmoxClient {
            api_client: ApiClient::with_transport(connection, self.config, transport)?,
        })
    }

    fn connection(&self) -> ProxmoxConnection {
        ProxmoxConnection::new(
            ProxmoxHost::new(self.host.clone().unwrap_or_default()),
            ProxmoxApiToken::new(self.token.clone().unwrap_or_default()),
            self.insecure,
        )
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl ProxmoxClient {
    /// Creates a new builder for ProxmoxClient configuration
    pub fn builder() -> ProxmoxClientBuilder {
        ProxmoxClientBuilder::default()
    }

    /// Creates a client from a host URL, an API token and the insecure-TLS flag.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Connection` if the HTTP client cannot be created.
    pub fn new(
        host: impl Into<String>,
        token: impl Into<String>,
        insecure: bool,
    ) -> ProxmoxResult<Self> {
        Self::builder()
            .host(host)
            .token(token)
            .insecure(insecure)
            .build()
    }

    /// Returns the connection settings this client was built with.
    pub fn connection(&self) -> &ProxmoxConnection {
        self.api_client.connection()
    }

    /// Returns true if both host and token are present
    pub fn is_configured(&self) -> bool {
        self.connection().ensure_configured().is_ok()
    }
}
