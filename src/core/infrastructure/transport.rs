//! The HTTP exchange underneath [`ApiClient`](super::api_client::ApiClient).
//!
//! Requests are fully built (URL, headers, encoded body) before they reach a
//! transport, so a transport only moves bytes. The production implementation
//! runs on `reqwest`; tests substitute a double to observe or suppress traffic.

use crate::core::domain::{
    error::{ProxmoxError, ProxmoxResult},
    model::ProxmoxConnection,
};
use async_trait::async_trait;
use reqwest::{Client, Method, header::HeaderMap};
use url::Url;

/// A request ready to be put on the wire.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// Form-encoded body, if any.
    pub body: Option<String>,
}

/// The raw outcome of an exchange that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    /// The whole response body decoded as UTF-8.
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Connection-level options a transport is built with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportOptions {
    /// Skip certificate chain and hostname validation.
    pub accept_invalid_certs: bool,
}

impl From<&ProxmoxConnection> for TransportOptions {
    fn from(connection: &ProxmoxConnection) -> Self {
        Self {
            accept_invalid_certs: connection.accepts_invalid_certs(),
        }
    }
}

/// Sends a single request and returns the server's answer.
///
/// Implementations report failures to reach the server (DNS, refused
/// connection, TLS) as `ProxmoxError::Connection`; any HTTP status, including
/// errors, is a successful exchange.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ProxmoxResult<ApiResponse>;
}

/// `reqwest`-backed transport.
#[derive(Debug)]
pub struct ReqwestTransport {
    http_client: Client,
    options: TransportOptions,
}

impl ReqwestTransport {
    /// Creates a new transport. No connection is opened.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Connection` if the HTTP client cannot be built.
    pub fn new(options: TransportOptions) -> ProxmoxResult<Self> {
        let http_client = Client::builder()
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .build()
            .map_err(|e| ProxmoxError::Connection(e.to_string()))?;

        Ok(Self {
            http_client,
            options,
        })
    }

    /// Returns the options this transport was built with.
    pub fn options(&self) -> TransportOptions {
        self.options
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> ProxmoxResult<ApiResponse> {
        let mut req_builder = self
            .http_client
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| ProxmoxError::Connection(format!("HTTP request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ProxmoxError::Connection(format!("Failed to read response: {}", e)))?;

        Ok(ApiResponse { status, body })
    }
}
