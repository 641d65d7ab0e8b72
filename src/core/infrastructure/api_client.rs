//! Internal HTTP client that builds authenticated requests and unwraps API responses.

use crate::core::{
    domain::{
        error::{ProxmoxError, ProxmoxResult, ValidationError},
        model::{ClientConfig, ProxmoxConnection},
    },
    infrastructure::transport::{
        ApiRequest, ApiResponse, HttpTransport, ReqwestTransport, TransportOptions,
    },
};
use governor::DefaultDirectRateLimiter;
use reqwest::{
    Method,
    header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::{Deserialize, de::DeserializeOwned};
use std::{fmt, sync::Arc};
use tracing::{debug, warn};

/// The `{"data": ...}` wrapper every API response comes in.
#[derive(Deserialize)]
struct ApiEnvelope<T> {
    data: Option<T>,
}

/// Internal HTTP client that talks to the Proxmox API.
///
/// Every request carries the `Authorization: PVEAPIToken=...` header derived from the
/// connection's token. Each call is a single request/response exchange; failures
/// are returned as-is and never retried.
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    connection: Arc<ProxmoxConnection>,
    rate_limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl ApiClient {
    /// Creates a new `ApiClient` on top of a `reqwest` transport. No network call is made.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Connection` if the HTTP client cannot be built, or
    /// `ProxmoxError::Configuration` if the rate limit is invalid.
    pub fn new(connection: ProxmoxConnection, config: ClientConfig) -> ProxmoxResult<Self> {
        let options = TransportOptions::from(&connection);
        if options.accept_invalid_certs {
            warn!(
                host = connection.proxmox_host().as_str(),
                "TLS certificate verification is DISABLED for this client"
            );
        }
        let transport = ReqwestTransport::new(options)?;
        Self::with_transport(connection, config, Arc::new(transport))
    }

    /// Creates a new `ApiClient` that sends its requests through `transport`.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Configuration` if the rate limit is invalid.
    pub fn with_transport(
        connection: ProxmoxConnection,
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> ProxmoxResult<Self> {
        let rate_limiter = match config.rate_limit {
            Some(rate_limit) => Some(Arc::new(DefaultDirectRateLimiter::direct(
                rate_limit.quota()?,
            ))),
            None => None,
        };

        Ok(Self {
            transport,
            connection: Arc::new(connection),
            rate_limiter,
        })
    }

    /// Returns a reference to the underlying connection details.
    pub fn connection(&self) -> &ProxmoxConnection {
        &self.connection
    }

    /// Performs a GET request and returns the unwrapped `data` member.
    ///
    /// # Errors
    /// Returns `ProxmoxError` if the client is misconfigured, the exchange fails,
    /// the status is not 2xx, or the body is not the expected JSON.
    pub async fn get<T>(&self, path: &[&str]) -> ProxmoxResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        self.execute_request(Method::GET, path, None).await
    }

    /// Performs a POST request with an optional form-encoded body.
    ///
    /// # Errors
    /// See [`ApiClient::get`].
    pub async fn post<T>(
        &self,
        path: &[&str],
        form: Option<&[(&str, &str)]>,
    ) -> ProxmoxResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        self.execute_request(Method::POST, path, form).await
    }

    /// Performs a DELETE request.
    ///
    /// # Errors
    /// See [`ApiClient::get`].
    pub async fn delete<T>(&self, path: &[&str]) -> ProxmoxResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        self.execute_request(Method::DELETE, path, None).await
    }

    /// Core request execution method: validates the configuration, sends the
    /// request and unwraps the response envelope.
    async fn execute_request<T>(
        &self,
        method: Method,
        path: &[&str],
        form: Option<&[(&str, &str)]>,
    ) -> ProxmoxResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let request = self.build_request(method, path, form).inspect_err(|e| {
            debug!(error = %e, "Refusing to send request to misconfigured client");
        })?;

        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        debug!(method = %request.method, path = request.url.path(), "Sending API request");
        let response = self.transport.send(request).await?;

        Self::handle_response(response)
    }

    /// Builds the URL, headers and body of a request. Never touches the network.
    fn build_request(
        &self,
        method: Method,
        path: &[&str],
        form: Option<&[(&str, &str)]>,
    ) -> Result<ApiRequest, ValidationError> {
        self.connection.ensure_configured()?;
        let url = self.connection.api_url(path)?;

        let mut auth = HeaderValue::from_str(&self.connection.proxmox_token().as_auth_header())
            .map_err(|_| {
                ValidationError::Format(
                    "API token contains characters not allowed in an HTTP header".to_string(),
                )
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let body = form.map(encode_form);
        if let Some(body) = &body {
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            );
            headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
        }

        Ok(ApiRequest {
            method,
            url,
            headers,
            body,
        })
    }

    fn handle_response<T>(response: ApiResponse) -> ProxmoxResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        if !response.is_success() {
            debug!(status = response.status, "API request failed");
            return Err(ProxmoxError::Api {
                status: response.status,
                body: response.body,
            });
        }

        let envelope: ApiEnvelope<T> = serde_json::from_str(&response.body)
            .map_err(|e| ProxmoxError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("connection", &self.connection)
            .field("rate_limited", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Encodes key/value pairs as `application/x-www-form-urlencoded`.
fn encode_form(pairs: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}
