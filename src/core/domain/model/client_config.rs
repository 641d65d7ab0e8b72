use crate::core::domain::error::ValidationError;
use governor::Quota;
use std::num::NonZeroU32;

/// Client-side request rate limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Sustained number of requests allowed per second.
    pub requests_per_second: u32,
    /// Number of requests that may be sent back to back before throttling.
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// Converts the limit into a `governor` quota.
    ///
    /// # Errors
    /// Returns a `ValidationError` if either value is zero.
    pub(crate) fn quota(&self) -> Result<Quota, ValidationError> {
        let per_second = NonZeroU32::new(self.requests_per_second).ok_or_else(|| {
            ValidationError::field("rate_limit.requests_per_second", "Must be greater than 0")
        })?;
        let burst = NonZeroU32::new(self.burst_size).ok_or_else(|| {
            ValidationError::field("rate_limit.burst_size", "Must be greater than 0")
        })?;
        Ok(Quota::per_second(per_second).allow_burst(burst))
    }
}

/// Behaviour of the client that is independent of the target server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Throttle outgoing requests. Disabled by default.
    pub rate_limit: Option<RateLimitConfig>,
}
