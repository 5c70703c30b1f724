//! Client configuration

use chrono_tz::Tz;
use std::time::Duration;

/// Configuration for talking to the authoritative evaluation service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL (e.g., "http://localhost:3000")
    pub base_url: String,

    /// Transport timeout for a single HTTP request
    pub timeout: Duration,

    /// Coordinator's bounded wait for an authoritative answer
    pub verify_timeout: Duration,

    /// Retry once on connection failure
    pub retry_once: bool,

    /// Business timezone used for local previews
    pub business_tz: Tz,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            verify_timeout: Duration::from_secs(5),
            retry_once: true,
            business_tz: Tz::UTC,
        }
    }

    /// Set the transport timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the coordinator's bounded wait
    pub fn with_verify_timeout(mut self, timeout: Duration) -> Self {
        self.verify_timeout = timeout;
        self
    }

    /// Enable or disable the single connection retry
    pub fn with_retry_once(mut self, retry: bool) -> Self {
        self.retry_once = retry;
        self
    }

    /// Set the business timezone
    pub fn with_business_tz(mut self, tz: Tz) -> Self {
        self.business_tz = tz;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}
