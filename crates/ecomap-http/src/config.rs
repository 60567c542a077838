//! HTTP client configuration.

use std::time::Duration;

use ecomap_core::ApiUrl;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`AuthenticatedHttpClient`](crate::AuthenticatedHttpClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint path is resolved against.
    pub base_url: ApiUrl,
    /// Timeout applied to every request, including token refreshes.
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: ApiUrl) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("ecomap/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
