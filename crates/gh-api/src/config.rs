//! Configuration for the GitHub client.

use std::time::Duration;

use url::Url;

use crate::credentials::Token;
use crate::Result;

/// Public GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Configuration for [`GitHubClient`](crate::GitHubClient).
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the REST API (GitHub Enterprise uses `https://host/api/v3`)
    pub base_url: Url,
    /// Credential; `None` means every call fails as unauthenticated
    pub token: Option<Token>,
    /// Per-request timeout
    pub timeout: Duration,
    /// GitHub rejects requests without a User-Agent
    pub user_agent: String,
}

impl ApiConfig {
    /// Configuration against `base_url` with defaults for everything else.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            token: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("github-mcp-server/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Parse `base_url` and build a configuration from it.
    pub fn from_url(base_url: &str) -> Result<Self> {
        Ok(Self::new(Url::parse(base_url)?))
    }

    pub fn with_token(mut self, token: Option<Token>) -> Self {
        self.token = token;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
