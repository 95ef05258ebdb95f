//! Server configuration
//!
//! Resolved once in `main` from flags and environment; the rest of the crate
//! only sees [`ServerConfig`].

use std::path::PathBuf;
use std::time::Duration;

use gh_api::{ApiConfig, Token, DEFAULT_API_URL};

use crate::{Error, Result};

/// Default per-request timeout for GitHub calls, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// GitHub REST base URL
    pub api_url: String,
    /// git executable, looked up on `PATH` when not absolute
    pub git_program: PathBuf,
    pub http_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            git_program: PathBuf::from("git"),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl ServerConfig {
    /// Client configuration for the hosting collaborator.
    pub fn api_config(&self, token: Option<Token>) -> Result<ApiConfig> {
        if self.http_timeout.is_zero() {
            return Err(Error::Config("HTTP timeout must be greater than zero".into()));
        }
        if self.git_program.as_os_str().is_empty() {
            return Err(Error::Config("git program must not be empty".into()));
        }

        Ok(ApiConfig::from_url(&self.api_url)?
            .with_token(token)
            .with_timeout(self.http_timeout))
    }
}
