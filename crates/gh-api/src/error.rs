//! Error types for gh-api

use serde::Deserialize;

/// Result type for gh-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to GitHub
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No credential was resolved at startup
    #[error(
        "GitHub authentication required. Set GITHUB_TOKEN environment variable or use 'gh auth login'"
    )]
    Unauthenticated,

    /// Transport-level failure (connection, timeout, body decoding)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub answered with a non-success status
    #[error("GitHub API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid repository name '{0}': expected owner/repo")]
    InvalidRepoName(String),
}

/// Error body GitHub returns with 4xx/5xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    field: Option<String>,
}

impl Error {
    /// Build an [`Error::Api`] from a status code and raw response body.
    ///
    /// Uses GitHub's `message` plus any per-field details when the body is the
    /// usual JSON shape, and falls back to the raw text otherwise.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => {
                let details: Vec<String> = parsed
                    .errors
                    .iter()
                    .filter_map(|d| {
                        d.message.clone().or_else(|| match (&d.field, &d.code) {
                            (Some(field), Some(code)) => Some(format!("{field} {code}")),
                            _ => None,
                        })
                    })
                    .collect();
                if details.is_empty() {
                    parsed.message
                } else {
                    format!("{} ({})", parsed.message, details.join("; "))
                }
            }
            Err(_) if body.trim().is_empty() => "no response body".to_string(),
            Err(_) => body.trim().to_string(),
        };
        Self::Api { status, message }
    }
}
