//! Credential resolution
//!
//! Resolved once at startup: `GITHUB_TOKEN` first, then `gh auth token`.
//! Absence of both means the server runs unauthenticated and every hosting
//! tool reports that as a business failure.

use std::fmt;
use std::process::{Command, Stdio};

/// Environment variable checked first.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// A GitHub access token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wrap a raw token, trimming whitespace. Blank input yields `None`.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Where a resolved token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Environment,
    GhCli,
}

/// Resolve a token from the environment, falling back to the `gh` CLI.
pub fn resolve_token() -> Option<(Token, TokenSource)> {
    resolve_with(std::env::var(TOKEN_ENV).ok(), gh_cli_token)
}

/// Resolution order with the sources injected.
///
/// `fallback` only runs when the environment value is absent or blank.
pub fn resolve_with(
    env_value: Option<String>,
    fallback: impl FnOnce() -> Option<String>,
) -> Option<(Token, TokenSource)> {
    if let Some(token) = env_value.and_then(Token::new) {
        return Some((token, TokenSource::Environment));
    }
    fallback()
        .and_then(Token::new)
        .map(|token| (token, TokenSource::GhCli))
}

/// Ask the GitHub CLI for its stored token.
///
/// Returns `None` when `gh` is not installed, not logged in, or prints nothing.
pub fn gh_cli_token() -> Option<String> {
    let output = Command::new("gh")
        .args(["auth", "token"])
        .stdin(Stdio::null())
        .output()
        .map_err(|e| tracing::debug!(error = %e, "gh CLI not available"))
        .ok()?;

    if output.status.success() {
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        tracing::debug!(
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "gh auth token failed"
        );
        None
    }
}
