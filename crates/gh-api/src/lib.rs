//! GitHub hosting collaborator
//!
//! A small REST client for the handful of GitHub endpoints the MCP server
//! needs, the [`HostingService`] seam the server's tool bindings call through,
//! and startup credential resolution.

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod service;

pub use client::GitHubClient;
pub use config::{ApiConfig, DEFAULT_API_URL};
pub use credentials::{resolve_token, Token, TokenSource};
pub use error::{Error, Result};
pub use models::{
    Issue, NewIssue, NewRepository, RepoName, RepoPage, RepoVisibility, Repository,
};
pub use service::HostingService;
