//! GitHub MCP Server
//!
//! A Model Context Protocol server that lets an agent create and inspect
//! GitHub repositories and drive local git working copies.
//!
//! # Usage
//!
//! ```bash
//! github-mcp-server [--api-url <url>] [--git <path>] [--http-timeout-secs <n>]
//! ```
//!
//! # Environment Variables
//!
//! - `GITHUB_TOKEN`: GitHub credential (falls back to `gh auth token`)
//! - `GITHUB_API_URL`, `GH_MCP_GIT`, `GH_MCP_HTTP_TIMEOUT`: same as the flags
//! - `RUST_LOG`: Control log verbosity (default: `gh_mcp=info`)
//!
//! # Protocol
//!
//! The server communicates via JSON-RPC 2.0 over stdio:
//! - Requests/responses go through stdout
//! - Logs go to stderr (to avoid interfering with the protocol)

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use gh_api::{resolve_token, TokenSource, DEFAULT_API_URL};
use gh_mcp::config::DEFAULT_HTTP_TIMEOUT_SECS;
use gh_mcp::{serve_stdio, McpServer, ServerConfig};

/// MCP server for GitHub repository operations
#[derive(Parser)]
#[command(name = "github-mcp-server")]
#[command(about = "MCP server for GitHub repository operations")]
#[command(version)]
struct Args {
    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// git executable to run
    #[arg(long = "git", env = "GH_MCP_GIT", default_value = "git")]
    git_program: PathBuf,

    /// Timeout for each GitHub API request, in seconds
    #[arg(long, env = "GH_MCP_HTTP_TIMEOUT", default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)]
    http_timeout_secs: u64,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            api_url: args.api_url,
            git_program: args.git_program,
            http_timeout: Duration::from_secs(args.http_timeout_secs),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging to stderr (stdout is reserved for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gh_mcp=info".parse()?)
                .add_directive("github_mcp_server=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::from(Args::parse());

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        api_url = %config.api_url,
        "Starting github-mcp-server"
    );

    // `gh auth token` is a blocking subprocess.
    let credential = tokio::task::spawn_blocking(resolve_token).await?;
    let token = match credential {
        Some((token, source)) => {
            let source = match source {
                TokenSource::Environment => "GITHUB_TOKEN",
                TokenSource::GhCli => "gh CLI",
            };
            tracing::info!(source, "GitHub credential resolved");
            Some(token)
        }
        None => {
            tracing::warn!(
                "No GitHub credential found; hosting tools will report authentication errors"
            );
            None
        }
    };

    let server = McpServer::from_config(&config, token)?;
    let state = serve_stdio(&server).await?;

    tracing::info!(?state, "Server stopped");
    Ok(())
}
