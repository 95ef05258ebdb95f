//! MCP Server for GitHub repository operations
//!
//! This crate exposes a fixed catalog of repository-management tools to an
//! agent via the Model Context Protocol: newline-delimited JSON-RPC 2.0 over
//! stdin/stdout.
//!
//! # Architecture
//!
//! ```text
//! [ MCP Client (agent/IDE) ]
//!        | (JSON lines)
//!        v
//! [ transport ]  read line -> engine -> write line, strictly in order
//!        |
//!        v
//! [ server::McpServer ]  initialize | tools/list | tools/call
//!        |
//!        v
//! [ invoker::CapabilityInvoker ]  registry lookup, required-field check,
//!        |                        dispatch table keyed by tool name
//!        +--> [ gh-api  (GitHub REST) ]
//!        +--> [ gh-git  (git subprocess) ]
//! ```
//!
//! # Errors
//!
//! Two tiers never mix. Protocol-level problems (unknown method, unknown
//! tool, missing required argument) become JSON-RPC `error` objects with
//! code `-32603`. Business failures (GitHub rejected the call, the path is
//! not a git repository) become ordinary `result` text starting with `❌`.

pub mod arguments;
pub mod config;
pub mod error;
pub mod handlers;
pub mod invoker;
pub mod protocol;
pub mod registry;
pub mod schema;
pub mod server;
pub mod tools;
pub mod transport;

pub use arguments::ToolArguments;
pub use config::ServerConfig;
pub use error::{Error, Result, INTERNAL_ERROR};
pub use invoker::{CapabilityInvoker, TextResult, ToolHandler};
pub use registry::{ToolDescriptor, ToolRegistry};
pub use schema::SchemaNode;
pub use server::McpServer;
pub use tools::{catalog, ToolContent, ToolResult};
pub use transport::{serve, serve_stdio, LoopState};
