//! Error types for the MCP server

use thiserror::Error;

/// Result type alias for MCP operations
pub type Result<T> = std::result::Result<T, Error>;

/// JSON-RPC "Internal error" code, used for every protocol-level failure.
pub const INTERNAL_ERROR: i32 = -32603;

/// Errors that can occur during MCP server operations
#[derive(Debug, Error)]
pub enum Error {
    /// Tool name absent from the registry (or missing from the request)
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A field the tool schema marks required was not supplied
    #[error("Missing required argument '{field}' for tool '{tool}'")]
    MissingArgument { tool: String, field: String },

    /// Method other than initialize, tools/list, tools/call
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    /// Request envelope or params had the wrong shape
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Argument present but of the wrong JSON type
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Two catalog entries share a name
    #[error("Duplicate tool name in registry: {0}")]
    DuplicateTool(String),

    /// Error during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Hosting collaborator failure
    #[error(transparent)]
    Api(#[from] gh_api::Error),

    /// Invalid startup configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// JSON-RPC error code reported for this error.
    ///
    /// The taxonomy is flat: every protocol-level failure uses [`INTERNAL_ERROR`].
    pub fn code(&self) -> i32 {
        INTERNAL_ERROR
    }
}
