//! MCP Server implementation
//!
//! The protocol engine: maps one parsed JSON-RPC request to at most one
//! response. It holds no per-session state, so answers depend only on the
//! request and the (read-only) tool catalog.

use std::sync::Arc;

use gh_api::{GitHubClient, HostingService, Token};
use gh_git::{GitCli, VersionControl};
use serde_json::{json, Value};

use crate::arguments::ToolArguments;
use crate::config::ServerConfig;
use crate::handlers::bind_defaults;
use crate::invoker::CapabilityInvoker;
use crate::protocol::{InitializeResult, JsonRpcRequest, JsonRpcResponse, ToolCallParams};
use crate::registry::{ToolDescriptor, ToolRegistry};
use crate::tools::{catalog, ToolResult};
use crate::{Error, Result, INTERNAL_ERROR};

/// Placeholder used in error messages when a request omits a name.
const ABSENT: &str = "<none>";

/// MCP Server for GitHub repository operations
///
/// # Example
///
/// ```ignore
/// use gh_mcp::{McpServer, ServerConfig};
///
/// let server = McpServer::from_config(&ServerConfig::default(), None)?;
/// let reply = server
///     .handle_message(r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#)
///     .await?;
/// ```
#[derive(Clone)]
pub struct McpServer {
    invoker: Arc<CapabilityInvoker>,
}

impl McpServer {
    pub fn new(invoker: CapabilityInvoker) -> Self {
        Self {
            invoker: Arc::new(invoker),
        }
    }

    /// Built-in catalog bound to the given collaborators.
    pub fn with_collaborators(
        hosting: Arc<dyn HostingService>,
        vc: Arc<dyn VersionControl>,
    ) -> Result<Self> {
        let registry = ToolRegistry::new(catalog())?;
        let invoker = bind_defaults(CapabilityInvoker::new(registry), hosting, vc)?;
        debug_assert!(invoker.is_fully_bound());
        Ok(Self::new(invoker))
    }

    /// Production wiring: GitHub REST client plus the `git` executable.
    pub fn from_config(config: &ServerConfig, token: Option<Token>) -> Result<Self> {
        let client = GitHubClient::new(config.api_config(token)?)?;
        let git = GitCli::with_program(&config.git_program);

        tracing::debug!(
            api_url = %config.api_url,
            git = %config.git_program.display(),
            authenticated = client.is_authenticated(),
            "Collaborators configured"
        );

        Self::with_collaborators(Arc::new(client), Arc::new(git))
    }

    /// Registered tools in registration order.
    pub fn tools(&self) -> &[ToolDescriptor] {
        self.invoker.registry().describe()
    }

    /// Handle a single raw message.
    ///
    /// Returns `Err` only when the text is not JSON at all; the caller drops
    /// such lines. `Ok(None)` means the message was a notification.
    pub async fn handle_message(&self, message: &str) -> Result<Option<String>> {
        let value: Value = serde_json::from_str(message)?;

        let response = match Self::parse_request(value) {
            Ok(request) => self.handle_request(request).await,
            Err(response) => Some(response),
        };

        response
            .map(|response| serde_json::to_string(&response).map_err(Error::from))
            .transpose()
    }

    /// Shape-check a JSON value as a request, answering with an error
    /// envelope when it cannot be one.
    fn parse_request(value: Value) -> std::result::Result<JsonRpcRequest, JsonRpcResponse> {
        if !value.is_object() {
            return Err(JsonRpcResponse::error(
                None,
                INTERNAL_ERROR,
                "Invalid request: expected a JSON object".to_string(),
            ));
        }

        let id = value.get("id").filter(|id| !id.is_null()).cloned();
        serde_json::from_value(value).map_err(|e| {
            JsonRpcResponse::error(id, INTERNAL_ERROR, format!("Invalid request: {e}"))
        })
    }

    /// Map a request to its response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let method = request.method.as_deref().unwrap_or(ABSENT);
        tracing::debug!(method, id = ?request.id, "Handling request");

        if request.is_notification() && is_handshake_notification(method) {
            tracing::debug!(method, "Notification acknowledged");
            return None;
        }

        let id = request.id.clone();
        match self.dispatch(request).await {
            Ok(result) => Some(JsonRpcResponse::success(id, result)),
            Err(e) => {
                tracing::warn!(id = ?id, error = %e, "Request failed");
                Some(JsonRpcResponse::error(id, e.code(), e.to_string()))
            }
        }
    }

    async fn dispatch(&self, request: JsonRpcRequest) -> Result<Value> {
        match request.method.as_deref() {
            Some("initialize") => self.handle_initialize(),
            Some("tools/list") => self.handle_tools_list(),
            Some("tools/call") => self.handle_tools_call(request.params).await,
            Some(other) => Err(Error::UnknownMethod(other.to_string())),
            None => Err(Error::UnknownMethod(ABSENT.to_string())),
        }
    }

    /// Handle the initialize request
    ///
    /// Static: the answer does not depend on prior calls.
    fn handle_initialize(&self) -> Result<Value> {
        let result = InitializeResult::for_server(env!("CARGO_PKG_VERSION"));
        Ok(serde_json::to_value(result)?)
    }

    fn handle_tools_list(&self) -> Result<Value> {
        Ok(json!({ "tools": self.tools() }))
    }

    /// Handle tools/call request
    async fn handle_tools_call(&self, params: Value) -> Result<Value> {
        let params: ToolCallParams = match params {
            Value::Null => ToolCallParams::default(),
            Value::Object(_) => serde_json::from_value(params)
                .map_err(|e| Error::InvalidParams(e.to_string()))?,
            _ => {
                return Err(Error::InvalidParams(
                    "tools/call params must be an object".to_string(),
                ));
            }
        };

        let name = params
            .tool_name()
            .ok_or_else(|| Error::UnknownTool(ABSENT.to_string()))?
            .to_string();
        let arguments = ToolArguments::from_value(params.arguments)?;

        tracing::info!(tool = %name, "Calling tool");
        let outcome = self.invoker.invoke(&name, arguments).await?;
        if outcome.is_error {
            tracing::info!(tool = %name, "Tool reported failure");
        }

        Ok(serde_json::to_value(ToolResult::from(outcome))?)
    }
}

/// Client notifications sent after `initialize` that need no reply.
fn is_handshake_notification(method: &str) -> bool {
    method == "initialized" || method.starts_with("notifications/")
}
