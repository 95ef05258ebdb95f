//! Capability Invoker
//!
//! Validates a tool call against its descriptor and runs the bound handler.
//! Handler faults and panics are converted into failure text so that only
//! registry-level problems surface as protocol errors.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinError;

use crate::arguments::ToolArguments;
use crate::registry::ToolRegistry;
use crate::{Error, Result};

pub const SUCCESS_MARKER: &str = "✅";
pub const FAILURE_MARKER: &str = "❌";
pub const INFO_MARKER: &str = "ℹ️";

/// Human-readable outcome of a tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextResult {
    pub text: String,
    pub is_error: bool,
}

impl TextResult {
    /// Success text. Callers format the leading marker themselves since
    /// some success messages carry it on every line.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// `❌ <message>`
    pub fn failure(message: impl AsRef<str>) -> Self {
        Self {
            text: format!("{FAILURE_MARKER} {}", message.as_ref()),
            is_error: true,
        }
    }

    /// `ℹ️ <message>`
    pub fn info(message: impl AsRef<str>) -> Self {
        Self {
            text: format!("{INFO_MARKER} {}", message.as_ref()),
            is_error: false,
        }
    }
}

/// One tool's behaviour.
///
/// Return `Ok` for anything the caller should read as the tool's answer,
/// including business failures already phrased as [`TextResult::failure`].
/// An `Err` is also reported as failure text, using its display message.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, args: ToolArguments) -> Result<TextResult>;
}

/// Registry plus the dispatch table from tool name to handler.
#[derive(Clone)]
pub struct CapabilityInvoker {
    registry: Arc<ToolRegistry>,
    bindings: HashMap<String, Arc<dyn ToolHandler>>,
}

impl CapabilityInvoker {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            bindings: HashMap::new(),
        }
    }

    /// Bind `handler` to the registered tool `name`.
    ///
    /// Binding a name the registry does not know is rejected; the catalog
    /// is the single source of tool names.
    pub fn bind(mut self, name: &str, handler: Arc<dyn ToolHandler>) -> Result<Self> {
        self.registry.lookup(name)?;
        self.bindings.insert(name.to_string(), handler);
        Ok(self)
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Whether every registered tool has a handler.
    pub fn is_fully_bound(&self) -> bool {
        self.registry
            .describe()
            .iter()
            .all(|tool| self.bindings.contains_key(&tool.name))
    }

    /// Run `tool_name` with `args`.
    ///
    /// `Err` only for an unknown tool or a missing required field.
    pub async fn invoke(&self, tool_name: &str, args: ToolArguments) -> Result<TextResult> {
        let descriptor = self.registry.lookup(tool_name)?;

        if let Some(field) = descriptor
            .parameter_schema
            .required_fields()
            .iter()
            .find(|field| !args.contains(field))
        {
            return Err(Error::MissingArgument {
                tool: tool_name.to_string(),
                field: field.clone(),
            });
        }

        let handler = self
            .bindings
            .get(tool_name)
            .cloned()
            .ok_or_else(|| Error::UnknownTool(tool_name.to_string()))?;

        tracing::debug!(tool = %tool_name, "Invoking tool");

        let task = tokio::spawn(async move { handler.call(args).await });
        let result = match task.await {
            Ok(Ok(result)) => result,
            Ok(Err(fault)) => {
                tracing::warn!(tool = %tool_name, error = %fault, "Tool reported a fault");
                TextResult::failure(fault.to_string())
            }
            Err(join_error) => {
                let reason = abort_reason(join_error);
                tracing::error!(tool = %tool_name, %reason, "Tool aborted");
                TextResult::failure(format!("Tool '{tool_name}' aborted unexpectedly: {reason}"))
            }
        };

        Ok(result)
    }
}

fn abort_reason(error: JoinError) -> String {
    if error.is_cancelled() {
        return "task was cancelled".to_string();
    }
    let payload = error.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
