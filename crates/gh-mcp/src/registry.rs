//! Tool Registry
//!
//! Immutable catalog of tool descriptors, built once at startup.

use std::collections::HashMap;

use serde::Serialize;

use crate::schema::SchemaNode;
use crate::{Error, Result};

/// Name, description and parameter schema of one tool.
///
/// Serializes in the MCP `tools/list` shape (`inputSchema`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub parameter_schema: SchemaNode,
}

impl ToolDescriptor {
    pub fn new(name: &str, description: &str, parameter_schema: SchemaNode) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameter_schema,
        }
    }
}

/// Ordered, name-unique set of [`ToolDescriptor`]s.
#[derive(Debug)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Build a registry, rejecting duplicate names.
    pub fn new(descriptors: Vec<ToolDescriptor>) -> Result<Self> {
        let mut index = HashMap::with_capacity(descriptors.len());
        for (position, descriptor) in descriptors.iter().enumerate() {
            if index.insert(descriptor.name.clone(), position).is_some() {
                return Err(Error::DuplicateTool(descriptor.name.clone()));
            }
        }
        Ok(Self {
            tools: descriptors,
            index,
        })
    }

    /// All descriptors in registration order.
    pub fn describe(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn lookup(&self, name: &str) -> Result<&ToolDescriptor> {
        self.index
            .get(name)
            .map(|&position| &self.tools[position])
            .ok_or_else(|| Error::UnknownTool(name.to_string()))
    }
}
