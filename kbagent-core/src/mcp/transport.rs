//! The transport seam between the tool bridge and an MCP session.
//!
//! Production code uses [`crate::mcp::RmcpTransport`]; tests substitute
//! in-memory implementations to script catalogs and failures.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BridgeResult;

/// A tool as advertised by an MCP server's `tools/list` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// JSON Schema for the tool's arguments. Servers always send an
    /// object schema; an absent one is treated as accept-anything.
    #[serde(default = "empty_object_schema")]
    pub input_schema: Value,
}

fn empty_object_schema() -> Value {
    serde_json::json!({"type": "object"})
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            input_schema: empty_object_schema(),
        }
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }
}

/// Minimal MCP client surface: list the catalog, call a tool, close the
/// session.
#[async_trait]
pub trait McpTransport: Send + Sync {
    async fn list_tools(&self) -> BridgeResult<Vec<ToolDescriptor>>;

    /// Invoke one tool. `arguments` is a JSON object matching the
    /// tool's input schema. Success returns the decoded result payload;
    /// a tool-level failure surfaces as
    /// [`crate::BridgeError::Invocation`].
    async fn call_tool(&self, name: &str, arguments: Value) -> BridgeResult<Value>;

    async fn shutdown(&self) -> BridgeResult<()>;
}
