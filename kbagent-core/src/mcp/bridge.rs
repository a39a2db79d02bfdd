//! The tool bridge: one discovery pass over the MCP catalog, then
//! bound tool handles the agents invoke.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{BridgeError, BridgeResult};
use crate::mcp::schema::validate_against_schema;
use crate::mcp::transport::{McpTransport, ToolDescriptor};

/// Discovers the remote tool catalog once per session and hands out
/// [`BoundTool`] handles. The catalog snapshot taken by the first
/// discovery is immutable for the lifetime of the bridge.
pub struct ToolBridge {
    transport: Arc<dyn McpTransport>,
    catalog: Mutex<Option<Arc<[ToolDescriptor]>>>,
}

impl ToolBridge {
    pub fn new(transport: Arc<dyn McpTransport>) -> Self {
        Self {
            transport,
            catalog: Mutex::new(None),
        }
    }

    /// Fetch the tool catalog, deduplicated by name. The underlying
    /// `tools/list` request runs at most once; later calls return the
    /// cached snapshot.
    ///
    /// When a server advertises the same name twice, the first
    /// definition wins and every later one is dropped with a warning.
    /// Catalog order is otherwise preserved.
    pub async fn discover(&self) -> BridgeResult<Arc<[ToolDescriptor]>> {
        let mut guard = self.catalog.lock().await;
        if let Some(catalog) = guard.as_ref() {
            return Ok(Arc::clone(catalog));
        }

        let raw = self.transport.list_tools().await?;
        if raw.is_empty() {
            return Err(BridgeError::Connection(
                "MCP server advertised no tools".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut tools = Vec::with_capacity(raw.len());
        for tool in raw {
            if seen.insert(tool.name.clone()) {
                tools.push(tool);
            } else {
                warn!(
                    tool = tool.name.as_str(),
                    "duplicate tool name in catalog, keeping first definition"
                );
            }
        }
        debug!(count = tools.len(), "discovered MCP tool catalog");

        let catalog: Arc<[ToolDescriptor]> = tools.into();
        *guard = Some(Arc::clone(&catalog));
        Ok(catalog)
    }

    /// Bind every discovered tool for invocation.
    pub async fn bind_all(&self) -> BridgeResult<Vec<BoundTool>> {
        let catalog = self.discover().await?;
        Ok(catalog
            .iter()
            .map(|descriptor| BoundTool {
                descriptor: descriptor.clone(),
                transport: Arc::clone(&self.transport),
            })
            .collect())
    }

    /// Bind a named subset of the catalog. Unknown names are an
    /// invocation error naming the missing tool.
    pub async fn bind(&self, names: &[&str]) -> BridgeResult<Vec<BoundTool>> {
        let catalog = self.discover().await?;
        names
            .iter()
            .map(|name| {
                catalog
                    .iter()
                    .find(|tool| tool.name == *name)
                    .map(|descriptor| BoundTool {
                        descriptor: descriptor.clone(),
                        transport: Arc::clone(&self.transport),
                    })
                    .ok_or_else(|| {
                        BridgeError::invocation(*name, "tool not present in catalog")
                    })
            })
            .collect()
    }

    pub async fn shutdown(&self) -> BridgeResult<()> {
        self.transport.shutdown().await
    }
}

/// A remote tool bound for invocation. Invocation is pass-through: the
/// arguments the agent produced go to the server unmodified after a
/// local shape check, and the decoded result comes back unmodified.
#[derive(Clone)]
pub struct BoundTool {
    descriptor: ToolDescriptor,
    transport: Arc<dyn McpTransport>,
}

impl std::fmt::Debug for BoundTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundTool")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

impl BoundTool {
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn description(&self) -> &str {
        self.descriptor.description.as_deref().unwrap_or_default()
    }

    pub fn input_schema(&self) -> &Value {
        &self.descriptor.input_schema
    }

    pub fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    /// Invoke the tool. Arguments violating the advertised schema fail
    /// locally with an invocation error; nothing is retried here. An
    /// empty result payload is success, not an error.
    pub async fn invoke(&self, arguments: Value) -> BridgeResult<Value> {
        validate_against_schema(&self.descriptor.input_schema, &arguments)
            .map_err(|message| BridgeError::invocation(&self.descriptor.name, message))?;

        debug!(tool = self.descriptor.name.as_str(), "invoking MCP tool");
        self.transport
            .call_tool(&self.descriptor.name, arguments)
            .await
    }
}
