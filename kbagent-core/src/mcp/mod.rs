//! MCP client layer: transport seam, rmcp-backed stdio transport, and
//! the tool bridge the agents consume.

pub mod bridge;
pub mod rmcp_client;
pub mod schema;
pub mod transport;

pub use bridge::{BoundTool, ToolBridge};
pub use rmcp_client::RmcpTransport;
pub use transport::{McpTransport, ToolDescriptor};
