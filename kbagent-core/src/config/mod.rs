//! Configuration loading for the demos.

pub mod constants;
pub mod mcp;
pub mod platform;

pub use mcp::{McpServerConfig, McpTransportConfig};
pub use platform::PlatformConfig;
