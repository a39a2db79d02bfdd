//! Command handlers. Each demo shares the same session setup: load
//! credentials, spawn the MCP server, discover tools, build the LLM
//! provider.

pub mod analyst;
pub mod crew;
pub mod interactive;
pub mod pipeline;
pub mod tools;

use std::sync::Arc;

use kbagent_core::config::PlatformConfig;
use kbagent_core::error::BridgeResult;
use kbagent_core::llm::OpenAiProvider;
use kbagent_core::mcp::{RmcpTransport, ToolBridge};

pub struct Session {
    pub bridge: ToolBridge,
    pub provider: Arc<OpenAiProvider>,
}

impl Session {
    /// Validate the environment, spawn the Keboola MCP server, and
    /// build the provider. Fails before any subprocess is spawned when
    /// the environment is incomplete.
    pub async fn establish() -> BridgeResult<Self> {
        let config = PlatformConfig::from_env()?;
        let provider = Arc::new(OpenAiProvider::from_config(&config));

        let transport = RmcpTransport::connect(&config.keboola_mcp_server()).await?;
        let bridge = ToolBridge::new(Arc::new(transport));

        Ok(Self { bridge, provider })
    }

    pub async fn close(&self) -> BridgeResult<()> {
        self.bridge.shutdown().await
    }
}
