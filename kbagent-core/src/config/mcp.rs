//! MCP server launch configuration.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How to reach an MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum McpTransportConfig {
    /// Spawn the server as a child process and speak over stdio.
    Stdio {
        command: String,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default)]
        working_directory: Option<PathBuf>,
    },
    /// Remote server reachable over HTTP. Representable but not served
    /// by the stdio client; connecting to one fails with a connection
    /// error.
    Http { endpoint: String },
}

/// A named MCP server plus the environment handed to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpServerConfig {
    pub name: String,
    #[serde(flatten)]
    pub transport: McpTransportConfig,
    /// Variables injected into the subprocess on top of the forwarded
    /// parent set. Credentials go here.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl McpServerConfig {
    pub fn stdio(
        name: impl Into<String>,
        command: impl Into<String>,
        args: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            transport: McpTransportConfig::Stdio {
                command: command.into(),
                args,
                working_directory: None,
            },
            env: HashMap::new(),
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdio_config_deserializes_without_optional_fields() {
        let raw = r#"{"name": "keboola", "command": "uvx", "args": ["keboola_mcp_server"]}"#;
        let config: McpServerConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.name, "keboola");
        match config.transport {
            McpTransportConfig::Stdio { command, args, .. } => {
                assert_eq!(command, "uvx");
                assert_eq!(args, vec!["keboola_mcp_server"]);
            }
            McpTransportConfig::Http { .. } => panic!("expected stdio transport"),
        }
        assert!(config.env.is_empty());
    }

    #[test]
    fn http_config_deserializes() {
        let raw = r#"{"name": "remote", "endpoint": "https://mcp.example.com"}"#;
        let config: McpServerConfig = serde_json::from_str(raw).unwrap();
        assert!(matches!(config.transport, McpTransportConfig::Http { .. }));
    }
}
