//! Production MCP transport over the official rmcp SDK.
//!
//! The server runs as a child process speaking MCP over stdio. Its
//! stderr is drained into tracing so server-side Python logs stay
//! visible without corrupting the protocol stream.

use async_trait::async_trait;
use rmcp::handler::client::ClientHandler;
use rmcp::model::{LoggingLevel, LoggingMessageNotificationParam};
use rmcp::service::{self, NotificationContext, RoleClient, RunningService};
use rmcp::transport::child_process::TokioChildProcess;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::mcp::{McpServerConfig, McpTransportConfig};
use crate::config::platform::subprocess_env;
use crate::error::{BridgeError, BridgeResult};
use crate::mcp::transport::{McpTransport, ToolDescriptor};

/// An established MCP session over a spawned stdio server.
pub struct RmcpTransport {
    server_name: String,
    service: RunningService<RoleClient, LoggingClientHandler>,
}

impl RmcpTransport {
    /// Spawn the configured server and run the MCP handshake. Spawn
    /// failures and protocol failures map to `Connection`; handshake
    /// responses that look like credential rejections map to
    /// `Authentication`.
    pub async fn connect(config: &McpServerConfig) -> BridgeResult<Self> {
        let McpTransportConfig::Stdio {
            command,
            args,
            working_directory,
        } = &config.transport
        else {
            return Err(BridgeError::Connection(format!(
                "MCP server '{}' is configured for HTTP; only stdio servers are supported",
                config.name
            )));
        };

        let mut cmd = Command::new(command);
        cmd.kill_on_drop(true)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .env_clear()
            .envs(subprocess_env(&config.env))
            .args(args);
        if let Some(dir) = working_directory {
            cmd.current_dir(dir);
        }

        let (transport, stderr) = TokioChildProcess::builder(cmd)
            .stderr(std::process::Stdio::piped())
            .spawn()
            .map_err(|err| {
                BridgeError::Connection(format!(
                    "failed to spawn MCP server '{command}': {err}"
                ))
            })?;

        if let Some(stderr) = stderr {
            let server_name = config.name.clone();
            tokio::spawn(async move {
                let mut reader = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = reader.next_line().await {
                    debug!("MCP server stderr ({server_name}): {line}");
                }
            });
        }

        let handler = LoggingClientHandler {
            server_name: config.name.clone(),
        };
        let service = service::serve_client(handler, transport)
            .await
            .map_err(|err| BridgeError::from_handshake_failure(err.to_string()))?;

        info!(server = config.name.as_str(), "MCP session established");
        Ok(Self {
            server_name: config.name.clone(),
            service,
        })
    }
}

#[async_trait]
impl McpTransport for RmcpTransport {
    async fn list_tools(&self) -> BridgeResult<Vec<ToolDescriptor>> {
        let tools = self
            .service
            .peer()
            .list_all_tools()
            .await
            .map_err(|err| BridgeError::from_handshake_failure(err.to_string()))?;

        tools
            .into_iter()
            .map(|tool| {
                let value = serde_json::to_value(tool).map_err(|err| {
                    BridgeError::Connection(format!("malformed tool definition: {err}"))
                })?;
                serde_json::from_value(value).map_err(|err| {
                    BridgeError::Connection(format!("malformed tool definition: {err}"))
                })
            })
            .collect()
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> BridgeResult<Value> {
        let arguments = match arguments {
            Value::Object(map) => Some(map),
            Value::Null => None,
            other => {
                return Err(BridgeError::invocation(
                    name,
                    format!("arguments must be a JSON object, got {other}"),
                ));
            }
        };

        let mut params = rmcp::model::CallToolRequestParams::new(name.to_string());
        params.arguments = arguments;
        let result = self
            .service
            .call_tool(params)
            .await
            .map_err(|err| BridgeError::invocation(name, err.to_string()))?;

        decode_call_tool_result(name, result)
    }

    async fn shutdown(&self) -> BridgeResult<()> {
        debug!(server = self.server_name.as_str(), "closing MCP session");
        self.service.cancellation_token().cancel();
        Ok(())
    }
}

/// Client handler for the rmcp session. Forwards server-emitted log
/// notifications into tracing; everything else keeps the defaults.
#[derive(Clone)]
struct LoggingClientHandler {
    server_name: String,
}

impl ClientHandler for LoggingClientHandler {
    fn on_logging_message(
        &self,
        params: LoggingMessageNotificationParam,
        _context: NotificationContext<RoleClient>,
    ) -> impl std::future::Future<Output = ()> + Send + '_ {
        let summary = params
            .data
            .as_str()
            .map(str::to_owned)
            .unwrap_or_else(|| params.data.to_string());
        match params.level {
            LoggingLevel::Debug => {
                debug!(server = self.server_name.as_str(), message = %summary, "MCP server log")
            }
            LoggingLevel::Info | LoggingLevel::Notice => {
                info!(server = self.server_name.as_str(), message = %summary, "MCP server log")
            }
            _ => {
                warn!(server = self.server_name.as_str(), message = %summary, "MCP server log")
            }
        }
        async move {}
    }

    fn get_info(&self) -> rmcp::model::ClientInfo {
        let mut info = rmcp::model::ClientInfo::default();
        info.client_info.name = env!("CARGO_PKG_NAME").into();
        info.client_info.version = env!("CARGO_PKG_VERSION").into();
        info
    }
}

/// Flatten a `tools/call` result into a single JSON value. An
/// `isError: true` result becomes an invocation error carrying the
/// joined text content; otherwise structured content wins over text,
/// and text that parses as JSON is returned parsed.
fn decode_call_tool_result(
    tool: &str,
    result: rmcp::model::CallToolResult,
) -> BridgeResult<Value> {
    let value = serde_json::to_value(result)
        .map_err(|err| BridgeError::invocation(tool, format!("undecodable result: {err}")))?;

    let is_error = value
        .get("isError")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let text = joined_text_content(&value);

    if is_error {
        let message = if text.is_empty() {
            "tool reported an error without a message".to_string()
        } else {
            text
        };
        return Err(BridgeError::invocation(tool, message));
    }

    if let Some(structured) = value.get("structuredContent") {
        if !structured.is_null() {
            return Ok(structured.clone());
        }
    }
    if text.is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

fn joined_text_content(result: &Value) -> String {
    result
        .get("content")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter(|item| item.get("type").and_then(Value::as_str) == Some("text"))
                .filter_map(|item| item.get("text").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}
