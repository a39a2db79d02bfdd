//! The tool-calling loop shared by every demo agent.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::agent::persona::AgentPersona;
use crate::error::{BridgeError, BridgeResult};
use crate::llm::provider::{LlmProvider, LlmRequest, Message, ToolDefinition};
use crate::mcp::bridge::BoundTool;

const DEFAULT_MAX_TURNS: usize = 8;

/// Drives one persona against one task: the model plans, requests tool
/// calls, receives their results, and finishes with a plain answer.
///
/// Tool invocation failures are fed back to the model as tool results
/// so it can re-plan; they are never retried here. Transport and
/// credential failures abort the run.
pub struct AgentRunner {
    provider: Arc<dyn LlmProvider>,
    tools: Vec<BoundTool>,
    max_turns: usize,
}

impl AgentRunner {
    pub fn new(provider: Arc<dyn LlmProvider>, tools: Vec<BoundTool>) -> Self {
        Self {
            provider,
            tools,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub async fn run(&self, persona: &AgentPersona, task: &str) -> BridgeResult<String> {
        let definitions: Vec<ToolDefinition> = self
            .tools
            .iter()
            .map(|tool| tool.descriptor().into())
            .collect();

        let mut messages = vec![Message::user(task)];

        for turn in 0..self.max_turns {
            let request = LlmRequest {
                system_prompt: Some(persona.system_prompt()),
                messages: messages.clone(),
                tools: definitions.clone(),
                ..Default::default()
            };
            let response = self.provider.generate(request).await?;

            if !response.wants_tools() {
                let answer = response.content.unwrap_or_default();
                debug!(role = persona.role.as_str(), turn, "agent finished");
                return Ok(answer);
            }

            let content = response.content.clone().unwrap_or_default();
            let tool_calls = response.tool_calls;
            messages.push(Message::assistant(content, tool_calls.clone()));

            for call in tool_calls {
                let result = self.execute_call(&call.name, call.arguments.clone()).await?;
                messages.push(Message::tool_result(call.id, result));
            }
        }

        Err(BridgeError::Connection(format!(
            "model did not produce a final answer within {} turns",
            self.max_turns
        )))
    }

    /// Run one tool call. Invocation errors become a JSON error payload
    /// handed back to the model; anything else propagates and ends the
    /// run.
    async fn execute_call(&self, name: &str, arguments: serde_json::Value) -> BridgeResult<String> {
        let Some(tool) = self.tools.iter().find(|tool| tool.name() == name) else {
            warn!(tool = name, "model requested a tool that is not bound");
            return Ok(json!({"error": format!("unknown tool '{name}'")}).to_string());
        };

        match tool.invoke(arguments).await {
            Ok(value) => Ok(value.to_string()),
            Err(err @ BridgeError::Invocation { .. }) => {
                warn!(tool = name, error = %err, "tool invocation failed");
                Ok(json!({"error": err.to_string()}).to_string())
            }
            Err(err) => Err(err),
        }
    }
}
