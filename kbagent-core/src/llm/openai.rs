//! OpenAI-compatible chat-completions provider.
//!
//! Works against api.openai.com and any endpoint speaking the same
//! dialect; the base URL comes from configuration.

use reqwest::Client as HttpClient;
use serde_json::{Value, json};

use async_trait::async_trait;

use crate::config::PlatformConfig;
use crate::llm::provider::{
    LlmError, LlmProvider, LlmRequest, LlmResponse, MessageRole, ToolCall,
};

pub struct OpenAiProvider {
    http_client: HttpClient,
    base_url: String,
    model: String,
    api_key: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
        }
    }

    pub fn from_config(config: &PlatformConfig) -> Self {
        Self::new(
            config.llm_api_key.clone(),
            config.llm_base_url.clone(),
            config.llm_model.clone(),
        )
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_payload(&self, request: &LlmRequest) -> Value {
        let mut messages = Vec::new();

        if let Some(system) = &request.system_prompt {
            messages.push(json!({"role": "system", "content": system}));
        }

        for message in &request.messages {
            let mut entry = json!({
                "role": message.role.as_str(),
                "content": message.content,
            });
            if message.role == MessageRole::Assistant && !message.tool_calls.is_empty() {
                // The wire format carries arguments as a JSON-encoded
                // string inside the function object.
                let calls: Vec<Value> = message
                    .tool_calls
                    .iter()
                    .map(|call| {
                        json!({
                            "id": call.id,
                            "type": "function",
                            "function": {
                                "name": call.name,
                                "arguments": call.arguments.to_string(),
                            }
                        })
                    })
                    .collect();
                entry["tool_calls"] = Value::Array(calls);
            }
            if let Some(call_id) = &message.tool_call_id {
                entry["tool_call_id"] = Value::String(call_id.clone());
            }
            messages.push(entry);
        }

        let model = if request.model.is_empty() {
            self.model.as_str()
        } else {
            request.model.as_str()
        };

        let mut payload = json!({
            "model": model,
            "messages": messages,
        });
        if !request.tools.is_empty() {
            let tools: Vec<Value> = request
                .tools
                .iter()
                .map(|tool| {
                    json!({
                        "type": "function",
                        "function": {
                            "name": tool.name,
                            "description": tool.description,
                            "parameters": tool.parameters,
                        }
                    })
                })
                .collect();
            payload["tools"] = Value::Array(tools);
        }
        if let Some(temperature) = request.temperature {
            payload["temperature"] = json!(temperature);
        }
        payload
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let payload = self.build_payload(&request);

        let response = self
            .http_client
            .post(self.chat_url())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| LlmError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Provider {
                status: Some(status.as_u16()),
                message: body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| LlmError::Parse(err.to_string()))?;
        parse_completion(&body)
    }
}

fn parse_completion(body: &Value) -> Result<LlmResponse, LlmError> {
    let message = body
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .ok_or_else(|| LlmError::Parse("missing choices[0].message".to_string()))?;

    let content = message
        .get("content")
        .and_then(Value::as_str)
        .map(str::to_owned);

    let tool_calls = message
        .get("tool_calls")
        .and_then(Value::as_array)
        .map(|calls| {
            calls
                .iter()
                .map(parse_tool_call)
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?
        .unwrap_or_default();

    Ok(LlmResponse {
        content,
        tool_calls,
    })
}

fn parse_tool_call(call: &Value) -> Result<ToolCall, LlmError> {
    let id = call
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| LlmError::Parse("tool call without id".to_string()))?;
    let function = call
        .get("function")
        .ok_or_else(|| LlmError::Parse("tool call without function".to_string()))?;
    let name = function
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| LlmError::Parse("tool call without function name".to_string()))?;
    let raw_arguments = function
        .get("arguments")
        .and_then(Value::as_str)
        .unwrap_or("{}");
    let arguments: Value = serde_json::from_str(raw_arguments).map_err(|err| {
        LlmError::Parse(format!("tool call '{name}' has unparseable arguments: {err}"))
    })?;

    Ok(ToolCall {
        id: id.to_string(),
        name: name.to_string(),
        arguments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::{Message, ToolDefinition};

    #[test]
    fn payload_carries_tools_and_system_prompt() {
        let provider = OpenAiProvider::new(
            "sk-test".to_string(),
            "https://api.openai.com/v1/".to_string(),
            "gpt-4o".to_string(),
        );
        let request = LlmRequest {
            system_prompt: Some("You are a data analyst.".to_string()),
            messages: vec![Message::user("List the buckets")],
            tools: vec![ToolDefinition {
                name: "list_buckets".to_string(),
                description: "List storage buckets".to_string(),
                parameters: json!({"type": "object"}),
            }],
            ..Default::default()
        };

        let payload = provider.build_payload(&request);
        assert_eq!(payload["model"], "gpt-4o");
        assert_eq!(payload["messages"][0]["role"], "system");
        assert_eq!(payload["messages"][1]["content"], "List the buckets");
        assert_eq!(payload["tools"][0]["function"]["name"], "list_buckets");
        assert_eq!(provider.chat_url(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn assistant_tool_calls_serialize_with_string_arguments() {
        let provider = OpenAiProvider::new(
            "sk-test".to_string(),
            "https://api.openai.com/v1".to_string(),
            "gpt-4o".to_string(),
        );
        let call = ToolCall {
            id: "call_1".to_string(),
            name: "query_table".to_string(),
            arguments: json!({"sql": "SELECT 1"}),
        };
        let request = LlmRequest {
            messages: vec![
                Message::assistant("", vec![call]),
                Message::tool_result("call_1", "[]"),
            ],
            ..Default::default()
        };

        let payload = provider.build_payload(&request);
        let wire_call = &payload["messages"][0]["tool_calls"][0];
        assert_eq!(wire_call["function"]["name"], "query_table");
        assert!(wire_call["function"]["arguments"].is_string());
        assert_eq!(payload["messages"][1]["tool_call_id"], "call_1");
    }

    #[test]
    fn parses_completion_with_tool_calls() {
        let body = json!({
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": {
                            "name": "list_buckets",
                            "arguments": "{}"
                        }
                    }]
                }
            }]
        });
        let response = parse_completion(&body).unwrap();
        assert!(response.content.is_none());
        assert!(response.wants_tools());
        assert_eq!(response.tool_calls[0].name, "list_buckets");
    }

    #[test]
    fn parses_plain_text_completion() {
        let body = json!({
            "choices": [{"message": {"content": "Two buckets: sales and hr."}}]
        });
        let response = parse_completion(&body).unwrap();
        assert_eq!(response.content.as_deref(), Some("Two buckets: sales and hr."));
        assert!(!response.wants_tools());
    }

    #[test]
    fn malformed_completion_is_a_parse_error() {
        let body = json!({"choices": []});
        assert!(matches!(
            parse_completion(&body),
            Err(LlmError::Parse(_))
        ));
    }
}
