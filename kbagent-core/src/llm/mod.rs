//! LLM provider abstraction and the OpenAI-compatible implementation.

pub mod openai;
pub mod provider;

pub use openai::OpenAiProvider;
pub use provider::{
    LlmError, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole, ToolCall,
    ToolDefinition,
};
