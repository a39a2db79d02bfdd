//! Core library for kbagent.
//!
//! Bridges the Keboola MCP server's tool catalog into LLM tool calling
//! and assembles the demo agents on top of it. The layering mirrors the
//! data flow: [`config`] loads credentials, [`mcp`] discovers and binds
//! remote tools, [`llm`] talks to the model provider, and [`agent`]
//! wires personas, crews and signatures around the tool-calling loop.

pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod mcp;

pub use error::{BridgeError, BridgeResult};
