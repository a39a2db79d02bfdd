//! Error taxonomy for the tool bridge.
//!
//! Every failure surfaced to a demo binary carries one of four kinds so
//! the CLI can print a classified, readable message instead of a raw
//! transport error. None of these are retried automatically; a failed
//! tool invocation is handed back to the agent loop, which decides
//! whether to re-plan or abort.

use thiserror::Error;

pub type BridgeResult<T> = Result<T, BridgeError>;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// Missing or malformed local configuration. Raised before any
    /// network activity.
    #[error("ConfigurationError: {0}")]
    Configuration(String),

    /// Transport-level failure reaching the remote service.
    #[error("ConnectionError: {0}")]
    Connection(String),

    /// The remote service rejected the supplied credential.
    #[error("AuthenticationError: {0}")]
    Authentication(String),

    /// A specific tool call failed on the remote side. Wraps the remote
    /// error message verbatim.
    #[error("InvocationError: tool '{tool}': {message}")]
    Invocation { tool: String, message: String },
}

impl BridgeError {
    pub fn invocation(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invocation {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Classify an error message coming back from the MCP server during
    /// session establishment. Credential rejections arrive as ordinary
    /// protocol errors, so the kind has to be recovered from the text.
    pub fn from_handshake_failure(message: String) -> Self {
        let lowered = message.to_ascii_lowercase();
        let auth_markers = [
            "unauthorized",
            "invalid token",
            "invalid storage token",
            "authentication",
            "access denied",
            "401",
            "403",
        ];
        if auth_markers.iter().any(|marker| lowered.contains(marker)) {
            Self::Authentication(message)
        } else {
            Self::Connection(message)
        }
    }
}
