//! Environment variable names and launch defaults.

/// Environment variables read at startup.
pub mod env {
    /// Base URL of the Keboola Storage API stack, e.g.
    /// `https://connection.keboola.com`.
    pub const KBC_STORAGE_API_URL: &str = "KBC_STORAGE_API_URL";
    /// Storage API token used by the MCP server for all platform calls.
    pub const KBC_STORAGE_TOKEN: &str = "KBC_STORAGE_TOKEN";
    /// Optional workspace schema for SQL tools.
    pub const KBC_WORKSPACE_SCHEMA: &str = "KBC_WORKSPACE_SCHEMA";
    /// API key for the LLM provider.
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    /// Optional override of the LLM provider base URL.
    pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
    /// Optional override of the model identifier.
    pub const KBAGENT_MODEL: &str = "KBAGENT_MODEL";
}

/// Defaults for launching the MCP server subprocess.
pub mod mcp_server {
    /// The server ships as a Python package and is launched through uvx.
    pub const COMMAND: &str = "uvx";
    pub const ARGS: &[&str] = &["keboola_mcp_server", "--transport", "stdio"];
}

/// Defaults for the LLM provider.
pub mod llm {
    pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
    pub const DEFAULT_MODEL: &str = "gpt-4o";
}

/// Environment variables forwarded from the parent process to the MCP
/// server subprocess. Everything else is stripped; credentials are
/// injected explicitly.
pub const FORWARDED_ENV_VARS: &[&str] = &[
    "HOME",
    "PATH",
    "USER",
    "SHELL",
    "LANG",
    "LC_ALL",
    "TMPDIR",
    "TERM",
];
