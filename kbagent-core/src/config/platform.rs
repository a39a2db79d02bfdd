//! Platform credentials loaded from the environment.

use std::collections::HashMap;
use std::env;

use tracing::debug;
use url::Url;

use crate::config::constants;
use crate::config::mcp::McpServerConfig;
use crate::error::{BridgeError, BridgeResult};

/// Everything the demos need to reach the Keboola platform and the LLM
/// provider. Construction is fail-fast: a missing or malformed variable
/// is reported before any process is spawned or socket opened.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    pub storage_api_url: Url,
    pub storage_token: String,
    pub workspace_schema: Option<String>,
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
}

/// Load a `.env` file from the working directory if one exists. Absence
/// is not an error; real deployments set variables in the environment.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env file"),
        Err(_) => debug!("no .env file found, using process environment"),
    }
}

impl PlatformConfig {
    /// Read and validate the full variable set. Collects every missing
    /// variable into a single error so the operator fixes them in one
    /// pass instead of replaying the failure per variable.
    pub fn from_env() -> BridgeResult<Self> {
        let mut missing = Vec::new();

        let storage_api_url = read_var(constants::env::KBC_STORAGE_API_URL, &mut missing);
        let storage_token = read_var(constants::env::KBC_STORAGE_TOKEN, &mut missing);
        let llm_api_key = read_var(constants::env::OPENAI_API_KEY, &mut missing);

        if !missing.is_empty() {
            return Err(BridgeError::Configuration(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let storage_api_url = storage_api_url.unwrap_or_default();
        let storage_api_url = Url::parse(&storage_api_url).map_err(|err| {
            BridgeError::Configuration(format!(
                "{} is not a valid URL ({err}): {storage_api_url}",
                constants::env::KBC_STORAGE_API_URL
            ))
        })?;

        let workspace_schema = env::var(constants::env::KBC_WORKSPACE_SCHEMA)
            .ok()
            .filter(|value| !value.trim().is_empty());

        let llm_base_url = env::var(constants::env::OPENAI_BASE_URL)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| constants::llm::DEFAULT_BASE_URL.to_string());
        let llm_model = env::var(constants::env::KBAGENT_MODEL)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| constants::llm::DEFAULT_MODEL.to_string());

        Ok(Self {
            storage_api_url,
            storage_token: storage_token.unwrap_or_default(),
            workspace_schema,
            llm_api_key: llm_api_key.unwrap_or_default(),
            llm_base_url,
            llm_model,
        })
    }

    /// Launch configuration for the Keboola MCP server subprocess with
    /// the platform credentials in its environment.
    pub fn keboola_mcp_server(&self) -> McpServerConfig {
        let mut config = McpServerConfig::stdio(
            "keboola",
            constants::mcp_server::COMMAND,
            constants::mcp_server::ARGS
                .iter()
                .map(|arg| (*arg).to_string())
                .collect(),
        )
        .with_env(
            constants::env::KBC_STORAGE_API_URL,
            self.storage_api_url.as_str(),
        )
        .with_env(constants::env::KBC_STORAGE_TOKEN, &self.storage_token);

        if let Some(schema) = &self.workspace_schema {
            config = config.with_env(constants::env::KBC_WORKSPACE_SCHEMA, schema);
        }
        config
    }
}

fn read_var(name: &'static str, missing: &mut Vec<&'static str>) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => {
            missing.push(name);
            None
        }
    }
}

/// Environment handed to the MCP server subprocess: a small forwarded
/// set from the parent plus the explicit per-server variables.
pub fn subprocess_env(extra: &HashMap<String, String>) -> HashMap<String, String> {
    let mut vars: HashMap<String, String> = constants::FORWARDED_ENV_VARS
        .iter()
        .filter_map(|key| env::var(key).ok().map(|value| ((*key).to_string(), value)))
        .collect();
    vars.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    vars
}
