//! Provider configuration from TOML (`[providers]` section)
//!
//! Keys themselves never live in the config file; only the names of the
//! environment variables holding them.

use crate::providers::gemini::DEFAULT_GEMINI_BASE_URL;
use crate::providers::openrouter::DEFAULT_OPENROUTER_ENDPOINT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub openrouter_endpoint: String,
    pub gemini_base_url: String,
    /// Environment variable with the OpenRouter key
    pub openrouter_key_env: String,
    /// Environment variable with the Google key
    pub google_key_env: String,
    /// Environment variable with an OpenRouter key reserved for Google agents
    pub google_openrouter_key_env: String,
    /// OpenRouter model used for synthesis
    pub synthesis_model: String,
    /// Per-request HTTP timeout
    pub request_timeout_seconds: u64,
    /// `HTTP-Referer` attribution header
    pub referer: String,
    /// `X-Title` attribution header
    pub title: String,
}

impl Default for FileProvidersConfig {
    fn default() -> Self {
        Self {
            openrouter_endpoint: DEFAULT_OPENROUTER_ENDPOINT.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            openrouter_key_env: "OPENROUTER_API_KEY".to_string(),
            google_key_env: "GOOGLE_API_KEY".to_string(),
            google_openrouter_key_env: "GOOGLE_OPENROUTER_KEY".to_string(),
            synthesis_model: "openai/gpt-4o-mini".to_string(),
            request_timeout_seconds: 60,
            referer: "http://localhost".to_string(),
            title: "Agent Panel".to_string(),
        }
    }
}
