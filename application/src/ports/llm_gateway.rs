//! LLM Gateway port
//!
//! Defines the interface for sending one completion request to a
//! text-generation provider.

use async_trait::async_trait;
use panel_domain::ChatTurn;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Rate limiting shows up as HTTP 429.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GatewayError::HttpStatus { status: 429, .. })
    }
}

/// A single chat-style completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Provider model identifier
    pub model: String,
    /// Persona or instruction sent with the system role
    pub system_prompt: Option<String>,
    /// Prior turns placed between the system prompt and `prompt`
    pub history: Vec<ChatTurn>,
    /// The user message
    pub prompt: String,
    /// Sampling temperature; provider default when `None`
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_prompt: None,
            history: Vec::new(),
            prompt: prompt.into(),
            temperature: None,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_history(mut self, history: Vec<ChatTurn>) -> Self {
        self.history = history;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to text-generation
/// providers. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Short provider name for logs (e.g. "openrouter")
    fn provider_name(&self) -> &str;

    /// Send the request and return the raw response text
    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError>;
}
