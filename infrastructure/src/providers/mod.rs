//! Provider adapters
//!
//! [`LlmGateway`](panel_application::LlmGateway) implementations for the
//! text-generation services live agents talk to, and the directory that
//! picks one per agent.

pub mod directory;
pub mod gemini;
pub mod openrouter;

pub use directory::{KeyedProviderDirectory, ProviderCredentials};
pub use gemini::GeminiGateway;
pub use openrouter::OpenRouterGateway;

use panel_application::ports::llm_gateway::GatewayError;

fn http_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::ConnectionError(error.to_string())
    }
}
