//! OpenRouter gateway
//!
//! Sends requests to OpenRouter's OpenAI-compatible chat-completions
//! endpoint with bearer authentication and attribution headers.

use super::http_error;
use async_trait::async_trait;
use panel_application::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use panel_domain::ChatRole;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_OPENROUTER_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Gateway for OpenRouter chat completions
pub struct OpenRouterGateway {
    api_key: String,
    endpoint: String,
    referer: String,
    title: String,
    http: reqwest::Client,
}

impl OpenRouterGateway {
    pub fn new(api_key: impl Into<String>, request_timeout: Duration) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| GatewayError::Other(e.to_string()))?;
        Ok(Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_OPENROUTER_ENDPOINT.to_string(),
            referer: "http://localhost".to_string(),
            title: "Agent Panel".to_string(),
            http,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Values of the `HTTP-Referer` and `X-Title` headers
    pub fn with_attribution(mut self, referer: impl Into<String>, title: impl Into<String>) -> Self {
        self.referer = referer.into();
        self.title = title.into();
        self
    }

    fn messages<'a>(request: &'a CompletionRequest) -> Vec<ChatMessage<'a>> {
        let mut messages = Vec::with_capacity(request.history.len() + 2);
        if let Some(system) = &request.system_prompt {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        for turn in &request.history {
            messages.push(ChatMessage {
                role: turn.role.as_str(),
                content: &turn.content,
            });
        }
        messages.push(ChatMessage {
            role: ChatRole::User.as_str(),
            content: &request.prompt,
        });
        messages
    }
}

#[async_trait]
impl LlmGateway for OpenRouterGateway {
    fn provider_name(&self) -> &str {
        "openrouter"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError> {
        let body = ChatCompletionRequest {
            model: &request.model,
            messages: Self::messages(&request),
            temperature: request.temperature,
        };

        debug!("OpenRouter request to {}", request.model);
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.title)
            .json(&body)
            .send()
            .await
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GatewayError::InvalidResponse("no choices in response".to_string()))
    }
}
