//! Google Gemini gateway
//!
//! Calls the native `generateContent` REST endpoint. The API has no system
//! role in this request shape, so the system prompt (if any) is prepended to
//! the user text.

use super::http_error;
use async_trait::async_trait;
use panel_application::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

pub struct GeminiGateway {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl GeminiGateway {
    pub fn new(api_key: impl Into<String>, request_timeout: Duration) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| GatewayError::Other(e.to_string()))?;
        Ok(Self {
            api_key: api_key.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            http,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }

    fn body(request: &CompletionRequest) -> serde_json::Value {
        let text = match &request.system_prompt {
            Some(system) => format!("{}\n\n{}", system, request.prompt),
            None => request.prompt.clone(),
        };
        let mut body = json!({ "contents": [{ "parts": [{ "text": text }] }] });
        if let Some(temperature) = request.temperature {
            body["generationConfig"] = json!({ "temperature": temperature });
        }
        body
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    fn provider_name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError> {
        debug!("Gemini request to {}", request.model);
        let response = self
            .http
            .post(self.url(&request.model))
            .query(&[("key", self.api_key.as_str())])
            .json(&Self::body(&request))
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

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GatewayError::InvalidResponse(
                "no candidate text in response".to_string(),
            ));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> GeminiGateway {
        GeminiGateway::new("key", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_url() {
        assert_eq!(
            gateway().url("gemini-1.5-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
        let custom = gateway().with_base_url("http://localhost:9000/");
        assert_eq!(
            custom.url("m"),
            "http://localhost:9000/models/m:generateContent"
        );
    }

    #[test]
    fn test_body_prepends_system_prompt() {
        let request = CompletionRequest::new("m", "question").with_system_prompt("persona");
        let body = GeminiGateway::body(&request);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "persona\n\nquestion");
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_response_parts_are_joined() {
        let raw = r#"{"candidates": [{"content": {"parts": [{"text": "a"}, {"text": "b"}]}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let content = parsed.candidates.into_iter().next().unwrap().content.unwrap();
        let text: String = content.parts.into_iter().map(|p| p.text).collect();
        assert_eq!(text, "ab");
    }
}
