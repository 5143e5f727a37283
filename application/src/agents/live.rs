//! Live agent backed by a text-generation provider.

use crate::ports::agent::Agent;
use crate::ports::llm_gateway::CompletionRequest;
use crate::ports::provider_directory::ProviderBinding;
use async_trait::async_trait;
use panel_domain::orchestration::value_objects::CRITIQUE_FAILED;
use panel_domain::{AgentProfile, AgentResponse, ChatTurn, PromptTemplate, parse_agent_reply};
use tracing::{debug, warn};

/// Sampling temperature for Broadcast answers.
pub const ANSWER_TEMPERATURE: f32 = 0.7;

pub const MISSING_KEY_ANSWER: &str = "[MISSING KEY] Please set API keys in .env";
pub const MISSING_KEY_RATIONALE: &str = "Key missing";
pub const API_CALL_FAILED_RATIONALE: &str = "API Call Failed";
pub const OFFLINE_CRITIQUE: &str = "Simulated Critique: Looks good.";

pub struct LiveAgent {
    profile: AgentProfile,
    binding: Option<ProviderBinding>,
    discussion_rules: Option<String>,
}

impl LiveAgent {
    /// `binding` is `None` when the credentials for this agent are missing.
    pub fn new(profile: AgentProfile, binding: Option<ProviderBinding>) -> Self {
        Self {
            profile,
            binding,
            discussion_rules: None,
        }
    }

    pub fn with_discussion_rules(mut self, rules: Option<String>) -> Self {
        self.discussion_rules = rules;
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.binding.is_some()
    }

    fn answer_request(&self, binding: &ProviderBinding, text: &str, history: &[ChatTurn]) -> CompletionRequest {
        let model = binding.route.answer_model();
        if binding.route.is_native_google() {
            // No system role on this route; everything goes in one message
            let prompt = PromptTemplate::flattened_query(&self.profile.template, history, text);
            CompletionRequest::new(model, prompt)
        } else {
            CompletionRequest::new(model, text)
                .with_system_prompt(PromptTemplate::agent_system(&self.profile.template))
                .with_history(history.to_vec())
                .with_temperature(ANSWER_TEMPERATURE)
        }
    }
}

#[async_trait]
impl Agent for LiveAgent {
    fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    async fn query(&self, text: &str, history: &[ChatTurn]) -> AgentResponse {
        let Some(binding) = &self.binding else {
            debug!("Agent {} has no credentials", self.profile.name);
            return AgentResponse::sentinel(
                &self.profile.name,
                MISSING_KEY_ANSWER,
                MISSING_KEY_RATIONALE,
            );
        };

        let request = self.answer_request(binding, text, history);
        match binding.gateway.complete(request).await {
            Ok(raw) => parse_agent_reply(&self.profile.name, &raw),
            Err(e) => {
                warn!(
                    "Agent {} failed via {}: {}",
                    self.profile.name,
                    binding.gateway.provider_name(),
                    e
                );
                AgentResponse::sentinel(
                    &self.profile.name,
                    format!("Error: {}", e),
                    API_CALL_FAILED_RATIONALE,
                )
            }
        }
    }

    async fn critique(&self, peers: &[AgentResponse]) -> String {
        let Some(binding) = &self.binding else {
            return OFFLINE_CRITIQUE.to_string();
        };

        let prompt = PromptTemplate::critique_prompt(peers, self.discussion_rules.as_deref());
        let request = CompletionRequest::new(binding.route.critique_model(), prompt);
        match binding.gateway.complete(request).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!("Critique by {} failed: {}", self.profile.name, e);
                CRITIQUE_FAILED.to_string()
            }
        }
    }
}
