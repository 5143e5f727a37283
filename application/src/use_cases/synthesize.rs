//! Synthesize use case
//!
//! The Combiner turns the broadcast responses and critiques into one
//! [`OrchestrationResult`]. It makes at most one synthesis call and falls
//! back to the top-confidence answer when that call fails for any reason.

use crate::ports::llm_gateway::{CompletionRequest, GatewayError};
use crate::ports::provider_directory::ProviderBinding;
use panel_domain::{
    AgentResponse, OrchestrationResult, PanelQuery, PromptTemplate, heuristic_fallback,
    no_valid_responses, parse_synthesis_reply, valid_responses,
};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Sampling temperature of the synthesis call.
pub const SYNTHESIS_TEMPERATURE: f32 = 0.5;

/// Why a synthesis attempt produced no usable reply
#[derive(Error, Debug)]
enum SynthesisError {
    #[error("no synthesis provider configured")]
    Unavailable,

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("malformed synthesis reply: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("synthesis exceeded its {0:?} budget")]
    OutOfTime(Duration),
}

/// Aggregator of a panel run
pub struct Combiner {
    synthesis: Option<ProviderBinding>,
    instruction: Option<String>,
}

impl Combiner {
    /// `synthesis` is `None` when no provider credentials are available;
    /// every run then ends in the heuristic fallback.
    pub fn new(synthesis: Option<ProviderBinding>) -> Self {
        Self {
            synthesis,
            instruction: None,
        }
    }

    /// System instruction sent with the synthesis request
    pub fn with_instruction(mut self, instruction: Option<String>) -> Self {
        self.instruction = instruction;
        self
    }

    pub fn has_provider(&self) -> bool {
        self.synthesis.is_some()
    }

    /// Combine without a time limit.
    pub async fn synthesize(
        &self,
        query: &PanelQuery,
        responses: &[AgentResponse],
        critiques: &[String],
    ) -> OrchestrationResult {
        self.synthesize_within(None, query, responses, critiques).await
    }

    /// Combine, abandoning the synthesis call after `budget`.
    ///
    /// When no response is valid the result has an empty `agents` list and no
    /// call is made. Otherwise `agents` is the complete `responses` set.
    pub async fn synthesize_within(
        &self,
        budget: Option<Duration>,
        query: &PanelQuery,
        responses: &[AgentResponse],
        critiques: &[String],
    ) -> OrchestrationResult {
        let valid = valid_responses(responses);
        let Some(fallback) = heuristic_fallback(&valid) else {
            info!("No valid responses; skipping synthesis");
            return no_valid_responses();
        };

        let result = match self.attempt(budget, query, &valid, critiques).await {
            Ok(result) => {
                debug!(
                    "Synthesis succeeded with confidence {:.2}",
                    result.combined_confidence
                );
                result
            }
            Err(e) => {
                warn!("Synthesis failed, using heuristic fallback: {}", e);
                fallback
            }
        };

        result.with_agents(responses.to_vec())
    }

    async fn attempt(
        &self,
        budget: Option<Duration>,
        query: &PanelQuery,
        valid: &[&AgentResponse],
        critiques: &[String],
    ) -> Result<OrchestrationResult, SynthesisError> {
        let binding = self.synthesis.as_ref().ok_or(SynthesisError::Unavailable)?;

        let prompt = PromptTemplate::synthesis_prompt(query.sanitized(), valid, critiques);
        let mut request = CompletionRequest::new(binding.route.answer_model(), prompt)
            .with_temperature(SYNTHESIS_TEMPERATURE);
        if let Some(instruction) = &self.instruction {
            request = request.with_system_prompt(instruction.clone());
        }

        let call = binding.gateway.complete(request);
        let raw = match budget {
            Some(budget) => tokio::time::timeout(budget, call)
                .await
                .map_err(|_| SynthesisError::OutOfTime(budget))??,
            None => call.await?,
        };

        let reply = parse_synthesis_reply(&raw)?;
        Ok(OrchestrationResult::synthesized(reply))
    }
}
