//! Orchestration value objects - immutable result types for panel runs.
//!
//! These types represent the outputs of each phase:
//! - [`AgentResponse`] - One agent's answer from the Broadcast phase
//! - [`SynthesisReply`] - The JSON object a synthesis provider returns
//! - [`OrchestrationResult`] - Complete result handed back to the caller

use serde::{Deserialize, Serialize};

/// Confidence reserved for failed or unusable responses.
pub const SENTINEL_CONFIDENCE: f64 = 0.0;

/// Answer text of a response the orchestrator substitutes for an agent that
/// errored or missed the phase deadline.
pub const TIMEOUT_OR_ERROR_ANSWER: &str = "[Timeout/Error]";

/// Rationale paired with [`TIMEOUT_OR_ERROR_ANSWER`].
pub const AGENT_FAILED_RATIONALE: &str = "Agent failed.";

/// Critique text substituted for a failed or timed-out critique.
pub const CRITIQUE_FAILED: &str = "Critique failed.";

pub const ALL_AGENTS_FAILED_ANSWER: &str = "All agents failed to respond.";
pub const ALL_AGENTS_FAILED_DISAGREEMENT: &str = "N/A";
pub const ALL_AGENTS_FAILED_NEXT_STEPS: &str = "Check system health.";

pub const FALLBACK_PREFIX: &str = "[Fallback Synthesis] ";
pub const FALLBACK_DISAGREEMENT: &str = "Synthesis LLM unavailable.";
pub const FALLBACK_NEXT_STEPS: &str = "Check API keys.";

/// Response from a single agent in the Broadcast phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    /// The agent that produced (or failed to produce) this response
    pub name: String,
    /// The answer text, may be empty or an error marker on failure
    pub answer: String,
    /// Why the agent answered this way
    pub rationale: String,
    /// Self-reported confidence in `[0.0, 1.0]`; `0.0` marks a sentinel
    pub confidence: f64,
    /// Provenance of the answer, in the order the agent listed it
    #[serde(default)]
    pub sources: Vec<String>,
}

impl AgentResponse {
    /// Creates a response, clamping `confidence` into `[0.0, 1.0]`.
    ///
    /// A NaN confidence is treated as a sentinel.
    pub fn new(
        name: impl Into<String>,
        answer: impl Into<String>,
        rationale: impl Into<String>,
        confidence: f64,
    ) -> Self {
        let confidence = if confidence.is_nan() {
            SENTINEL_CONFIDENCE
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            name: name.into(),
            answer: answer.into(),
            rationale: rationale.into(),
            confidence,
            sources: Vec::new(),
        }
    }

    /// Creates a sentinel response (`confidence == 0.0`) for a failed agent.
    pub fn sentinel(
        name: impl Into<String>,
        answer: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        Self::new(name, answer, rationale, SENTINEL_CONFIDENCE)
    }

    /// The placeholder substituted when an agent call errors or times out.
    pub fn timeout_or_error(name: impl Into<String>) -> Self {
        Self::sentinel(name, TIMEOUT_OR_ERROR_ANSWER, AGENT_FAILED_RATIONALE)
    }

    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }

    /// Returns `true` if this response may take part in synthesis.
    pub fn is_valid(&self) -> bool {
        self.confidence > SENTINEL_CONFIDENCE
    }
}

/// How the final answer of a run was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisSource {
    /// The synthesis provider merged the answers
    Synthesized,
    /// Synthesis failed; the top-confidence answer was used
    Fallback,
    /// No agent produced a usable answer; nothing was synthesized
    NoValidResponses,
}

/// The JSON object a synthesis provider must return
///
/// All four fields are required; a reply missing any of them counts as a
/// failed synthesis.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SynthesisReply {
    pub final_answer: String,
    pub combined_confidence: f64,
    pub disagreement: String,
    pub recommended_next_steps: String,
}

/// Complete result of one panel run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationResult {
    /// The combined answer shown to the caller
    pub final_answer: String,
    /// Confidence of the combined answer in `[0.0, 1.0]`
    pub combined_confidence: f64,
    /// Summary of conflicts between agents, or `"N/A"`
    pub disagreement: String,
    /// Suggested follow-up actions
    pub recommended_next_steps: String,
    /// Raw agent responses, for audit and display
    pub agents: Vec<AgentResponse>,
    /// How `final_answer` was produced
    pub synthesis: SynthesisSource,
}

impl OrchestrationResult {
    /// Result for a run in which no agent produced a usable response.
    ///
    /// `agents` is empty; the orchestrator attaches the full roster.
    pub fn all_agents_failed() -> Self {
        Self {
            final_answer: ALL_AGENTS_FAILED_ANSWER.to_string(),
            combined_confidence: SENTINEL_CONFIDENCE,
            disagreement: ALL_AGENTS_FAILED_DISAGREEMENT.to_string(),
            recommended_next_steps: ALL_AGENTS_FAILED_NEXT_STEPS.to_string(),
            agents: Vec::new(),
            synthesis: SynthesisSource::NoValidResponses,
        }
    }

    /// Result built from the top-confidence response when synthesis failed.
    pub fn fallback(top: &AgentResponse) -> Self {
        Self {
            final_answer: format!("{}{}", FALLBACK_PREFIX, top.answer),
            combined_confidence: top.confidence,
            disagreement: FALLBACK_DISAGREEMENT.to_string(),
            recommended_next_steps: FALLBACK_NEXT_STEPS.to_string(),
            agents: Vec::new(),
            synthesis: SynthesisSource::Fallback,
        }
    }

    /// Result built from a parsed synthesis reply.
    ///
    /// The provider's stated confidence is trusted, only clamped into range.
    pub fn synthesized(reply: SynthesisReply) -> Self {
        let combined_confidence = if reply.combined_confidence.is_nan() {
            SENTINEL_CONFIDENCE
        } else {
            reply.combined_confidence.clamp(0.0, 1.0)
        };
        Self {
            final_answer: reply.final_answer,
            combined_confidence,
            disagreement: reply.disagreement,
            recommended_next_steps: reply.recommended_next_steps,
            agents: Vec::new(),
            synthesis: SynthesisSource::Synthesized,
        }
    }

    /// Attaches the raw agent responses.
    pub fn with_agents(mut self, agents: Vec<AgentResponse>) -> Self {
        self.agents = agents;
        self
    }

    pub fn is_fallback(&self) -> bool {
        self.synthesis == SynthesisSource::Fallback
    }

    /// Returns an iterator over the responses that took part in synthesis.
    pub fn valid_agents(&self) -> impl Iterator<Item = &AgentResponse> {
        self.agents.iter().filter(|r| r.is_valid())
    }

    /// Returns an iterator over the sentinel responses.
    pub fn failed_agents(&self) -> impl Iterator<Item = &AgentResponse> {
        self.agents.iter().filter(|r| !r.is_valid())
    }
}
