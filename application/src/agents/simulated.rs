//! Simulated agent: persona-flavoured answers with emulated latency.
//!
//! Used for demos, tests and offline operation. Never touches the network.

use crate::ports::agent::Agent;
use async_trait::async_trait;
use panel_domain::{AgentProfile, AgentResponse, ChatTurn};
use rand::Rng;
use std::time::Duration;

/// Emulated network latency of a simulated agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLatency {
    /// Lower bound of the uniform answer delay
    pub answer_min: Duration,
    /// Upper bound of the uniform answer delay
    pub answer_max: Duration,
    /// Fixed critique delay
    pub critique: Duration,
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self {
            answer_min: Duration::from_millis(500),
            answer_max: Duration::from_millis(1500),
            critique: Duration::from_millis(200),
        }
    }
}

impl SimulatedLatency {
    /// No delay at all
    pub fn none() -> Self {
        Self {
            answer_min: Duration::ZERO,
            answer_max: Duration::ZERO,
            critique: Duration::ZERO,
        }
    }

    fn answer_delay(&self) -> Duration {
        if self.answer_max <= self.answer_min {
            return self.answer_min;
        }
        let millis = rand::thread_rng()
            .gen_range(self.answer_min.as_millis() as u64..=self.answer_max.as_millis() as u64);
        Duration::from_millis(millis)
    }
}

/// Agent that answers locally from its persona name
pub struct SimulatedAgent {
    profile: AgentProfile,
    latency: SimulatedLatency,
}

impl SimulatedAgent {
    pub fn new(profile: AgentProfile) -> Self {
        Self {
            profile,
            latency: SimulatedLatency::default(),
        }
    }

    pub fn with_latency(mut self, latency: SimulatedLatency) -> Self {
        self.latency = latency;
        self
    }

    fn persona_response(&self, query: &str) -> AgentResponse {
        let name = self.profile.name.as_str();
        let (answer, rationale, confidence, sources): (String, String, f64, &[&str]) =
            if name.contains("ChatGPT") {
                (
                    format!(
                        "To answer '{}', I would break this down into three key parts: context, \
                         mechanism, and implications. Here is a pragmatic explanation...",
                        query
                    ),
                    "I focused on structure and clarity as requested.".to_string(),
                    0.95,
                    &["none"],
                )
            } else if name.contains("Claude") {
                (
                    format!(
                        "In summary, regarding '{}': The key safety considerations are X and Y. \
                         Code is concise.",
                        query
                    ),
                    "Prioritized safety and summarization.".to_string(),
                    0.9,
                    &["Anthropic docs"],
                )
            } else if name.contains("Gemini") {
                (
                    format!(
                        "Here is the latest info on '{}' based on my retrieval capabilities. \
                         [Image placeholder]",
                        query
                    ),
                    "Used multimodal retrieval context.".to_string(),
                    0.85,
                    &["Google Search", "YouTube"],
                )
            } else if name.contains("Grok") {
                (
                    format!(
                        "Let's be real about '{}'. It's mostly XYZ. Here's the raw truth.",
                        query
                    ),
                    "Adopted a speculative, unfiltered stance.".to_string(),
                    0.7,
                    &["X (Twitter)"],
                )
            } else {
                (
                    format!("[{}] Answer to: {}", name, query),
                    format!("Standard {} logic.", name),
                    0.8,
                    &["Internal DB"],
                )
            };

        AgentResponse::new(name, answer, rationale, confidence)
            .with_sources(sources.iter().map(|s| s.to_string()).collect())
    }
}

#[async_trait]
impl Agent for SimulatedAgent {
    fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    async fn query(&self, text: &str, _history: &[ChatTurn]) -> AgentResponse {
        let delay = self.latency.answer_delay();
        tokio::time::sleep(delay).await;
        self.persona_response(text)
    }

    async fn critique(&self, _peers: &[AgentResponse]) -> String {
        tokio::time::sleep(self.latency.critique).await;
        format!(
            "{} thinks the other answers are generally okay, but could be more specific.",
            self.profile.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_domain::Vendor;

    fn agent(name: &str) -> SimulatedAgent {
        SimulatedAgent::new(AgentProfile::new(name, Vendor::OpenAi, "persona"))
            .with_latency(SimulatedLatency::none())
    }

    #[tokio::test]
    async fn test_persona_confidences() {
        assert_eq!(agent("ChatGPT").query("q", &[]).await.confidence, 0.95);
        assert_eq!(agent("Claude").query("q", &[]).await.confidence, 0.9);
        assert_eq!(agent("Gemini").query("q", &[]).await.confidence, 0.85);
        assert_eq!(agent("Grok").query("q", &[]).await.confidence, 0.7);
        assert_eq!(agent("Mistral").query("q", &[]).await.confidence, 0.8);
    }

    #[tokio::test]
    async fn test_answer_echoes_query_and_name() {
        let response = agent("Mistral").query("What is Rust?", &[]).await;
        assert_eq!(response.name, "Mistral");
        assert_eq!(response.answer, "[Mistral] Answer to: What is Rust?");
        assert_eq!(response.sources, vec!["Internal DB".to_string()]);
    }

    #[tokio::test]
    async fn test_critique_mentions_agent() {
        let critique = agent("Claude").critique(&[]).await;
        assert!(critique.starts_with("Claude thinks"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_latency_is_bounded() {
        let agent = SimulatedAgent::new(AgentProfile::new("Grok", Vendor::XAi, ""));
        let start = tokio::time::Instant::now();
        agent.query("q", &[]).await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(500));
        assert!(elapsed <= Duration::from_millis(1500));
    }
}
