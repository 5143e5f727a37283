//! Agent port
//!
//! The capability every panel member offers: answer a query and critique
//! peers. Implementations convert ordinary upstream failures (rate limits,
//! malformed output, missing credentials) into sentinel values instead of
//! returning errors, so neither method is fallible.

use async_trait::async_trait;
use panel_domain::{AgentProfile, AgentResponse, ChatTurn};

#[async_trait]
pub trait Agent: Send + Sync {
    /// The configuration this agent was built from
    fn profile(&self) -> &AgentProfile;

    /// Identifier within the roster
    fn name(&self) -> &str {
        &self.profile().name
    }

    /// Answer a sanitized query, given the prior turns of the conversation
    async fn query(&self, text: &str, history: &[ChatTurn]) -> AgentResponse;

    /// Comment briefly on the panel's valid responses
    async fn critique(&self, peers: &[AgentResponse]) -> String;
}
