//! Panel members and roster construction.
//!
//! - [`SimulatedAgent`] answers locally with persona-flavoured text
//! - [`LiveAgent`] calls a provider through a [`ProviderBinding`](crate::ports::provider_directory::ProviderBinding)
//!
//! A [`Roster`] is an immutable, ordered set of agents sharing one
//! [`AgentMode`]. Switching modes builds a new roster; the orchestrator swaps
//! it in whole.

pub mod live;
pub mod simulated;

pub use live::LiveAgent;
pub use simulated::{SimulatedAgent, SimulatedLatency};

use crate::ports::agent::Agent;
use crate::ports::provider_directory::ProviderDirectory;
use panel_domain::{AgentMode, AgentProfile, DomainError};
use std::sync::Arc;
use tracing::{info, warn};

/// Ordered agents of one mode
pub struct Roster {
    mode: AgentMode,
    agents: Vec<Arc<dyn Agent>>,
}

impl Roster {
    pub fn new(mode: AgentMode, agents: Vec<Arc<dyn Agent>>) -> Self {
        Self { mode, agents }
    }

    pub fn mode(&self) -> AgentMode {
        self.mode
    }

    pub fn agents(&self) -> &[Arc<dyn Agent>] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.agents.iter().map(|a| a.name().to_string()).collect()
    }
}

impl std::fmt::Debug for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Roster")
            .field("mode", &self.mode)
            .field("agents", &self.names())
            .finish()
    }
}

/// Builds rosters from agent profiles
pub struct RosterBuilder {
    providers: Arc<dyn ProviderDirectory>,
    latency: SimulatedLatency,
    discussion_rules: Option<String>,
}

impl RosterBuilder {
    pub fn new(providers: Arc<dyn ProviderDirectory>) -> Self {
        Self {
            providers,
            latency: SimulatedLatency::default(),
            discussion_rules: None,
        }
    }

    pub fn with_latency(mut self, latency: SimulatedLatency) -> Self {
        self.latency = latency;
        self
    }

    /// Rules appended to every live critique prompt
    pub fn with_discussion_rules(mut self, rules: impl Into<String>) -> Self {
        let rules = rules.into();
        self.discussion_rules = (!rules.trim().is_empty()).then_some(rules);
        self
    }

    /// Build a roster of `mode` agents, one per profile, in profile order.
    pub fn build(&self, profiles: &[AgentProfile], mode: AgentMode) -> Result<Roster, DomainError> {
        AgentProfile::validate_roster(profiles)?;

        let agents: Vec<Arc<dyn Agent>> = profiles
            .iter()
            .map(|profile| match mode {
                AgentMode::Simulated => Arc::new(
                    SimulatedAgent::new(profile.clone()).with_latency(self.latency),
                ) as Arc<dyn Agent>,
                AgentMode::Live => {
                    let binding = self.providers.agent_binding(profile);
                    let agent = LiveAgent::new(profile.clone(), binding)
                        .with_discussion_rules(self.discussion_rules.clone());
                    if !agent.has_credentials() {
                        warn!("Agent {} has no provider credentials", profile.name);
                    }
                    Arc::new(agent) as Arc<dyn Agent>
                }
            })
            .collect();

        info!("Built {} roster with {} agents", mode, agents.len());
        Ok(Roster::new(mode, agents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::provider_directory::NoProviders;

    fn builder() -> RosterBuilder {
        RosterBuilder::new(Arc::new(NoProviders)).with_latency(SimulatedLatency::none())
    }

    #[test]
    fn test_build_keeps_profile_order() {
        let roster = builder()
            .build(&AgentProfile::default_roster(), AgentMode::Simulated)
            .unwrap();
        assert_eq!(roster.mode(), AgentMode::Simulated);
        assert_eq!(roster.names(), vec!["ChatGPT", "Claude", "Gemini", "Grok"]);
    }

    #[test]
    fn test_build_rejects_empty_and_duplicates() {
        assert_eq!(
            builder().build(&[], AgentMode::Live).unwrap_err(),
            DomainError::EmptyRoster
        );
        let mut profiles = AgentProfile::default_roster();
        profiles.push(profiles[0].clone());
        assert!(matches!(
            builder().build(&profiles, AgentMode::Simulated),
            Err(DomainError::DuplicateAgent(_))
        ));
    }

    #[tokio::test]
    async fn test_live_roster_without_keys_yields_sentinels() {
        let roster = builder()
            .build(&AgentProfile::default_roster(), AgentMode::Live)
            .unwrap();
        for agent in roster.agents() {
            assert!(!agent.query("q", &[]).await.is_valid());
        }
    }
}
