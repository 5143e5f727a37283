//! Provider directory port
//!
//! Resolves which gateway (if any) serves a live agent or the synthesis
//! call. Credential lookup happens behind this port; a `None` answer means
//! the credentials are missing and no network call must be attempted.

use super::llm_gateway::LlmGateway;
use panel_domain::{AgentProfile, ModelRoute};
use std::sync::Arc;

/// A gateway together with the route it should be called with
#[derive(Clone)]
pub struct ProviderBinding {
    pub gateway: Arc<dyn LlmGateway>,
    pub route: ModelRoute,
}

impl ProviderBinding {
    pub fn new(gateway: Arc<dyn LlmGateway>, route: ModelRoute) -> Self {
        Self { gateway, route }
    }
}

impl std::fmt::Debug for ProviderBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderBinding")
            .field("gateway", &self.gateway.provider_name())
            .field("route", &self.route)
            .finish()
    }
}

/// Directory of configured providers
pub trait ProviderDirectory: Send + Sync {
    /// Binding for a live agent, `None` when its credentials are missing
    fn agent_binding(&self, profile: &AgentProfile) -> Option<ProviderBinding>;

    /// Binding for the synthesis call, `None` when its credentials are missing
    fn synthesis_binding(&self) -> Option<ProviderBinding>;
}

/// Directory with no providers at all (offline operation)
pub struct NoProviders;

impl ProviderDirectory for NoProviders {
    fn agent_binding(&self, _profile: &AgentProfile) -> Option<ProviderBinding> {
        None
    }

    fn synthesis_binding(&self) -> Option<ProviderBinding> {
        None
    }
}
