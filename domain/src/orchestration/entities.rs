//! Orchestration domain entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Phase of a panel run
///
/// A run moves `Sanitize → Broadcast → Critique → Synthesis` and keeps no
/// state once the result is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// PII redaction of the incoming query
    Sanitize,
    /// Every agent answers the sanitized query
    Broadcast,
    /// Every agent critiques the valid answers
    Critique,
    /// Answers and critiques are merged into one result
    Synthesis,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Sanitize => "sanitize",
            Phase::Broadcast => "broadcast",
            Phase::Critique => "critique",
            Phase::Synthesis => "synthesis",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::Sanitize => "Sanitize",
            Phase::Broadcast => "Broadcast",
            Phase::Critique => "Critique",
            Phase::Synthesis => "Synthesis",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Operating mode of the roster
///
/// The whole roster is built in one mode; switching mode rebuilds it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentMode {
    /// Local persona answers with emulated latency, no network
    #[default]
    Simulated,
    /// Answers from external text-generation providers
    Live,
}

impl AgentMode {
    pub fn as_str(&self) -> &str {
        match self {
            AgentMode::Simulated => "simulated",
            AgentMode::Live => "live",
        }
    }
}

impl std::fmt::Display for AgentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

impl std::str::FromStr for AgentMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simulated" | "sim" | "offline" => Ok(AgentMode::Simulated),
            "live" | "real" => Ok(AgentMode::Live),
            other => Err(DomainError::InvalidMode(other.to_string())),
        }
    }
}
