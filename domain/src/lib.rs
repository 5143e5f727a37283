//! Domain layer for agent-panel
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Panel
//!
//! A panel is an ordered roster of agents that all answer the same query:
//!
//! - **Broadcast**: every agent answers the (sanitized) query in parallel
//! - **Critique**: every agent comments on the valid answers of the panel
//! - **Synthesis**: the answers and critiques are merged into one result,
//!   with a deterministic top-confidence fallback when synthesis fails
//!
//! ## Sentinel responses
//!
//! An [`AgentResponse`] with `confidence == 0.0` marks an agent that failed
//! or produced nothing usable. Sentinels keep their roster slot but are
//! excluded from synthesis.

pub mod agent;
pub mod config;
pub mod core;
pub mod orchestration;
pub mod prompt;

// Re-export commonly used types
pub use agent::{
    history::{ChatRole, ChatTurn},
    profile::{AgentProfile, Vendor},
    routing::{ModelRoute, resolve_route},
};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, query::PanelQuery};
pub use orchestration::{
    aggregation::{heuristic_fallback, no_valid_responses, valid_responses},
    entities::{AgentMode, Phase},
    parsing::{parse_agent_reply, parse_synthesis_reply, strip_code_fences},
    timeouts::PhaseTimeouts,
    value_objects::{AgentResponse, OrchestrationResult, SynthesisReply, SynthesisSource},
};
pub use prompt::PromptTemplate;
