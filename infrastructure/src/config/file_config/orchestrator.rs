//! Orchestrator configuration from TOML (`[orchestrator]` and
//! `[cross_agent_discussion]` sections)

use serde::{Deserialize, Serialize};

/// Panel identity and synthesis instructions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrchestratorConfig {
    pub name: String,
    pub description: String,
    /// Sent as the synthesis system instruction
    pub system_prompt: String,
    /// Appended to `system_prompt`
    pub combiner_rules: String,
    pub output_requirements: String,
}

impl Default for FileOrchestratorConfig {
    fn default() -> Self {
        Self {
            name: "Agent Panel".to_string(),
            description: "A panel of AI agents answering together.".to_string(),
            system_prompt: String::new(),
            combiner_rules: String::new(),
            output_requirements: String::new(),
        }
    }
}

/// Rules for the critique phase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDiscussionConfig {
    pub rules: String,
}
