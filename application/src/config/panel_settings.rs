//! Panel settings: the orchestrator's immutable configuration snapshot.
//!
//! Built once from the loaded configuration file and handed to
//! [`PanelOrchestrator`](crate::use_cases::run_panel::PanelOrchestrator).
//! Only the roster can change afterwards, through a mode switch.

use panel_domain::{AgentProfile, PhaseTimeouts, PromptTemplate};

/// Orchestrator configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSettings {
    /// Display name of the panel
    pub name: String,
    pub description: String,
    /// Instruction sent with the synthesis request
    pub system_prompt: String,
    /// Extra synthesis rules appended to `system_prompt`
    pub combiner_rules: String,
    /// Free-form output requirements, shown in status only
    pub output_requirements: String,
    /// Rules appended to every live critique prompt
    pub discussion_rules: String,
    /// Roster definition, in panel order
    pub agents: Vec<AgentProfile>,
    pub timeouts: PhaseTimeouts,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            name: "Agent Panel".to_string(),
            description: "A panel of AI agents answering together.".to_string(),
            system_prompt: String::new(),
            combiner_rules: String::new(),
            output_requirements: String::new(),
            discussion_rules: String::new(),
            agents: AgentProfile::default_roster(),
            timeouts: PhaseTimeouts::default(),
        }
    }
}

impl PanelSettings {
    // ==================== Builder Methods ====================

    pub fn with_timeouts(mut self, timeouts: PhaseTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_combiner_rules(mut self, rules: impl Into<String>) -> Self {
        self.combiner_rules = rules.into();
        self
    }

    pub fn with_discussion_rules(mut self, rules: impl Into<String>) -> Self {
        self.discussion_rules = rules.into();
        self
    }

    // ==================== Derived Values ====================

    /// System instruction for the synthesis call, if any is configured
    pub fn synthesis_instruction(&self) -> Option<String> {
        PromptTemplate::synthesis_system(&self.system_prompt, &self.combiner_rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_settings() {
        let settings = PanelSettings::default();
        assert_eq!(settings.agents.len(), 4);
        assert_eq!(settings.timeouts.initial_answer, Duration::from_secs(45));
        assert!(settings.synthesis_instruction().is_none());
    }

    #[test]
    fn test_synthesis_instruction_joins_prompt_and_rules() {
        let settings = PanelSettings::default()
            .with_system_prompt("Be precise.")
            .with_combiner_rules("Cite agents by name.");
        assert_eq!(
            settings.synthesis_instruction().as_deref(),
            Some("Be precise.\n\nCite agents by name.")
        );
    }
}
