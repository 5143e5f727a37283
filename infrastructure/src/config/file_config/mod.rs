//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod agents;
mod orchestrator;
mod output;
mod providers;
mod repl;
mod sanitization;
mod timeouts;

pub use agents::{FileAgentEntry, default_agents};
pub use orchestrator::{FileDiscussionConfig, FileOrchestratorConfig};
pub use output::{FileOutputConfig, FileOutputFormat};
pub use providers::FileProvidersConfig;
pub use repl::FileReplConfig;
pub use sanitization::FileSanitizationConfig;
pub use timeouts::FileTimeoutsConfig;

use panel_application::PanelSettings;
use panel_domain::{AgentProfile, ConfigIssue, ConfigIssueCode, DomainError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors that make a configuration unusable
#[derive(Error, Debug)]
pub enum ConfigValidationError {
    #[error("invalid roster: {0}")]
    Roster(#[from] DomainError),

    #[error("{0}")]
    Issue(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub orchestrator: FileOrchestratorConfig,
    /// Roster, in panel order
    pub agents: Vec<FileAgentEntry>,
    pub cross_agent_discussion: FileDiscussionConfig,
    pub timeouts: FileTimeoutsConfig,
    pub sanitization: FileSanitizationConfig,
    pub providers: FileProvidersConfig,
    pub output: FileOutputConfig,
    pub repl: FileReplConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            orchestrator: FileOrchestratorConfig::default(),
            agents: default_agents(),
            cross_agent_discussion: FileDiscussionConfig::default(),
            timeouts: FileTimeoutsConfig::default(),
            sanitization: FileSanitizationConfig::default(),
            providers: FileProvidersConfig::default(),
            output: FileOutputConfig::default(),
            repl: FileReplConfig::default(),
        }
    }
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Roster defects are errors. Timeout oddities and unknown PII rules are
    /// warnings.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Roster
        if self.agents.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyRoster,
                "[[agents]] must define at least one agent",
            ));
        }
        let mut seen = HashSet::new();
        for (index, agent) in self.agents.iter().enumerate() {
            let name = agent.name.trim();
            if name.is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyAgentName,
                    format!("agents[{}]: name cannot be empty", index),
                ));
            } else if !seen.insert(name) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::DuplicateAgent {
                        name: name.to_string(),
                    },
                    format!("agents[{}]: duplicate agent name '{}'", index, name),
                ));
            }
        }

        // 2. Timeouts
        let t = &self.timeouts;
        for (field, value) in [
            ("timeouts.initial_answer_seconds", t.initial_answer_seconds),
            ("timeouts.discussion_answer_seconds", t.discussion_answer_seconds),
            ("timeouts.total_orchestration_seconds", t.total_orchestration_seconds),
        ] {
            if value == 0 {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::ZeroTimeout {
                        field: field.to_string(),
                    },
                    format!("{} is 0; every call in that phase will time out", field),
                ));
            }
        }
        for (field, value) in [
            ("timeouts.initial_answer_seconds", t.initial_answer_seconds),
            ("timeouts.discussion_answer_seconds", t.discussion_answer_seconds),
        ] {
            if value > t.total_orchestration_seconds {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::TimeoutExceedsTotal {
                        field: field.to_string(),
                    },
                    format!(
                        "{} ({}s) exceeds timeouts.total_orchestration_seconds ({}s)",
                        field, value, t.total_orchestration_seconds
                    ),
                ));
            }
        }

        // 3. PII rules
        for rule in self.sanitization.parse_rules().1 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::UnknownPiiRule { rule: rule.clone() },
                format!("sanitization.pii_rules: unknown rule '{}' ignored", rule),
            ));
        }

        issues
    }

    /// Roster profiles, in panel order
    pub fn profiles(&self) -> Vec<AgentProfile> {
        self.agents.iter().map(FileAgentEntry::to_profile).collect()
    }

    /// Build the orchestrator settings, rejecting an unusable roster.
    pub fn to_settings(&self) -> Result<PanelSettings, ConfigValidationError> {
        if let Some(issue) = self.validate().into_iter().find(|i| i.is_error()) {
            return Err(ConfigValidationError::Issue(issue.message));
        }
        let agents = self.profiles();
        AgentProfile::validate_roster(&agents)?;

        let o = &self.orchestrator;
        Ok(PanelSettings {
            name: o.name.clone(),
            description: o.description.clone(),
            system_prompt: o.system_prompt.clone(),
            combiner_rules: o.combiner_rules.clone(),
            output_requirements: o.output_requirements.clone(),
            discussion_rules: self.cross_agent_discussion.rules.clone(),
            agents,
            timeouts: self.timeouts.to_phase_timeouts(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_domain::{OutputFormat, Severity, Vendor};
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[orchestrator]
name = "Research Panel"
system_prompt = "You merge expert answers."
combiner_rules = "Prefer cited answers."

[[agents]]
name = "Claude"
vendor = "Anthropic"
template = "You are Claude."

[[agents]]
name = "Gemini"
vendor = "Google"
template = "You are Gemini."

[cross_agent_discussion]
rules = "Be constructive."

[timeouts]
initial_answer_seconds = 20
discussion_answer_seconds = 10
total_orchestration_seconds = 60

[sanitization]
redact_user_pii = false

[output]
format = "full"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.agents.len(), 2);
        assert_eq!(config.agents[1].vendor, Vendor::Google);
        assert!(!config.sanitization.redact_user_pii);
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(config.validate().is_empty());

        let settings = config.to_settings().unwrap();
        assert_eq!(settings.name, "Research Panel");
        assert_eq!(settings.discussion_rules, "Be constructive.");
        assert_eq!(settings.timeouts.initial_answer, Duration::from_secs(20));
        assert_eq!(
            settings.synthesis_instruction().as_deref(),
            Some("You merge expert answers.\n\nPrefer cited answers.")
        );
    }

    #[test]
    fn test_deserialize_partial_config_keeps_defaults() {
        let toml_str = r#"
[timeouts]
initial_answer_seconds = 5
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.timeouts.initial_answer_seconds, 5);
        assert_eq!(config.timeouts.total_orchestration_seconds, 120);
        assert_eq!(config.agents.len(), 4);
        assert!(config.sanitization.redact_user_pii);
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_roster_errors() {
        let mut config = FileConfig::default();
        config.agents.push(config.agents[0].clone());
        config.agents.push(FileAgentEntry {
            name: "  ".into(),
            vendor: Vendor::OpenAi,
            template: String::new(),
        });
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.severity == Severity::Error));
        assert!(config.to_settings().is_err());

        config.agents.clear();
        assert_eq!(config.validate()[0].code, ConfigIssueCode::EmptyRoster);
    }

    #[test]
    fn test_timeout_warnings() {
        let mut config = FileConfig::default();
        config.timeouts.discussion_answer_seconds = 0;
        config.timeouts.initial_answer_seconds = 500;
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
        assert!(config.to_settings().is_ok());
    }

    #[test]
    fn test_unknown_pii_rule_warning() {
        let mut config = FileConfig::default();
        config.sanitization.pii_rules.push("ssn".into());
        let issues = config.validate();
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::UnknownPiiRule { rule: "ssn".into() }
        );
    }
}
