//! Regex-based PII redaction.
//!
//! Implements the [`Sanitizer`] port. Each enabled [`PiiRule`] replaces its
//! matches with a fixed marker; rules run in the order configured.

use panel_application::ports::sanitizer::Sanitizer;
use regex::Regex;
use std::str::FromStr;
use tracing::info;

const EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";
const PHONE_PATTERN: &str = r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b";

/// A category of personal data that can be redacted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiiRule {
    Email,
    Phone,
}

impl PiiRule {
    pub const ALL: [PiiRule; 2] = [PiiRule::Email, PiiRule::Phone];

    pub fn as_str(&self) -> &'static str {
        match self {
            PiiRule::Email => "email",
            PiiRule::Phone => "phone",
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            PiiRule::Email => EMAIL_PATTERN,
            PiiRule::Phone => PHONE_PATTERN,
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            PiiRule::Email => "[EMAIL REDACTED]",
            PiiRule::Phone => "[PHONE REDACTED]",
        }
    }
}

impl FromStr for PiiRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" | "emails" => Ok(PiiRule::Email),
            "phone" | "phones" | "phone_number" => Ok(PiiRule::Phone),
            other => Err(other.to_string()),
        }
    }
}

/// Sanitizer that redacts emails and phone numbers
pub struct RegexSanitizer {
    enabled: bool,
    rules: Vec<(Regex, &'static str)>,
}

impl RegexSanitizer {
    pub fn new(enabled: bool, rules: &[PiiRule]) -> Result<Self, regex::Error> {
        let rules = rules
            .iter()
            .map(|rule| Ok((Regex::new(rule.pattern())?, rule.marker())))
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { enabled, rules })
    }

    /// Email and phone redaction, enabled
    pub fn standard() -> Result<Self, regex::Error> {
        Self::new(true, &PiiRule::ALL)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Sanitizer for RegexSanitizer {
    fn sanitize(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }

        let mut redacted = text.to_string();
        for (regex, marker) in &self.rules {
            redacted = regex.replace_all(&redacted, *marker).into_owned();
        }

        if redacted != text {
            info!("PII redacted from query");
        }
        redacted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use panel_application::agents::Roster;
    use panel_application::ports::agent::Agent;
    use panel_application::use_cases::run_panel::PanelOrchestrator;
    use panel_application::{Combiner, PanelSettings};
    use panel_domain::{AgentMode, AgentProfile, AgentResponse, ChatTurn, Vendor};
    use std::sync::{Arc, Mutex};

    const SAMPLE: &str = "contact me at a@b.com or 555-123-4567";

    #[test]
    fn test_redacts_email_and_phone() {
        let sanitizer = RegexSanitizer::standard().unwrap();
        assert_eq!(
            sanitizer.sanitize(SAMPLE),
            "contact me at [EMAIL REDACTED] or [PHONE REDACTED]"
        );
    }

    #[test]
    fn test_disabled_is_identity() {
        let sanitizer = RegexSanitizer::new(false, &PiiRule::ALL).unwrap();
        assert_eq!(sanitizer.sanitize(SAMPLE), SAMPLE);
    }

    #[test]
    fn test_phone_variants() {
        let sanitizer = RegexSanitizer::new(true, &[PiiRule::Phone]).unwrap();
        assert_eq!(sanitizer.sanitize("call 555.123.4567"), "call [PHONE REDACTED]");
        assert_eq!(sanitizer.sanitize("call 5551234567"), "call [PHONE REDACTED]");
        assert_eq!(sanitizer.sanitize("order 12345"), "order 12345");
        assert_eq!(sanitizer.sanitize("a@b.com"), "a@b.com");
    }

    #[test]
    fn test_rule_names() {
        assert_eq!("Email".parse::<PiiRule>(), Ok(PiiRule::Email));
        assert_eq!("phone_number".parse::<PiiRule>(), Ok(PiiRule::Phone));
        assert!("ssn".parse::<PiiRule>().is_err());
    }

    struct RecordingAgent {
        profile: AgentProfile,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Agent for RecordingAgent {
        fn profile(&self) -> &AgentProfile {
            &self.profile
        }

        async fn query(&self, text: &str, _history: &[ChatTurn]) -> AgentResponse {
            self.seen.lock().unwrap().push(text.to_string());
            AgentResponse::new(self.name(), text, "echo", 0.9)
        }

        async fn critique(&self, _peers: &[AgentResponse]) -> String {
            "ok".to_string()
        }
    }

    async fn run_with(sanitizer: RegexSanitizer) -> (Vec<Arc<RecordingAgent>>, String) {
        let agents: Vec<Arc<RecordingAgent>> = ["A", "B"]
            .iter()
            .map(|name| {
                Arc::new(RecordingAgent {
                    profile: AgentProfile::new(*name, Vendor::OpenAi, ""),
                    seen: Mutex::new(Vec::new()),
                })
            })
            .collect();
        let roster = Roster::new(
            AgentMode::Simulated,
            agents.iter().map(|a| Arc::clone(a) as Arc<dyn Agent>).collect(),
        );
        let orchestrator = PanelOrchestrator::new(
            PanelSettings::default(),
            roster,
            Combiner::new(None),
            Arc::new(sanitizer),
        );
        let result = orchestrator.process(SAMPLE).await.unwrap();
        (agents, result.final_answer)
    }

    #[tokio::test]
    async fn test_every_agent_sees_redacted_query() {
        let (agents, final_answer) = run_with(RegexSanitizer::standard().unwrap()).await;
        for agent in &agents {
            assert_eq!(
                *agent.seen.lock().unwrap(),
                vec!["contact me at [EMAIL REDACTED] or [PHONE REDACTED]".to_string()]
            );
        }
        assert!(!final_answer.contains("a@b.com"));
        assert!(!final_answer.contains("555-123-4567"));
    }

    #[tokio::test]
    async fn test_agents_see_original_when_disabled() {
        let (agents, _) = run_with(RegexSanitizer::new(false, &PiiRule::ALL).unwrap()).await;
        assert_eq!(*agents[0].seen.lock().unwrap(), vec![SAMPLE.to_string()]);
    }
}
