//! Agent profile value objects

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;

/// Provider family behind an agent (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Vendor {
    OpenAi,
    Anthropic,
    Google,
    Microsoft,
    XAi,
    Perplexity,
    DeepSeek,
    Custom(String),
}

impl Vendor {
    pub fn as_str(&self) -> &str {
        match self {
            Vendor::OpenAi => "OpenAI",
            Vendor::Anthropic => "Anthropic",
            Vendor::Google => "Google",
            Vendor::Microsoft => "Microsoft",
            Vendor::XAi => "xAI",
            Vendor::Perplexity => "Perplexity",
            Vendor::DeepSeek => "DeepSeek",
            Vendor::Custom(s) => s,
        }
    }

    pub fn is_google(&self) -> bool {
        matches!(self, Vendor::Google)
    }
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Vendor {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "openai" => Vendor::OpenAi,
            "anthropic" => Vendor::Anthropic,
            "google" => Vendor::Google,
            "microsoft" => Vendor::Microsoft,
            "xai" | "x.ai" => Vendor::XAi,
            "perplexity" => Vendor::Perplexity,
            "deepseek" => Vendor::DeepSeek,
            _ => Vendor::Custom(s.trim().to_string()),
        })
    }
}

impl Serialize for Vendor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Vendor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        // FromStr is infallible; unknown vendors become Custom(...)
        Ok(s.parse().unwrap_or(Vendor::Custom(s)))
    }
}

/// A configured panel member (Value Object)
///
/// Profiles are read once from configuration and outlive every query; the
/// agent objects built from them are only rebuilt on a mode switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Identifier, unique within the roster
    pub name: String,
    /// Provider family
    pub vendor: Vendor,
    /// Persona / system instruction text
    pub template: String,
}

impl AgentProfile {
    pub fn new(name: impl Into<String>, vendor: Vendor, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vendor,
            template: template.into(),
        }
    }

    /// Check a roster for the defects that make it unusable.
    pub fn validate_roster(profiles: &[AgentProfile]) -> Result<(), DomainError> {
        if profiles.is_empty() {
            return Err(DomainError::EmptyRoster);
        }
        let mut seen = HashSet::new();
        for profile in profiles {
            if profile.name.trim().is_empty() {
                return Err(DomainError::EmptyAgentName);
            }
            if !seen.insert(profile.name.as_str()) {
                return Err(DomainError::DuplicateAgent(profile.name.clone()));
            }
        }
        Ok(())
    }

    /// The roster used when no configuration file defines one.
    pub fn default_roster() -> Vec<AgentProfile> {
        vec![
            AgentProfile::new(
                "ChatGPT",
                Vendor::OpenAi,
                "You are ChatGPT, a pragmatic generalist. Structure answers clearly. \
                 Respond in JSON with keys: answer, rationale, confidence (0-1), sources.",
            ),
            AgentProfile::new(
                "Claude",
                Vendor::Anthropic,
                "You are Claude, careful and safety-minded. Summarize precisely. \
                 Respond in JSON with keys: answer, rationale, confidence (0-1), sources.",
            ),
            AgentProfile::new(
                "Gemini",
                Vendor::Google,
                "You are Gemini, focused on up-to-date retrieval. Cite what you rely on. \
                 Respond in JSON with keys: answer, rationale, confidence (0-1), sources.",
            ),
            AgentProfile::new(
                "Grok",
                Vendor::XAi,
                "You are Grok, direct and unfiltered. Call out weak assumptions. \
                 Respond in JSON with keys: answer, rationale, confidence (0-1), sources.",
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_parse_known() {
        assert_eq!("OpenAI".parse::<Vendor>().unwrap(), Vendor::OpenAi);
        assert_eq!("google".parse::<Vendor>().unwrap(), Vendor::Google);
        assert_eq!("xAI".parse::<Vendor>().unwrap(), Vendor::XAi);
    }

    #[test]
    fn test_vendor_parse_custom_keeps_text() {
        let vendor: Vendor = "Mistral".parse().unwrap();
        assert_eq!(vendor, Vendor::Custom("Mistral".to_string()));
        assert_eq!(vendor.to_string(), "Mistral");
    }

    #[test]
    fn test_vendor_serde_roundtrip_as_string() {
        let json = serde_json::to_string(&Vendor::Anthropic).unwrap();
        assert_eq!(json, "\"Anthropic\"");
        let back: Vendor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Vendor::Anthropic);
    }

    #[test]
    fn test_validate_roster_rejects_empty() {
        assert_eq!(AgentProfile::validate_roster(&[]), Err(DomainError::EmptyRoster));
    }

    #[test]
    fn test_validate_roster_rejects_duplicates() {
        let roster = vec![
            AgentProfile::new("Claude", Vendor::Anthropic, ""),
            AgentProfile::new("Claude", Vendor::Anthropic, ""),
        ];
        assert_eq!(
            AgentProfile::validate_roster(&roster),
            Err(DomainError::DuplicateAgent("Claude".to_string()))
        );
    }

    #[test]
    fn test_validate_roster_rejects_blank_name() {
        let roster = vec![AgentProfile::new("  ", Vendor::OpenAi, "")];
        assert_eq!(
            AgentProfile::validate_roster(&roster),
            Err(DomainError::EmptyAgentName)
        );
    }

    #[test]
    fn test_default_roster_is_valid() {
        let roster = AgentProfile::default_roster();
        assert_eq!(roster.len(), 4);
        assert!(AgentProfile::validate_roster(&roster).is_ok());
    }
}
