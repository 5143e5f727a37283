//! Sanitization configuration from TOML (`[sanitization]` section)

use crate::sanitize::{PiiRule, RegexSanitizer};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSanitizationConfig {
    /// Redact personal data from queries before agents see them
    pub redact_user_pii: bool,
    /// Rule names: `email`, `phone`
    pub pii_rules: Vec<String>,
}

impl Default for FileSanitizationConfig {
    fn default() -> Self {
        Self {
            redact_user_pii: true,
            pii_rules: PiiRule::ALL.iter().map(|r| r.as_str().to_string()).collect(),
        }
    }
}

impl FileSanitizationConfig {
    /// Parse rule names, returning recognized rules and unknown names
    pub fn parse_rules(&self) -> (Vec<PiiRule>, Vec<String>) {
        let mut rules = Vec::new();
        let mut unknown = Vec::new();
        for name in &self.pii_rules {
            match name.parse::<PiiRule>() {
                Ok(rule) if !rules.contains(&rule) => rules.push(rule),
                Ok(_) => {}
                Err(name) => unknown.push(name),
            }
        }
        (rules, unknown)
    }

    pub fn to_sanitizer(&self) -> Result<RegexSanitizer, regex::Error> {
        RegexSanitizer::new(self.redact_user_pii, &self.parse_rules().0)
    }
}
