//! Roster configuration from TOML (`[[agents]]` array)

use panel_domain::{AgentProfile, Vendor};
use serde::{Deserialize, Serialize};

/// One `[[agents]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAgentEntry {
    pub name: String,
    /// Free-form vendor name; unknown vendors are kept as custom
    pub vendor: Vendor,
    /// Persona prompt
    #[serde(default)]
    pub template: String,
}

impl FileAgentEntry {
    pub fn to_profile(&self) -> AgentProfile {
        AgentProfile::new(self.name.trim(), self.vendor.clone(), self.template.clone())
    }
}

impl From<AgentProfile> for FileAgentEntry {
    fn from(profile: AgentProfile) -> Self {
        Self {
            name: profile.name,
            vendor: profile.vendor,
            template: profile.template,
        }
    }
}

/// The built-in roster as config entries
pub fn default_agents() -> Vec<FileAgentEntry> {
    AgentProfile::default_roster()
        .into_iter()
        .map(FileAgentEntry::from)
        .collect()
}
