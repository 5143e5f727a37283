//! Timeout configuration from TOML (`[timeouts]` section)

use panel_domain::PhaseTimeouts;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTimeoutsConfig {
    /// Broadcast phase deadline
    pub initial_answer_seconds: u64,
    /// Critique phase deadline
    pub discussion_answer_seconds: u64,
    /// Budget for the whole run; synthesis gets what is left
    pub total_orchestration_seconds: u64,
}

impl Default for FileTimeoutsConfig {
    fn default() -> Self {
        Self {
            initial_answer_seconds: 45,
            discussion_answer_seconds: 30,
            total_orchestration_seconds: 120,
        }
    }
}

impl FileTimeoutsConfig {
    pub fn to_phase_timeouts(&self) -> PhaseTimeouts {
        PhaseTimeouts::from_secs(
            self.initial_answer_seconds,
            self.discussion_answer_seconds,
            self.total_orchestration_seconds,
        )
    }
}
