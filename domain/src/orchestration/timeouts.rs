//! Per-phase deadlines of a panel run

use std::time::Duration;

/// Phase deadlines (Value Object)
///
/// `total_orchestration` bounds the whole run; synthesis gets whatever the
/// broadcast and critique phases left of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTimeouts {
    pub initial_answer: Duration,
    pub discussion_answer: Duration,
    pub total_orchestration: Duration,
}

impl Default for PhaseTimeouts {
    fn default() -> Self {
        Self::from_secs(45, 30, 120)
    }
}

impl PhaseTimeouts {
    pub fn from_secs(initial_answer: u64, discussion_answer: u64, total_orchestration: u64) -> Self {
        Self {
            initial_answer: Duration::from_secs(initial_answer),
            discussion_answer: Duration::from_secs(discussion_answer),
            total_orchestration: Duration::from_secs(total_orchestration),
        }
    }

    /// Remaining budget for synthesis after `elapsed` of the run.
    pub fn synthesis_budget(&self, elapsed: Duration) -> Duration {
        self.total_orchestration.saturating_sub(elapsed)
    }
}
