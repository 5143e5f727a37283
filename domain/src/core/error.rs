//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are configuration and programming defects. Upstream provider
/// failures never surface as a `DomainError`; they become sentinel responses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No agents configured for the panel")]
    EmptyRoster,

    #[error("Agent name cannot be empty")]
    EmptyAgentName,

    #[error("Duplicate agent name in roster: {0}")]
    DuplicateAgent(String),

    #[error("Invalid agent mode: {0}")]
    InvalidMode(String),
}

impl DomainError {
    /// Check if this error comes from the roster definition
    pub fn is_roster_error(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyRoster | DomainError::EmptyAgentName | DomainError::DuplicateAgent(_)
        )
    }
}
