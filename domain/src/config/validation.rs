//! Configuration validation issues.
//!
//! Produced by the configuration loader, reported by the CLI. Errors make
//! the configuration unusable; warnings are printed and ignored.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `[[agents]]` is empty.
    EmptyRoster,
    /// An agent has a blank name.
    EmptyAgentName,
    /// Two agents share a name.
    DuplicateAgent { name: String },
    /// A timeout is zero seconds.
    ZeroTimeout { field: String },
    /// A phase timeout is longer than the whole run may take.
    TimeoutExceedsTotal { field: String },
    /// A PII rule name is not recognized.
    UnknownPiiRule { rule: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
