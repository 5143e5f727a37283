//! Panel query value object

use serde::{Deserialize, Serialize};

/// A query posed to the panel (Value Object)
///
/// Keeps the text exactly as the user typed it next to the sanitized text
/// that agents and the synthesis provider are allowed to see. The original
/// is only used to tell whether anything was redacted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelQuery {
    original: String,
    sanitized: String,
}

impl PanelQuery {
    pub fn new(original: impl Into<String>, sanitized: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            sanitized: sanitized.into(),
        }
    }

    /// The text agents and the synthesis provider see.
    pub fn sanitized(&self) -> &str {
        &self.sanitized
    }

    /// Whether sanitization changed anything.
    pub fn was_redacted(&self) -> bool {
        self.original != self.sanitized
    }
}

impl std::fmt::Display for PanelQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sanitized)
    }
}
