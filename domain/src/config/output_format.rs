//! Output format value object

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a panel result is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every agent response, then the combined answer
    Full,
    /// Only the combined answer (default)
    #[default]
    Synthesis,
    /// The whole result as JSON
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &str {
        match self {
            OutputFormat::Full => "full",
            OutputFormat::Synthesis => "synthesis",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(OutputFormat::Full),
            "synthesis" => Ok(OutputFormat::Synthesis),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}
