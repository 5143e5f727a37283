//! Infrastructure layer for agent-panel
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: provider gateways, the PII sanitizer,
//! configuration file loading, and transcript logging.

pub mod config;
pub mod logging;
pub mod providers;
pub mod sanitize;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, ConfigValidationError, FileConfig, FileOutputConfig,
    FileOutputFormat, FileProvidersConfig, FileReplConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::{
    GeminiGateway, KeyedProviderDirectory, OpenRouterGateway, ProviderCredentials,
};
pub use sanitize::{PiiRule, RegexSanitizer};
