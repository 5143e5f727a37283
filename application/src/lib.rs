//! Application layer for agent-panel
//!
//! This crate contains the orchestration use case, the agent
//! implementations, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod agents;
pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use agents::{LiveAgent, Roster, RosterBuilder, SimulatedAgent, SimulatedLatency};
pub use config::PanelSettings;
pub use ports::{
    agent::Agent,
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway},
    progress::{NoProgress, ProgressNotifier},
    provider_directory::{NoProviders, ProviderBinding, ProviderDirectory},
    sanitizer::{PassthroughSanitizer, Sanitizer},
};
pub use use_cases::run_panel::{PanelOrchestrator, PanelStatus, RunPanelError, RunPanelInput};
pub use use_cases::synthesize::Combiner;
