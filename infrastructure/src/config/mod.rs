//! Configuration file loading for agent-panel
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `PANEL_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./panel.toml` or `./.panel.toml`
//! 4. Global: `$XDG_CONFIG_HOME/agent-panel/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAgentEntry, FileConfig, FileDiscussionConfig,
    FileOrchestratorConfig, FileOutputConfig, FileOutputFormat, FileProvidersConfig,
    FileReplConfig, FileSanitizationConfig, FileTimeoutsConfig,
};
pub use loader::{ConfigError, ConfigLoader, ENV_PREFIX, PROJECT_CONFIG_FILES};
