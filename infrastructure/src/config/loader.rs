//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Project-level config file names, in lookup order
pub const PROJECT_CONFIG_FILES: [&str; 2] = ["panel.toml", ".panel.toml"];

/// Prefix of environment overrides (`PANEL_TIMEOUTS__INITIAL_ANSWER_SECONDS=10`)
pub const ENV_PREFIX: &str = "PANEL_";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `PANEL_`-prefixed environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./panel.toml` or `./.panel.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/agent-panel/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        Self::load_from(Self::global_config_path().as_deref(), config_path)
    }

    /// Same as [`load`](Self::load) with an explicit global config path
    pub fn load_from(
        global_path: Option<&Path>,
        config_path: Option<&Path>,
    ) -> Result<FileConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global) = global_path
            && global.exists()
        {
            figment = figment.merge(Toml::file(global));
        }

        if let Some(project) = Self::project_config_path() {
            figment = figment.merge(Toml::file(project));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// `$XDG_CONFIG_HOME/agent-panel/config.toml` (or the platform equivalent)
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("agent-panel").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Config file locations in priority order, with whether each exists
    pub fn config_sources(config_path: Option<&Path>) -> Vec<(&'static str, String, bool)> {
        let mut sources = Vec::new();
        if let Some(path) = config_path {
            sources.push(("Explicit", path.display().to_string(), path.exists()));
        }
        match Self::project_config_path() {
            Some(path) => sources.push(("Project", path.display().to_string(), true)),
            None => sources.push(("Project", PROJECT_CONFIG_FILES.join(" or "), false)),
        }
        if let Some(path) = Self::global_config_path() {
            sources.push(("Global", path.display().to_string(), path.exists()));
        }
        sources
    }
}
