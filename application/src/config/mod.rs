//! Application-level configuration.
//!
//! - [`PanelSettings`] - orchestrator identity, instructions, roster and timeouts

pub mod panel_settings;

pub use panel_settings::PanelSettings;
