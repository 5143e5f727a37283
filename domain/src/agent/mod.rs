//! Agent domain
//!
//! Describes who sits on the panel and how each member reaches a provider.
//!
//! - [`profile::AgentProfile`] - configured name, vendor and persona template
//! - [`routing::ModelRoute`] - which provider endpoint and model serve a profile
//! - [`history::ChatTurn`] - a prior conversation turn forwarded to agents

pub mod history;
pub mod profile;
pub mod routing;
