//! Core domain concepts shared across all subdomains.
//!
//! - [`query::PanelQuery`] - a query as typed by the user and as seen by agents
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod query;
