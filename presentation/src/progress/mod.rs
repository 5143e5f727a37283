//! Progress reporting for panel runs

pub mod reporter;
