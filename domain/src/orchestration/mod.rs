//! Panel orchestration domain
//!
//! This module contains the value objects and pure rules of the
//! broadcast → critique → synthesis pipeline. Nothing here performs I/O.

pub mod aggregation;
pub mod entities;
pub mod parsing;
pub mod timeouts;
pub mod value_objects;
