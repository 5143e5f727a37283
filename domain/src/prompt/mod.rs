//! Prompt domain
//!
//! Templates for the text sent to providers at each phase of a panel run.

mod template;

pub use template::PromptTemplate;
