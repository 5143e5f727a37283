//! Interactive chat module
//!
//! Provides a line-editor based interactive chat interface for the panel.

mod command;
mod repl;

pub use command::ReplCommand;
pub use repl::ChatRepl;
