//! Slash commands understood by the chat REPL

use panel_domain::AgentMode;

/// A parsed `/command` line
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Help,
    /// Show the panel status
    Agents,
    /// Switch the roster to another agent mode
    Mode(AgentMode),
    /// Forget the conversation so far
    Clear,
    Quit,
    /// `/mode` without a valid argument
    BadMode(String),
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`
    pub fn parse(line: &str) -> Self {
        let mut parts = line.trim().splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next().map(str::trim).unwrap_or_default();

        match name.as_str() {
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/agents" | "/status" => ReplCommand::Agents,
            "/mode" => match arg.parse::<AgentMode>() {
                Ok(mode) => ReplCommand::Mode(mode),
                Err(_) => ReplCommand::BadMode(arg.to_string()),
            },
            "/clear" => ReplCommand::Clear,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            _ => ReplCommand::Unknown(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(ReplCommand::parse("/help"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("/QUIT"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/exit"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/agents"), ReplCommand::Agents);
        assert_eq!(ReplCommand::parse("/clear"), ReplCommand::Clear);
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(
            ReplCommand::parse("/mode live"),
            ReplCommand::Mode(AgentMode::Live)
        );
        assert_eq!(
            ReplCommand::parse("/mode  simulated "),
            ReplCommand::Mode(AgentMode::Simulated)
        );
        assert_eq!(
            ReplCommand::parse("/mode turbo"),
            ReplCommand::BadMode("turbo".to_string())
        );
        assert_eq!(ReplCommand::parse("/mode"), ReplCommand::BadMode(String::new()));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            ReplCommand::parse("/models"),
            ReplCommand::Unknown("/models".to_string())
        );
    }
}
