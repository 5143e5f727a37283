//! REPL (Read-Eval-Print Loop) for interactive chat

use super::command::ReplCommand;
use crate::{ConsoleFormatter, ProgressReporter};
use colored::Colorize;
use panel_application::{NoProgress, PanelOrchestrator, RosterBuilder, RunPanelInput};
use panel_domain::{ChatTurn, OutputFormat};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

/// Conversation turns kept as context for the next question
const MAX_HISTORY_TURNS: usize = 20;

const HISTORY_CAPACITY: usize = 1000;

/// Interactive chat REPL
pub struct ChatRepl {
    orchestrator: Arc<PanelOrchestrator>,
    roster_builder: Arc<RosterBuilder>,
    show_progress: bool,
    format: OutputFormat,
    history_file: Option<PathBuf>,
    turns: Vec<ChatTurn>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(orchestrator: Arc<PanelOrchestrator>, roster_builder: Arc<RosterBuilder>) -> Self {
        Self {
            orchestrator,
            roster_builder,
            show_progress: true,
            format: OutputFormat::Synthesis,
            history_file: default_history_file(),
            turns: Vec::new(),
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Override the line history file; `None` keeps history in memory only
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut editor = self.editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(">>> ".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(buffer) => {
                    let line = buffer.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(ReplCommand::parse(line)) {
                            break;
                        }
                        continue;
                    }

                    self.process_question(line).await;
                }
                Signal::CtrlC => {
                    println!("^C");
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    fn editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.history_file else {
            return editor;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("Line history disabled ({}): {}", path.display(), e);
                editor
            }
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│           Agent Panel - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        match self.orchestrator.status() {
            Ok(status) => print!("{}", ConsoleFormatter::format_status(&status)),
            Err(e) => eprintln!("{} {}", "Error:".red(), e),
        }
        println!();
        println!("Type your question, or /help for commands.");
        println!();
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        println!("  /help, /h, /?         Show this help");
        println!("  /agents, /status      Show the panel roster and settings");
        println!("  /mode simulated|live  Switch agent mode");
        println!("  /clear                Forget the conversation so far");
        println!("  /quit, /exit, /q      Exit chat mode");
        println!();
    }

    /// Handle a command. Returns `true` if the REPL should exit.
    fn handle_command(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Help => self.print_help(),
            ReplCommand::Agents => match self.orchestrator.status() {
                Ok(status) => print!("{}", ConsoleFormatter::format_status(&status)),
                Err(e) => eprintln!("{} {}", "Error:".red(), e),
            },
            ReplCommand::Mode(mode) => {
                match self.orchestrator.switch_mode(mode, &self.roster_builder) {
                    Ok(()) => println!("Switched to {} mode", mode),
                    Err(e) => eprintln!("{} {}", "Error:".red(), e),
                }
            }
            ReplCommand::Clear => {
                self.turns.clear();
                println!("Conversation cleared");
            }
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::BadMode(arg) => {
                eprintln!("Unknown mode '{}'. Use /mode simulated or /mode live", arg);
            }
            ReplCommand::Unknown(name) => {
                println!("Unknown command: {}. Type /help for available commands.", name);
            }
        }
        false
    }

    async fn process_question(&mut self, question: &str) {
        println!();

        let input = RunPanelInput::new(question).with_history(self.turns.clone());
        let result = if self.show_progress {
            let progress = ProgressReporter::new();
            self.orchestrator
                .execute_with_progress(input, &progress)
                .await
        } else {
            self.orchestrator.execute_with_progress(input, &NoProgress).await
        };

        match result {
            Ok(result) => {
                println!();
                println!("{}", ConsoleFormatter::render(self.format, question, &result));
                self.remember(question, &result.final_answer);
            }
            Err(e) => eprintln!("{} {}", "Error:".red(), e),
        }
    }

    fn remember(&mut self, question: &str, answer: &str) {
        self.turns.push(ChatTurn::user(question));
        self.turns.push(ChatTurn::assistant(answer));
        let excess = self.turns.len().saturating_sub(MAX_HISTORY_TURNS);
        self.turns.drain(..excess);
    }
}

fn default_history_file() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("agent-panel").join("history.txt"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_application::{
        NoProviders, PanelSettings, PassthroughSanitizer, Combiner, SimulatedLatency,
    };
    use panel_domain::AgentMode;

    fn repl() -> ChatRepl {
        let settings = PanelSettings::default();
        let builder = Arc::new(
            RosterBuilder::new(Arc::new(NoProviders)).with_latency(SimulatedLatency::none()),
        );
        let roster = builder.build(&settings.agents, AgentMode::Simulated).unwrap();
        let orchestrator = PanelOrchestrator::new(
            settings,
            roster,
            Combiner::new(None),
            Arc::new(PassthroughSanitizer),
        );
        ChatRepl::new(Arc::new(orchestrator), builder)
            .with_progress(false)
            .with_history_file(None)
    }

    #[test]
    fn test_history_is_bounded() {
        let mut repl = repl();
        for i in 0..15 {
            repl.remember(&format!("q{i}"), &format!("a{i}"));
        }
        assert_eq!(repl.turns.len(), MAX_HISTORY_TURNS);
        assert_eq!(repl.turns[0].content, "q5");
    }

    #[test]
    fn test_clear_and_quit_commands() {
        let mut repl = repl();
        repl.remember("q", "a");
        assert!(!repl.handle_command(ReplCommand::Clear));
        assert!(repl.turns.is_empty());
        assert!(repl.handle_command(ReplCommand::Quit));
    }

    #[test]
    fn test_mode_command_switches_roster() {
        let mut repl = repl();
        assert!(!repl.handle_command(ReplCommand::Mode(AgentMode::Live)));
        assert_eq!(repl.orchestrator.status().unwrap().mode, AgentMode::Live);
    }

    #[tokio::test]
    async fn test_question_is_remembered() {
        let mut repl = repl();
        repl.process_question("What is Rust?").await;
        assert_eq!(repl.turns.len(), 2);
        assert_eq!(repl.turns[0].content, "What is Rust?");
        assert!(!repl.turns[1].content.is_empty());
    }
}
