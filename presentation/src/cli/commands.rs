//! CLI command definitions

use clap::{Parser, ValueEnum};
use panel_domain::OutputFormat as DomainOutputFormat;
use std::path::PathBuf;

/// Output format for panel results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every agent response, then the combined answer
    Full,
    /// Only the combined answer
    Synthesis,
    /// JSON output
    Json,
}

impl From<OutputFormat> for DomainOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => DomainOutputFormat::Full,
            OutputFormat::Synthesis => DomainOutputFormat::Synthesis,
            OutputFormat::Json => DomainOutputFormat::Json,
        }
    }
}

/// CLI arguments for agent-panel
#[derive(Parser, Debug)]
#[command(name = "agent-panel")]
#[command(author, version, about = "Ask a panel of AI agents and get one combined answer")]
#[command(long_about = r#"
Agent Panel sends your question to a panel of AI agents and combines their
answers into one.

Each run goes through four phases:
1. Sanitize: emails and phone numbers are redacted from the question
2. Broadcast: every agent answers in parallel
3. Critique: every agent comments on the valid answers
4. Synthesis: the answers are merged; if that fails, the most confident
   answer is used

Agents run simulated (offline) unless --live is given. Live agents read
OPENROUTER_API_KEY, GOOGLE_API_KEY and GOOGLE_OPENROUTER_KEY from the
environment or a .env file.

Configuration files are loaded from (in priority order):
1. PANEL_* environment variables
2. --config <path>     Explicit config file
3. ./panel.toml        Project-level config
4. ~/.config/agent-panel/config.toml   Global config

Example:
  agent-panel "What's the best way to handle errors in Rust?"
  agent-panel --live -o full "Compare tokio and async-std"
  agent-panel --chat
"#)]
pub struct Cli {
    /// The question to ask the panel (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Use live agents instead of simulated ones
    #[arg(long)]
    pub live: bool,

    /// Do not redact personal data from the question
    #[arg(long)]
    pub no_redact: bool,

    /// Output format (defaults to the config file value, then synthesis)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and the merged config, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Directory for JSONL panel transcripts
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Also write diagnostic logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
