//! CLI entrypoint for Agent Panel
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use panel_application::{
    Combiner, ConversationLogger, NoConversationLogger, NoProgress, PanelOrchestrator,
    PassthroughSanitizer, ProviderDirectory, RosterBuilder, RunPanelInput, Sanitizer,
};
use panel_domain::{AgentMode, OutputFormat, Severity};
use panel_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, KeyedProviderDirectory, ProviderCredentials,
};
use panel_presentation::{ChatRepl, Cli, ConsoleFormatter, ProgressReporter};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    // Provider keys may live in a .env file
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded environment from {}", path.display());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };

    if cli.show_config {
        print_config(&cli, &config)?;
        return Ok(());
    }

    for issue in config.validate() {
        match issue.severity {
            Severity::Error => eprintln!("config error: {}", issue.message),
            Severity::Warning => eprintln!("config warning: {}", issue.message),
        }
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    let settings = config
        .to_settings()
        .context("Invalid panel configuration")?;

    // === Dependency Injection ===
    let credentials = ProviderCredentials::from_env(&config.providers);
    let providers: Arc<dyn ProviderDirectory> =
        Arc::new(KeyedProviderDirectory::new(&credentials, &config.providers)?);

    let mode = if cli.live {
        if credentials.is_empty() {
            warn!("Live mode without any API keys: agents will report missing keys");
        }
        AgentMode::Live
    } else {
        AgentMode::Simulated
    };

    let roster_builder = Arc::new(
        RosterBuilder::new(Arc::clone(&providers))
            .with_discussion_rules(settings.discussion_rules.clone()),
    );
    let roster = roster_builder.build(&settings.agents, mode)?;

    let combiner = Combiner::new(providers.synthesis_binding())
        .with_instruction(settings.synthesis_instruction());

    let sanitizer: Arc<dyn Sanitizer> = if cli.no_redact {
        Arc::new(PassthroughSanitizer)
    } else {
        let sanitizer = config.sanitization.to_sanitizer()?;
        if !sanitizer.is_enabled() {
            info!("PII redaction disabled by configuration");
        }
        Arc::new(sanitizer)
    };

    let logger: Arc<dyn ConversationLogger> = match cli.log_dir.as_deref() {
        Some(dir) => match JsonlConversationLogger::in_dir(dir) {
            Some(logger) => {
                info!("Writing panel transcript to {}", logger.path().display());
                Arc::new(logger)
            }
            None => {
                warn!("Cannot write transcripts to {}", dir.display());
                Arc::new(NoConversationLogger)
            }
        },
        None => Arc::new(NoConversationLogger),
    };

    let orchestrator = Arc::new(
        PanelOrchestrator::new(settings, roster, combiner, sanitizer).with_logger(logger),
    );

    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();
    let show_progress = !cli.quiet && config.repl.show_progress;

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(orchestrator, roster_builder)
            .with_progress(show_progress)
            .with_format(format);
        if let Some(path) = &config.repl.history_file {
            repl = repl.with_history_file(Some(PathBuf::from(path)));
        }
        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let Some(question) = cli.question else {
        bail!("Question is required. Use --chat for interactive mode.");
    };

    let input = RunPanelInput::new(question.clone());
    let result = if cli.quiet {
        orchestrator.execute_with_progress(input, &NoProgress).await?
    } else {
        let progress = ProgressReporter::new();
        orchestrator.execute_with_progress(input, &progress).await?
    };

    println!("{}", ConsoleFormatter::render(format, &question, &result));

    Ok(())
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins over the `-v` count. The returned guard flushes the log
/// file on drop.
fn init_logging(verbose: u8, log_file: Option<&std::path::Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

fn print_config(cli: &Cli, config: &FileConfig) -> Result<()> {
    println!("Configuration sources (highest priority first):");
    println!("  Environment: PANEL_* variables");
    if cli.no_config {
        println!("  (config files disabled by --no-config)");
    } else {
        for (label, path, exists) in ConfigLoader::config_sources(cli.config.as_deref()) {
            let marker = if exists { "found" } else { "not found" };
            println!("  {}: {} ({})", label, path, marker);
        }
    }
    println!();
    println!("Merged configuration:");
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
