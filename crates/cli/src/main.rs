//! Newsdesk CLI
//!
//! Main entry point for the newsdesk command-line tool.
//! Provides commands for building a personalized news feed and asking
//! questions about it.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, GenerateCommand, ProfileCommand, QuestionsCommand};
use newsdesk_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Newsdesk CLI - personalized news feeds with question answering
#[derive(Parser, Debug)]
#[command(name = "newsdesk")]
#[command(about = "Personalized news feeds with question answering", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "NEWSDESK_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "NEWSDESK_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// LLM provider (ollama, gemini, openai)
    #[arg(short, long, global = true, env = "NEWSDESK_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "NEWSDESK_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate clarifying questions from an interest description
    Questions(QuestionsCommand),

    /// Build a profile summary from an interest and question answers
    Profile(ProfileCommand),

    /// Generate a personalized news feed from a profile summary
    Generate(GenerateCommand),

    /// Ask a question about a generated news feed
    Ask(AskCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.workspace,
        cli.config,
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    // Log startup
    tracing::info!("Newsdesk CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    // Ensure .newsdesk directory exists
    config.ensure_newsdesk_dir()?;

    // Emit command.start span
    let command_name = match &cli.command {
        Commands::Questions(_) => "questions",
        Commands::Profile(_) => "profile",
        Commands::Generate(_) => "generate",
        Commands::Ask(_) => "ask",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Questions(cmd) => cmd.execute(&config).await,
        Commands::Profile(cmd) => cmd.execute(&config).await,
        Commands::Generate(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
    };

    // Log completion
    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
