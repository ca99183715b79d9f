//! edgar-digest CLI
//!
//! Main entry point. Downloads SEC EDGAR filings, converts filing documents
//! to JSON records, and runs the cybersecurity summarization pipeline.

mod commands;

use clap::{Parser, Subcommand};
use commands::{FetchCommand, SummarizeCommand};
use edgar_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Download SEC EDGAR filings and produce cybersecurity-focused summaries
#[derive(Parser, Debug)]
#[command(name = "edgar-digest")]
#[command(about = "SEC EDGAR filings downloader and cybersecurity summarizer", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "EDGAR_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "EDGAR_CONFIG")]
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

    /// LLM provider (openai, ollama)
    #[arg(short, long, global = true, env = "EDGAR_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "EDGAR_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Download filings for a company and convert them to JSON records
    Fetch(FetchCommand),

    /// Summarize a filing JSON record with a focus on cybersecurity
    Summarize(SummarizeCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

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

    tracing::info!("edgar-digest starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    let command_name = match &cli.command {
        Commands::Fetch(_) => "fetch",
        Commands::Summarize(_) => "summarize",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Fetch(cmd) => cmd.execute(&config).await,
        Commands::Summarize(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
