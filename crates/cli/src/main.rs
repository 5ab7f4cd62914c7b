//! Docseek CLI
//!
//! Main entry point for the docseek command-line tool.
//! Answers questions about local PDF files using the OS search index and a
//! local text-generation model.

mod commands;

use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand};
use commands::{AnswerCommand, AskCommand, KeywordsCommand, PromptsCommand};
use docseek_core::config::{AppConfig, ConfigOverrides};
use docseek_core::{logging, AppResult};
use std::path::PathBuf;

/// Docseek - ask questions about the documents on your machine
#[derive(Parser, Debug)]
#[command(name = "docseek")]
#[command(about = "Ask questions about local documents, answered only from their contents", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "DOCSEEK_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "DOCSEEK_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG is read when unset
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// LLM provider (ollama)
    #[arg(short, long, global = true, env = "DOCSEEK_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "DOCSEEK_MODEL")]
    model: Option<String>,

    /// Generation backend URL
    #[arg(long, global = true, env = "DOCSEEK_ENDPOINT")]
    endpoint: Option<String>,

    #[command(flatten)]
    bare: BareQuery,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// `docseek <QUERY> [--folder DIR]`, shorthand for `docseek ask`.
#[derive(Args, Debug, Default)]
struct BareQuery {
    /// Question to ask when no subcommand is given
    query: Option<String>,

    /// Only search inside this directory
    #[arg(short, long)]
    folder: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for documents matching a question and answer from them
    Ask(AskCommand),

    /// Show the search keywords extracted from a question
    Keywords(KeywordsCommand),

    /// Answer a question from explicit PDF files
    Answer(AnswerCommand),

    /// List prompts and where each one is loaded from
    Prompts(PromptsCommand),
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            workspace: self.workspace.clone(),
            config_file: self.config.clone(),
            provider: self.provider.clone(),
            model: self.model.clone(),
            endpoint: self.endpoint.clone(),
            log_level: self.log_level.clone(),
            verbose: self.verbose,
            no_color: self.no_color,
        }
    }

    /// The subcommand to run. A bare query runs `ask`.
    fn into_command(self) -> Option<Commands> {
        match (self.command, self.bare.query) {
            (Some(command), _) => Some(command),
            (None, Some(query)) => Some(Commands::Ask(AskCommand {
                query,
                folder: self.bare.folder,
                top_k: None,
                label: None,
                json: false,
            })),
            (None, None) => None,
        }
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    let config = AppConfig::load(cli.overrides())?;

    let Some(command) = cli.into_command() else {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "a query or a subcommand is required",
            )
            .exit()
    };

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    config.validate()?;

    tracing::info!("Docseek CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);
    tracing::debug!("Endpoint: {}", config.endpoint);

    let command_name = match &command {
        Commands::Ask(_) => "ask",
        Commands::Keywords(_) => "keywords",
        Commands::Answer(_) => "answer",
        Commands::Prompts(_) => "prompts",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Keywords(cmd) => cmd.execute(&config).await,
        Commands::Answer(cmd) => cmd.execute(&config).await,
        Commands::Prompts(cmd) => cmd.execute(&config),
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
