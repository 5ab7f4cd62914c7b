//! Ask command handler.
//!
//! Runs the full pipeline: keywords, search, load, answer.

use super::print_run;
use clap::Args;
use docseek_core::{config::AppConfig, AppError, AppResult};
use docseek_retrieval::Pipeline;
use std::path::PathBuf;

/// Search for documents matching a question and answer from them
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub query: String,

    /// Only search inside this directory
    #[arg(short, long)]
    pub folder: Option<PathBuf>,

    /// Number of leading search hits used as context
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Label used when numbering documents in the context
    #[arg(short, long)]
    pub label: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        if let Some(folder) = &self.folder {
            if !folder.is_dir() {
                return Err(AppError::Config(format!(
                    "Search folder is not a directory: {:?}",
                    folder
                )));
            }
        }

        let mut pipeline = Pipeline::from_config(config)?;
        if let Some(top_k) = self.top_k {
            pipeline = pipeline.with_top_k(top_k);
        }
        if let Some(label) = &self.label {
            pipeline = pipeline.with_label(label);
        }

        let run = pipeline.run(&self.query, self.folder.as_deref()).await?;
        tracing::debug!("Keywords used: {:?}", run.keywords);

        print_run(&run, self.json)
    }
}
