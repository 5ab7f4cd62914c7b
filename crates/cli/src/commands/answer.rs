//! Answer command handler.
//!
//! Answers from files named on the command line instead of search hits.

use super::print_run;
use clap::Args;
use docseek_core::{config::AppConfig, AppResult};
use docseek_retrieval::Pipeline;
use std::path::PathBuf;

/// Answer a question from explicit PDF files
#[derive(Args, Debug)]
pub struct AnswerCommand {
    /// The question to ask
    pub question: String,

    /// PDF file to use as context (repeatable)
    #[arg(short, long, required = true)]
    pub file: Vec<PathBuf>,

    /// Label used when numbering documents in the context
    #[arg(short, long)]
    pub label: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AnswerCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing answer command over {} files", self.file.len());

        let mut pipeline = Pipeline::from_config(config)?;
        if let Some(label) = &self.label {
            pipeline = pipeline.with_label(label);
        }

        let run = pipeline.answer_files(&self.question, &self.file).await?;
        print_run(&run, self.json)
    }
}
