//! Command handlers for the docseek CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod answer;
pub mod ask;
pub mod keywords;
pub mod prompts;

// Re-export command types for convenience
pub use answer::AnswerCommand;
pub use ask::AskCommand;
pub use keywords::KeywordsCommand;
pub use prompts::PromptsCommand;

use docseek_core::{AppError, AppResult};
use docseek_retrieval::QaRun;

/// Print a run: pretty JSON, or the answer followed by one hit per line.
pub(crate) fn print_run(run: &QaRun, json: bool) -> AppResult<()> {
    if json {
        let json = serde_json::to_string_pretty(run)
            .map_err(|e| AppError::Serialization(e.to_string()))?;
        println!("{}", json);
    } else {
        println!("{}", run.answer);
        for hit in &run.hits {
            println!("{}", hit.display());
        }
    }
    Ok(())
}
