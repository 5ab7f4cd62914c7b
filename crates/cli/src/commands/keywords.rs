//! Keywords command handler.

use clap::Args;
use docseek_core::{config::AppConfig, AppError, AppResult};
use docseek_retrieval::{build_expression, Pipeline};

/// Show the search keywords extracted from a question
#[derive(Args, Debug)]
pub struct KeywordsCommand {
    /// The question to extract keywords from
    pub query: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl KeywordsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing keywords command");

        let pipeline = Pipeline::from_config(config)?;
        let keywords = pipeline.extract_keywords(&self.query).await?;

        if self.json {
            let output = serde_json::json!({
                "query": self.query,
                "keywords": keywords,
                "expression": build_expression(&keywords),
            });
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            for keyword in &keywords {
                println!("{}", keyword);
            }
        }

        Ok(())
    }
}
