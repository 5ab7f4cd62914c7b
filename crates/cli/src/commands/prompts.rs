//! Prompts command handler.

use clap::Args;
use docseek_core::{config::AppConfig, AppError, AppResult};
use docseek_prompt::{list_prompts, PromptOrigin};

/// List prompts and where each one is loaded from
#[derive(Args, Debug)]
pub struct PromptsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl PromptsCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let prompts = list_prompts(&config.workspace)?;

        if self.json {
            let output: Vec<_> = prompts
                .iter()
                .map(|info| {
                    let path = match &info.origin {
                        PromptOrigin::BuiltIn => None,
                        PromptOrigin::Override(path) => Some(path.display().to_string()),
                    };
                    serde_json::json!({
                        "id": info.id,
                        "builtIn": path.is_none(),
                        "path": path,
                    })
                })
                .collect();
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            for info in &prompts {
                println!("{:<20} {}", info.id, info.origin);
            }
        }

        Ok(())
    }
}
