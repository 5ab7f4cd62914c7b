//! Grounded answer generation.

use docseek_core::AppResult;
use docseek_llm::{LlmClient, LlmRequest};
use docseek_prompt::{answer_prompt, render, PromptDefinition};
use std::collections::HashMap;
use std::sync::Arc;

/// Answers a question from a context block.
#[async_trait::async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Raw answer text for `question`, grounded in `context`.
    async fn answer(&self, question: &str, context: &str) -> AppResult<String>;
}

/// Answer generator backed by a text-generation model.
///
/// The prompt forbids knowledge outside the supplied context. The model's
/// output is returned verbatim.
pub struct LlmAnswerGenerator {
    client: Arc<dyn LlmClient>,
    model: String,
    prompt: PromptDefinition,
}

impl LlmAnswerGenerator {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            prompt: answer_prompt(),
        }
    }

    /// Use a different prompt. It receives `context` and `question`.
    pub fn with_prompt(mut self, prompt: PromptDefinition) -> Self {
        self.prompt = prompt;
        self
    }
}

#[async_trait::async_trait]
impl AnswerGenerator for LlmAnswerGenerator {
    async fn answer(&self, question: &str, context: &str) -> AppResult<String> {
        tracing::debug!(
            "Generating answer with {} ({} bytes of context)",
            self.model,
            context.len()
        );

        let mut variables = HashMap::new();
        variables.insert("context".to_string(), context.to_string());
        variables.insert("question".to_string(), question.to_string());
        let prompt = render(&self.prompt, &variables)?;

        let mut request = LlmRequest::new(prompt, &self.model);
        if let Some(temperature) = self.prompt.temperature {
            request = request.with_temperature(temperature);
        }

        let response = self.client.complete(&request).await?;
        tracing::info!("Answer generated ({} chars)", response.content.len());

        Ok(response.content)
    }
}
