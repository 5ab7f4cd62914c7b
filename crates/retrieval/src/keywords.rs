//! Keyword extraction.
//!
//! A model picks search terms out of the user's question. The terms must be
//! lifted from the question itself; anything the model invents is discarded.

use crate::parse::{BracketArrayParser, ResponseParser};
use docseek_core::AppResult;
use docseek_llm::{LlmClient, LlmRequest};
use docseek_prompt::{keywords_prompt, render, PromptDefinition};
use std::collections::HashMap;
use std::sync::Arc;

/// Produces search keywords for a query.
#[async_trait::async_trait]
pub trait KeywordExtractor: Send + Sync {
    /// Ordered keywords, each a case-insensitive substring of `query`.
    /// May be empty. Duplicates are preserved.
    async fn extract(&self, query: &str) -> AppResult<Vec<String>>;
}

/// Keyword extractor backed by a text-generation model.
pub struct LlmKeywordExtractor {
    client: Arc<dyn LlmClient>,
    model: String,
    prompt: PromptDefinition,
    parser: Box<dyn ResponseParser>,
}

impl LlmKeywordExtractor {
    /// Extractor using the built-in prompt and [`BracketArrayParser`].
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            prompt: keywords_prompt(),
            parser: Box::new(BracketArrayParser),
        }
    }

    /// Use a different prompt. It receives the question as `query`.
    pub fn with_prompt(mut self, prompt: PromptDefinition) -> Self {
        self.prompt = prompt;
        self
    }

    /// Use a different response parser.
    pub fn with_parser(mut self, parser: impl ResponseParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }
}

#[async_trait::async_trait]
impl KeywordExtractor for LlmKeywordExtractor {
    async fn extract(&self, query: &str) -> AppResult<Vec<String>> {
        if query.trim().is_empty() {
            tracing::warn!("Empty query, skipping keyword extraction");
            return Ok(Vec::new());
        }

        let mut variables = HashMap::new();
        variables.insert("query".to_string(), query.to_string());
        let prompt = render(&self.prompt, &variables)?;

        let mut request = LlmRequest::new(prompt, &self.model);
        if let Some(temperature) = self.prompt.temperature {
            request = request.with_temperature(temperature);
        }

        let response = self.client.complete(&request).await?;
        tracing::debug!("Raw keyword response: {}", response.content);

        let candidates = self.parser.parse(&response.content)?;
        let keywords = retain_query_terms(query, candidates);

        tracing::info!("Extracted {} keywords: {:?}", keywords.len(), keywords);
        Ok(keywords)
    }
}

/// Keep only keywords that occur in `query`, comparing case-insensitively with
/// whitespace runs collapsed. Surviving keywords are trimmed; order and
/// duplicates are kept.
pub fn retain_query_terms(query: &str, candidates: Vec<String>) -> Vec<String> {
    let haystack = normalize(query);

    candidates
        .into_iter()
        .filter_map(|candidate| {
            let needle = normalize(&candidate);
            if needle.is_empty() {
                tracing::debug!("Dropping empty keyword");
                None
            } else if haystack.contains(&needle) {
                Some(candidate.trim().to_string())
            } else {
                tracing::warn!("Dropping keyword not found in query: {:?}", candidate);
                None
            }
        })
        .collect()
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
