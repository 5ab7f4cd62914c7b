//! Prompt rendering.

use crate::types::PromptDefinition;
use docseek_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;

/// Render `definition` with `variables`.
///
/// HTML escaping is disabled: document text and questions are inserted
/// verbatim. Missing variables render as empty strings.
///
/// # Example
/// ```
/// use docseek_prompt::{builtin_prompt, render, QA_ANSWER};
/// use std::collections::HashMap;
///
/// let def = builtin_prompt(QA_ANSWER).unwrap();
/// let mut vars = HashMap::new();
/// vars.insert("context".to_string(), "Doc 1\n---\nA\n\n".to_string());
/// vars.insert("question".to_string(), "What is A?".to_string());
///
/// let prompt = render(&def, &vars).unwrap();
/// assert!(prompt.ends_with("Question: What is A?"));
/// ```
pub fn render(definition: &PromptDefinition, variables: &HashMap<String, String>) -> AppResult<String> {
    tracing::debug!("Rendering prompt: {}", definition.id);

    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string(&definition.id, &definition.template)
        .map_err(|e| {
            AppError::Prompt(format!(
                "Failed to register template '{}': {}",
                definition.id, e
            ))
        })?;

    handlebars
        .render(&definition.id, variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render '{}': {}", definition.id, e)))
}
