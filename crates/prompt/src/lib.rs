//! Prompt system for docseek.
//!
//! - Built-in prompt definitions for keyword extraction and grounded answering
//! - Per-workspace YAML overrides in `.docseek/prompts/<id>.yml`
//! - Handlebars rendering

pub mod builder;
pub mod builtin;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::render;
pub use builtin::{
    answer_prompt, builtin_prompt, keywords_prompt, BUILTIN_IDS, KEYWORDS_EXTRACT, QA_ANSWER,
};
pub use loader::{list_prompts, load_prompt};
pub use types::{PromptDefinition, PromptInfo, PromptOrigin};
