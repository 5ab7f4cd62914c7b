//! Prompt types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A prompt definition, either built in or loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Unique prompt identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// API version for schema evolution
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Template string with Handlebars syntax
    pub template: String,

    /// Sampling temperature to request, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Where a prompt definition came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOrigin {
    BuiltIn,
    Override(PathBuf),
}

impl fmt::Display for PromptOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuiltIn => write!(f, "built-in"),
            Self::Override(path) => write!(f, "override ({})", path.display()),
        }
    }
}

/// A prompt id together with its origin, as listed by `list_prompts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptInfo {
    pub id: String,
    pub origin: PromptOrigin,
}
