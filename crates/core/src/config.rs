//! Configuration management for docseek.
//!
//! Configuration is merged from several sources, later sources winning:
//! - Built-in defaults
//! - A YAML config file (`--config`, `DOCSEEK_CONFIG`, or `.docseek/config.yaml`)
//! - Environment variables
//! - Command-line flags
//!
//! Every value a component needs (model, endpoint, search program, top-K...)
//! is carried here and handed to the component when it is constructed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Providers `create_client` knows how to build.
pub const KNOWN_PROVIDERS: [&str; 1] = ["ollama"];

/// Default Ollama endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default generation model.
pub const DEFAULT_MODEL: &str = "zephyr:7b-beta-q5_K_M";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Workspace root (may contain `.docseek/`)
    pub workspace: PathBuf,

    /// Config file that was merged, if any
    pub config_file: Option<PathBuf>,

    /// LLM provider name (e.g. "ollama")
    pub provider: String,

    /// Base URL of the generation backend
    pub endpoint: String,

    /// Model used to answer questions
    pub model: String,

    /// Model used for keyword extraction; falls back to `model`
    pub keyword_model: Option<String>,

    /// Request timeout in seconds for the generation backend
    pub timeout_secs: Option<u64>,

    /// External search facility settings
    pub search: SearchConfig,

    /// Orchestrator settings
    pub pipeline: PipelineConfig,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// How the indexed-search facility is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Executable name or path (Spotlight's `mdfind` by default)
    pub program: String,

    /// Flag that restricts the search to a directory
    pub scope_flag: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            program: "mdfind".to_string(),
            scope_flag: "-onlyin".to_string(),
        }
    }
}

/// What the document loader does when a file cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPolicy {
    /// Fail the whole batch on the first unreadable file
    #[default]
    Abort,
    /// Log the failure and keep the remaining documents
    Skip,
}

/// Orchestrator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Number of leading search hits that are loaded as context
    pub top_k: usize,

    /// Label used when numbering documents in the context block
    pub label: String,

    /// Behavior on unreadable documents
    pub load_policy: LoadPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            label: "Candidate".to_string(),
            load_policy: LoadPolicy::Abort,
        }
    }
}

/// Values supplied on the command line. `None` leaves the loaded value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub workspace: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub log_level: Option<String>,
    pub verbose: bool,
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    llm: Option<LlmSection>,
    search: Option<SearchSection>,
    pipeline: Option<PipelineSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LlmSection {
    active_provider: String,
    #[serde(default)]
    providers: HashMap<String, ProviderSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderSection {
    endpoint: Option<String>,
    model: Option<String>,
    keyword_model: Option<String>,
    timeout: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchSection {
    program: Option<String>,
    scope_flag: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PipelineSection {
    top_k: Option<usize>,
    label: Option<String>,
    load_policy: Option<LoadPolicy>,
}

#[derive(Debug, Clone, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "ollama".to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            keyword_model: None,
            timeout_secs: None,
            search: SearchConfig::default(),
            pipeline: PipelineConfig::default(),
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file, the environment,
    /// and finally `overrides`.
    ///
    /// Environment variables:
    /// - `DOCSEEK_WORKSPACE`: Workspace path
    /// - `DOCSEEK_CONFIG`: Path to config file
    /// - `DOCSEEK_PROVIDER`: LLM provider
    /// - `DOCSEEK_MODEL`: Model identifier
    /// - `DOCSEEK_ENDPOINT`: Backend URL
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load(overrides: ConfigOverrides) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) = overrides
            .workspace
            .clone()
            .or_else(|| std::env::var_os("DOCSEEK_WORKSPACE").map(PathBuf::from))
        {
            config.workspace = workspace;
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let explicit_file = overrides
            .config_file
            .clone()
            .or_else(|| std::env::var_os("DOCSEEK_CONFIG").map(PathBuf::from));

        match explicit_file {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "Config file not found: {:?}",
                        path
                    )));
                }
                config = config.merge_yaml(&path)?;
            }
            None => {
                let default_path = config.docseek_dir().join("config.yaml");
                if default_path.exists() {
                    config = config.merge_yaml(&default_path)?;
                }
            }
        }

        // Environment variables override the config file
        if let Ok(provider) = std::env::var("DOCSEEK_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("DOCSEEK_MODEL") {
            config.model = model;
        }

        if let Ok(endpoint) = std::env::var("DOCSEEK_ENDPOINT") {
            config.endpoint = endpoint;
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var_os("NO_COLOR").is_some() {
            config.no_color = true;
        }

        Ok(config.with_overrides(overrides))
    }

    /// Merge a YAML configuration file into a copy of this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone().merge_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;
        result.config_file = Some(path.to_path_buf());

        tracing::debug!("Merged config file {:?}", path);
        Ok(result)
    }

    fn merge_str(mut self, contents: &str) -> AppResult<Self> {
        let file: ConfigFile = serde_yaml::from_str(contents)?;

        if let Some(llm) = file.llm {
            if let Some(provider) = llm.providers.get(&llm.active_provider) {
                if let Some(endpoint) = &provider.endpoint {
                    self.endpoint = endpoint.clone();
                }
                if let Some(model) = &provider.model {
                    self.model = model.clone();
                }
                if provider.keyword_model.is_some() {
                    self.keyword_model = provider.keyword_model.clone();
                }
                if provider.timeout.is_some() {
                    self.timeout_secs = provider.timeout;
                }
            }
            self.provider = llm.active_provider;
        }

        if let Some(search) = file.search {
            if let Some(program) = search.program {
                self.search.program = program;
            }
            if let Some(scope_flag) = search.scope_flag {
                self.search.scope_flag = scope_flag;
            }
        }

        if let Some(pipeline) = file.pipeline {
            if let Some(top_k) = pipeline.top_k {
                self.pipeline.top_k = top_k;
            }
            if let Some(label) = pipeline.label {
                self.pipeline.label = label;
            }
            if let Some(policy) = pipeline.load_policy {
                self.pipeline.load_policy = policy;
            }
        }

        if let Some(logging) = file.logging {
            if logging.level.is_some() {
                self.log_level = logging.level;
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
        }

        Ok(self)
    }

    /// Apply command-line overrides. Flags take precedence over everything else.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(workspace) = overrides.workspace {
            self.workspace = workspace;
        }

        if let Some(provider) = overrides.provider {
            self.provider = provider;
        }

        if let Some(model) = overrides.model {
            self.model = model;
        }

        if let Some(endpoint) = overrides.endpoint {
            self.endpoint = endpoint;
        }

        if overrides.verbose {
            self.verbose = true;
            // Verbose beats RUST_LOG and the config file, not --log-level
            self.log_level = Some("debug".to_string());
        }

        if let Some(log_level) = overrides.log_level {
            self.log_level = Some(log_level);
        }

        if overrides.no_color {
            self.no_color = true;
        }

        self
    }

    /// Path to the `.docseek` directory of the workspace.
    pub fn docseek_dir(&self) -> PathBuf {
        self.workspace.join(".docseek")
    }

    /// Model used for keyword extraction.
    pub fn keyword_model(&self) -> &str {
        self.keyword_model.as_deref().unwrap_or(&self.model)
    }

    /// Validate the merged configuration.
    pub fn validate(&self) -> AppResult<()> {
        if !KNOWN_PROVIDERS.contains(&self.provider.to_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if self.model.trim().is_empty() {
            return Err(AppError::Config("Model name cannot be empty".to_string()));
        }

        if self.search.program.trim().is_empty() {
            return Err(AppError::Config(
                "Search program cannot be empty".to_string(),
            ));
        }

        if self.pipeline.top_k == 0 {
            return Err(AppError::Config("pipeline.topK must be at least 1".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.provider, "ollama");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.search.program, "mdfind");
        assert_eq!(config.pipeline.top_k, 3);
        assert_eq!(config.pipeline.label, "Candidate");
        assert_eq!(config.pipeline.load_policy, LoadPolicy::Abort);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_yaml_sections() {
        let yaml = r#"
llm:
  activeProvider: ollama
  providers:
    ollama:
      endpoint: http://gpu-box:11434
      model: llama3.2
      keywordModel: phi3
      timeout: 90
search:
  program: /usr/local/bin/search
pipeline:
  topK: 5
  label: Resume
  loadPolicy: skip
logging:
  level: warn
  color: false
"#;
        let config = AppConfig::default().merge_str(yaml).unwrap();

        assert_eq!(config.endpoint, "http://gpu-box:11434");
        assert_eq!(config.model, "llama3.2");
        assert_eq!(config.keyword_model(), "phi3");
        assert_eq!(config.timeout_secs, Some(90));
        assert_eq!(config.search.program, "/usr/local/bin/search");
        assert_eq!(config.search.scope_flag, "-onlyin");
        assert_eq!(config.pipeline.top_k, 5);
        assert_eq!(config.pipeline.label, "Resume");
        assert_eq!(config.pipeline.load_policy, LoadPolicy::Skip);
        assert_eq!(config.log_level.as_deref(), Some("warn"));
        assert!(config.no_color);
    }

    #[test]
    fn test_keyword_model_falls_back_to_model() {
        let config = AppConfig::default();
        assert_eq!(config.keyword_model(), DEFAULT_MODEL);
    }

    #[test]
    fn test_merge_yaml_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "pipeline:\n  topK: 7\n").unwrap();

        let config = AppConfig::default().merge_yaml(&path).unwrap();
        assert_eq!(config.pipeline.top_k, 7);
        assert_eq!(config.config_file.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "pipeline: [unclosed").unwrap();

        let result = AppConfig::default().merge_yaml(&path);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default().with_overrides(ConfigOverrides {
            model: Some("mistral".to_string()),
            endpoint: Some("http://127.0.0.1:9000".to_string()),
            verbose: true,
            ..Default::default()
        });

        assert_eq!(config.model, "mistral");
        assert_eq!(config.endpoint, "http://127.0.0.1:9000");
        assert!(config.verbose);
        assert_eq!(config.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_verbose_overrides_loaded_level() {
        let mut config = AppConfig::default();
        config.log_level = Some("warn".to_string());

        let config = config.with_overrides(ConfigOverrides {
            verbose: true,
            ..Default::default()
        });
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_explicit_log_level_beats_verbose() {
        let config = AppConfig::default().with_overrides(ConfigOverrides {
            log_level: Some("trace".to_string()),
            verbose: true,
            ..Default::default()
        });
        assert_eq!(config.log_level.as_deref(), Some("trace"));
        assert!(config.verbose);
    }

    #[test]
    fn test_validate_unknown_provider() {
        let mut config = AppConfig::default();
        config.provider = "unknown".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_top_k() {
        let mut config = AppConfig::default();
        config.pipeline.top_k = 0;
        assert!(config.validate().is_err());
    }
}
