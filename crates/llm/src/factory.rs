//! LLM provider factory.
//!
//! Builds a concrete [`LlmClient`] from the provider name and connection
//! settings carried in `AppConfig`.

use crate::client::LlmClient;
use crate::providers::OllamaClient;
use docseek_core::{AppConfig, AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;

/// Create an LLM client for `provider`.
///
/// # Arguments
/// * `provider` - Provider identifier ("ollama")
/// * `endpoint` - Base URL of the backend
/// * `timeout` - Optional per-request timeout
///
/// # Errors
/// Returns `Config` if the provider is unknown or the client cannot be built.
pub fn create_client(
    provider: &str,
    endpoint: &str,
    timeout: Option<Duration>,
) -> AppResult<Arc<dyn LlmClient>> {
    match provider.to_lowercase().as_str() {
        "ollama" => {
            let client = match timeout {
                Some(timeout) => OllamaClient::with_timeout(endpoint, timeout)?,
                None => OllamaClient::with_base_url(endpoint),
            };
            tracing::debug!("Created Ollama client for {}", client.base_url());
            Ok(Arc::new(client))
        }
        _ => Err(AppError::Config(format!("Unknown provider: {}", provider))),
    }
}

/// Create the client described by `config`.
pub fn client_from_config(config: &AppConfig) -> AppResult<Arc<dyn LlmClient>> {
    create_client(
        &config.provider,
        &config.endpoint,
        config.timeout_secs.map(Duration::from_secs),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_ollama_client() {
        let client = create_client("ollama", "http://localhost:11434", None).unwrap();
        assert_eq!(client.provider_name(), "ollama");
    }

    #[test]
    fn test_create_ollama_with_timeout() {
        let client = create_client("Ollama", "http://localhost:8080", Some(Duration::from_secs(3)));
        assert!(client.is_ok());
    }

    #[test]
    fn test_unknown_provider() {
        match create_client("unknown", "http://localhost", None) {
            Err(AppError::Config(msg)) => assert!(msg.contains("Unknown provider")),
            Err(other) => panic!("Unexpected error: {}", other),
            Ok(_) => panic!("Expected error for unknown provider"),
        }
    }

    #[test]
    fn test_client_from_default_config() {
        let client = client_from_config(&AppConfig::default()).unwrap();
        assert_eq!(client.provider_name(), "ollama");
    }
}
