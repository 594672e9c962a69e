//! OpenAI-compatible client configuration.

use crate::config::LlmSettings;
use crate::error::{ResearchError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create a chat client for the configured provider.
///
/// Credentials and base URL come from `settings`; the environment is never consulted here.
pub fn create_client(settings: &LlmSettings) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()
        .map_err(|e| ResearchError::Config(format!("Failed to create HTTP client: {}", e)))?;

    let config = OpenAIConfig::new()
        .with_api_base(settings.api_base())
        .with_api_key(settings.api_key.clone().unwrap_or_default());

    Ok(Client::with_config(config).with_http_client(http_client))
}
