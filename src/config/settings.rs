//! Configuration settings for the research assistant.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub llm: LlmSettings,
    pub tools: ToolSettings,
    pub server: ServerSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Language model provider type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI chat completions.
    OpenAI,
    /// Anthropic through its OpenAI-compatible endpoint.
    #[default]
    Anthropic,
}

impl LlmProvider {
    /// Base URL used when no explicit `api_base` is configured.
    pub fn default_api_base(&self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "https://api.openai.com/v1",
            LlmProvider::Anthropic => "https://api.anthropic.com/v1",
        }
    }

    /// Environment variable holding the provider's API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "OPENAI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

impl std::str::FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LlmProvider::OpenAI),
            "anthropic" | "claude" => Ok(LlmProvider::Anthropic),
            _ => Err(format!("Unknown LLM provider: {}", s)),
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProvider::OpenAI => write!(f, "openai"),
            LlmProvider::Anthropic => write!(f, "anthropic"),
        }
    }
}

/// Language model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Provider (openai, anthropic).
    pub provider: LlmProvider,
    /// Model used by the research agent.
    pub model: String,
    /// API key. Filled from the provider's environment variable when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Override for the provider base URL.
    pub api_base: Option<String>,
    /// HTTP timeout for a single model request, in seconds.
    pub timeout_secs: u64,
    /// Maximum number of model calls in one agent run.
    pub max_iterations: usize,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Anthropic,
            model: "claude-3-5-sonnet-20241022".to_string(),
            api_key: None,
            api_base: None,
            timeout_secs: 300,
            max_iterations: 15,
        }
    }
}

impl LlmSettings {
    /// Base URL for the configured provider.
    pub fn api_base(&self) -> String {
        self.api_base
            .clone()
            .unwrap_or_else(|| self.provider.default_api_base().to_string())
    }

    /// Whether a non-empty API key is available.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }
}

/// Tool adapter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Enable the web search tool.
    pub enable_search: bool,
    /// Enable the Wikipedia lookup tool.
    pub enable_wikipedia: bool,
    /// Enable the save-to-file tool.
    pub enable_save: bool,
    /// DuckDuckGo Instant Answer endpoint.
    pub search_endpoint: String,
    /// Maximum related topics returned by a search.
    pub search_max_results: usize,
    /// Wikipedia site root (MediaWiki API and REST summaries live below it).
    pub wikipedia_endpoint: String,
    /// Number of Wikipedia pages summarized per lookup.
    pub wikipedia_top_k: usize,
    /// Maximum characters returned by a Wikipedia lookup.
    pub wikipedia_max_chars: usize,
    /// File the save tool appends to.
    pub save_path: String,
    /// HTTP timeout for tool requests, in seconds.
    pub timeout_secs: u64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            enable_search: true,
            enable_wikipedia: true,
            enable_save: true,
            search_endpoint: "https://api.duckduckgo.com/".to_string(),
            search_max_results: 5,
            wikipedia_endpoint: "https://en.wikipedia.org".to_string(),
            wikipedia_top_k: 1,
            wikipedia_max_chars: 100,
            save_path: "research_output.txt".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Web form server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Page title shown in the browser tab.
    pub page_title: String,
    /// Heading shown on the page.
    pub heading: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            page_title: "Research Assistant".to_string(),
            heading: "AI-Powered Research Assistant".to_string(),
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    ///
    /// Provider credentials are resolved here, once, so nothing downstream
    /// reads the environment.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let mut settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str::<Settings>(&content)?
        } else {
            Settings::default()
        };

        settings.resolve_credentials(|name| std::env::var(name).ok());
        Ok(settings)
    }

    /// Fill the API key from the environment when the file doesn't set one.
    pub fn resolve_credentials<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if !self.llm.has_api_key() {
            self.llm.api_key = lookup(self.llm.provider.api_key_env()).filter(|k| !k.is_empty());
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = self.to_toml()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Serialize to TOML without the API key.
    pub fn to_toml(&self) -> crate::error::Result<String> {
        let mut redacted = self.clone();
        redacted.llm.api_key = None;
        toml::to_string_pretty(&redacted)
            .map_err(|e| crate::error::ResearchError::Config(e.to_string()))
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("research")
            .join("config.toml")
    }

    /// The `--config` path when given, otherwise the default location.
    pub fn config_path(explicit: Option<&str>) -> PathBuf {
        explicit
            .map(Self::expand_path)
            .unwrap_or_else(Self::default_config_path)
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded save tool output path.
    pub fn save_path(&self) -> PathBuf {
        Self::expand_path(&self.tools.save_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [llm]
            provider = "openai"
            model = "gpt-4o-mini"
            "#,
        )
        .unwrap();

        assert_eq!(settings.llm.provider, LlmProvider::OpenAI);
        assert_eq!(settings.llm.model, "gpt-4o-mini");
        assert_eq!(settings.llm.max_iterations, 15);
        assert!(settings.tools.enable_search);
        assert_eq!(settings.tools.wikipedia_max_chars, 100);
    }

    #[test]
    fn test_resolve_credentials_uses_provider_env() {
        let mut settings = Settings::default();
        settings.resolve_credentials(|name| {
            (name == "ANTHROPIC_API_KEY").then(|| "sk-ant-test".to_string())
        });
        assert_eq!(settings.llm.api_key.as_deref(), Some("sk-ant-test"));
    }

    #[test]
    fn test_resolve_credentials_keeps_explicit_key() {
        let mut settings = Settings::default();
        settings.llm.api_key = Some("from-file".to_string());
        settings.resolve_credentials(|_| Some("from-env".to_string()));
        assert_eq!(settings.llm.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_empty_env_key_is_absent() {
        let mut settings = Settings::default();
        settings.resolve_credentials(|_| Some(String::new()));
        assert!(!settings.llm.has_api_key());
    }

    #[test]
    fn test_api_base_override() {
        let mut llm = LlmSettings::default();
        assert_eq!(llm.api_base(), "https://api.anthropic.com/v1");
        llm.api_base = Some("http://localhost:11434/v1".to_string());
        assert_eq!(llm.api_base(), "http://localhost:11434/v1");
    }

    #[test]
    fn test_config_path_prefers_explicit() {
        assert_eq!(
            Settings::config_path(Some("/tmp/research.toml")),
            PathBuf::from("/tmp/research.toml")
        );
        assert_eq!(Settings::config_path(None), Settings::default_config_path());
    }

    #[test]
    fn test_to_toml_redacts_key() {
        let mut settings = Settings::default();
        settings.llm.api_key = Some("secret".to_string());
        let out = settings.to_toml().unwrap();
        assert!(!out.contains("secret"));
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!("OpenAI".parse::<LlmProvider>().unwrap(), LlmProvider::OpenAI);
        assert_eq!("claude".parse::<LlmProvider>().unwrap(), LlmProvider::Anthropic);
        assert!("mistral".parse::<LlmProvider>().is_err());
    }
}
