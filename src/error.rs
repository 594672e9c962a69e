//! Error types for the research assistant.

use thiserror::Error;

/// Library-level error type for research operations.
#[derive(Error, Debug)]
pub enum ResearchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model provider error: {0}")]
    Provider(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Tool '{tool}' failed: {message}")]
    Tool { tool: String, message: String },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Failed to parse research response: {message}\nCompletion: {completion}")]
    Parse { message: String, completion: String },

    #[error("Agent produced no text output")]
    EmptyOutput,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ResearchError {
    /// Build a tool failure for the named tool.
    pub fn tool(tool: &str, message: impl Into<String>) -> Self {
        ResearchError::Tool {
            tool: tool.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for research operations.
pub type Result<T> = std::result::Result<T, ResearchError>;
