//! Tool adapters exposed to the research agent.
//!
//! Each tool is a named capability with a description and a JSON-schema
//! argument contract. The agent decides which tools to call; a [`ToolSet`]
//! only knows how to describe and dispatch them.

mod save;
mod search;
mod wikipedia;

pub use save::SaveTool;
pub use search::SearchTool;
pub use wikipedia::WikipediaTool;

use crate::config::ToolSettings;
use crate::error::{ResearchError, Result};
use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// A callable capability the agent can invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model uses to call this tool.
    fn name(&self) -> &str;

    /// What the tool does, shown to the model.
    fn description(&self) -> &str;

    /// JSON schema of the arguments object.
    fn parameters(&self) -> serde_json::Value;

    /// Run the tool with parsed arguments.
    async fn call(&self, args: serde_json::Value) -> Result<String>;
}

/// Arguments shared by the lookup tools.
#[derive(Debug, Deserialize)]
pub(crate) struct QueryArgs {
    pub query: String,
}

pub(crate) fn query_parameters() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "The search query"
            }
        },
        "required": ["query"]
    })
}

/// Ordered collection of tools handed to the agent.
#[derive(Clone, Default)]
pub struct ToolSet {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolSet {
    /// Create an empty tool set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. A tool with the same name replaces the earlier one.
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.retain(|t| t.name() != tool.name());
        self.tools.push(tool);
        self
    }

    /// Build the standard search, Wikipedia and save tools from settings.
    pub fn from_settings(settings: &ToolSettings, save_path: PathBuf) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut set = ToolSet::new();
        if settings.enable_search {
            set = set.with_tool(Arc::new(SearchTool::new(
                http.clone(),
                &settings.search_endpoint,
                settings.search_max_results,
            )));
        }
        if settings.enable_wikipedia {
            set = set.with_tool(Arc::new(WikipediaTool::new(
                http,
                &settings.wikipedia_endpoint,
                settings.wikipedia_top_k,
                settings.wikipedia_max_chars,
            )));
        }
        if settings.enable_save {
            set = set.with_tool(Arc::new(SaveTool::new(save_path)));
        }
        Ok(set)
    }

    /// Names of the registered tools, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// OpenAI function definitions for every tool.
    pub fn definitions(&self) -> Vec<ChatCompletionTool> {
        self.tools
            .iter()
            .map(|tool| ChatCompletionTool {
                r#type: ChatCompletionToolType::Function,
                function: FunctionObject {
                    name: tool.name().to_string(),
                    description: Some(tool.description().to_string()),
                    parameters: Some(tool.parameters()),
                    strict: None,
                },
            })
            .collect()
    }

    /// Dispatch a call by name with raw JSON arguments.
    pub async fn call(&self, name: &str, arguments: &str) -> Result<String> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| ResearchError::UnknownTool(name.to_string()))?;

        let args: serde_json::Value = if arguments.trim().is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(arguments)
                .map_err(|e| ResearchError::tool(name, format!("invalid arguments: {}", e)))?
        };

        debug!("Dispatching tool {}", name);
        tool.call(args).await
    }
}

impl std::fmt::Debug for ToolSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Parse tool arguments into a typed struct.
pub(crate) fn parse_args<T: serde::de::DeserializeOwned>(
    tool: &str,
    args: serde_json::Value,
) -> Result<T> {
    serde_json::from_value(args)
        .map_err(|e| ResearchError::tool(tool, format!("invalid arguments: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "echo the query"
        }

        fn parameters(&self) -> serde_json::Value {
            query_parameters()
        }

        async fn call(&self, args: serde_json::Value) -> Result<String> {
            let args: QueryArgs = parse_args(self.name(), args)?;
            Ok(args.query)
        }
    }

    #[tokio::test]
    async fn test_call_dispatches_by_name() {
        let set = ToolSet::new().with_tool(Arc::new(Echo));
        let out = set.call("echo", r#"{"query": "hello"}"#).await.unwrap();
        assert_eq!(out, "hello");
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let set = ToolSet::new().with_tool(Arc::new(Echo));
        let err = set.call("missing", "{}").await.unwrap_err();
        assert!(matches!(err, ResearchError::UnknownTool(name) if name == "missing"));
    }

    #[tokio::test]
    async fn test_missing_argument_is_tool_error() {
        let set = ToolSet::new().with_tool(Arc::new(Echo));
        let err = set.call("echo", "{}").await.unwrap_err();
        assert!(matches!(err, ResearchError::Tool { .. }));
    }

    #[tokio::test]
    async fn test_malformed_arguments_are_tool_error() {
        let set = ToolSet::new().with_tool(Arc::new(Echo));
        let err = set.call("echo", "not json").await.unwrap_err();
        match err {
            ResearchError::Tool { tool, message } => {
                assert_eq!(tool, "echo");
                assert!(message.starts_with("invalid arguments"));
            }
            other => panic!("Expected tool error, got {:?}", other),
        }
    }

    #[test]
    fn test_definitions_and_dedup() {
        let set = ToolSet::new()
            .with_tool(Arc::new(Echo))
            .with_tool(Arc::new(Echo));
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
        assert!(ToolSet::new().is_empty());

        let defs = set.definitions();
        assert_eq!(defs[0].function.name, "echo");
        assert_eq!(defs[0].function.parameters.as_ref().unwrap()["required"][0], "query");
    }

    #[test]
    fn test_from_settings_respects_toggles() {
        let settings = ToolSettings {
            enable_wikipedia: false,
            ..ToolSettings::default()
        };
        let set = ToolSet::from_settings(&settings, PathBuf::from("out.txt")).unwrap();
        assert_eq!(set.names(), vec!["search", "save_text_to_file"]);
    }
}
