//! Research orchestration shared by every front end.

use super::{ResearchPrompt, ResearchResponse, ResponseParser};
use crate::agent::{Agent, AgentExecutor};
use crate::config::{Prompts, Settings};
use crate::error::{ResearchError, Result};
use crate::tools::ToolSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Runs one research query end to end: prompt, agent, parse.
///
/// The engine holds no per-query state, so it can be shared behind an `Arc`.
pub struct ResearchEngine {
    executor: Arc<dyn AgentExecutor>,
    tools: ToolSet,
    prompts: Prompts,
    parser: ResponseParser,
}

impl ResearchEngine {
    /// Create an engine from its collaborators.
    pub fn new(executor: Arc<dyn AgentExecutor>, tools: ToolSet, prompts: Prompts) -> Self {
        Self {
            executor,
            tools,
            prompts,
            parser: ResponseParser::new(),
        }
    }

    /// Build the OpenAI-compatible agent, the tool set and prompts from settings.
    pub fn from_settings(settings: &Settings, model: Option<&str>) -> Result<Self> {
        let mut agent = Agent::new(&settings.llm)?;
        if let Some(model) = model {
            agent = agent.with_model(model);
        }

        let tools = ToolSet::from_settings(&settings.tools, settings.save_path())?;
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        info!(
            "Research engine ready: provider={}, model={}, tools={:?}",
            settings.llm.provider,
            agent.model(),
            tools.names()
        );

        Ok(Self::new(Arc::new(agent), tools, prompts))
    }

    /// Names of the tools offered to the agent.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.names()
    }

    /// Run a query and parse the agent's answer.
    ///
    /// Executor errors propagate unchanged; there is no retry and no partial result.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn research(&self, query: &str) -> Result<ResearchResponse> {
        let prompt = ResearchPrompt::render(
            &self.prompts,
            &self.parser.format_instructions(),
            query,
        );

        let output = self.executor.execute(&prompt, &self.tools).await?;
        debug!(
            "Agent finished after {} iteration(s) and {} tool call(s)",
            output.iterations,
            output.tool_calls.len()
        );

        let text = output.first_text().ok_or(ResearchError::EmptyOutput)?;
        self.parser.parse(text)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::agent::AgentOutput;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    pub(crate) const QUANTUM: &str = r#"{"topic": "Quantum Computing", "summary": "...", "sources": ["https://example.org/a"], "tools_used": ["search"]}"#;

    /// Deterministic executor returning a fixed result.
    pub(crate) struct MockExecutor {
        reply: std::result::Result<AgentOutput, String>,
        pub calls: AtomicUsize,
        pub last_prompt: Mutex<Option<ResearchPrompt>>,
    }

    impl MockExecutor {
        pub(crate) fn replying(text: &str) -> Self {
            Self::with(Ok(AgentOutput::text(text)))
        }

        pub(crate) fn failing(message: &str) -> Self {
            Self::with(Err(message.to_string()))
        }

        pub(crate) fn with(reply: std::result::Result<AgentOutput, String>) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl AgentExecutor for MockExecutor {
        async fn execute(&self, prompt: &ResearchPrompt, _tools: &ToolSet) -> Result<AgentOutput> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.clone());
            self.reply
                .clone()
                .map_err(ResearchError::Provider)
        }
    }

    fn engine(executor: Arc<MockExecutor>) -> ResearchEngine {
        ResearchEngine::new(executor, ToolSet::new(), Prompts::default())
    }

    #[tokio::test]
    async fn test_research_parses_fields_verbatim() {
        let executor = Arc::new(MockExecutor::replying(QUANTUM));
        let response = engine(executor.clone())
            .research("quantum computing basics")
            .await
            .unwrap();

        assert_eq!(response.topic, "Quantum Computing");
        assert_eq!(response.summary, "...");
        assert_eq!(response.sources, vec!["https://example.org/a"]);
        assert_eq!(response.tools_used, vec!["search"]);
        assert_eq!(executor.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_prompt_carries_query_and_schema() {
        let executor = Arc::new(MockExecutor::replying(QUANTUM));
        engine(executor.clone()).research("black holes").await.unwrap();

        let prompt = executor.last_prompt.lock().unwrap().clone().unwrap();
        assert_eq!(prompt.query, "black holes");
        assert!(prompt.chat_history.is_empty());
        assert!(prompt.system.contains("tools_used"));
        assert!(!prompt.system.contains("{{format_instructions}}"));
    }

    #[tokio::test]
    async fn test_missing_field_fails() {
        let executor = Arc::new(MockExecutor::replying(
            r#"{"topic": "T", "summary": "S", "tools_used": []}"#,
        ));
        let err = engine(executor).research("q").await.unwrap_err();
        assert!(matches!(err, ResearchError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_executor_error_propagates_unchanged() {
        let executor = Arc::new(MockExecutor::failing("connection refused"));
        let err = engine(executor).research("q").await.unwrap_err();
        assert!(matches!(err, ResearchError::Provider(msg) if msg == "connection refused"));
    }

    #[tokio::test]
    async fn test_no_segments_is_empty_output() {
        let executor = Arc::new(MockExecutor::with(Ok(AgentOutput::default())));
        let err = engine(executor).research("q").await.unwrap_err();
        assert!(matches!(err, ResearchError::EmptyOutput));
    }

    #[tokio::test]
    async fn test_only_first_segment_is_parsed() {
        let output = AgentOutput {
            segments: vec![QUANTUM.to_string(), "trailing chatter".to_string()],
            ..AgentOutput::default()
        };
        let executor = Arc::new(MockExecutor::with(Ok(output)));
        let response = engine(executor).research("q").await.unwrap();
        assert_eq!(response.topic, "Quantum Computing");
    }

    #[tokio::test]
    async fn test_repeated_queries_are_equal() {
        let executor = Arc::new(MockExecutor::replying(QUANTUM));
        let engine = engine(executor.clone());

        let first = engine.research("quantum computing basics").await.unwrap();
        let second = engine.research("quantum computing basics").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(executor.calls.load(Ordering::SeqCst), 2);
    }
}
