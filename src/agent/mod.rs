//! Agent execution with tool calling.
//!
//! The research engine treats the agent as a black box: it hands over a
//! rendered prompt and a set of tools, and gets back the final text.
//! [`Agent`] is the OpenAI-compatible implementation; tests plug in their own.

mod runner;

pub use runner::Agent;

use crate::error::Result;
use crate::research::ResearchPrompt;
use crate::tools::ToolSet;
use async_trait::async_trait;

/// Executes a prompt with access to tools and returns the final answer.
#[async_trait]
pub trait AgentExecutor: Send + Sync {
    async fn execute(&self, prompt: &ResearchPrompt, tools: &ToolSet) -> Result<AgentOutput>;
}

/// Output of an agent run.
#[derive(Debug, Clone, Default)]
pub struct AgentOutput {
    /// Text segments of the final answer, in order.
    pub segments: Vec<String>,
    /// Record of all tool calls made during execution.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of iterations (LLM calls) used.
    pub iterations: usize,
}

impl AgentOutput {
    /// Output holding a single text segment.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            segments: vec![content.into()],
            ..Self::default()
        }
    }

    /// The first text segment, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Name of the tool called.
    pub name: String,
    /// JSON arguments passed to the tool.
    pub arguments: String,
    /// Result returned by the tool.
    pub result: String,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_call_record_display() {
        let record = ToolCallRecord {
            name: "search".to_string(),
            arguments: r#"{"query": "test"}"#.to_string(),
            result: "Found results".to_string(),
        };
        assert_eq!(format!("{}", record), r#"search({"query": "test"})"#);
    }

    #[test]
    fn test_first_text() {
        assert_eq!(AgentOutput::text("answer").first_text(), Some("answer"));
        assert_eq!(AgentOutput::default().first_text(), None);
    }
}
