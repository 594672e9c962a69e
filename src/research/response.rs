//! Structured research response and its parser.

use crate::error::{ResearchError, Result};
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The structured answer to a research query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResearchResponse {
    /// Short name of the researched topic.
    pub topic: String,
    /// Prose summary of the findings.
    pub summary: String,
    /// Sources consulted, most relevant first.
    pub sources: Vec<String>,
    /// Names of the tools the agent used.
    pub tools_used: Vec<String>,
}

impl ResearchResponse {
    /// Comma-joined tool names.
    pub fn tools_line(&self) -> String {
        self.tools_used.join(", ")
    }

    /// Plain-text report offered as `research_report.txt`.
    pub fn to_report(&self) -> String {
        let sources = self
            .sources
            .iter()
            .map(|s| format!("- {}", s))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Research Report\n\nTopic:\n{}\n\nSummary:\n{}\n\nSources:\n{}\n\nTools Used:\n{}\n",
            self.topic,
            self.summary,
            sources,
            self.tools_line()
        )
    }
}

/// Parses model output into a [`ResearchResponse`].
pub struct ResponseParser {
    fence_regex: Regex,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseParser {
    pub fn new() -> Self {
        // First fenced block, with or without a language tag
        let fence_regex = Regex::new(r"(?s)```[a-zA-Z]*\s*\n?(.*?)```").expect("Invalid regex");
        Self { fence_regex }
    }

    /// Instructions embedded in the prompt so the model answers in the schema.
    pub fn format_instructions(&self) -> String {
        let mut schema = serde_json::to_value(schemars::schema_for!(ResearchResponse))
            .unwrap_or_else(|_| serde_json::json!({}));
        if let Some(obj) = schema.as_object_mut() {
            obj.remove("$schema");
            obj.remove("title");
        }

        format!(
            "The output must be a single JSON object that conforms to the JSON schema below. \
Every property listed under \"required\" must be present with the declared type.\n\n\
For the schema {{\"properties\": {{\"foo\": {{\"type\": \"array\", \"items\": {{\"type\": \"string\"}}}}}}, \"required\": [\"foo\"]}}\n\
the object {{\"foo\": [\"bar\", \"baz\"]}} is well formatted, while {{\"properties\": {{\"foo\": [\"bar\", \"baz\"]}}}} is not.\n\n\
Here is the output schema:\n```\n{}\n```",
            schema
        )
    }

    /// Parse model text into a response. Missing or mistyped fields fail the parse.
    ///
    /// The whole text is tried as JSON first, so string values containing
    /// backtick fences are not mistaken for a fenced block.
    pub fn parse(&self, text: &str) -> Result<ResearchResponse> {
        if let Ok(response) = serde_json::from_str(text.trim()) {
            return Ok(response);
        }

        let candidate = self.extract_json(text).ok_or_else(|| ResearchError::Parse {
            message: "no JSON object found".to_string(),
            completion: text.to_string(),
        })?;

        serde_json::from_str(candidate).map_err(|e| ResearchError::Parse {
            message: e.to_string(),
            completion: text.to_string(),
        })
    }

    fn extract_json<'a>(&self, text: &'a str) -> Option<&'a str> {
        let body = match self.fence_regex.captures(text).and_then(|c| c.get(1)) {
            Some(m) => m.as_str(),
            None => text,
        };

        let start = body.find('{')?;
        let end = body.rfind('}')?;
        (start < end).then(|| &body[start..=end])
    }
}

/// Parse model text with a default parser.
pub fn parse_research_response(text: &str) -> Result<ResearchResponse> {
    ResponseParser::new().parse(text)
}
