//! Web search through the DuckDuckGo Instant Answer API.

use super::{parse_args, query_parameters, QueryArgs, Tool};
use crate::error::{ResearchError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

/// Web search tool.
pub struct SearchTool {
    http: reqwest::Client,
    endpoint: String,
    max_results: usize,
}

impl SearchTool {
    pub fn new(http: reqwest::Client, endpoint: &str, max_results: usize) -> Self {
        Self {
            http,
            endpoint: endpoint.to_string(),
            max_results,
        }
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<String> {
        let url = url::Url::parse_with_params(
            &self.endpoint,
            &[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ],
        )
        .map_err(|e| ResearchError::tool("search", format!("bad endpoint: {}", e)))?;

        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let answer: InstantAnswer = serde_json::from_str(&body)
            .map_err(|e| ResearchError::tool("search", format!("unexpected response: {}", e)))?;

        debug!("Search returned {} related topics", answer.related_topics.len());
        Ok(format_instant_answer(query, &answer, self.max_results))
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        "search"
    }

    fn description(&self) -> &str {
        "Search the web for information"
    }

    fn parameters(&self) -> serde_json::Value {
        query_parameters()
    }

    async fn call(&self, args: serde_json::Value) -> Result<String> {
        let args: QueryArgs = parse_args(self.name(), args)?;
        self.search(&args.query).await
    }
}

/// Subset of the Instant Answer payload.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct InstantAnswer {
    heading: String,
    abstract_text: String,
    #[serde(rename = "AbstractURL")]
    abstract_url: String,
    /// Usually a string, but some instant answers are objects.
    answer: serde_json::Value,
    definition: String,
    #[serde(rename = "DefinitionURL")]
    definition_url: String,
    results: Vec<RelatedTopic>,
    related_topics: Vec<RelatedTopic>,
}

/// A related topic, or a named group of them.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct RelatedTopic {
    text: String,
    #[serde(rename = "FirstURL")]
    first_url: String,
    topics: Vec<RelatedTopic>,
}

impl RelatedTopic {
    fn flatten<'a>(&'a self, out: &mut Vec<&'a RelatedTopic>) {
        if !self.text.is_empty() {
            out.push(self);
        }
        for topic in &self.topics {
            topic.flatten(out);
        }
    }
}

fn format_instant_answer(query: &str, answer: &InstantAnswer, max_results: usize) -> String {
    let mut lines = Vec::new();

    if let Some(direct) = answer.answer.as_str().filter(|a| !a.is_empty()) {
        lines.push(direct.to_string());
    }

    if !answer.abstract_text.is_empty() {
        let heading: &str = if answer.heading.is_empty() {
            query
        } else {
            &answer.heading
        };
        lines.push(format!(
            "{}: {} ({})",
            heading, answer.abstract_text, answer.abstract_url
        ));
    } else if !answer.definition.is_empty() {
        lines.push(format!("{} ({})", answer.definition, answer.definition_url));
    }

    let mut topics = Vec::new();
    for topic in answer.results.iter().chain(&answer.related_topics) {
        topic.flatten(&mut topics);
    }
    for topic in topics.into_iter().take(max_results) {
        lines.push(format!("- {} ({})", topic.text, topic.first_url));
    }

    if lines.is_empty() {
        format!("No results found for '{}'.", query)
    } else {
        lines.join("\n")
    }
}
