//! Encyclopedia lookup against Wikipedia.

use super::{parse_args, query_parameters, QueryArgs, Tool};
use crate::error::{ResearchError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

const NO_RESULT: &str = "No good Wikipedia Search Result was found";

/// Wikipedia lookup tool: searches titles, then summarizes the top pages.
pub struct WikipediaTool {
    http: reqwest::Client,
    endpoint: String,
    top_k: usize,
    max_chars: usize,
}

impl WikipediaTool {
    pub fn new(http: reqwest::Client, endpoint: &str, top_k: usize, max_chars: usize) -> Self {
        Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            top_k: top_k.max(1),
            max_chars,
        }
    }

    #[instrument(skip(self))]
    async fn lookup(&self, query: &str) -> Result<String> {
        let titles = self.search_titles(query).await?;
        if titles.is_empty() {
            return Ok(NO_RESULT.to_string());
        }

        let mut pages = Vec::new();
        for title in &titles {
            match self.summary(title).await {
                Ok(page) => pages.push(page),
                Err(e) => warn!("Skipping Wikipedia page {}: {}", title, e),
            }
        }

        if pages.is_empty() {
            return Ok(NO_RESULT.to_string());
        }

        Ok(truncate_chars(&format_pages(&pages), self.max_chars))
    }

    async fn search_titles(&self, query: &str) -> Result<Vec<String>> {
        let limit = self.top_k.to_string();
        let url = url::Url::parse_with_params(
            &format!("{}/w/api.php", self.endpoint),
            &[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", limit.as_str()),
                ("format", "json"),
            ],
        )
        .map_err(|e| ResearchError::tool("wikipedia", format!("bad endpoint: {}", e)))?;

        let response: SearchResponse = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let titles: Vec<String> = response
            .query
            .search
            .into_iter()
            .take(self.top_k)
            .map(|hit| hit.title)
            .collect();
        debug!("Wikipedia search matched {:?}", titles);
        Ok(titles)
    }

    async fn summary(&self, title: &str) -> Result<PageSummary> {
        let mut url = url::Url::parse(&format!("{}/api/rest_v1/page/summary", self.endpoint))
            .map_err(|e| ResearchError::tool("wikipedia", format!("bad endpoint: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ResearchError::tool("wikipedia", "endpoint cannot be a base URL"))?
            .push(&title.replace(' ', "_"));

        Ok(self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}

#[async_trait]
impl Tool for WikipediaTool {
    fn name(&self) -> &str {
        "wikipedia"
    }

    fn description(&self) -> &str {
        "Look up a topic on Wikipedia"
    }

    fn parameters(&self) -> serde_json::Value {
        query_parameters()
    }

    async fn call(&self, args: serde_json::Value) -> Result<String> {
        let args: QueryArgs = parse_args(self.name(), args)?;
        self.lookup(&args.query).await
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
    query: SearchQuery,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchQuery {
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct PageSummary {
    title: String,
    #[serde(default)]
    extract: String,
}

fn format_pages(pages: &[PageSummary]) -> String {
    pages
        .iter()
        .map(|p| format!("Page: {}\nSummary: {}", p.title, p.extract))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Truncate to at most `max` characters on a char boundary.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
