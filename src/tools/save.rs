//! Append research output to a local text file.

use super::{parse_args, Tool};
use crate::error::{ResearchError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Save tool. Every call appends a timestamped block; nothing is overwritten.
pub struct SaveTool {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct SaveArgs {
    data: String,
}

impl SaveTool {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn append(&self, data: &str) -> Result<String> {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let block = format_block(&timestamp.to_string(), data);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                ResearchError::tool("save_text_to_file", format!("{}: {}", self.path.display(), e))
            })?;
        file.write_all(block.as_bytes()).await?;
        file.flush().await?;

        info!("Saved {} bytes of research output to {}", data.len(), self.path.display());
        Ok(format!("Data successfully saved to {}", self.path.display()))
    }
}

#[async_trait]
impl Tool for SaveTool {
    fn name(&self) -> &str {
        "save_text_to_file"
    }

    fn description(&self) -> &str {
        "Saves structured research data to a text file"
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "data": {
                    "type": "string",
                    "description": "The research text to save"
                }
            },
            "required": ["data"]
        })
    }

    async fn call(&self, args: serde_json::Value) -> Result<String> {
        let args: SaveArgs = parse_args(self.name(), args)?;
        self.append(&args.data).await
    }
}

fn format_block(timestamp: &str, data: &str) -> String {
    format!(
        "--- Research Output ---\nTimestamp: {}\n\n{}\n\n",
        timestamp, data
    )
}
