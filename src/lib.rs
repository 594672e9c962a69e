//! Research - an AI research assistant
//!
//! Sends a free-text research question to a tool-using language model agent
//! and turns its answer into a structured [`research::ResearchResponse`].
//!
//! # Overview
//!
//! - Ask a question from the command line or through a single-page web form
//! - The agent can search the web, look things up on Wikipedia, and save notes to a file
//! - Answers come back as a topic, a summary, a source list and the tools used
//!
//! # Architecture
//!
//! - `config` - Settings and prompt templates
//! - `tools` - Tool adapters (web search, Wikipedia, save to file)
//! - `agent` - The agent executor interface and its OpenAI-compatible implementation
//! - `research` - Prompt rendering, response parsing and the shared research engine
//! - `cli` - Line-mode command and the web form server
//!
//! # Example
//!
//! ```rust,no_run
//! use research::config::Settings;
//! use research::research::ResearchEngine;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let engine = ResearchEngine::from_settings(&settings, None)?;
//!
//!     let response = engine.research("quantum computing basics").await?;
//!     println!("{}: {}", response.topic, response.summary);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod research;
pub mod tools;

pub use error::{ResearchError, Result};
