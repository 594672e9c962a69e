//! CLI module.

pub mod commands;
mod output;
pub mod page;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Research - an AI research assistant
///
/// Sends a research question to a tool-using language model agent (web search,
/// Wikipedia, save-to-file) and returns a structured topic, summary and source list.
#[derive(Parser, Debug)]
#[command(name = "research")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Research a question from the command line
    Ask {
        /// The research question (read from stdin when omitted)
        query: Option<String>,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Start the single-page research web form
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8501")]
        port: u16,
    },

    /// Check provider credentials and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the current configuration to the config file
    Init,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_without_query() {
        let cli = Cli::parse_from(["research", "ask"]);
        assert!(matches!(cli.command, Commands::Ask { query: None, model: None }));
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::parse_from(["research", "-vv", "serve"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, 8501);
            }
            other => panic!("Expected Serve, got {:?}", other),
        }
    }
}
