//! CLI output formatting utilities.

use crate::research::ResearchResponse;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a research result.
    pub fn research(response: &ResearchResponse) {
        println!("{}", research_text(response));
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Line-mode rendering of a research result.
pub(crate) fn research_text(response: &ResearchResponse) -> String {
    let mut out = String::new();
    out.push_str(&format!("\nTopic: {}\n", response.topic));
    out.push_str(&format!("\nSummary: {}\n", response.summary));
    out.push_str("\nSources:\n");
    for source in &response.sources {
        out.push_str(&format!("- {}\n", source));
    }
    out.push_str(&format!("\nTools Used: {}", response.tools_line()));
    out
}
