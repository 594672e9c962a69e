//! Ask command implementation (line mode).

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use crate::research::ResearchEngine;
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the ask command.
pub async fn run_ask(query: Option<String>, model: Option<String>, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(&settings) {
        Output::warning(&format!("{}", e));
    }

    let query = match query {
        Some(q) => q,
        None => read_query()?,
    };

    let query = match preflight::check_query(&query) {
        Ok(q) => q,
        Err(e) => {
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    };

    let engine = ResearchEngine::from_settings(&settings, model.as_deref())?;

    let spinner = Output::spinner("Researching...");

    match engine.research(query).await {
        Ok(response) => {
            spinner.finish_and_clear();
            Output::research(&response);
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Research failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}

/// Prompt on stdout and read one line from stdin.
fn read_query() -> io::Result<String> {
    print!("{} ", style("What can I help you research?").bold());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input)
}
