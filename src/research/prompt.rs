//! Prompt assembly for a research run.

use crate::config::Prompts;
use std::collections::HashMap;

/// Speaker of a prior conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One turn of prior conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

/// Fully rendered prompt handed to an agent executor.
///
/// Message order is system, chat history, human query; the executor appends
/// its own scratchpad (tool calls and results) after the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchPrompt {
    pub system: String,
    pub chat_history: Vec<ChatTurn>,
    pub query: String,
}

impl ResearchPrompt {
    /// Render the system template with format instructions and an empty history.
    pub fn render(prompts: &Prompts, format_instructions: &str, query: &str) -> Self {
        let mut vars = HashMap::new();
        vars.insert(
            "format_instructions".to_string(),
            format_instructions.to_string(),
        );

        Self {
            system: prompts.render_with_custom(&prompts.research.system, &vars),
            chat_history: Vec::new(),
            query: query.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_instructions() {
        let prompt = ResearchPrompt::render(&Prompts::default(), "<<SCHEMA>>", "black holes");

        assert!(prompt.system.ends_with("<<SCHEMA>>"));
        assert!(!prompt.system.contains("{{format_instructions}}"));
        assert!(prompt.chat_history.is_empty());
        assert_eq!(prompt.query, "black holes");
    }
}
