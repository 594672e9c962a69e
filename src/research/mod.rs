//! Research orchestration.
//!
//! Turns a free-text query into a [`ResearchResponse`] by rendering the
//! prompt, running the agent with its tools, and parsing the answer.

mod engine;
mod prompt;
mod response;

pub use engine::ResearchEngine;
pub use prompt::{ChatTurn, ResearchPrompt, Role};
pub use response::{parse_research_response, ResearchResponse, ResponseParser};

#[cfg(test)]
pub(crate) use engine::tests::{MockExecutor, QUANTUM};
